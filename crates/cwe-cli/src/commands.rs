use anyhow::{Context, Result};
use cwe_standards::{Catalog, CweDatabase};
use tracing::debug;

use cwe_cli::output::{catalog_table, subset_table, to_json, weakness_table};

use crate::cli::{Cli, GetArgs, ListArgs, MemberArgs, SubsetsArgs};

/// Engine for the catalog selected on the command line.
pub fn open_database(cli: &Cli) -> Result<CweDatabase> {
    let catalog = if let Some(path) = &cli.catalog {
        Catalog::from_toml_file(path)
            .with_context(|| format!("load catalog {}", path.display()))?
    } else if let Some(dir) = &cli.data_dir {
        Catalog::builtin(dir)
    } else {
        Catalog::load_default()
    };
    debug!(
        subsets = catalog.len(),
        xml = %catalog.xml_file().display(),
        "Catalog selected"
    );
    Ok(CweDatabase::new(catalog))
}

pub fn run_get(db: &CweDatabase, args: &GetArgs) -> Result<()> {
    let weakness = db
        .get(args.id.as_str())
        .with_context(|| format!("look up {}", args.id))?;
    if args.json {
        println!("{}", to_json(&weakness)?);
    } else {
        println!("{}", weakness_table(&weakness));
    }
    Ok(())
}

/// Prints and returns whether the identifier belongs to the subset.
pub fn run_member(db: &CweDatabase, args: &MemberArgs) -> Result<bool> {
    let member = db
        .is_member(&args.subset, args.id.as_str())
        .with_context(|| format!("check {} in {}", args.id, args.subset))?;
    println!("{member}");
    Ok(member)
}

pub fn run_list(db: &CweDatabase, args: &ListArgs) -> Result<()> {
    let weaknesses = db
        .all_of_subset(&args.subset)
        .with_context(|| format!("list {}", args.subset))?;
    if args.json {
        println!("{}", to_json(&weaknesses)?);
    } else {
        println!("{}", subset_table(&weaknesses));
    }
    Ok(())
}

pub fn run_subsets(db: &CweDatabase, args: &SubsetsArgs) -> Result<()> {
    let catalog = db.catalog();
    let table = match args.kind {
        Some(kind) => catalog_table(catalog.entries_of_kind(kind)),
        None => catalog_table(catalog.entries()),
    };
    println!("{table}");
    Ok(())
}
