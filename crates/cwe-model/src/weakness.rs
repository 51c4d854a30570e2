//! Weakness record and the tabular column schema.
//!
//! Field order follows the column order of the upstream CSV downloads. Every
//! text field is passed through untouched: the `::`-delimited blobs
//! (related weaknesses, mitigations, taxonomy mappings, ...) are not parsed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Column of a CWE tabular file, in upstream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaknessColumn {
    CweId,
    Name,
    WeaknessAbstraction,
    Status,
    Description,
    ExtendedDescription,
    RelatedWeaknesses,
    WeaknessOrdinalities,
    ApplicablePlatforms,
    BackgroundDetails,
    AlternateTerms,
    ModesOfIntroduction,
    ExploitationFactors,
    LikelihoodOfExploit,
    CommonConsequences,
    DetectionMethods,
    PotentialMitigations,
    ObservedExamples,
    FunctionalAreas,
    AffectedResources,
    TaxonomyMappings,
    RelatedAttackPatterns,
    Notes,
}

impl WeaknessColumn {
    /// All columns in upstream order.
    pub const ALL: [WeaknessColumn; 23] = [
        Self::CweId,
        Self::Name,
        Self::WeaknessAbstraction,
        Self::Status,
        Self::Description,
        Self::ExtendedDescription,
        Self::RelatedWeaknesses,
        Self::WeaknessOrdinalities,
        Self::ApplicablePlatforms,
        Self::BackgroundDetails,
        Self::AlternateTerms,
        Self::ModesOfIntroduction,
        Self::ExploitationFactors,
        Self::LikelihoodOfExploit,
        Self::CommonConsequences,
        Self::DetectionMethods,
        Self::PotentialMitigations,
        Self::ObservedExamples,
        Self::FunctionalAreas,
        Self::AffectedResources,
        Self::TaxonomyMappings,
        Self::RelatedAttackPatterns,
        Self::Notes,
    ];

    /// Header text as it appears in the CSV files.
    pub const fn header(&self) -> &'static str {
        match self {
            Self::CweId => "CWE-ID",
            Self::Name => "Name",
            Self::WeaknessAbstraction => "Weakness Abstraction",
            Self::Status => "Status",
            Self::Description => "Description",
            Self::ExtendedDescription => "Extended Description",
            Self::RelatedWeaknesses => "Related Weaknesses",
            Self::WeaknessOrdinalities => "Weakness Ordinalities",
            Self::ApplicablePlatforms => "Applicable Platforms",
            Self::BackgroundDetails => "Background Details",
            Self::AlternateTerms => "Alternate Terms",
            Self::ModesOfIntroduction => "Modes Of Introduction",
            Self::ExploitationFactors => "Exploitation Factors",
            Self::LikelihoodOfExploit => "Likelihood of Exploit",
            Self::CommonConsequences => "Common Consequences",
            Self::DetectionMethods => "Detection Methods",
            Self::PotentialMitigations => "Potential Mitigations",
            Self::ObservedExamples => "Observed Examples",
            Self::FunctionalAreas => "Functional Areas",
            Self::AffectedResources => "Affected Resources",
            Self::TaxonomyMappings => "Taxonomy Mappings",
            Self::RelatedAttackPatterns => "Related Attack Patterns",
            Self::Notes => "Notes",
        }
    }

    /// Match a header exactly. Headers are case sensitive upstream.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.header() == header)
    }
}

impl fmt::Display for WeaknessColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Header that is not part of the weakness schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weakness column: {0}")]
pub struct UnknownColumn(pub String);

impl FromStr for WeaknessColumn {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_header(s).ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

/// One CWE catalog entry.
///
/// Records from the tabular sources always carry `weakness_abstraction`
/// (possibly an empty string). Records resolved from the XML categories and
/// views have no abstraction tier and only `id`, `name`, `status` and
/// `description` filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weakness {
    pub id: String,
    pub name: String,
    pub weakness_abstraction: Option<String>,
    pub status: String,
    pub description: String,
    pub extended_description: String,
    pub related_weaknesses: String,
    pub weakness_ordinalities: String,
    pub applicable_platforms: String,
    pub background_details: String,
    pub alternate_terms: String,
    pub modes_of_introduction: String,
    pub exploitation_factors: String,
    pub likelihood_of_exploit: String,
    pub common_consequences: String,
    pub detection_methods: String,
    pub potential_mitigations: String,
    pub observed_examples: String,
    pub functional_areas: String,
    pub affected_resources: String,
    pub taxonomy_mappings: String,
    pub related_attack_patterns: String,
    pub notes: String,
}

impl Weakness {
    /// Cell value for `column`. `None` only for an absent abstraction.
    pub fn get(&self, column: WeaknessColumn) -> Option<&str> {
        match column {
            WeaknessColumn::WeaknessAbstraction => self.weakness_abstraction.as_deref(),
            other => self.text_field(other).map(String::as_str),
        }
    }

    /// Store `value` verbatim into `column`.
    pub fn set(&mut self, column: WeaknessColumn, value: impl Into<String>) {
        let value = value.into();
        match column {
            WeaknessColumn::WeaknessAbstraction => self.weakness_abstraction = Some(value),
            other => {
                if let Some(field) = self.text_field_mut(other) {
                    *field = value;
                }
            }
        }
    }

    /// Values in upstream column order, absent abstraction rendered empty.
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        WeaknessColumn::ALL
            .into_iter()
            .map(|column| self.get(column).unwrap_or(""))
    }

    fn text_field(&self, column: WeaknessColumn) -> Option<&String> {
        let field = match column {
            WeaknessColumn::CweId => &self.id,
            WeaknessColumn::Name => &self.name,
            WeaknessColumn::WeaknessAbstraction => return None,
            WeaknessColumn::Status => &self.status,
            WeaknessColumn::Description => &self.description,
            WeaknessColumn::ExtendedDescription => &self.extended_description,
            WeaknessColumn::RelatedWeaknesses => &self.related_weaknesses,
            WeaknessColumn::WeaknessOrdinalities => &self.weakness_ordinalities,
            WeaknessColumn::ApplicablePlatforms => &self.applicable_platforms,
            WeaknessColumn::BackgroundDetails => &self.background_details,
            WeaknessColumn::AlternateTerms => &self.alternate_terms,
            WeaknessColumn::ModesOfIntroduction => &self.modes_of_introduction,
            WeaknessColumn::ExploitationFactors => &self.exploitation_factors,
            WeaknessColumn::LikelihoodOfExploit => &self.likelihood_of_exploit,
            WeaknessColumn::CommonConsequences => &self.common_consequences,
            WeaknessColumn::DetectionMethods => &self.detection_methods,
            WeaknessColumn::PotentialMitigations => &self.potential_mitigations,
            WeaknessColumn::ObservedExamples => &self.observed_examples,
            WeaknessColumn::FunctionalAreas => &self.functional_areas,
            WeaknessColumn::AffectedResources => &self.affected_resources,
            WeaknessColumn::TaxonomyMappings => &self.taxonomy_mappings,
            WeaknessColumn::RelatedAttackPatterns => &self.related_attack_patterns,
            WeaknessColumn::Notes => &self.notes,
        };
        Some(field)
    }

    fn text_field_mut(&mut self, column: WeaknessColumn) -> Option<&mut String> {
        let field = match column {
            WeaknessColumn::CweId => &mut self.id,
            WeaknessColumn::Name => &mut self.name,
            WeaknessColumn::WeaknessAbstraction => return None,
            WeaknessColumn::Status => &mut self.status,
            WeaknessColumn::Description => &mut self.description,
            WeaknessColumn::ExtendedDescription => &mut self.extended_description,
            WeaknessColumn::RelatedWeaknesses => &mut self.related_weaknesses,
            WeaknessColumn::WeaknessOrdinalities => &mut self.weakness_ordinalities,
            WeaknessColumn::ApplicablePlatforms => &mut self.applicable_platforms,
            WeaknessColumn::BackgroundDetails => &mut self.background_details,
            WeaknessColumn::AlternateTerms => &mut self.alternate_terms,
            WeaknessColumn::ModesOfIntroduction => &mut self.modes_of_introduction,
            WeaknessColumn::ExploitationFactors => &mut self.exploitation_factors,
            WeaknessColumn::LikelihoodOfExploit => &mut self.likelihood_of_exploit,
            WeaknessColumn::CommonConsequences => &mut self.common_consequences,
            WeaknessColumn::DetectionMethods => &mut self.detection_methods,
            WeaknessColumn::PotentialMitigations => &mut self.potential_mitigations,
            WeaknessColumn::ObservedExamples => &mut self.observed_examples,
            WeaknessColumn::FunctionalAreas => &mut self.functional_areas,
            WeaknessColumn::AffectedResources => &mut self.affected_resources,
            WeaknessColumn::TaxonomyMappings => &mut self.taxonomy_mappings,
            WeaknessColumn::RelatedAttackPatterns => &mut self.related_attack_patterns,
            WeaknessColumn::Notes => &mut self.notes,
        };
        Some(field)
    }
}
