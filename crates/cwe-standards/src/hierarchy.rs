//! Hierarchical (XML) source reader.
//!
//! The catalog document has the shape
//!
//! ```text
//! <Weakness_Catalog>
//!   <Weaknesses>...</Weaknesses>           section 0, not searched
//!   <Categories>                           section 1
//!     <Category ID="399" Name="..." Status="Draft">
//!       <Summary>description text</Summary>
//!       ...
//!   <Views>                                section 2
//!     <View ID="1008" Name="..." Status="Incomplete">
//!       <Objective>description text</Objective>
//!       ...
//!   <External_References>...               section 3, not searched
//! ```
//!
//! Sections are addressed by position, not by tag name. A node's description
//! is the text that opens its first child element, up to that element's own
//! first child. Line breaks in literal text and CDATA are normalized to `\n`;
//! character references such as `&#13;` are kept as written.

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use cwe_model::{CweId, Weakness};
use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::{CweError, Result};

/// Positions of the top-level sections searched for categories and views.
pub const SEARCHED_SECTIONS: [usize; 2] = [1, 2];

/// A category or view node, reduced to what a lookup needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedNode {
    /// Position of the owning top-level section.
    pub section: usize,
    pub id: String,
    pub name: Option<String>,
    pub status: Option<String>,
    /// Text of the first child element; `None` if the node has no children.
    pub summary: Option<String>,
}

impl TaggedNode {
    fn into_weakness(self, id: &CweId, path: &Path) -> Result<Weakness> {
        let summary = self.summary.ok_or_else(|| CweError::MissingDescription {
            id: id.clone(),
            path: path.to_path_buf(),
        })?;
        Ok(Weakness {
            id: id.as_str().to_string(),
            name: self.name.unwrap_or_default(),
            weakness_abstraction: None,
            status: self.status.unwrap_or_default(),
            description: summary,
            ..Weakness::default()
        })
    }
}

/// Categories and views of one XML document, in document order.
#[derive(Debug, Clone)]
pub struct HierarchyIndex {
    path: PathBuf,
    nodes: Vec<TaggedNode>,
}

impl HierarchyIndex {
    /// Parse the document at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, is not well-formed XML, or its
    /// root has fewer than three top-level sections.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| CweError::io(path, e))?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        reader.config_mut().trim_text(false);

        let mut builder = IndexBuilder::new(path);
        let mut buf = Vec::new();
        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| CweError::xml(path, e))?;
            match event {
                Event::Start(e) => {
                    builder.open(&e, false)?;
                    builder.depth += 1;
                }
                Event::Empty(e) => builder.open(&e, true)?,
                Event::End(_) => {
                    builder.depth = builder.depth.saturating_sub(1);
                    builder.close();
                }
                Event::Text(e) if builder.capturing() => {
                    let text = e.decode().map_err(|e| builder.text_error(e))?;
                    builder.push_text(&normalize_line_breaks(&text));
                }
                Event::CData(e) if builder.capturing() => {
                    let text = e.decode().map_err(|e| builder.text_error(e))?;
                    builder.push_text(&normalize_line_breaks(&text));
                }
                Event::GeneralRef(e) if builder.capturing() => {
                    let text = builder.resolve_reference(&e)?;
                    builder.push_text(&text);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        builder.finish()
    }

    /// The first node whose `ID` equals `id`, searching section 1 before
    /// section 2.
    pub fn node(&self, id: &CweId) -> Option<&TaggedNode> {
        self.nodes.iter().find(|node| node.id == id.as_str())
    }

    /// Resolve `id` to a structural record.
    ///
    /// # Errors
    ///
    /// Returns [`CweError::MissingDescription`] if the matched node has no
    /// child element to take the description from.
    pub fn find(&self, id: &CweId) -> Result<Option<Weakness>> {
        self.node(id)
            .cloned()
            .map(|node| node.into_weakness(id, &self.path))
            .transpose()
    }
}

/// XML end-of-line handling: `\r\n` and a lone `\r` both become `\n`.
fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Parse `path` and resolve `id` in one go, without keeping the index.
///
/// # Errors
///
/// See [`HierarchyIndex::load`] and [`HierarchyIndex::find`].
pub fn find_by_tag(path: &Path, id: &CweId) -> Result<Option<Weakness>> {
    HierarchyIndex::load(path)?.find(id)
}

#[derive(Debug)]
struct NodeBuilder {
    node: TaggedNode,
    seen_child: bool,
    capturing: bool,
}

/// Streaming state. `depth` counts open elements: the root opens at 0,
/// sections at 1, nodes at 2, their children at 3.
struct IndexBuilder<'a> {
    path: &'a Path,
    depth: usize,
    section_count: usize,
    section: Option<usize>,
    current: Option<NodeBuilder>,
    nodes: Vec<TaggedNode>,
}

impl<'a> IndexBuilder<'a> {
    fn new(path: &'a Path) -> Self {
        Self {
            path,
            depth: 0,
            section_count: 0,
            section: None,
            current: None,
            nodes: Vec::new(),
        }
    }

    fn open(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<()> {
        match self.depth {
            0 => {}
            1 => {
                let index = self.section_count;
                self.section_count += 1;
                self.section = SEARCHED_SECTIONS.contains(&index).then_some(index);
            }
            2 => {
                let Some(section) = self.section else {
                    return Ok(());
                };
                let Some(id) = self.attribute(e, "ID")? else {
                    return Ok(());
                };
                let node = TaggedNode {
                    section,
                    id,
                    name: self.attribute(e, "Name")?,
                    status: self.attribute(e, "Status")?,
                    summary: None,
                };
                if empty {
                    self.nodes.push(node);
                } else {
                    self.current = Some(NodeBuilder {
                        node,
                        seen_child: false,
                        capturing: false,
                    });
                }
            }
            3 => {
                if let Some(current) = self.current.as_mut()
                    && !current.seen_child
                {
                    current.seen_child = true;
                    current.node.summary = Some(String::new());
                    current.capturing = !empty;
                }
            }
            _ => {
                if let Some(current) = self.current.as_mut() {
                    current.capturing = false;
                }
            }
        }
        Ok(())
    }

    /// Called after `depth` has been decremented for an end tag.
    fn close(&mut self) {
        match self.depth {
            1 => self.section = None,
            2 => {
                if let Some(current) = self.current.take() {
                    self.nodes.push(current.node);
                }
            }
            3 => {
                if let Some(current) = self.current.as_mut() {
                    current.capturing = false;
                }
            }
            _ => {}
        }
    }

    fn capturing(&self) -> bool {
        self.current.as_ref().is_some_and(|current| current.capturing)
    }

    fn push_text(&mut self, text: &str) {
        if let Some(summary) = self
            .current
            .as_mut()
            .and_then(|current| current.node.summary.as_mut())
        {
            summary.push_str(text);
        }
    }

    fn attribute(&self, e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
        let Some(attr) = e
            .try_get_attribute(name)
            .map_err(|err| CweError::xml(self.path, err.into()))?
        else {
            return Ok(None);
        };
        let value = attr
            .unescape_value()
            .map_err(|err| CweError::xml(self.path, err))?;
        Ok(Some(value.into_owned()))
    }

    fn resolve_reference(&self, e: &BytesRef<'_>) -> Result<String> {
        if let Some(ch) = e
            .resolve_char_ref()
            .map_err(|err| CweError::xml(self.path, err))?
        {
            return Ok(ch.to_string());
        }
        let name = e.decode().map_err(|err| self.text_error(err))?;
        quick_xml::escape::resolve_predefined_entity(&name)
            .map(str::to_string)
            .ok_or_else(|| CweError::XmlText {
                path: self.path.to_path_buf(),
                message: format!("unknown entity &{name};"),
            })
    }

    fn text_error(&self, err: impl std::fmt::Display) -> CweError {
        CweError::XmlText {
            path: self.path.to_path_buf(),
            message: err.to_string(),
        }
    }

    fn finish(self) -> Result<HierarchyIndex> {
        if let Some(missing) = SEARCHED_SECTIONS
            .into_iter()
            .find(|index| *index >= self.section_count)
        {
            return Err(CweError::MissingSection {
                index: missing,
                path: self.path.to_path_buf(),
            });
        }

        let count = |section: usize| self.nodes.iter().filter(|n| n.section == section).count();
        tracing::info!(
            file = %self.path.display(),
            categories = count(SEARCHED_SECTIONS[0]),
            views = count(SEARCHED_SECTIONS[1]),
            "Indexed hierarchical catalog"
        );

        Ok(HierarchyIndex {
            path: self.path.to_path_buf(),
            nodes: self.nodes,
        })
    }
}
