//! Plotting guidelines: layered JSON documents with inheritance and properties.
//!
//! A [`Guidelines`] document is resolved in three steps:
//!
//! 1. **Combine**: the shipped default document and an optional project
//!    document are merged, the project taking priority ([`merge`]).
//! 2. **Inherit**: any mapping holding an `inherits` key is re-based on the
//!    sibling it names ([`resolve_inheritance`]).
//! 3. **Substitute**: every `@key` token in a string leaf is replaced with the
//!    matching entry of the top-level `project` mapping ([`substitute`]).

pub mod display;
pub mod inherit;
pub mod merge;
pub mod node;
pub mod substitute;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

use crate::error::{Result, ResplotError};
use crate::logging::{log_operation_end, log_operation_start};

pub use inherit::resolve_inheritance;
pub use merge::{merge, merge_trees};
pub use node::{Node, Tree};
pub use substitute::{substitute, substitute_properties};

/// Depth to which documents are merged and inheritance is resolved
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Reserved key naming the sibling a mapping inherits from
pub const INHERITS_KEY: &str = "inherits";

/// Top-level mapping holding the substitutable project properties
pub const PROJECT_KEY: &str = "project";

/// Top-level mapping holding free-form document metadata
pub const METADATA_KEY: &str = "metadata";

/// Top-level mapping of plotting function name to named styles
pub const STYLES_KEY: &str = "styles";

/// Top-level mapping of named extents
pub const EXTENTS_KEY: &str = "extents";

/// Tunables for combining and resolving documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineOptions {
    /// Maximum recursion depth for merging and inheritance
    pub max_depth: usize,
}

impl Default for GuidelineOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A guideline document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guidelines {
    tree: Tree,
}

impl Guidelines {
    /// Wrap an existing tree
    pub fn new(tree: Tree) -> Self {
        Self { tree }
    }

    /// Build from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match Node::from(value) {
            Node::Branch(tree) => Ok(Self { tree }),
            Node::Leaf(other) => Err(ResplotError::Config {
                message: format!(
                    "Guidelines must be a JSON object at the top level, found {}",
                    other
                ),
            }),
        }
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Read a JSON document from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let guidelines = Self::from_json_str(&content)?;
        debug!(
            file_path = %path.display(),
            top_level_keys = guidelines.tree.len(),
            "Read guidelines file"
        );
        Ok(guidelines)
    }

    /// Read a JSON document from disk and record its origin in `metadata.file_path`
    pub fn load(path: &Path) -> Result<Self> {
        let mut guidelines = Self::from_file(path)?;
        guidelines.set_file_path(&path.display().to_string());
        Ok(guidelines)
    }

    /// Record where the document came from, creating `metadata` when needed
    pub fn set_file_path(&mut self, file_path: &str) {
        let metadata = self
            .tree
            .entry(METADATA_KEY.to_string())
            .or_insert_with(Node::empty_branch);
        if !metadata.is_branch() {
            *metadata = Node::empty_branch();
        }
        if let Some(metadata) = metadata.as_branch_mut() {
            metadata.insert("file_path".to_string(), Node::from(file_path));
        }
    }

    /// Combine a default and a project document, the project taking priority
    pub fn combine(default: Guidelines, project: Guidelines) -> Self {
        Self::combine_with(default, project, GuidelineOptions::default())
    }

    pub fn combine_with(default: Guidelines, project: Guidelines, options: GuidelineOptions) -> Self {
        Self {
            tree: merge_trees(default.tree, project.tree, options.max_depth),
        }
    }

    /// Resolve inheritance, then substitute project properties
    pub fn finalize(self) -> Result<Self> {
        self.finalize_with(GuidelineOptions::default())
    }

    pub fn finalize_with(self, options: GuidelineOptions) -> Result<Self> {
        let start = Instant::now();
        let source = self
            .get(&[METADATA_KEY, "file_path"])
            .ok()
            .and_then(Node::as_str)
            .unwrap_or("<memory>")
            .to_string();
        log_operation_start("finalize_guidelines", &source);

        let outcome = resolve_inheritance(self.tree, options.max_depth)
            .map(|tree| Self {
                tree: substitute_properties(tree),
            });

        log_operation_end("finalize_guidelines", start, &outcome);
        outcome
    }

    /// Look up a node by path
    pub fn get(&self, path: &[&str]) -> Result<&Node> {
        let Some((first, rest)) = path.split_first() else {
            return Err(ResplotError::InvalidParameter {
                param: "path".to_string(),
                message: "Lookup path must not be empty".to_string(),
            });
        };

        let mut node = self
            .tree
            .get(*first)
            .ok_or_else(|| ResplotError::key_not_found("Key", first, self.tree.keys()))?;

        for (depth, key) in rest.iter().enumerate() {
            let tree = node.as_branch().ok_or_else(|| ResplotError::Config {
                message: format!("'{}' is not a mapping", path[..=depth].join(".")),
            })?;
            node = tree
                .get(*key)
                .ok_or_else(|| ResplotError::key_not_found("Key", key, tree.keys()))?;
        }

        Ok(node)
    }

    /// Look up a mapping by path
    pub fn get_tree(&self, path: &[&str]) -> Result<&Tree> {
        self.get(path)?.as_branch().ok_or_else(|| ResplotError::Config {
            message: format!("'{}' is not a mapping", path.join(".")),
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Convert to a plain JSON value
    pub fn to_value(&self) -> Value {
        Node::Branch(self.tree.clone()).to_value()
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.tree)?)
    }

    /// Collapsible HTML view of the document
    pub fn to_html(&self, open: bool) -> String {
        display::to_html(&self.tree, open)
    }

    /// Indented plain-text view of the document
    pub fn to_text_tree(&self) -> String {
        display::to_text_tree(&self.tree)
    }
}

impl From<Tree> for Guidelines {
    fn from(tree: Tree) -> Self {
        Self::new(tree)
    }
}
