//! Records-to-tree conversion.
//!
//! A JSON list of flat records is grouped by the configured nesting levels
//! into a [`NodeTree`], then exported as nested JSON objects whose leaves
//! hold the remaining attributes of each record. The whole output is
//! built before it is returned.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::{NestingLevels, NodeKey, Record, describe_values};
use crate::error::{ConvertError, Result};
use crate::tree::{NodeId, NodeTree};

/// Default number of spaces used to indent exported JSON.
pub const EXPORT_JSON_INDENT: usize = 2;

/// Options controlling how a tree is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Spaces per indentation level. Zero still emits one item per line.
    pub indent: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            indent: EXPORT_JSON_INDENT,
        }
    }
}

/// Converts JSON lists of records into a tree grouped by record attributes.
#[derive(Debug, Clone)]
pub struct RecordsToTreeConverter {
    levels: NestingLevels,
    options: ExportOptions,
    tree: NodeTree,
}

impl RecordsToTreeConverter {
    pub fn new(levels: NestingLevels) -> Self {
        Self::with_options(levels, ExportOptions::default())
    }

    pub fn with_options(levels: NestingLevels, options: ExportOptions) -> Self {
        Self {
            levels,
            options,
            tree: NodeTree::new(),
        }
    }

    pub const fn levels(&self) -> &NestingLevels {
        &self.levels
    }

    /// The current tree. Holds only the root until a tree is created.
    pub const fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Check that a tree can be built from `data`.
    ///
    /// Data must be a non-empty list of objects, each carrying every
    /// nesting level. Records lacking attributes are logged one by one
    /// and reported together.
    pub fn validate_input(&self, data: &Value) -> Result<()> {
        let records = as_records(data)?;

        let mut missing_count = 0;
        for record in records {
            let missing = self.levels.missing_in(record);
            if !missing.is_empty() {
                missing_count += 1;
                warn!(
                    target: "nest.convert",
                    record = %describe_values(record),
                    missing = ?missing,
                    "Elements missing for record"
                );
            }
        }

        if missing_count > 0 {
            return Err(ConvertError::DataAttributeMissing {
                count: missing_count,
            });
        }
        Ok(())
    }

    /// Parse `input` as JSON and build a tree from it.
    pub fn create_tree(&mut self, input: &str) -> Result<()> {
        let data: Value = serde_json::from_str(input)?;
        self.create_tree_from_value(&data)
    }

    /// Build a tree from already parsed JSON.
    ///
    /// The new tree replaces the current one only if every record was
    /// inserted; on error the previous tree is left untouched.
    pub fn create_tree_from_value(&mut self, data: &Value) -> Result<()> {
        self.validate_input(data)?;
        let records = as_records(data)?;

        let mut tree = NodeTree::new();
        let root = tree.root();

        for record in &records {
            let leaf = build_branch(&mut tree, self.levels.as_slice(), root, record)?;
            tree.set_values(leaf, vec![self.levels.remaining(record)])?;
        }

        debug!(
            target: "nest.convert",
            records = records.len(),
            nodes = tree.len(),
            levels = %self.levels,
            "Tree created"
        );

        self.tree = tree;
        Ok(())
    }

    /// Export the tree as nested JSON objects with sorted keys.
    pub fn export_tree(&self) -> Result<Value> {
        if self.tree.is_empty() {
            return Err(ConvertError::NoTreeCreated);
        }
        Ok(self.export_layer(self.tree.root()))
    }

    /// Export the tree as indented JSON text.
    pub fn export_json(&self) -> Result<String> {
        let value = self.export_tree()?;

        let indent = vec![b' '; self.options.indent];
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
        value.serialize(&mut serializer)?;

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Render the tree as text, one node per line.
    pub fn render_tree(&self) -> Result<String> {
        if self.tree.is_empty() {
            return Err(ConvertError::NoTreeCreated);
        }
        Ok(self.tree.render())
    }

    fn export_layer(&self, id: NodeId) -> Value {
        let Some(node) = self.tree.get(id) else {
            return Value::Null;
        };

        if node.is_leaf() {
            return Value::Array(node.values().iter().cloned().map(Value::Object).collect());
        }

        // Sort explicitly so the order holds even with serde_json's `preserve_order`.
        let mut children: Vec<(&NodeKey, NodeId)> = node
            .children()
            .iter()
            .filter_map(|child| self.tree.get(*child).map(|n| (n.key(), *child)))
            .collect();
        children.sort_by(|a, b| a.0.cmp(b.0));

        let layer: Map<String, Value> = children
            .into_iter()
            .map(|(key, child)| (key.to_string(), self.export_layer(child)))
            .collect();
        Value::Object(layer)
    }
}

fn as_records(data: &Value) -> Result<Vec<&Record>> {
    let invalid = || {
        ConvertError::InvalidDataStructure(
            "Input data should be a non-empty list of dictionaries.".to_string(),
        )
    };

    match data {
        Value::Array(items) if !items.is_empty() => items
            .iter()
            .map(|item| item.as_object().ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}

/// Insert the branch for one record below `node` and return its leaf.
///
/// Existing nodes are reused for shared prefixes. A record whose full path
/// already exists is a duplicate.
pub fn build_branch(
    tree: &mut NodeTree,
    levels: &[String],
    node: NodeId,
    record: &Record,
) -> Result<NodeId> {
    if !tree.contains(node) {
        return Err(ConvertError::MissingNode(node));
    }
    if record.is_empty() {
        return Err(ConvertError::MissingRecord);
    }
    if levels.is_empty() {
        return Err(ConvertError::MissingNestingLevels);
    }

    let mut current = node;
    for (depth, level) in levels.iter().enumerate() {
        let value = record
            .get(level)
            .ok_or(ConvertError::DataAttributeMissing { count: 1 })?;
        let key = NodeKey::from_value(level, value)?;
        let is_last = depth + 1 == levels.len();

        current = match tree.find_child(current, &key) {
            Some(_) if is_last => {
                return Err(ConvertError::DuplicateNodesFound(format!(
                    "Duplicate found at {}",
                    describe_values(record)
                )));
            }
            Some(existing) => existing,
            None => tree.add_child(current, key)?,
        };
    }

    Ok(current)
}

/// One-shot conversion of JSON text into indented tree JSON.
pub fn convert(levels: NestingLevels, input: &str, options: ExportOptions) -> Result<String> {
    let mut converter = RecordsToTreeConverter::with_options(levels, options);
    converter.create_tree(input)?;
    converter.export_json()
}
