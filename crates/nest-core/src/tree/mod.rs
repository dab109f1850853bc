//! Index-based node tree.
//!
//! Nodes live in a single arena and refer to each other by [`NodeId`], so
//! parent links never form ownership cycles. Node 0 is always the root.
//! Children keep insertion order; callers that need a stable order (export)
//! sort on the way out.

mod render;

use std::collections::HashMap;
use std::fmt;

use crate::domain::{NodeKey, Record};
use crate::error::{ConvertError, Result};

/// Name of the root node, visible in node paths.
pub const ROOT_NAME: &str = "root";

/// Position of a node in its [`NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single tree node.
#[derive(Debug, Clone)]
pub struct Node {
    key: NodeKey,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    values: Vec<Record>,
}

impl Node {
    pub const fn key(&self) -> &NodeKey {
        &self.key
    }

    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Records attached to a leaf. Empty for inner nodes.
    pub fn values(&self) -> &[Record] {
        &self.values
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena holding every node of one tree.
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: Vec<Node>,
    /// (parent, key) -> child, for constant-time sibling lookup.
    index: HashMap<(NodeId, NodeKey), NodeId>,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                key: NodeKey::from(ROOT_NAME),
                parent: None,
                children: Vec::new(),
                values: Vec::new(),
            }],
            index: HashMap::new(),
        }
    }

    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(ConvertError::MissingNode(id))
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn is_leaf(&self, id: NodeId) -> Result<bool> {
        Ok(self.node(id)?.is_leaf())
    }

    /// Find the child of `parent` with the given key.
    pub fn find_child(&self, parent: NodeId, key: &NodeKey) -> Option<NodeId> {
        self.index.get(&(parent, key.clone())).copied()
    }

    /// Append a new child under `parent`.
    ///
    /// Sibling keys are unique: adding a key that already exists under
    /// `parent` is reported as a duplicate.
    pub fn add_child(&mut self, parent: NodeId, key: NodeKey) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(ConvertError::MissingNode(parent));
        }
        if self.find_child(parent, &key).is_some() {
            return Err(ConvertError::DuplicateNodesFound(format!(
                "Duplicate found in the children of {}",
                self.path(parent)?
            )));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key: key.clone(),
            parent: Some(parent),
            children: Vec::new(),
            values: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        self.index.insert((parent, key), id);
        Ok(id)
    }

    /// Replace the records attached to a node.
    pub fn set_values(&mut self, id: NodeId, values: Vec<Record>) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(ConvertError::MissingNode(id))?;
        node.values = values;
        Ok(())
    }

    /// Absolute path of a node, e.g. `/root/EUR/FR/Paris`.
    pub fn path(&self, id: NodeId) -> Result<String> {
        let mut keys = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            keys.push(node.key.as_str());
            current = node.parent;
        }

        let mut path = String::new();
        for key in keys.iter().rev() {
            path.push('/');
            path.push_str(key);
        }
        Ok(path)
    }

    /// Depth of a node; the root is at depth 0.
    pub fn depth(&self, id: NodeId) -> Result<usize> {
        let mut depth = 0;
        let mut current = self.node(id)?.parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent)?.parent;
        }
        Ok(depth)
    }

    /// Ids of all leaves, in depth-first insertion order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.is_leaf() {
                if id != self.root() {
                    leaves.push(id);
                }
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        leaves
    }
}
