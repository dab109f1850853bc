//! Plain-text rendering of a [`NodeTree`].

use std::fmt::Write as _;

use super::{NodeId, NodeTree};

impl NodeTree {
    /// Render the tree one node per line.
    ///
    /// ```text
    /// Node('/root')
    /// └── Node('/root/EUR')
    ///     ├── Node('/root/EUR/Paris', values=[{"amount":20}])
    ///     └── Node('/root/EUR/Lyon', values=[{"amount":11.4}])
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root(), "", "", &mut out);
        out
    }

    fn render_node(&self, id: NodeId, marker: &str, guide: &str, out: &mut String) {
        let node = &self.nodes[id.0];
        // Node ids handed out by this arena are always valid.
        let path = self.path(id).unwrap_or_default();

        let _ = write!(out, "{guide}{marker}Node('{path}'");
        if !node.values.is_empty() {
            let values = serde_json::to_string(&node.values).unwrap_or_default();
            let _ = write!(out, ", values={values}");
        }
        out.push_str(")\n");

        let child_guide = match marker {
            "" => String::new(),
            "└── " => format!("{guide}    "),
            _ => format!("{guide}│   "),
        };

        let last = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate() {
            let child_marker = if i == last { "└── " } else { "├── " };
            self.render_node(*child, child_marker, &child_guide, out);
        }
    }
}
