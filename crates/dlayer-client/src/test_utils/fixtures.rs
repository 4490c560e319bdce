//! Sample component trees
//!
//! Small hand-built trees covering the shapes the renderer has to cope with:
//! the row/slider/checkbox sample, shared children, dangling child ids.

use serde_json::json;

use dlayer_core::{ComponentNode, ComponentTree, ExtensionTree};

/// Extension name used by [`sample_tree`]
pub const SAMPLE_EXTENSION: &str = "sample-ext";

/// Build a single-extension tree from loose nodes.
///
/// Each node's `parent_id` is filled in from the children lists.
pub fn tree_with(extension: &str, roots: &[&str], nodes: Vec<ComponentNode>) -> ComponentTree {
    let mut ext = ExtensionTree {
        root_nodes: roots.iter().map(|r| r.to_string()).collect(),
        supported: Some(true),
        ..Default::default()
    };

    let mut nodes = nodes;
    let parents: Vec<(String, Vec<String>)> = nodes
        .iter()
        .map(|n| (n.id.clone(), n.children.clone()))
        .collect();
    for node in nodes.iter_mut() {
        if node.parent_id.is_none() {
            node.parent_id = parents
                .iter()
                .find(|(_, children)| children.contains(&node.id))
                .map(|(parent, _)| parent.clone());
        }
    }

    for node in nodes {
        if !ext.component_types.contains(&node.node_type) {
            ext.component_types.push(node.node_type.clone());
        }
        ext.components.insert(node.id.clone(), node);
    }
    ext.component_count = ext.components.len();

    let mut tree = ComponentTree::default();
    tree.extensions.insert(extension.to_string(), ext);
    tree.total_extensions = 1;
    tree
}

/// `r` (row) holding slider `a` then checkbox `b`
pub fn sample_tree() -> ComponentTree {
    tree_with(
        SAMPLE_EXTENSION,
        &["r"],
        vec![
            ComponentNode::new("r", "row").with_children(["a", "b"]),
            ComponentNode::new("a", "slider")
                .with_prop("label", "Scale")
                .with_prop("minimum", 1)
                .with_prop("maximum", 10)
                .with_prop("step", 1)
                .with_prop("value", 5),
            ComponentNode::new("b", "checkbox")
                .with_prop("label", "Enable")
                .with_prop("value", true),
        ],
    )
}

/// [`sample_tree`] as the backend would serve it from `component-tree`
pub fn sample_tree_json() -> String {
    json!({
        "active": true,
        "tree": sample_tree(),
    })
    .to_string()
}

/// Two columns that both list `shared` as a child
pub fn shared_child_tree() -> ComponentTree {
    tree_with(
        SAMPLE_EXTENSION,
        &["root"],
        vec![
            ComponentNode::new("root", "blocks").with_children(["left", "right"]),
            ComponentNode::new("left", "column").with_children(["shared"]),
            ComponentNode::new("right", "column").with_children(["shared", "own"]),
            ComponentNode::new("shared", "button").with_prop("label", "Generate"),
            ComponentNode::new("own", "number").with_prop("label", "Seed"),
        ],
    )
}
