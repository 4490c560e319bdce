//! Component renderer
//!
//! Walks a fetched component graph and materializes one control per node id.
//! The backend's `children` lists are not guaranteed to form a tree: an id can
//! be reachable from several parents, or listed twice by one parent. The walk
//! is therefore a depth-first, pre-order DAG visit over an explicit stack,
//! memoized by id through a caller-owned `rendered` set.
//!
//! ```text
//! ComponentTree ──render_tree()──▶ ControlTree ──edit──▶ Binding ──▶ set_value / trigger_event
//! ```

pub mod binding;
pub mod builders;
pub mod control;


use std::collections::{HashMap, HashSet};

use dlayer_core::prelude::*;
use dlayer_core::{ComponentNode, ComponentTree, ExtensionTree};

pub use binding::{number_value, Binding};
pub use builders::{BuilderFn, BuilderRegistry, Built, ChildSlot};
pub use control::{Control, ControlId, ControlKind, ControlTree, Orientation};

/// Render `roots` and everything reachable from them into `out`.
///
/// - Ids already in `rendered` are skipped, so a node shared by two parents
///   is attached under whichever parent reaches it first.
/// - Ids missing from `nodes` are logged and skipped.
/// - Builder failures render that node as a placeholder; its children are
///   still visited.
///
/// Returns the controls created for `roots` themselves, in order.
pub fn render_nodes(
    registry: &BuilderRegistry,
    nodes: &HashMap<String, ComponentNode>,
    roots: &[String],
    rendered: &mut HashSet<String>,
    out: &mut ControlTree,
) -> Vec<ControlId> {
    let mut top_level = Vec::new();
    let mut stack: Vec<(&str, Option<ControlId>)> =
        roots.iter().rev().map(|id| (id.as_str(), None)).collect();

    while let Some((id, parent)) = stack.pop() {
        if rendered.contains(id) {
            debug!("Skipping {}: already rendered in this pass", id);
            continue;
        }
        let Some(node) = nodes.get(id) else {
            warn!("Skipping {}: referenced but not in the component map", id);
            continue;
        };
        rendered.insert(id.to_string());

        let Built { kind, slot } = registry.build(node);
        let control = out.push(Some(node.id.clone()), kind, node.is_interactive(), parent);
        if parent.is_none() {
            top_level.push(control);
        }

        let child_parent = match slot {
            ChildSlot::Inline => Some(control),
            ChildSlot::Panel { visible } => Some(out.push(
                None,
                ControlKind::Panel { visible },
                true,
                Some(control),
            )),
            ChildSlot::Sibling => parent,
        };

        for child in node.children.iter().rev() {
            stack.push((child.as_str(), child_parent));
        }
    }

    top_level
}

/// Render one extension's root nodes
pub fn render_extension(
    registry: &BuilderRegistry,
    extension: &ExtensionTree,
    rendered: &mut HashSet<String>,
    out: &mut ControlTree,
) -> Vec<ControlId> {
    render_nodes(
        registry,
        &extension.components,
        &extension.root_nodes,
        rendered,
        out,
    )
}

/// Render every extension (alphabetically) into a fresh control tree.
///
/// One `rendered` set spans the whole pass, so a node shared between two
/// extensions is still materialized once.
pub fn render_tree(registry: &BuilderRegistry, tree: &ComponentTree) -> ControlTree {
    let mut out = ControlTree::new();
    let mut rendered = HashSet::new();

    for (name, extension) in tree.sorted_extensions() {
        let roots = render_extension(registry, extension, &mut rendered, &mut out);
        trace!("Rendered {} root controls for {}", roots.len(), name);
    }

    debug!(
        "Rendered {} controls ({} interactive) from {} extensions",
        out.len(),
        out.interactive_count(),
        tree.extensions.len()
    );
    out
}
