//! Extension compatibility view
//!
//! Groups the rendered control tree by the extension that contributed each
//! root, with one collapsible section per extension. All sections share a
//! single render pass, so a node reachable from two extensions shows up once,
//! under whichever extension sorts first.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use dlayer_core::{Compatibility, ComponentTree, ExtensionInfo};

use crate::renderer::{render_extension, BuilderRegistry, ControlId, ControlTree};

pub const STATUS_LOADING: &str = "Loading...";
pub const STATUS_EMPTY: &str = "No extension components found.";
pub const STATUS_DISABLED: &str = "Translation Layer is disabled in startup settings.";
pub const STATUS_INACTIVE: &str = "Translation layer not active";

/// `"{icon} {name} ({label} - {count} components)"`
pub fn header_text(name: &str, compatibility: Compatibility, component_count: usize) -> String {
    format!(
        "{} {} ({} - {} components)",
        compatibility.icon(),
        name,
        compatibility.label(),
        component_count
    )
}

/// Status line after a successful load
pub fn loaded_text(extensions: usize, components: usize) -> String {
    if extensions == 0 {
        STATUS_EMPTY.to_string()
    } else {
        format!("Loaded {extensions} extensions with {components} components")
    }
}

/// One extension's block in the view
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionSection {
    pub name: String,
    pub compatibility: Compatibility,
    pub component_count: usize,
    pub component_types: Vec<String>,
    pub unsupported_types: Vec<String>,
    /// Top-level controls rendered for this extension's roots
    pub roots: Vec<ControlId>,
    pub expanded: bool,
}

impl ExtensionSection {
    pub fn header(&self) -> String {
        header_text(&self.name, self.compatibility, self.component_count)
    }
}

/// Row of the flattened view: a section header or a control inside an
/// expanded section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRow {
    Section(usize),
    Control { id: ControlId, depth: usize },
}

/// Rendered controls plus their per-extension grouping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompatibilityView {
    pub controls: ControlTree,
    pub sections: Vec<ExtensionSection>,
}

impl CompatibilityView {
    /// Render every extension alphabetically into one control tree.
    ///
    /// Sections start collapsed.
    pub fn build(tree: &ComponentTree, registry: &BuilderRegistry) -> Self {
        let mut controls = ControlTree::new();
        let mut rendered = HashSet::new();
        let mut sections = Vec::with_capacity(tree.extensions.len());

        for (name, extension) in tree.sorted_extensions() {
            let roots = render_extension(registry, extension, &mut rendered, &mut controls);
            sections.push(ExtensionSection {
                name: name.to_string(),
                compatibility: extension.compatibility(),
                component_count: extension.component_count,
                component_types: extension.component_types.clone(),
                unsupported_types: extension.unsupported_types.clone(),
                roots,
                expanded: false,
            });
        }

        Self { controls, sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn total_components(&self) -> usize {
        self.sections.iter().map(|s| s.component_count).sum()
    }

    pub fn status_text(&self) -> String {
        loaded_text(self.sections.len(), self.total_components())
    }

    /// Expand or collapse a section; returns the new state
    pub fn toggle_section(&mut self, index: usize) -> Option<bool> {
        let section = self.sections.get_mut(index)?;
        section.expanded = !section.expanded;
        Some(section.expanded)
    }

    pub fn set_all_expanded(&mut self, expanded: bool) {
        for section in &mut self.sections {
            section.expanded = expanded;
        }
    }

    /// Section headers interleaved with the visible controls of expanded
    /// sections. Control depth starts at 1 under a header.
    pub fn rows(&self) -> Vec<ViewRow> {
        let mut rows = Vec::new();
        for (index, section) in self.sections.iter().enumerate() {
            rows.push(ViewRow::Section(index));
            if section.expanded {
                rows.extend(
                    self.controls
                        .visible_from(&section.roots)
                        .into_iter()
                        .map(|(id, depth)| ViewRow::Control {
                            id,
                            depth: depth + 1,
                        }),
                );
            }
        }
        rows
    }

    /// Section owning a top-level or nested control
    pub fn section_of(&self, id: ControlId) -> Option<usize> {
        let mut top = id;
        while let Some(parent) = self.controls.get(top).and_then(|c| c.parent) {
            top = parent;
        }
        self.sections.iter().position(|s| s.roots.contains(&top))
    }
}

// ============================================================================
// Extensions tab
// ============================================================================

/// One installed extension as listed on the Extensions tab
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionSummary {
    pub name: String,
    pub enabled: bool,
    pub version: String,
    pub branch: String,
    pub short_hash: String,
    pub commit_time: Option<DateTime<Utc>>,
    pub remote: String,
    pub compatibility: Compatibility,
    pub component_count: usize,
    pub unsupported_types: Vec<String>,
}

impl ExtensionSummary {
    pub fn from_info(info: &ExtensionInfo) -> Self {
        Self {
            name: info.name.clone(),
            enabled: info.enabled,
            version: info.version.clone(),
            branch: info.branch.clone(),
            short_hash: info.short_hash().to_string(),
            commit_time: info.commit_time(),
            remote: info.remote.clone(),
            compatibility: info.translation_layer.compatibility(),
            component_count: info.translation_layer.component_count,
            unsupported_types: info.translation_layer.unsupported_types.clone(),
        }
    }

    /// Summaries sorted by name, case-insensitively
    pub fn from_infos(infos: &[ExtensionInfo]) -> Vec<Self> {
        let mut summaries: Vec<Self> = infos.iter().map(Self::from_info).collect();
        summaries.sort_by_key(|s| s.name.to_lowercase());
        summaries
    }

    pub fn header(&self) -> String {
        header_text(&self.name, self.compatibility, self.component_count)
    }

    /// `version @ branch (hash, date)`, skipping unknown parts
    pub fn detail(&self) -> String {
        let mut parts = Vec::new();
        if !self.version.is_empty() {
            parts.push(self.version.clone());
        }
        if !self.branch.is_empty() {
            parts.push(format!("@ {}", self.branch));
        }
        let mut commit = Vec::new();
        if !self.short_hash.is_empty() {
            commit.push(self.short_hash.clone());
        }
        if let Some(time) = self.commit_time {
            commit.push(time.format("%Y-%m-%d").to_string());
        }
        if !commit.is_empty() {
            parts.push(format!("({})", commit.join(", ")));
        }
        if !self.enabled {
            parts.push("[disabled]".to_string());
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlayer_client::test_utils::{sample_tree, tree_with, SAMPLE_EXTENSION};
    use dlayer_core::{CompatibilityInfo, ComponentNode};

    fn two_extension_tree() -> ComponentTree {
        let mut tree = tree_with(
            "zeta",
            &["z"],
            vec![
                ComponentNode::new("z", "column").with_children(["shared"]),
                ComponentNode::new("shared", "checkbox"),
            ],
        );
        let mut alpha = tree_with(
            "alpha",
            &["a", "shared"],
            vec![
                ComponentNode::new("a", "button"),
                ComponentNode::new("shared", "checkbox"),
            ],
        );
        if let Some(ext) = alpha.extensions.get_mut("alpha") {
            ext.supported = None;
            ext.unsupported_types = vec!["gallery".into()];
        }
        tree.extensions.extend(alpha.extensions);
        tree
    }

    #[test]
    fn test_header_text() {
        assert_eq!(
            header_text("ControlNet", Compatibility::Partial, 12),
            "⚠ ControlNet (Partially Supported - 12 components)"
        );
        assert_eq!(
            header_text("x", Compatibility::Supported, 1),
            "✓ x (Supported - 1 components)"
        );
    }

    #[test]
    fn test_loaded_text() {
        assert_eq!(loaded_text(0, 0), "No extension components found.");
        assert_eq!(loaded_text(2, 7), "Loaded 2 extensions with 7 components");
    }

    #[test]
    fn test_sections_sorted_and_collapsed() {
        let view = CompatibilityView::build(&two_extension_tree(), &BuilderRegistry::default());

        let names: Vec<_> = view.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(view.sections.iter().all(|s| !s.expanded));
        assert_eq!(view.sections[0].compatibility, Compatibility::Partial);
    }

    #[test]
    fn test_shared_node_goes_to_first_section() {
        let view = CompatibilityView::build(&two_extension_tree(), &BuilderRegistry::default());

        assert_eq!(view.controls.count_for_node("shared"), 1);
        assert_eq!(view.sections[0].roots.len(), 2);
        let z = view.controls.find_by_node("z").unwrap();
        assert!(view.controls.children(z).is_empty());

        let shared = view.controls.find_by_node("shared").unwrap();
        assert_eq!(view.section_of(shared), Some(0));
    }

    #[test]
    fn test_rows_follow_expansion() {
        let mut view = CompatibilityView::build(&sample_tree(), &BuilderRegistry::default());
        assert_eq!(view.rows(), vec![ViewRow::Section(0)]);

        assert_eq!(view.toggle_section(0), Some(true));
        let rows = view.rows();
        assert_eq!(rows.len(), 4);
        assert!(matches!(rows[1], ViewRow::Control { depth: 1, .. }));
        assert!(matches!(rows[2], ViewRow::Control { depth: 2, .. }));

        assert_eq!(view.toggle_section(5), None);
    }

    #[test]
    fn test_status_text_counts_components() {
        let view = CompatibilityView::build(&sample_tree(), &BuilderRegistry::default());
        assert_eq!(view.status_text(), "Loaded 1 extensions with 3 components");
        assert_eq!(view.sections[0].name, SAMPLE_EXTENSION);

        let empty = CompatibilityView::build(&ComponentTree::default(), &BuilderRegistry::default());
        assert!(empty.is_empty());
        assert_eq!(empty.status_text(), STATUS_EMPTY);
    }

    #[test]
    fn test_extension_summary() {
        let info = ExtensionInfo {
            name: "sd-webui-controlnet".into(),
            branch: "main".into(),
            commit_hash: "0123456789abcdef".into(),
            commit_date: 1_700_000_000,
            version: "1.1".into(),
            enabled: false,
            translation_layer: CompatibilityInfo {
                supported: Some(false),
                component_count: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        let summary = ExtensionSummary::from_info(&info);

        assert_eq!(summary.compatibility, Compatibility::Unsupported);
        assert_eq!(
            summary.header(),
            "✗ sd-webui-controlnet (Unsupported - 4 components)"
        );
        assert_eq!(
            summary.detail(),
            "1.1 @ main (01234567, 2023-11-14) [disabled]"
        );
    }

    #[test]
    fn test_summaries_sorted_case_insensitive() {
        let infos = vec![
            ExtensionInfo {
                name: "beta".into(),
                ..Default::default()
            },
            ExtensionInfo {
                name: "Alpha".into(),
                ..Default::default()
            },
        ];
        let names: Vec<_> = ExtensionSummary::from_infos(&infos)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "beta"]);
    }
}
