// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::geometry::{Point, Rect, Size};

use super::ids::{GroupId, NodeId};

/// A labeled rectangle on the canvas.
///
/// Only persisted fields live here. Selection and hover belong to the controller's view state.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    label: String,
    position: Point,
    size: Size,
    z_index: i64,
    collapsed: bool,
    group_id: Option<GroupId>,
    tags: BTreeSet<String>,
    notes: Vec<String>,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id,
            label: label.into(),
            position,
            size,
            z_index: 0,
            collapsed: false,
            group_id: None,
            tags: BTreeSet::new(),
            notes: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn z_index(&self) -> i64 {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: i64) {
        self.z_index = z_index;
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }

    pub fn set_group_id(&mut self, group_id: Option<GroupId>) {
        self.group_id = group_id;
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut BTreeSet<String> {
        &mut self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut Vec<String> {
        &mut self.notes
    }
}

/// Sizing rules for new and relabeled nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSizing {
    pub default_size: Size,
    pub auto_fit: bool,
    pub char_width: f64,
    pub padding: f64,
}

impl Default for NodeSizing {
    fn default() -> Self {
        Self {
            default_size: Size::new(150.0, 50.0),
            auto_fit: true,
            char_width: 8.0,
            padding: 12.0,
        }
    }
}

impl NodeSizing {
    /// Size for a node showing `label`. Auto-fit only ever widens past the default.
    pub fn size_for(&self, label: &str) -> Size {
        if !self.auto_fit {
            return self.default_size;
        }
        let chars = label.chars().count() as f64;
        let fitted = chars * self.char_width + 2.0 * self.padding;
        Size::new(
            fitted.max(self.default_size.width),
            self.default_size.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::NodeSizing;
    use crate::geometry::Size;

    #[test]
    fn auto_fit_widens_long_labels_only() {
        let sizing = NodeSizing::default();
        assert_eq!(sizing.size_for("short"), Size::new(150.0, 50.0));
        let label = "a label that is clearly longer than the box";
        assert_eq!(
            sizing.size_for(label),
            Size::new(label.len() as f64 * 8.0 + 24.0, 50.0)
        );
    }

    #[test]
    fn disabled_auto_fit_keeps_default() {
        let sizing = NodeSizing {
            auto_fit: false,
            ..NodeSizing::default()
        };
        assert_eq!(sizing.size_for(&"x".repeat(100)), Size::new(150.0, 50.0));
    }
}
