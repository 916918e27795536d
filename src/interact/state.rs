// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::geometry::{Point, Rect, SnapGuides};
use crate::model::{ConnectionId, ConnectionKind, GroupId, Node, NodeId};

/// A selectable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SelectionItem {
    Node(NodeId),
    Connection(ConnectionId),
}

/// In-progress move of one node, plus the other selected nodes travelling with it.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub node_id: NodeId,
    pub start_position: Point,
    /// Pointer position minus node position at press time, in canvas units.
    pub pointer_offset: (f64, f64),
    pub companions: Vec<(NodeId, Point)>,
    pub moved: bool,
}

impl DragState {
    pub fn dragged_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.node_id).chain(self.companions.iter().map(|(id, _)| *id))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionDraft {
    pub source_id: NodeId,
    pub current_pointer_position: Point,
    pub kind: ConnectionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEdit {
    pub node_id: NodeId,
    pub buffer: String,
    pub original: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeState {
    pub origin: Point,
    pub current: Point,
    /// Keep the existing selection and add to it.
    pub additive: bool,
}

impl MarqueeState {
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.origin, self.current)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Dragging(DragState),
    ConnectingDraft(ConnectionDraft),
    EditingLabel(LabelEdit),
    Marquee(MarqueeState),
    /// Last pointer position in screen coordinates.
    Panning(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStyle {
    Default,
    Hover,
    Selected,
    /// An endpoint of the connection is selected.
    Highlighted,
}

/// Restricts which nodes are shown and hit-testable.
///
/// An empty set places no restriction on that dimension. A node passes the tag filter when it
/// carries at least one listed tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VisibilityFilter {
    pub tags: BTreeSet<String>,
    pub groups: BTreeSet<GroupId>,
}

impl VisibilityFilter {
    pub fn is_active(&self) -> bool {
        !self.tags.is_empty() || !self.groups.is_empty()
    }

    pub fn passes(&self, node: &Node) -> bool {
        let tag_ok = self.tags.is_empty() || node.tags().iter().any(|t| self.tags.contains(t));
        let group_ok = self.groups.is_empty()
            || node
                .group_id()
                .is_some_and(|group_id| self.groups.contains(&group_id));
        tag_ok && group_ok
    }
}

/// Transient editor state. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub selection: BTreeSet<SelectionItem>,
    pub mode: Mode,
    pub connect_mode: bool,
    pub connect_kind: ConnectionKind,
    pub hover: Option<SelectionItem>,
    pub snap_guides: SnapGuides<NodeId>,
    pub filter: VisibilityFilter,
}

impl ViewState {
    pub fn is_selected(&self, item: SelectionItem) -> bool {
        self.selection.contains(&item)
    }

    pub fn is_node_selected(&self, node_id: NodeId) -> bool {
        self.is_selected(SelectionItem::Node(node_id))
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.selection.iter().filter_map(|item| match item {
            SelectionItem::Node(id) => Some(*id),
            SelectionItem::Connection(_) => None,
        })
    }

    pub fn selected_connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.selection.iter().filter_map(|item| match item {
            SelectionItem::Connection(id) => Some(*id),
            SelectionItem::Node(_) => None,
        })
    }

    pub fn select_only(&mut self, item: SelectionItem) {
        self.selection.clear();
        self.selection.insert(item);
    }

    /// Returns whether the item ended up selected.
    pub fn toggle(&mut self, item: SelectionItem) -> bool {
        if self.selection.remove(&item) {
            false
        } else {
            self.selection.insert(item);
            true
        }
    }
}
