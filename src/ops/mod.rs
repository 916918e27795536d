// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations and the graph model that owns the document.
//!
//! Every change is expressed as a batch of [`Op`]s applied with optimistic concurrency (revision
//! checks) to a scratch copy, so a failing op leaves the document untouched. A successful batch
//! bumps the revision once and journals change events for the presentation layer.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use log::debug;

use crate::geometry::{Point, Size};
use crate::model::{
    is_valid_color, palette_color, Connection, ConnectionId, ConnectionKind, Document, Group,
    GroupId, Node, NodeId, NodeSizing, ObjectRef, Viewport,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    AddNode {
        node_id: NodeId,
        position: Point,
        label: String,
    },
    UpdateNode {
        node_id: NodeId,
        patch: NodePatch,
    },
    /// Removing an absent node is a no-op.
    RemoveNode {
        node_id: NodeId,
    },
    RemoveSubtree {
        root_id: NodeId,
    },
    BringToFront {
        node_id: NodeId,
    },
    AddTag {
        node_id: NodeId,
        tag: String,
    },
    RemoveTag {
        node_id: NodeId,
        tag: String,
    },
    AddNote {
        node_id: NodeId,
        text: String,
    },
    RemoveNote {
        node_id: NodeId,
        index: usize,
    },
    AddConnection {
        connection_id: ConnectionId,
        source_id: NodeId,
        target_id: NodeId,
        kind: ConnectionKind,
    },
    /// Removing an absent connection is a no-op.
    RemoveConnection {
        connection_id: ConnectionId,
    },
    AddGroup {
        group_id: GroupId,
        name: String,
        color: Option<String>,
    },
    RenameGroup {
        group_id: GroupId,
        name: String,
    },
    RemoveGroup {
        group_id: GroupId,
    },
    SetGroupCollapsed {
        group_id: GroupId,
        collapsed: bool,
    },
    SetViewport {
        viewport: Viewport,
    },
}

/// Partial node update; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub collapsed: Option<bool>,
    pub tags: Option<BTreeSet<String>>,
    /// `Some(None)` clears the group.
    pub group_id: Option<Option<GroupId>>,
}

impl NodePatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn collapsed(collapsed: bool) -> Self {
        Self {
            collapsed: Some(collapsed),
            ..Self::default()
        }
    }

    pub fn group(group_id: Option<GroupId>) -> Self {
        Self {
            group_id: Some(group_id),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Minimal delta describing which objects changed as the result of applying ops.
///
/// This is intentionally coarse: it reports only added/removed/updated `ObjectRef`s plus whether
/// the viewport moved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<ObjectRef>,
    pub removed: Vec<ObjectRef>,
    pub updated: Vec<ObjectRef>,
    pub viewport: bool,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.updated.is_empty()
            && !self.viewport
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<ObjectRef>,
    removed: HashSet<ObjectRef>,
    updated: HashSet<ObjectRef>,
    viewport: bool,
}

impl DeltaBuilder {
    fn record_added(&mut self, object_ref: ObjectRef) {
        self.removed.remove(&object_ref);
        self.updated.remove(&object_ref);
        self.added.insert(object_ref);
    }

    fn record_removed(&mut self, object_ref: ObjectRef) {
        self.updated.remove(&object_ref);
        // Created and dropped within one batch: nothing to report.
        if !self.added.remove(&object_ref) {
            self.removed.insert(object_ref);
        }
    }

    fn record_updated(&mut self, object_ref: ObjectRef) {
        if self.added.contains(&object_ref) || self.removed.contains(&object_ref) {
            return;
        }
        self.updated.insert(object_ref);
    }

    fn record_viewport(&mut self) {
        self.viewport = true;
    }

    fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.updated.is_empty()
            && !self.viewport
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta {
            added,
            removed,
            updated,
            viewport: self.viewport,
        }
    }
}

/// What a change event is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTarget {
    Object(ObjectRef),
    Viewport,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
    Replaced,
}

/// Redraw hint handed to the presentation layer after each successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub target: ChangeTarget,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    fn object(object_ref: ObjectRef, kind: ChangeKind) -> Self {
        Self {
            target: ChangeTarget::Object(object_ref),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    Conflict { base_rev: u64, current_rev: u64 },
    NotFound { object: ObjectRef },
    AlreadyExists { object: ObjectRef },
    InvalidReference { endpoint: Endpoint, node_id: NodeId },
    SelfLoop { node_id: NodeId },
    Duplicate { existing: ConnectionId },
    Cycle { source_id: NodeId, target_id: NodeId },
    NonFinite { field: &'static str },
    InvalidSize,
    InvalidColor { color: String },
    NoteOutOfRange { node_id: NodeId, index: usize },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict {
                base_rev,
                current_rev,
            } => write!(f, "stale base_rev (base_rev={base_rev}, current_rev={current_rev})"),
            Self::NotFound { object } => {
                write!(f, "{} not found (id={object})", object.kind_name())
            }
            Self::AlreadyExists { object } => {
                write!(f, "{} already exists (id={object})", object.kind_name())
            }
            Self::InvalidReference { endpoint, node_id } => {
                write!(f, "connection {endpoint:?} references missing node {node_id}")
            }
            Self::SelfLoop { node_id } => write!(f, "node {node_id} cannot connect to itself"),
            Self::Duplicate { existing } => {
                write!(f, "an identical connection already exists ({existing})")
            }
            Self::Cycle {
                source_id,
                target_id,
            } => write!(
                f,
                "strong connection {source_id} -> {target_id} would create a cycle"
            ),
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::InvalidSize => f.write_str("node size must be positive"),
            Self::InvalidColor { color } => {
                write!(f, "group color must look like #RRGGBB (found {color:?})")
            }
            Self::NoteOutOfRange { node_id, index } => {
                write!(f, "node {node_id} has no note at index {index}")
            }
        }
    }
}

impl std::error::Error for GraphError {}

pub fn apply_ops(
    document: &mut Document,
    sizing: &NodeSizing,
    base_rev: u64,
    ops: &[Op],
) -> Result<ApplyResult, GraphError> {
    let current_rev = document.rev();
    if base_rev != current_rev {
        return Err(GraphError::Conflict {
            base_rev,
            current_rev,
        });
    }

    let mut scratch = document.clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        apply_op(&mut scratch, sizing, op, &mut delta)?;
    }

    if !delta.is_empty() {
        scratch.bump_rev();
    }
    *document = scratch;
    let new_rev = document.rev();
    let delta = delta.finish();

    debug!(
        "applied {} op(s) rev={new_rev} added={} removed={} updated={}",
        ops.len(),
        delta.added.len(),
        delta.removed.len(),
        delta.updated.len()
    );

    Ok(ApplyResult {
        new_rev,
        applied: ops.len(),
        delta,
    })
}

/// Owns the document, enforces its referential rules and journals every change.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    document: Document,
    sizing: NodeSizing,
    journal: Vec<ChangeEvent>,
}

// Extracted op-application implementation and graph queries.
include!("ops_impl.rs");
