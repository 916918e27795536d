// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Import of unversioned project files written by earlier editors.
//!
//! Those files key nodes by arbitrary JSON values (usually list indices), groups by opaque
//! strings, and carry no sizes, ids for connections, or connection kinds. Import is tolerant
//! where the old editor was: connections to unknown nodes are dropped, repeated links are
//! skipped, and a link that would close a strong cycle is kept as a weak one.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

use crate::geometry::Point;
use crate::model::{
    is_valid_color, palette_color, Connection, ConnectionId, ConnectionKind, Document, Group,
    GroupId, Node, NodeId, NodeSizing,
};

use super::FormatError;

#[derive(Debug, Deserialize)]
struct LegacyProjectJson {
    #[serde(default)]
    nodes: Vec<LegacyNodeJson>,
    #[serde(default)]
    connections: Vec<LegacyConnectionJson>,
    #[serde(default)]
    groups: Vec<LegacyGroupJson>,
}

#[derive(Debug, Deserialize)]
struct LegacyNodeJson {
    id: serde_json::Value,
    #[serde(default)]
    text: String,
    #[serde(default)]
    pos_x: f64,
    #[serde(default)]
    pos_y: f64,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    group_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LegacyConnectionJson {
    start_node_id: serde_json::Value,
    end_node_id: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct LegacyGroupJson {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    collapsed: bool,
}

/// Summary of what an import had to drop or change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub dangling: usize,
    pub duplicates: usize,
    pub self_loops: usize,
    pub weakened: usize,
}

/// Imports a legacy project file, sizing nodes from their text with `sizing`.
pub fn import(text: &str, sizing: &NodeSizing) -> Result<Document, FormatError> {
    import_with_report(text, sizing).map(|(document, _)| document)
}

pub fn import_with_report(
    text: &str,
    sizing: &NodeSizing,
) -> Result<(Document, ImportReport), FormatError> {
    let project: LegacyProjectJson = serde_json::from_str(text).map_err(FormatError::from_json)?;
    let mut document = Document::new();
    let mut report = ImportReport::default();

    let mut group_ids = HashMap::new();
    for (index, group_json) in project.groups.into_iter().enumerate() {
        if group_ids.contains_key(&group_json.id) {
            return Err(FormatError::malformed(format!(
                "duplicate legacy group id {:?}",
                group_json.id
            )));
        }
        let id = GroupId::new(index as u64 + 1);
        let color = if is_valid_color(&group_json.color) {
            group_json.color.to_ascii_uppercase()
        } else {
            palette_color(index).to_owned()
        };
        let mut group = Group::new(id, group_json.name, color);
        group.set_collapsed(group_json.collapsed);
        document.insert_group(group);
        group_ids.insert(group_json.id, id);
    }

    let mut node_ids = HashMap::new();
    for (index, node_json) in project.nodes.into_iter().enumerate() {
        let key = node_json.id.to_string();
        if node_ids.contains_key(&key) {
            return Err(FormatError::malformed(format!("duplicate legacy node id {key}")));
        }
        let position = Point::new(node_json.pos_x, node_json.pos_y);
        if !position.is_finite() {
            return Err(FormatError::malformed(format!(
                "legacy node {key} has a non-finite position"
            )));
        }

        let id = NodeId::new(index as u64 + 1);
        let size = sizing.size_for(&node_json.text);
        let mut node = Node::new(id, node_json.text, position, size);
        node.set_z_index(index as i64 + 1);
        node.set_group_id(
            node_json
                .group_id
                .as_ref()
                .and_then(|group| group_ids.get(group).copied()),
        );
        node.tags_mut().extend(
            node_json
                .tags
                .into_iter()
                .map(|tag| tag.trim().to_owned())
                .filter(|tag| !tag.is_empty()),
        );
        document.insert_node(node);
        node_ids.insert(key, id);
    }

    let mut next_connection = 1;
    for connection_json in project.connections {
        let source = node_ids.get(&connection_json.start_node_id.to_string());
        let target = node_ids.get(&connection_json.end_node_id.to_string());
        let (Some(&source_id), Some(&target_id)) = (source, target) else {
            report.dangling += 1;
            continue;
        };
        if source_id == target_id {
            report.self_loops += 1;
            continue;
        }
        if document
            .connections()
            .any(|c| c.source_id() == source_id && c.target_id() == target_id)
        {
            report.duplicates += 1;
            continue;
        }

        let kind = if document.strongly_reaches(target_id, source_id) {
            report.weakened += 1;
            ConnectionKind::Weak
        } else {
            ConnectionKind::Strong
        };
        let id = ConnectionId::new(next_connection);
        next_connection += 1;
        document.insert_connection(Connection::new(id, source_id, target_id, kind));
    }

    let node_count = document.node_count() as u64;
    let group_count = document.group_count() as u64;
    document.ids_mut().cover(
        (node_count > 0).then_some(node_count),
        (next_connection > 1).then_some(next_connection - 1),
        (group_count > 0).then_some(group_count),
    );

    debug!(
        "imported legacy project: {} nodes, {} connections, {} groups, {report:?}",
        document.node_count(),
        document.connection_count(),
        document.group_count()
    );
    Ok((document, report))
}
