// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};
use crate::model::{
    is_valid_color, Connection, ConnectionId, ConnectionKind, Document, Group, GroupId, Id,
    IdCounters, IdKind, Node, NodeId, ObjectRef, Viewport,
};

use super::FormatError;

pub const FORMAT_NAME: &str = "nodemap";
pub const FORMAT_VERSION: &str = "1.0";

const SUPPORTED_MAJOR: u64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentJson {
    #[serde(default = "default_format_name")]
    format: String,
    version: String,
    #[serde(default)]
    next_ids: NextIdsJson,
    #[serde(default)]
    viewport: ViewportJson,
    #[serde(default)]
    groups: Vec<GroupJson>,
    #[serde(default)]
    nodes: Vec<NodeJson>,
    #[serde(default)]
    connections: Vec<ConnectionJson>,
}

fn default_format_name() -> String {
    FORMAT_NAME.to_owned()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct NextIdsJson {
    node: u64,
    connection: u64,
    group: u64,
}

impl Default for NextIdsJson {
    fn default() -> Self {
        IdCounters::default().into()
    }
}

impl From<IdCounters> for NextIdsJson {
    fn from(ids: IdCounters) -> Self {
        Self {
            node: ids.node,
            connection: ids.connection,
            group: ids.group,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct ViewportJson {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
}

impl Default for ViewportJson {
    fn default() -> Self {
        Viewport::default().into()
    }
}

impl From<Viewport> for ViewportJson {
    fn from(viewport: Viewport) -> Self {
        Self {
            zoom: viewport.zoom,
            pan_x: viewport.pan_x,
            pan_y: viewport.pan_y,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GroupJson {
    id: String,
    name: String,
    color: String,
    #[serde(default)]
    collapsed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeJson {
    id: String,
    label: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    z_index: i64,
    #[serde(default)]
    collapsed: bool,
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConnectionJson {
    id: String,
    source_id: String,
    target_id: String,
    #[serde(default = "default_kind")]
    kind: String,
}

fn default_kind() -> String {
    ConnectionKind::Strong.as_str().to_owned()
}

#[derive(Debug, Deserialize)]
struct MarkerJson {
    #[serde(default)]
    version: Option<serde_json::Value>,
}

/// Encodes every persisted field in insertion order, pretty-printed with a trailing newline.
pub fn serialize(document: &Document) -> Result<String, FormatError> {
    let json = DocumentJson {
        format: FORMAT_NAME.to_owned(),
        version: FORMAT_VERSION.to_owned(),
        next_ids: document.ids().into(),
        viewport: document.viewport().into(),
        groups: document
            .groups()
            .map(|group| GroupJson {
                id: group.id().to_string(),
                name: group.name().to_owned(),
                color: group.color().to_owned(),
                collapsed: group.collapsed(),
            })
            .collect(),
        nodes: document.nodes().map(node_to_json).collect(),
        connections: document
            .connections()
            .map(|connection| ConnectionJson {
                id: connection.id().to_string(),
                source_id: connection.source_id().to_string(),
                target_id: connection.target_id().to_string(),
                kind: connection.kind().as_str().to_owned(),
            })
            .collect(),
    };

    let mut text = serde_json::to_string_pretty(&json).map_err(FormatError::Encode)?;
    text.push('\n');
    Ok(text)
}

fn node_to_json(node: &Node) -> NodeJson {
    let position = node.position();
    let size = node.size();
    NodeJson {
        id: node.id().to_string(),
        label: node.label().to_owned(),
        x: position.x,
        y: position.y,
        width: size.width,
        height: size.height,
        z_index: node.z_index(),
        collapsed: node.collapsed(),
        group_id: node.group_id().map(|id| id.to_string()),
        tags: node.tags().iter().cloned().collect(),
        notes: node.notes().to_vec(),
    }
}

/// True when `text` is a JSON object carrying a `version` key.
pub(crate) fn has_version_marker(text: &str) -> Result<bool, FormatError> {
    let marker: MarkerJson = serde_json::from_str(text).map_err(FormatError::from_json)?;
    Ok(marker.version.is_some())
}

/// Decodes a versioned document. Nothing outside the returned value is touched.
pub(crate) fn decode(text: &str) -> Result<Document, FormatError> {
    let marker: MarkerJson = serde_json::from_str(text).map_err(FormatError::from_json)?;
    if let Some(version) = marker.version {
        check_version(&version)?;
    }

    let json: DocumentJson = serde_json::from_str(text).map_err(FormatError::from_json)?;
    if json.format != FORMAT_NAME {
        return Err(FormatError::malformed(format!(
            "unknown format {:?} (expected {FORMAT_NAME:?})",
            json.format
        )));
    }

    let document = build_document(json)?;
    debug!(
        "decoded document: {} nodes, {} connections, {} groups",
        document.node_count(),
        document.connection_count(),
        document.group_count()
    );
    Ok(document)
}

fn check_version(version: &serde_json::Value) -> Result<(), FormatError> {
    let found = match version {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let major = found
        .split('.')
        .next()
        .and_then(|major| major.trim().parse::<u64>().ok());
    match major {
        Some(SUPPORTED_MAJOR) => Ok(()),
        _ => Err(FormatError::SchemaVersion { found }),
    }
}

fn parse_id<T: IdKind>(value: &str) -> Result<Id<T>, FormatError> {
    Id::<T>::from_str(value).map_err(|err| {
        FormatError::malformed(format!("invalid {} id {value:?}: {err}", T::NAME))
    })
}

fn finite(value: f64, field: &str, node_id: NodeId) -> Result<f64, FormatError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormatError::malformed(format!("node {node_id} has non-finite {field}")))
    }
}

fn build_document(json: DocumentJson) -> Result<Document, FormatError> {
    let mut document = Document::new();

    let viewport = Viewport {
        zoom: json.viewport.zoom,
        pan_x: json.viewport.pan_x,
        pan_y: json.viewport.pan_y,
    };
    if !viewport.is_valid() {
        return Err(FormatError::malformed(
            "viewport needs a positive finite zoom and finite pan",
        ));
    }
    document.set_viewport(viewport);

    let mut max_group = None;
    for group_json in json.groups {
        let id: GroupId = parse_id(&group_json.id)?;
        if !is_valid_color(&group_json.color) {
            return Err(FormatError::malformed(format!(
                "group {id} has invalid color {:?}",
                group_json.color
            )));
        }
        let mut group = Group::new(id, group_json.name, group_json.color);
        group.set_collapsed(group_json.collapsed);
        if !document.insert_group(group) {
            return Err(FormatError::malformed(format!("duplicate group id {id}")));
        }
        max_group = max_group.max(Some(id.get()));
    }

    let mut max_node = None;
    for node_json in json.nodes {
        let node = node_from_json(&document, node_json)?;
        let id = node.id();
        if !document.insert_node(node) {
            return Err(FormatError::malformed(format!("duplicate node id {id}")));
        }
        max_node = max_node.max(Some(id.get()));
    }

    let mut max_connection = None;
    for connection_json in json.connections {
        let connection = connection_from_json(&document, &connection_json)?;
        let id = connection.id();
        if !document.insert_connection(connection) {
            return Err(FormatError::malformed(format!("duplicate connection id {id}")));
        }
        max_connection = max_connection.max(Some(id.get()));
    }

    let ids = document.ids_mut();
    ids.node = json.next_ids.node.max(1);
    ids.connection = json.next_ids.connection.max(1);
    ids.group = json.next_ids.group.max(1);
    ids.cover(max_node, max_connection, max_group);

    Ok(document)
}

fn node_from_json(document: &Document, json: NodeJson) -> Result<Node, FormatError> {
    let id: NodeId = parse_id(&json.id)?;
    let position = Point::new(finite(json.x, "x", id)?, finite(json.y, "y", id)?);
    let size = Size::new(finite(json.width, "width", id)?, finite(json.height, "height", id)?);
    if !size.is_positive() {
        return Err(FormatError::malformed(format!("node {id} needs a positive size")));
    }

    let group_id = match json.group_id.as_deref() {
        None => None,
        Some(raw) => {
            let group_id: GroupId = parse_id(raw)?;
            if !document.contains_group(group_id) {
                return Err(FormatError::DanglingReference {
                    from: ObjectRef::Node(id),
                    missing: ObjectRef::Group(group_id),
                });
            }
            Some(group_id)
        }
    };

    let mut node = Node::new(id, json.label, position, size);
    node.set_z_index(json.z_index);
    node.set_collapsed(json.collapsed);
    node.set_group_id(group_id);
    node.tags_mut().extend(
        json.tags
            .into_iter()
            .map(|tag| tag.trim().to_owned())
            .filter(|tag| !tag.is_empty()),
    );
    node.notes_mut().extend(json.notes);
    Ok(node)
}

fn connection_from_json(
    document: &Document,
    json: &ConnectionJson,
) -> Result<Connection, FormatError> {
    let id: ConnectionId = parse_id(&json.id)?;
    let source_id: NodeId = parse_id(&json.source_id)?;
    let target_id: NodeId = parse_id(&json.target_id)?;
    let kind = ConnectionKind::from_str(&json.kind)
        .map_err(|err| FormatError::malformed(format!("connection {id}: {err}")))?;

    for endpoint in [source_id, target_id] {
        if !document.contains_node(endpoint) {
            return Err(FormatError::DanglingReference {
                from: ObjectRef::Connection(id),
                missing: ObjectRef::Node(endpoint),
            });
        }
    }
    if source_id == target_id {
        return Err(FormatError::malformed(format!(
            "connection {id} links node {source_id} to itself"
        )));
    }
    if let Some(existing) = document
        .connections()
        .find(|c| c.same_link(source_id, target_id, kind))
    {
        return Err(FormatError::malformed(format!(
            "connection {id} duplicates {}",
            existing.id()
        )));
    }
    if kind == ConnectionKind::Strong && document.strongly_reaches(target_id, source_id) {
        return Err(FormatError::malformed(format!(
            "connection {id} closes a strong cycle through {source_id} and {target_id}"
        )));
    }

    Ok(Connection::new(id, source_id, target_id, kind))
}
