// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use crate::geometry::{route_connection, ConnectionPath, Point};
use crate::model::{Connection, Node, NodeId};
use crate::ops::GraphModel;

use super::state::{SelectionItem, VisibilityFilter};

/// Nodes that are drawn and hit-testable: not hidden by a collapsed ancestor and passing the
/// filter. Returned in z order, topmost last.
pub fn shown_nodes<'a>(model: &'a GraphModel, filter: &VisibilityFilter) -> Vec<&'a Node> {
    let hidden = model.hidden_nodes();
    model
        .nodes_in_z_order()
        .into_iter()
        .filter(|node| !hidden.contains(&node.id()) && filter.passes(node))
        .collect()
}

pub fn shown_node_ids(model: &GraphModel, filter: &VisibilityFilter) -> BTreeSet<NodeId> {
    shown_nodes(model, filter).into_iter().map(Node::id).collect()
}

/// Connections whose endpoints are both shown, with their routed paths.
pub fn shown_connections<'a>(
    model: &'a GraphModel,
    shown: &BTreeSet<NodeId>,
    grid: f64,
) -> Vec<(&'a Connection, ConnectionPath)> {
    model
        .document()
        .connections()
        .filter(|c| shown.contains(&c.source_id()) && shown.contains(&c.target_id()))
        .filter_map(|c| {
            let source = model.node(c.source_id())?.rect();
            let target = model.node(c.target_id())?.rect();
            Some((c, route_connection(&source, &target, grid)))
        })
        .collect()
}

/// Topmost shown node under `point`, else the nearest shown connection within `tolerance`.
///
/// `point` and `tolerance` are in canvas units.
pub fn hit_test(
    model: &GraphModel,
    filter: &VisibilityFilter,
    point: Point,
    tolerance: f64,
    grid: f64,
) -> Option<SelectionItem> {
    let nodes = shown_nodes(model, filter);
    if let Some(node) = nodes.iter().rev().find(|node| node.rect().contains(point)) {
        return Some(SelectionItem::Node(node.id()));
    }

    let shown = nodes.iter().map(|node| node.id()).collect::<BTreeSet<_>>();
    shown_connections(model, &shown, grid)
        .into_iter()
        .map(|(connection, path)| (connection.id(), path.distance_to(point)))
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
        .map(|(id, _)| SelectionItem::Connection(id))
}

/// Topmost shown node under `point`, ignoring connections.
pub fn node_at(model: &GraphModel, filter: &VisibilityFilter, point: Point) -> Option<NodeId> {
    shown_nodes(model, filter)
        .into_iter()
        .rev()
        .find(|node| node.rect().contains(point))
        .map(Node::id)
}
