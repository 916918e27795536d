// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use crate::geometry::Rect;

use super::connection::{Connection, ConnectionKind};
use super::group::Group;
use super::ids::{ConnectionId, GroupId, IdCounters, NodeId};
use super::node::Node;
use super::viewport::Viewport;

/// Keyed storage that remembers insertion order.
#[derive(Debug, Clone)]
struct Ordered<K, V> {
    items: BTreeMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Default for Ordered<K, V> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Ord + Copy, V> Ordered<K, V> {
    fn insert(&mut self, key: K, value: V) -> bool {
        if self.items.contains_key(&key) {
            return false;
        }
        self.items.insert(key, value);
        self.order.push(key);
        true
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.items.remove(key)?;
        self.order.retain(|k| k != key);
        Some(value)
    }

    fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.order.iter().filter_map(|k| self.items.get(k))
    }
}

impl<K: Ord, V: PartialEq> PartialEq for Ordered<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.items == other.items
    }
}

/// The complete persisted graph: nodes, connections, groups and the saved viewport.
///
/// Collections iterate in insertion order. The document itself enforces only key uniqueness;
/// referential rules are kept by `GraphModel` and checked again when decoding a file.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Ordered<NodeId, Node>,
    connections: Ordered<ConnectionId, Connection>,
    groups: Ordered<GroupId, Group>,
    viewport: Viewport,
    ids: IdCounters,
    rev: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    pub(crate) fn set_rev(&mut self, rev: u64) {
        self.rev = rev;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn ids(&self) -> IdCounters {
        self.ids
    }

    pub fn ids_mut(&mut self) -> &mut IdCounters {
        &mut self.ids
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> &[NodeId] {
        &self.nodes.order
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.items.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.items.get_mut(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.items.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.items.len()
    }

    /// Appends `node`; returns `false` without inserting when its id is taken.
    pub fn insert_node(&mut self, node: Node) -> bool {
        self.nodes.insert(node.id(), node)
    }

    /// Removes the node record only. Connections touching it are the caller's concern.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> + '_ {
        self.connections.iter()
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.items.get(&id)
    }

    pub fn contains_connection(&self, id: ConnectionId) -> bool {
        self.connections.items.contains_key(&id)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.items.len()
    }

    pub fn insert_connection(&mut self, connection: Connection) -> bool {
        self.connections.insert(connection.id(), connection)
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        self.connections.remove(&id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> + '_ {
        self.groups.iter()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.items.get(&id)
    }

    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.items.get_mut(&id)
    }

    pub fn contains_group(&self, id: GroupId) -> bool {
        self.groups.items.contains_key(&id)
    }

    pub fn group_count(&self) -> usize {
        self.groups.items.len()
    }

    pub fn insert_group(&mut self, group: Group) -> bool {
        self.groups.insert(group.id(), group)
    }

    pub fn remove_group(&mut self, id: GroupId) -> Option<Group> {
        self.groups.remove(&id)
    }

    pub fn max_z_index(&self) -> Option<i64> {
        self.nodes.items.values().map(Node::z_index).max()
    }

    /// Bounding box of every node; `None` for an empty canvas.
    pub fn canvas_extent(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(Node::rect)
            .reduce(|extent, rect| extent.union(&rect))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.items.is_empty()
            && self.connections.items.is_empty()
            && self.groups.items.is_empty()
    }

    /// Outgoing strong connections per node, in connection insertion order.
    pub fn strong_children(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        let mut children: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for connection in self.connections() {
            if connection.kind() == ConnectionKind::Strong {
                children
                    .entry(connection.source_id())
                    .or_default()
                    .push(connection.target_id());
            }
        }
        children
    }

    /// Every node reachable from `root` along strong connections, excluding `root` unless a
    /// strong cycle leads back to it.
    pub fn strong_descendants(&self, root: NodeId) -> BTreeSet<NodeId> {
        reachable(&self.strong_children(), root)
    }

    /// True when `to` can be reached from `from` along strong connections.
    pub fn strongly_reaches(&self, from: NodeId, to: NodeId) -> bool {
        from == to || self.strong_descendants(from).contains(&to)
    }

    /// The member that stays in view while its group is collapsed: the earliest-inserted one.
    pub fn group_anchor(&self, id: GroupId) -> Option<NodeId> {
        self.nodes()
            .find(|node| node.group_id() == Some(id))
            .map(Node::id)
    }

    /// Nodes hidden because some collapsed node has them as strong descendants, or because they
    /// are non-anchor members of a collapsed group.
    pub fn hidden_nodes(&self) -> BTreeSet<NodeId> {
        let children = self.strong_children();
        let mut hidden = BTreeSet::new();
        for node in self.nodes() {
            if node.collapsed() && !hidden.contains(&node.id()) {
                hidden.extend(reachable(&children, node.id()));
            }
        }

        let mut anchors = BTreeMap::new();
        for node in self.nodes() {
            let Some(group_id) = node.group_id() else {
                continue;
            };
            if !self.group(group_id).is_some_and(Group::collapsed) {
                continue;
            }
            if *anchors.entry(group_id).or_insert(node.id()) != node.id() {
                hidden.insert(node.id());
            }
        }
        hidden
    }
}

fn reachable(children: &BTreeMap<NodeId, Vec<NodeId>>, root: NodeId) -> BTreeSet<NodeId> {
    let mut seen = BTreeSet::new();
    let mut stack = children.get(&root).cloned().unwrap_or_default();
    while let Some(next) = stack.pop() {
        if seen.insert(next) {
            if let Some(grandchildren) = children.get(&next) {
                stack.extend(grandchildren.iter().copied());
            }
        }
    }
    seen
}

/// Equality over persisted state; the in-memory revision is ignored.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.connections == other.connections
            && self.groups == other.groups
            && self.viewport == other.viewport
            && self.ids == other.ids
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::Document;
    use crate::geometry::{Point, Rect, Size};
    use crate::model::{Group, GroupId, Node, NodeId};

    fn node(id: u64, x: f64, y: f64) -> Node {
        Node::new(NodeId::new(id), "n", Point::new(x, y), Size::new(10.0, 10.0))
    }

    #[test]
    fn keeps_insertion_order_and_rejects_duplicate_keys() {
        let mut doc = Document::new();
        assert!(doc.insert_node(node(5, 0.0, 0.0)));
        assert!(doc.insert_node(node(2, 0.0, 0.0)));
        assert!(!doc.insert_node(node(5, 9.0, 9.0)));

        let ids = doc.nodes().map(Node::id).collect::<Vec<_>>();
        assert_eq!(ids, vec![NodeId::new(5), NodeId::new(2)]);
        assert_eq!(doc.node(NodeId::new(5)).map(Node::position), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn canvas_extent_tracks_all_nodes() {
        let mut doc = Document::new();
        assert_eq!(doc.canvas_extent(), None);
        doc.insert_node(node(1, -20.0, 5.0));
        doc.insert_node(node(2, 100.0, 200.0));
        assert_eq!(
            doc.canvas_extent(),
            Some(Rect::new(Point::new(-20.0, 5.0), Size::new(130.0, 205.0)))
        );
    }

    #[test]
    fn equality_ignores_revision() {
        let mut a = Document::new();
        a.insert_node(node(1, 0.0, 0.0));
        let mut b = a.clone();
        b.bump_rev();
        assert_eq!(a, b);
        b.remove_node(NodeId::new(1));
        assert_ne!(a, b);
    }

    #[test]
    fn collapsed_group_hides_all_but_its_first_member() {
        let mut doc = Document::new();
        let team = GroupId::new(1);
        doc.insert_group(Group::new(team, "Team", "#2196F3"));
        for id in [3, 1, 2] {
            let mut member = node(id, 0.0, 0.0);
            if id != 2 {
                member.set_group_id(Some(team));
            }
            doc.insert_node(member);
        }
        assert!(doc.hidden_nodes().is_empty());
        assert_eq!(doc.group_anchor(team), Some(NodeId::new(3)));

        if let Some(group) = doc.group_mut(team) {
            group.set_collapsed(true);
        }
        assert_eq!(doc.hidden_nodes(), BTreeSet::from([NodeId::new(1)]));
    }
}
