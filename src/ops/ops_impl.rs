// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Applies one op to the scratch document, recording what it touched in `delta`.
fn apply_op(
    doc: &mut Document,
    sizing: &NodeSizing,
    op: &Op,
    delta: &mut DeltaBuilder,
) -> Result<(), GraphError> {
    match op {
        Op::AddNode {
            node_id,
            position,
            label,
        } => {
            if doc.contains_node(*node_id) {
                return Err(GraphError::AlreadyExists {
                    object: ObjectRef::Node(*node_id),
                });
            }
            if !position.is_finite() {
                return Err(GraphError::NonFinite { field: "position" });
            }
            let mut node = Node::new(*node_id, label.clone(), *position, sizing.size_for(label));
            node.set_z_index(doc.max_z_index().map_or(1, |z| z.saturating_add(1)));
            doc.insert_node(node);
            doc.ids_mut().cover(Some(node_id.get()), None, None);
            delta.record_added(ObjectRef::Node(*node_id));
            Ok(())
        }
        Op::UpdateNode { node_id, patch } => {
            if let Some(position) = patch.position {
                if !position.is_finite() {
                    return Err(GraphError::NonFinite { field: "position" });
                }
            }
            if let Some(size) = patch.size {
                if !size.is_finite() {
                    return Err(GraphError::NonFinite { field: "size" });
                }
                if !size.is_positive() {
                    return Err(GraphError::InvalidSize);
                }
            }
            if let Some(Some(group_id)) = patch.group_id {
                if !doc.contains_group(group_id) {
                    return Err(GraphError::NotFound {
                        object: ObjectRef::Group(group_id),
                    });
                }
            }

            let node = existing_node(doc, *node_id)?;
            if let Some(label) = &patch.label {
                node.set_label(label.clone());
                if patch.size.is_none() && sizing.auto_fit {
                    let height = node.size().height;
                    node.set_size(Size::new(sizing.size_for(label).width, height));
                }
            }
            if let Some(position) = patch.position {
                node.set_position(position);
            }
            if let Some(size) = patch.size {
                node.set_size(size);
            }
            if let Some(collapsed) = patch.collapsed {
                node.set_collapsed(collapsed);
            }
            if let Some(tags) = &patch.tags {
                *node.tags_mut() = tags
                    .iter()
                    .map(|tag| tag.trim())
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_owned)
                    .collect();
            }
            if let Some(group_id) = patch.group_id {
                node.set_group_id(group_id);
            }
            delta.record_updated(ObjectRef::Node(*node_id));
            Ok(())
        }
        Op::RemoveNode { node_id } => {
            remove_node_cascade(doc, *node_id, delta);
            Ok(())
        }
        Op::RemoveSubtree { root_id } => {
            if !doc.contains_node(*root_id) {
                return Err(GraphError::NotFound {
                    object: ObjectRef::Node(*root_id),
                });
            }
            let mut doomed = doc.strong_descendants(*root_id);
            doomed.insert(*root_id);
            for node_id in doomed {
                remove_node_cascade(doc, node_id, delta);
            }
            Ok(())
        }
        Op::BringToFront { node_id } => {
            let current = existing_node(doc, *node_id)?.z_index();
            let others_max = doc
                .nodes()
                .filter(|node| node.id() != *node_id)
                .map(Node::z_index)
                .max();
            let Some(others_max) = others_max else {
                return Ok(());
            };
            if current > others_max {
                return Ok(());
            }
            existing_node(doc, *node_id)?.set_z_index(others_max.saturating_add(1));
            delta.record_updated(ObjectRef::Node(*node_id));
            Ok(())
        }
        Op::AddTag { node_id, tag } => {
            let node = existing_node(doc, *node_id)?;
            let tag = tag.trim();
            if !tag.is_empty() && node.tags_mut().insert(tag.to_owned()) {
                delta.record_updated(ObjectRef::Node(*node_id));
            }
            Ok(())
        }
        Op::RemoveTag { node_id, tag } => {
            let node = existing_node(doc, *node_id)?;
            if node.tags_mut().remove(tag.trim()) {
                delta.record_updated(ObjectRef::Node(*node_id));
            }
            Ok(())
        }
        Op::AddNote { node_id, text } => {
            existing_node(doc, *node_id)?.notes_mut().push(text.clone());
            delta.record_updated(ObjectRef::Node(*node_id));
            Ok(())
        }
        Op::RemoveNote { node_id, index } => {
            let notes = existing_node(doc, *node_id)?.notes_mut();
            if *index >= notes.len() {
                return Err(GraphError::NoteOutOfRange {
                    node_id: *node_id,
                    index: *index,
                });
            }
            notes.remove(*index);
            delta.record_updated(ObjectRef::Node(*node_id));
            Ok(())
        }
        Op::AddConnection {
            connection_id,
            source_id,
            target_id,
            kind,
        } => {
            if doc.contains_connection(*connection_id) {
                return Err(GraphError::AlreadyExists {
                    object: ObjectRef::Connection(*connection_id),
                });
            }
            check_connection(doc, *source_id, *target_id, *kind)?;
            doc.insert_connection(Connection::new(
                *connection_id,
                *source_id,
                *target_id,
                *kind,
            ));
            doc.ids_mut().cover(None, Some(connection_id.get()), None);
            delta.record_added(ObjectRef::Connection(*connection_id));
            Ok(())
        }
        Op::RemoveConnection { connection_id } => {
            if doc.remove_connection(*connection_id).is_some() {
                delta.record_removed(ObjectRef::Connection(*connection_id));
            }
            Ok(())
        }
        Op::AddGroup {
            group_id,
            name,
            color,
        } => {
            if doc.contains_group(*group_id) {
                return Err(GraphError::AlreadyExists {
                    object: ObjectRef::Group(*group_id),
                });
            }
            let color = match color {
                Some(color) if is_valid_color(color) => color.clone(),
                Some(color) => {
                    return Err(GraphError::InvalidColor {
                        color: color.clone(),
                    })
                }
                None => palette_color(doc.group_count()).to_owned(),
            };
            doc.insert_group(Group::new(*group_id, name.clone(), color));
            doc.ids_mut().cover(None, None, Some(group_id.get()));
            delta.record_added(ObjectRef::Group(*group_id));
            Ok(())
        }
        Op::RenameGroup { group_id, name } => {
            let Some(group) = doc.group_mut(*group_id) else {
                return Err(GraphError::NotFound {
                    object: ObjectRef::Group(*group_id),
                });
            };
            group.set_name(name.clone());
            delta.record_updated(ObjectRef::Group(*group_id));
            Ok(())
        }
        Op::RemoveGroup { group_id } => {
            if doc.remove_group(*group_id).is_none() {
                return Ok(());
            }
            let members = doc
                .nodes()
                .filter(|node| node.group_id() == Some(*group_id))
                .map(Node::id)
                .collect::<Vec<_>>();
            for node_id in members {
                if let Some(node) = doc.node_mut(node_id) {
                    node.set_group_id(None);
                    delta.record_updated(ObjectRef::Node(node_id));
                }
            }
            delta.record_removed(ObjectRef::Group(*group_id));
            Ok(())
        }
        Op::SetGroupCollapsed {
            group_id,
            collapsed,
        } => {
            let Some(group) = doc.group_mut(*group_id) else {
                return Err(GraphError::NotFound {
                    object: ObjectRef::Group(*group_id),
                });
            };
            if group.collapsed() != *collapsed {
                group.set_collapsed(*collapsed);
                delta.record_updated(ObjectRef::Group(*group_id));
            }
            Ok(())
        }
        Op::SetViewport { viewport } => {
            if !viewport.is_valid() {
                return Err(GraphError::NonFinite { field: "viewport" });
            }
            if doc.viewport() != *viewport {
                doc.set_viewport(*viewport);
                delta.record_viewport();
            }
            Ok(())
        }
    }
}

fn existing_node(doc: &mut Document, node_id: NodeId) -> Result<&mut Node, GraphError> {
    doc.node_mut(node_id).ok_or(GraphError::NotFound {
        object: ObjectRef::Node(node_id),
    })
}

/// Referential and structural checks for a new connection, in reporting order.
fn check_connection(
    doc: &Document,
    source_id: NodeId,
    target_id: NodeId,
    kind: ConnectionKind,
) -> Result<(), GraphError> {
    if !doc.contains_node(source_id) {
        return Err(GraphError::InvalidReference {
            endpoint: Endpoint::Source,
            node_id: source_id,
        });
    }
    if !doc.contains_node(target_id) {
        return Err(GraphError::InvalidReference {
            endpoint: Endpoint::Target,
            node_id: target_id,
        });
    }
    if source_id == target_id {
        return Err(GraphError::SelfLoop { node_id: source_id });
    }
    if let Some(existing) = doc
        .connections()
        .find(|c| c.same_link(source_id, target_id, kind))
    {
        return Err(GraphError::Duplicate {
            existing: existing.id(),
        });
    }
    if kind == ConnectionKind::Strong && doc.strongly_reaches(target_id, source_id) {
        return Err(GraphError::Cycle {
            source_id,
            target_id,
        });
    }
    Ok(())
}

fn remove_node_cascade(doc: &mut Document, node_id: NodeId, delta: &mut DeltaBuilder) -> bool {
    if doc.remove_node(node_id).is_none() {
        return false;
    }
    let touching = doc
        .connections()
        .filter(|c| c.touches(node_id))
        .map(Connection::id)
        .collect::<Vec<_>>();
    for connection_id in touching {
        doc.remove_connection(connection_id);
        delta.record_removed(ObjectRef::Connection(connection_id));
    }
    delta.record_removed(ObjectRef::Node(node_id));
    true
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sizing(sizing: NodeSizing) -> Self {
        Self {
            sizing,
            ..Self::default()
        }
    }

    pub fn from_document(document: Document, sizing: NodeSizing) -> Self {
        Self {
            document,
            sizing,
            journal: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn sizing(&self) -> &NodeSizing {
        &self.sizing
    }

    pub fn rev(&self) -> u64 {
        self.document.rev()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.document.node(id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.document.connection(id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.document.group(id)
    }

    /// Applies `ops` atomically against `base_rev` and journals the resulting changes.
    pub fn apply_ops(&mut self, base_rev: u64, ops: &[Op]) -> Result<ApplyResult, GraphError> {
        let result = apply_ops(&mut self.document, &self.sizing, base_rev, ops)?;
        self.journal_delta(&result.delta);
        Ok(result)
    }

    /// Applies `ops` against the current revision.
    pub fn apply(&mut self, ops: &[Op]) -> Result<ApplyResult, GraphError> {
        self.apply_ops(self.rev(), ops)
    }

    fn journal_delta(&mut self, delta: &Delta) {
        let removed = delta
            .removed
            .iter()
            .map(|r| ChangeEvent::object(*r, ChangeKind::Removed));
        let added = delta
            .added
            .iter()
            .map(|r| ChangeEvent::object(*r, ChangeKind::Added));
        let updated = delta
            .updated
            .iter()
            .map(|r| ChangeEvent::object(*r, ChangeKind::Updated));
        self.journal.extend(removed.chain(added).chain(updated));
        if delta.viewport {
            self.journal.push(ChangeEvent {
                target: ChangeTarget::Viewport,
                kind: ChangeKind::Updated,
            });
        }
    }

    /// Drains the change journal accumulated since the last call.
    pub fn take_changes(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.journal)
    }

    /// Id the next `add_node` will use.
    pub fn next_node_id(&self) -> NodeId {
        self.document.ids().peek_node()
    }

    pub fn next_connection_id(&self) -> ConnectionId {
        self.document.ids().peek_connection()
    }

    pub fn next_group_id(&self) -> GroupId {
        self.document.ids().peek_group()
    }

    pub fn add_node(
        &mut self,
        position: Point,
        label: impl Into<String>,
    ) -> Result<NodeId, GraphError> {
        let node_id = self.next_node_id();
        self.apply(&[Op::AddNode {
            node_id,
            position,
            label: label.into(),
        }])?;
        Ok(node_id)
    }

    /// Deletes the node and every connection touching it. Returns `false` when it was absent.
    pub fn remove_node(&mut self, node_id: NodeId) -> bool {
        if !self.document.contains_node(node_id) {
            return false;
        }
        self.apply(&[Op::RemoveNode { node_id }]).is_ok()
    }

    /// Deletes the node together with its strong subtree. Returns how many nodes went away.
    pub fn remove_node_with_descendants(&mut self, root_id: NodeId) -> Result<usize, GraphError> {
        let before = self.document.node_count();
        self.apply(&[Op::RemoveSubtree { root_id }])?;
        Ok(before - self.document.node_count())
    }

    pub fn update_node(&mut self, node_id: NodeId, patch: NodePatch) -> Result<(), GraphError> {
        self.apply(&[Op::UpdateNode { node_id, patch }]).map(|_| ())
    }

    pub fn add_connection(
        &mut self,
        source_id: NodeId,
        target_id: NodeId,
        kind: ConnectionKind,
    ) -> Result<ConnectionId, GraphError> {
        let connection_id = self.next_connection_id();
        self.apply(&[Op::AddConnection {
            connection_id,
            source_id,
            target_id,
            kind,
        }])?;
        Ok(connection_id)
    }

    /// Returns `false` when the connection was absent.
    pub fn remove_connection(&mut self, connection_id: ConnectionId) -> bool {
        if !self.document.contains_connection(connection_id) {
            return false;
        }
        self.apply(&[Op::RemoveConnection { connection_id }]).is_ok()
    }

    pub fn bring_to_front(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        self.apply(&[Op::BringToFront { node_id }]).map(|_| ())
    }

    pub fn set_collapsed(&mut self, node_id: NodeId, collapsed: bool) -> Result<(), GraphError> {
        self.update_node(node_id, NodePatch::collapsed(collapsed))
    }

    pub fn add_tag(&mut self, node_id: NodeId, tag: impl Into<String>) -> Result<(), GraphError> {
        self.apply(&[Op::AddTag {
            node_id,
            tag: tag.into(),
        }])
        .map(|_| ())
    }

    pub fn remove_tag(
        &mut self,
        node_id: NodeId,
        tag: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.apply(&[Op::RemoveTag {
            node_id,
            tag: tag.into(),
        }])
        .map(|_| ())
    }

    pub fn add_note(&mut self, node_id: NodeId, text: impl Into<String>) -> Result<(), GraphError> {
        self.apply(&[Op::AddNote {
            node_id,
            text: text.into(),
        }])
        .map(|_| ())
    }

    pub fn remove_note(&mut self, node_id: NodeId, index: usize) -> Result<(), GraphError> {
        self.apply(&[Op::RemoveNote { node_id, index }]).map(|_| ())
    }

    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        color: Option<String>,
    ) -> Result<GroupId, GraphError> {
        let group_id = self.next_group_id();
        self.apply(&[Op::AddGroup {
            group_id,
            name: name.into(),
            color,
        }])?;
        Ok(group_id)
    }

    pub fn rename_group(
        &mut self,
        group_id: GroupId,
        name: impl Into<String>,
    ) -> Result<(), GraphError> {
        self.apply(&[Op::RenameGroup {
            group_id,
            name: name.into(),
        }])
        .map(|_| ())
    }

    /// Deletes the group and clears it from its members. Returns `false` when it was absent.
    pub fn remove_group(&mut self, group_id: GroupId) -> bool {
        if !self.document.contains_group(group_id) {
            return false;
        }
        self.apply(&[Op::RemoveGroup { group_id }]).is_ok()
    }

    /// Folds a group down to its anchor member, or unfolds it.
    pub fn set_group_collapsed(
        &mut self,
        group_id: GroupId,
        collapsed: bool,
    ) -> Result<(), GraphError> {
        self.apply(&[Op::SetGroupCollapsed {
            group_id,
            collapsed,
        }])
        .map(|_| ())
    }

    pub fn set_node_group(
        &mut self,
        node_id: NodeId,
        group_id: Option<GroupId>,
    ) -> Result<(), GraphError> {
        self.update_node(node_id, NodePatch::group(group_id))
    }

    pub fn group_members(&self, group_id: GroupId) -> Vec<NodeId> {
        self.document
            .nodes()
            .filter(|node| node.group_id() == Some(group_id))
            .map(Node::id)
            .collect()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), GraphError> {
        self.apply(&[Op::SetViewport { viewport }]).map(|_| ())
    }

    /// Swaps in a new or freshly loaded document wholesale.
    pub fn replace_document(&mut self, document: Document) {
        let next_rev = self.rev().saturating_add(1);
        self.document = document;
        self.document.set_rev(next_rev);
        self.journal.clear();
        self.journal.push(ChangeEvent {
            target: ChangeTarget::Document,
            kind: ChangeKind::Replaced,
        });
        debug!(
            "document replaced: {} node(s), {} connection(s)",
            self.document.node_count(),
            self.document.connection_count()
        );
    }

    /// Nodes sorted for drawing: ascending z-index, ties in insertion order. Topmost is last.
    pub fn nodes_in_z_order(&self) -> Vec<&Node> {
        let mut nodes = self.document.nodes().collect::<Vec<_>>();
        nodes.sort_by_key(|node| node.z_index());
        nodes
    }

    /// `root` plus every node reachable from it along strong connections.
    pub fn subtree(&self, root: NodeId) -> Result<BTreeSet<NodeId>, GraphError> {
        let mut nodes = self.descendants(root)?;
        nodes.insert(root);
        Ok(nodes)
    }

    pub fn descendants(&self, root: NodeId) -> Result<BTreeSet<NodeId>, GraphError> {
        if !self.document.contains_node(root) {
            return Err(GraphError::NotFound {
                object: ObjectRef::Node(root),
            });
        }
        Ok(self.document.strong_descendants(root))
    }

    pub fn hidden_nodes(&self) -> BTreeSet<NodeId> {
        self.document.hidden_nodes()
    }

    pub fn is_node_visible(&self, node_id: NodeId) -> bool {
        self.document.contains_node(node_id) && !self.hidden_nodes().contains(&node_id)
    }

    pub fn is_connection_visible(&self, connection_id: ConnectionId) -> bool {
        let Some(connection) = self.document.connection(connection_id) else {
            return false;
        };
        let hidden = self.hidden_nodes();
        !hidden.contains(&connection.source_id()) && !hidden.contains(&connection.target_id())
    }

    pub fn connections_of(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> + '_ {
        self.document
            .connections()
            .filter(move |connection| connection.touches(node_id))
    }
}
