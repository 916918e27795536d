// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pointer and keyboard interaction on the canvas.
//!
//! The [`Controller`] turns low-level input events into graph model operations. It owns only the
//! transient [`ViewState`]; every persisted change goes through [`GraphModel`], and the resulting
//! change events are forwarded to a [`PresentationAdapter`].

pub mod hit;
pub mod state;

use std::collections::BTreeSet;

use log::debug;

use crate::geometry::{compute_snap, Point, Size, SnapConfig};
use crate::model::{ConnectionId, ConnectionKind, GroupId, Node, NodeId, ZoomLimits};
use crate::ops::{ChangeEvent, GraphError, GraphModel, NodePatch, Op};

pub use hit::{hit_test, node_at, shown_connections, shown_node_ids, shown_nodes};
pub use state::{
    ConnectionDraft, ConnectionStyle, DragState, LabelEdit, MarqueeState, Mode, SelectionItem,
    ViewState, VisibilityFilter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub fn multi_select(&self) -> bool {
        self.ctrl || self.shift
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Escape,
    Delete,
}

/// Input in screen coordinates, as delivered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown {
        point: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        point: Point,
    },
    PointerUp {
        point: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    DoublePress {
        point: Point,
    },
    Key {
        key: Key,
        modifiers: Modifiers,
    },
    /// Positive deltas zoom in, one wheel step per unit.
    Wheel {
        point: Point,
        delta: f64,
    },
    FocusLost,
}

/// Receives redraw hints from the controller.
pub trait PresentationAdapter {
    fn notify(&mut self, change: &ChangeEvent);

    /// Selection, drafts, guides or hover changed.
    fn view_changed(&mut self) {}
}

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    /// The controller consumed the event.
    pub handled: bool,
    /// A model operation the user attempted was refused (for a status line).
    pub rejected: Option<GraphError>,
}

impl Outcome {
    fn handled() -> Self {
        Self {
            handled: true,
            rejected: None,
        }
    }

    fn ignored() -> Self {
        Self::default()
    }

    fn rejected(err: GraphError) -> Self {
        Self {
            handled: true,
            rejected: Some(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionConfig {
    pub snap: SnapConfig,
    pub zoom: ZoomLimits,
    pub default_node_size: Size,
    /// Elbow routing grid for connections.
    pub grid: f64,
    /// Connection hit radius in screen units.
    pub hit_tolerance: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            snap: SnapConfig::default(),
            zoom: ZoomLimits::default(),
            default_node_size: Size::new(150.0, 50.0),
            grid: 20.0,
            hit_tolerance: 6.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Controller {
    view: ViewState,
    config: InteractionConfig,
}

impl Controller {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            view: ViewState::default(),
            config,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Resets all transient state, e.g. after loading another document.
    pub fn reset(&mut self) {
        let connect_kind = self.view.connect_kind;
        self.view = ViewState {
            connect_kind,
            ..ViewState::default()
        };
    }

    pub fn handle(
        &mut self,
        model: &mut GraphModel,
        event: InputEvent,
        adapter: &mut impl PresentationAdapter,
    ) -> Outcome {
        self.prune_stale(model);
        let outcome = match event {
            InputEvent::PointerDown {
                point,
                button,
                modifiers,
            } => self.pointer_down(model, point, button, modifiers),
            InputEvent::PointerMove { point } => self.pointer_move(model, point),
            InputEvent::PointerUp { point, .. } => self.pointer_up(model, point),
            InputEvent::DoublePress { point } => self.double_press(model, point),
            InputEvent::Key { key, modifiers } => self.key(model, key, modifiers),
            InputEvent::Wheel { point, delta } => self.wheel(model, point, delta),
            InputEvent::FocusLost => self.focus_lost(model),
        };
        self.flush(model, adapter);
        if outcome.handled {
            adapter.view_changed();
        }
        outcome
    }

    /// Forwards journaled model changes to the adapter.
    pub fn flush(&self, model: &mut GraphModel, adapter: &mut impl PresentationAdapter) {
        for change in model.take_changes() {
            adapter.notify(&change);
        }
    }

    fn to_canvas(&self, model: &GraphModel, screen: Point) -> Point {
        model.document().viewport().screen_to_canvas(screen)
    }

    fn hit(&self, model: &GraphModel, canvas: Point) -> Option<SelectionItem> {
        let zoom = model.document().viewport().zoom;
        hit_test(
            model,
            &self.view.filter,
            canvas,
            self.config.hit_tolerance / zoom,
            self.config.grid,
        )
    }

    /// Drops selection, hover and in-flight gestures that refer to objects which no longer
    /// exist or are no longer shown (collapsed away or filtered out).
    pub fn prune_stale(&mut self, model: &GraphModel) {
        let doc = model.document();
        let shown = shown_node_ids(model, &self.view.filter);
        let live = |item: &SelectionItem| match item {
            SelectionItem::Node(id) => shown.contains(id),
            SelectionItem::Connection(id) => doc.connection(*id).is_some_and(|connection| {
                shown.contains(&connection.source_id()) && shown.contains(&connection.target_id())
            }),
        };
        self.view.selection.retain(|item| live(item));
        if self.view.hover.is_some_and(|hover| !live(&hover)) {
            self.view.hover = None;
        }
        let mode_alive = match &self.view.mode {
            Mode::Dragging(drag) => shown.contains(&drag.node_id),
            Mode::ConnectingDraft(draft) => shown.contains(&draft.source_id),
            Mode::EditingLabel(edit) => shown.contains(&edit.node_id),
            Mode::Idle | Mode::Marquee(_) | Mode::Panning(_) => true,
        };
        if !mode_alive {
            self.view.mode = Mode::Idle;
            self.view.snap_guides.clear();
        }
    }

    fn pointer_down(
        &mut self,
        model: &mut GraphModel,
        screen: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Outcome {
        if let Mode::EditingLabel(_) = self.view.mode {
            self.commit_label(model);
        }

        match button {
            PointerButton::Middle => {
                self.view.mode = Mode::Panning(screen);
                return Outcome::handled();
            }
            PointerButton::Secondary => return Outcome::ignored(),
            PointerButton::Primary => {}
        }

        let canvas = self.to_canvas(model, screen);
        match self.hit(model, canvas) {
            Some(SelectionItem::Node(node_id)) => {
                if self.view.connect_mode || modifiers.alt {
                    self.view.mode = Mode::ConnectingDraft(ConnectionDraft {
                        source_id: node_id,
                        current_pointer_position: canvas,
                        kind: self.view.connect_kind,
                    });
                    return Outcome::handled();
                }
                self.press_node(model, node_id, canvas, modifiers)
            }
            Some(item @ SelectionItem::Connection(_)) => {
                if modifiers.multi_select() {
                    self.view.toggle(item);
                } else {
                    self.view.select_only(item);
                }
                self.view.mode = Mode::Idle;
                Outcome::handled()
            }
            None => {
                if !modifiers.multi_select() {
                    self.view.selection.clear();
                }
                self.view.mode = Mode::Marquee(MarqueeState {
                    origin: canvas,
                    current: canvas,
                    additive: modifiers.multi_select(),
                });
                Outcome::handled()
            }
        }
    }

    fn press_node(
        &mut self,
        model: &mut GraphModel,
        node_id: NodeId,
        canvas: Point,
        modifiers: Modifiers,
    ) -> Outcome {
        let item = SelectionItem::Node(node_id);
        if modifiers.multi_select() {
            if !self.view.toggle(item) {
                self.view.mode = Mode::Idle;
                return Outcome::handled();
            }
        } else if !self.view.is_selected(item) {
            self.view.select_only(item);
        }

        if let Err(err) = model.bring_to_front(node_id) {
            debug!("bring to front failed for {node_id}: {err}");
            return Outcome::rejected(err);
        }

        let Some(node) = model.node(node_id) else {
            return Outcome::handled();
        };
        let start_position = node.position();
        let companions = self
            .view
            .selected_nodes()
            .filter(|id| *id != node_id)
            .filter_map(|id| model.node(id).map(|n| (id, n.position())))
            .collect();
        self.view.mode = Mode::Dragging(DragState {
            node_id,
            start_position,
            pointer_offset: canvas.delta_from(start_position),
            companions,
            moved: false,
        });
        Outcome::handled()
    }

    fn pointer_move(&mut self, model: &mut GraphModel, screen: Point) -> Outcome {
        let canvas = self.to_canvas(model, screen);
        match self.view.mode {
            Mode::Dragging(_) => return self.drag_to(model, canvas),
            Mode::ConnectingDraft(ref mut draft) => {
                draft.current_pointer_position = canvas;
                return Outcome::handled();
            }
            Mode::Marquee(ref mut marquee) => {
                marquee.current = canvas;
                return Outcome::handled();
            }
            Mode::Panning(ref mut last) => {
                let (dx, dy) = screen.delta_from(*last);
                *last = screen;
                let viewport = model.document().viewport().panned(dx, dy);
                return match model.set_viewport(viewport) {
                    Ok(()) => Outcome::handled(),
                    Err(err) => Outcome::rejected(err),
                };
            }
            Mode::Idle | Mode::EditingLabel(_) => {}
        }

        let hover = self.hit(model, canvas);
        if hover == self.view.hover {
            return Outcome::ignored();
        }
        self.view.hover = hover;
        Outcome::handled()
    }

    fn drag_to(&mut self, model: &mut GraphModel, canvas: Point) -> Outcome {
        let Mode::Dragging(drag) = &mut self.view.mode else {
            return Outcome::ignored();
        };
        let Some(size) = model.node(drag.node_id).map(Node::size) else {
            return Outcome::ignored();
        };

        let (offset_x, offset_y) = drag.pointer_offset;
        let candidate = Point::new(canvas.x - offset_x, canvas.y - offset_y);
        let dragged = drag.dragged_ids().collect::<Vec<_>>();
        let others = shown_nodes(model, &self.view.filter)
            .into_iter()
            .filter(|node| !dragged.contains(&node.id()))
            .map(|node| (node.id(), node.rect()))
            .collect::<Vec<_>>();
        let snap = compute_snap(size, candidate, others, &self.config.snap);
        let (dx, dy) = snap.position.delta_from(drag.start_position);

        let mut ops = vec![Op::UpdateNode {
            node_id: drag.node_id,
            patch: NodePatch::position(snap.position),
        }];
        ops.extend(drag.companions.iter().map(|(id, start)| Op::UpdateNode {
            node_id: *id,
            patch: NodePatch::position(start.offset(dx, dy)),
        }));

        match model.apply(&ops) {
            Ok(_) => {
                drag.moved = true;
                self.view.snap_guides = snap.guides;
                Outcome::handled()
            }
            Err(err) => {
                debug!("drag update rejected: {err}");
                self.view.mode = Mode::Idle;
                self.view.snap_guides.clear();
                Outcome::rejected(err)
            }
        }
    }

    fn pointer_up(&mut self, model: &mut GraphModel, screen: Point) -> Outcome {
        let canvas = self.to_canvas(model, screen);
        match std::mem::take(&mut self.view.mode) {
            Mode::Idle => Outcome::ignored(),
            Mode::EditingLabel(edit) => {
                self.view.mode = Mode::EditingLabel(edit);
                Outcome::ignored()
            }
            Mode::Dragging(_) => {
                self.view.snap_guides.clear();
                Outcome::handled()
            }
            Mode::Panning(_) => Outcome::handled(),
            Mode::Marquee(marquee) => {
                let area = MarqueeState {
                    current: canvas,
                    ..marquee
                }
                .rect();
                let picked = shown_nodes(model, &self.view.filter)
                    .into_iter()
                    .filter(|node| node.rect().intersects(&area))
                    .map(|node| SelectionItem::Node(node.id()))
                    .collect::<Vec<_>>();
                if !marquee.additive {
                    self.view.selection.clear();
                }
                self.view.selection.extend(picked);
                Outcome::handled()
            }
            Mode::ConnectingDraft(draft) => {
                let target = node_at(model, &self.view.filter, canvas);
                match target {
                    Some(target_id) if target_id != draft.source_id => {
                        match self.connect(model, draft.source_id, target_id, draft.kind) {
                            Ok(()) => Outcome::handled(),
                            Err(err) => {
                                debug!(
                                    "connection {} -> {target_id} rejected: {err}",
                                    draft.source_id
                                );
                                Outcome::rejected(err)
                            }
                        }
                    }
                    _ => Outcome::handled(),
                }
            }
        }
    }

    /// Adds the connection; a new strong child without a group joins its parent's group.
    fn connect(
        &self,
        model: &mut GraphModel,
        source_id: NodeId,
        target_id: NodeId,
        kind: ConnectionKind,
    ) -> Result<(), GraphError> {
        let mut ops = vec![Op::AddConnection {
            connection_id: model.next_connection_id(),
            source_id,
            target_id,
            kind,
        }];
        let parent_group = model.node(source_id).and_then(Node::group_id);
        let child_group = model.node(target_id).and_then(Node::group_id);
        if let (ConnectionKind::Strong, Some(group_id), None) = (kind, parent_group, child_group) {
            ops.push(Op::UpdateNode {
                node_id: target_id,
                patch: NodePatch::group(Some(group_id)),
            });
        }
        model.apply(&ops).map(|_| ())
    }

    fn double_press(&mut self, model: &mut GraphModel, screen: Point) -> Outcome {
        if let Mode::EditingLabel(_) = self.view.mode {
            self.commit_label(model);
        }
        self.view.mode = Mode::Idle;

        let canvas = self.to_canvas(model, screen);
        let (node_id, created) = match node_at(model, &self.view.filter, canvas) {
            Some(node_id) => (node_id, false),
            None => {
                let size = self.config.default_node_size;
                let position = canvas.offset(-size.width / 8.0, -size.height / 8.0);
                match model.add_node(position, NEW_NODE_LABEL) {
                    Ok(node_id) => (node_id, true),
                    Err(err) => return Outcome::rejected(err),
                }
            }
        };

        let original = model
            .node(node_id)
            .map(|node| node.label().to_owned())
            .unwrap_or_default();
        let buffer = if created {
            String::new()
        } else {
            original.clone()
        };
        self.view.select_only(SelectionItem::Node(node_id));
        self.view.mode = Mode::EditingLabel(LabelEdit {
            node_id,
            buffer,
            original,
        });
        Outcome::handled()
    }

    fn key(&mut self, model: &mut GraphModel, key: Key, modifiers: Modifiers) -> Outcome {
        match key {
            Key::Delete => {
                if self.view.selection.is_empty() {
                    return Outcome::ignored();
                }
                self.delete_selection(model);
                Outcome::handled()
            }
            Key::Escape => {
                match std::mem::take(&mut self.view.mode) {
                    Mode::Dragging(drag) => self.cancel_drag(model, &drag),
                    Mode::Idle => self.view.selection.clear(),
                    Mode::ConnectingDraft(_)
                    | Mode::EditingLabel(_)
                    | Mode::Marquee(_)
                    | Mode::Panning(_) => {}
                }
                self.view.snap_guides.clear();
                Outcome::handled()
            }
            _ => self.edit_key(model, key, modifiers),
        }
    }

    fn edit_key(&mut self, model: &mut GraphModel, key: Key, modifiers: Modifiers) -> Outcome {
        let Mode::EditingLabel(edit) = &mut self.view.mode else {
            return Outcome::ignored();
        };
        match key {
            Key::Char(c) if !modifiers.ctrl && !c.is_control() => {
                edit.buffer.push(c);
                Outcome::handled()
            }
            Key::Backspace => {
                edit.buffer.pop();
                Outcome::handled()
            }
            Key::Enter => self.commit_label(model),
            _ => Outcome::ignored(),
        }
    }

    fn focus_lost(&mut self, model: &mut GraphModel) -> Outcome {
        match self.view.mode {
            Mode::EditingLabel(_) => self.commit_label(model),
            Mode::Dragging(_) | Mode::Marquee(_) | Mode::Panning(_) | Mode::ConnectingDraft(_) => {
                self.view.mode = Mode::Idle;
                self.view.snap_guides.clear();
                Outcome::handled()
            }
            Mode::Idle => Outcome::ignored(),
        }
    }

    /// Writes the edit buffer back; an empty buffer keeps the current label.
    fn commit_label(&mut self, model: &mut GraphModel) -> Outcome {
        let Mode::EditingLabel(edit) = std::mem::take(&mut self.view.mode) else {
            return Outcome::ignored();
        };
        let label = edit.buffer.trim();
        if label.is_empty() || label == edit.original {
            return Outcome::handled();
        }
        match model.update_node(edit.node_id, NodePatch::label(label)) {
            Ok(()) => Outcome::handled(),
            Err(GraphError::NotFound { .. }) => Outcome::handled(),
            Err(err) => Outcome::rejected(err),
        }
    }

    fn cancel_drag(&mut self, model: &mut GraphModel, drag: &DragState) {
        if !drag.moved {
            return;
        }
        let ops = std::iter::once((drag.node_id, drag.start_position))
            .chain(drag.companions.iter().copied())
            .filter(|(id, _)| model.document().contains_node(*id))
            .map(|(node_id, start)| Op::UpdateNode {
                node_id,
                patch: NodePatch::position(start),
            })
            .collect::<Vec<_>>();
        if let Err(err) = model.apply(&ops) {
            debug!("restoring drag start positions failed: {err}");
        }
    }

    fn wheel(&mut self, model: &mut GraphModel, screen: Point, delta: f64) -> Outcome {
        if !delta.is_finite() || delta == 0.0 {
            return Outcome::ignored();
        }
        let factor = self.config.zoom.step.powf(delta);
        let viewport = model
            .document()
            .viewport()
            .zoomed_at(screen, factor, &self.config.zoom);
        match model.set_viewport(viewport) {
            Ok(()) => Outcome::handled(),
            Err(err) => Outcome::rejected(err),
        }
    }

    /// Style for drawing a connection, derived from the current selection and hover.
    pub fn connection_style(
        &self,
        model: &GraphModel,
        connection_id: ConnectionId,
    ) -> ConnectionStyle {
        if self.view.is_selected(SelectionItem::Connection(connection_id)) {
            return ConnectionStyle::Selected;
        }
        if let Some(connection) = model.connection(connection_id) {
            if self.view.is_node_selected(connection.source_id())
                || self.view.is_node_selected(connection.target_id())
            {
                return ConnectionStyle::Highlighted;
            }
        }
        if self.view.hover == Some(SelectionItem::Connection(connection_id)) {
            return ConnectionStyle::Hover;
        }
        ConnectionStyle::Default
    }

    pub fn set_connect_mode(&mut self, enabled: bool) {
        self.view.connect_mode = enabled;
        if !enabled {
            if let Mode::ConnectingDraft(_) = self.view.mode {
                self.view.mode = Mode::Idle;
            }
        }
    }

    pub fn set_connect_kind(&mut self, kind: ConnectionKind) {
        self.view.connect_kind = kind;
    }

    pub fn set_filter(&mut self, filter: VisibilityFilter) {
        self.view.filter = filter;
    }

    pub fn select_all(&mut self, model: &GraphModel) {
        self.view.selection = shown_nodes(model, &self.view.filter)
            .into_iter()
            .map(|node| SelectionItem::Node(node.id()))
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.view.selection.clear();
    }

    /// Selected nodes that are still shown, in id order.
    fn live_selected_nodes(&mut self, model: &GraphModel) -> Vec<NodeId> {
        self.prune_stale(model);
        self.view.selected_nodes().collect()
    }

    /// Puts every selected node into a new group. `None` when no node is selected.
    pub fn group_selection(
        &mut self,
        model: &mut GraphModel,
        name: &str,
    ) -> Result<Option<GroupId>, GraphError> {
        let nodes = self.live_selected_nodes(model);
        if nodes.is_empty() {
            return Ok(None);
        }
        let group_id = model.next_group_id();
        let mut ops = vec![Op::AddGroup {
            group_id,
            name: name.to_owned(),
            color: None,
        }];
        ops.extend(nodes.into_iter().map(|node_id| Op::UpdateNode {
            node_id,
            patch: NodePatch::group(Some(group_id)),
        }));
        model.apply(&ops)?;
        Ok(Some(group_id))
    }

    pub fn ungroup_selection(&mut self, model: &mut GraphModel) -> Result<(), GraphError> {
        let ops = self
            .live_selected_nodes(model)
            .into_iter()
            .map(|node_id| Op::UpdateNode {
                node_id,
                patch: NodePatch::group(None),
            })
            .collect::<Vec<_>>();
        model.apply(&ops).map(|_| ())
    }

    pub fn tag_selection(&mut self, model: &mut GraphModel, tag: &str) -> Result<(), GraphError> {
        let ops = self
            .live_selected_nodes(model)
            .into_iter()
            .map(|node_id| Op::AddTag {
                node_id,
                tag: tag.to_owned(),
            })
            .collect::<Vec<_>>();
        model.apply(&ops).map(|_| ())
    }

    pub fn untag_selection(&mut self, model: &mut GraphModel, tag: &str) -> Result<(), GraphError> {
        let ops = self
            .live_selected_nodes(model)
            .into_iter()
            .map(|node_id| Op::RemoveTag {
                node_id,
                tag: tag.to_owned(),
            })
            .collect::<Vec<_>>();
        model.apply(&ops).map(|_| ())
    }

    pub fn toggle_collapse_selection(&mut self, model: &mut GraphModel) -> Result<(), GraphError> {
        let ops = self
            .live_selected_nodes(model)
            .into_iter()
            .filter_map(|node_id| {
                let collapsed = model.node(node_id)?.collapsed();
                Some(Op::UpdateNode {
                    node_id,
                    patch: NodePatch::collapsed(!collapsed),
                })
            })
            .collect::<Vec<_>>();
        model.apply(&ops)?;
        self.prune_stale(model);
        Ok(())
    }

    /// Collapses the groups of the selected nodes, or expands them when every one of them is
    /// already collapsed. Returns how many groups were touched.
    pub fn toggle_group_collapse_selection(
        &mut self,
        model: &mut GraphModel,
    ) -> Result<usize, GraphError> {
        let groups = self
            .live_selected_nodes(model)
            .into_iter()
            .filter_map(|node_id| model.node(node_id)?.group_id())
            .collect::<BTreeSet<_>>();
        let collapse = groups
            .iter()
            .any(|group_id| model.group(*group_id).is_some_and(|group| !group.collapsed()));
        let ops = groups
            .iter()
            .map(|group_id| Op::SetGroupCollapsed {
                group_id: *group_id,
                collapsed: collapse,
            })
            .collect::<Vec<_>>();
        model.apply(&ops)?;
        self.prune_stale(model);
        Ok(groups.len())
    }

    /// Raises the selected nodes above everything else, keeping their relative order.
    pub fn bring_selection_to_front(&mut self, model: &mut GraphModel) -> Result<(), GraphError> {
        let selected = self.live_selected_nodes(model);
        let ops = model
            .nodes_in_z_order()
            .into_iter()
            .map(Node::id)
            .filter(|id| selected.contains(id))
            .map(|node_id| Op::BringToFront { node_id })
            .collect::<Vec<_>>();
        model.apply(&ops).map(|_| ())
    }

    /// Removes every selected node (with its connections) and connection. Returns how many
    /// selected objects were removed.
    pub fn delete_selection(&mut self, model: &mut GraphModel) -> usize {
        self.prune_stale(model);
        let selection = std::mem::take(&mut self.view.selection);
        self.view.mode = Mode::Idle;
        self.view.snap_guides.clear();

        let ops = selection
            .iter()
            .map(|item| match item {
                SelectionItem::Node(node_id) => Op::RemoveNode { node_id: *node_id },
                SelectionItem::Connection(connection_id) => Op::RemoveConnection {
                    connection_id: *connection_id,
                },
            })
            .collect::<Vec<_>>();
        if let Err(err) = model.apply(&ops) {
            debug!("delete selection failed: {err}");
            return 0;
        }
        ops.len()
    }
}

/// Label given to nodes created by double-pressing the canvas.
pub const NEW_NODE_LABEL: &str = "New node";

#[cfg(test)]
mod tests;
