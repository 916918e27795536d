// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Rectangle},
        Block, Borders, Paragraph,
    },
};

use super::{App, CELL_HEIGHT, CELL_WIDTH};
use crate::geometry::{Point, Rect as ScreenRect, SnapAxis};
use crate::interact::{shown_connections, shown_nodes, ConnectionStyle, Controller, Mode};
use crate::model::{parse_color, ConnectionKind, NodeId, Viewport};
use crate::ops::GraphModel;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_VALUE_COLOR: Color = Color::Cyan;
const FOOTER_TOAST_COLOR: Color = Color::Yellow;
const FOOTER_ERROR_COLOR: Color = Color::LightRed;

const NODE_COLOR: Color = Color::White;
const SELECTED_COLOR: Color = Color::Yellow;
const GUIDE_COLOR: Color = Color::Magenta;
const DRAFT_COLOR: Color = Color::LightGreen;
const MARQUEE_COLOR: Color = Color::LightBlue;

pub(super) fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let canvas_area = layout[0];
    let status_area = layout[1];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(canvas_title(app));
    app.canvas_area = block.inner(canvas_area);

    let width = f64::from(app.canvas_area.width) * CELL_WIDTH;
    let height = f64::from(app.canvas_area.height) * CELL_HEIGHT;
    let scene = build_scene(&app.model, &app.controller);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| paint_scene(ctx, &scene, height));
    frame.render_widget(canvas, canvas_area);

    let status = Paragraph::new(Line::from(status_spans(app)));
    frame.render_widget(status, status_area);

    if let Mode::EditingLabel(edit) = &app.controller.view().mode {
        if let Some(shape) = scene.nodes.iter().find(|shape| shape.node_id == edit.node_id) {
            let (column, row) = cell_of(app, label_anchor(&shape.rect));
            let max_x = app.canvas_area.right().saturating_sub(1);
            let cursor_x = column.saturating_add(edit.buffer.chars().count() as u16);
            frame.set_cursor(cursor_x.min(max_x), row);
        }
    }
}

fn canvas_title(app: &App) -> String {
    let name = app
        .file
        .as_ref()
        .and_then(|file| file.path().file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_owned());
    let dirty = if app.is_dirty() { " *" } else { "" };
    format!(" nodemap: {name}{dirty} ")
}

fn cell_of(app: &App, point: Point) -> (u16, u16) {
    let column = (point.x / CELL_WIDTH).floor().max(0.0) as u16;
    let row = (point.y / CELL_HEIGHT).floor().max(0.0) as u16;
    (
        app.canvas_area.x.saturating_add(column),
        app.canvas_area.y.saturating_add(row),
    )
}

/// Everything the canvas paints, in screen units with y growing downwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub(super) struct Scene {
    pub(super) connections: Vec<ConnectionShape>,
    pub(super) nodes: Vec<NodeShape>,
    pub(super) guides: Vec<(Point, Point)>,
    pub(super) marquee: Option<ScreenRect>,
    pub(super) draft: Option<(Point, Point)>,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct NodeShape {
    pub(super) node_id: NodeId,
    pub(super) rect: ScreenRect,
    pub(super) text: String,
    pub(super) color: Color,
    pub(super) selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct ConnectionShape {
    pub(super) points: [Point; 3],
    pub(super) color: Color,
    pub(super) kind: ConnectionKind,
}

/// Anchor of each collapsed group with the number of members folded behind it.
fn folded_groups(model: &GraphModel) -> BTreeMap<NodeId, usize> {
    let document = model.document();
    document
        .groups()
        .filter(|group| group.collapsed())
        .filter_map(|group| {
            let anchor = document.group_anchor(group.id())?;
            let folded = model.group_members(group.id()).len().saturating_sub(1);
            Some((anchor, folded))
        })
        .collect()
}

pub(super) fn build_scene(model: &GraphModel, controller: &Controller) -> Scene {
    let view = controller.view();
    let viewport = model.document().viewport();
    let nodes = shown_nodes(model, &view.filter);
    let shown: BTreeSet<NodeId> = nodes.iter().map(|node| node.id()).collect();
    let mut scene = Scene::default();

    for (connection, path) in shown_connections(model, &shown, controller.config().grid) {
        let color = match controller.connection_style(model, connection.id()) {
            ConnectionStyle::Selected => SELECTED_COLOR,
            ConnectionStyle::Highlighted => Color::LightYellow,
            ConnectionStyle::Hover => Color::LightCyan,
            ConnectionStyle::Default => match connection.kind() {
                ConnectionKind::Strong => Color::Gray,
                ConnectionKind::Weak => Color::DarkGray,
            },
        };
        scene.connections.push(ConnectionShape {
            points: [
                viewport.canvas_to_screen(path.start),
                viewport.canvas_to_screen(path.corner),
                viewport.canvas_to_screen(path.end),
            ],
            color,
            kind: connection.kind(),
        });
    }

    let editing = match &view.mode {
        Mode::EditingLabel(edit) => Some(edit),
        _ => None,
    };
    let folded = folded_groups(model);
    for node in &nodes {
        let selected = view.is_node_selected(node.id());
        let color = if selected {
            SELECTED_COLOR
        } else {
            node.group_id()
                .and_then(|group_id| model.group(group_id))
                .and_then(|group| parse_color(group.color()))
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(NODE_COLOR)
        };
        let label = match editing {
            Some(edit) if edit.node_id == node.id() => format!("{}_", edit.buffer),
            _ => node.label().to_owned(),
        };
        let mut text = if node.collapsed() {
            format!("{label} [+]")
        } else {
            label
        };
        if let Some(hidden) = folded.get(&node.id()) {
            text.push_str(&format!(" [+{hidden}]"));
        }
        scene.nodes.push(NodeShape {
            node_id: node.id(),
            rect: screen_rect(&viewport, &node.rect()),
            text,
            color,
            selected,
        });
    }

    for guide in &view.snap_guides {
        let (from, to) = match guide.axis {
            SnapAxis::Vertical => (
                Point::new(guide.coordinate, guide.from),
                Point::new(guide.coordinate, guide.to),
            ),
            SnapAxis::Horizontal => (
                Point::new(guide.from, guide.coordinate),
                Point::new(guide.to, guide.coordinate),
            ),
        };
        scene.guides.push((
            viewport.canvas_to_screen(from),
            viewport.canvas_to_screen(to),
        ));
    }

    match &view.mode {
        Mode::Marquee(marquee) => {
            scene.marquee = Some(screen_rect(&viewport, &marquee.rect()));
        }
        Mode::ConnectingDraft(draft) => {
            if let Some(source) = model.node(draft.source_id) {
                scene.draft = Some((
                    viewport.canvas_to_screen(source.rect().center()),
                    viewport.canvas_to_screen(draft.current_pointer_position),
                ));
            }
        }
        _ => {}
    }

    scene
}

fn screen_rect(viewport: &Viewport, rect: &ScreenRect) -> ScreenRect {
    let origin = viewport.canvas_to_screen(rect.origin);
    let far = viewport.canvas_to_screen(Point::new(rect.right(), rect.bottom()));
    ScreenRect::from_corners(origin, far)
}

fn label_anchor(rect: &ScreenRect) -> Point {
    Point::new(rect.left() + CELL_WIDTH, rect.center_y())
}

/// Characters of `text` that fit inside a node `width` screen units wide.
pub(super) fn fit_label(text: &str, width: f64) -> String {
    let room = ((width / CELL_WIDTH).floor() as usize).saturating_sub(2);
    let count = text.chars().count();
    if count <= room {
        return text.to_owned();
    }
    if room == 0 {
        return String::new();
    }
    let mut fitted: String = text.chars().take(room.saturating_sub(1)).collect();
    fitted.push('~');
    fitted
}

fn paint_scene(ctx: &mut Context<'_>, scene: &Scene, height: f64) {
    let flip = |point: Point| (point.x, height - point.y);

    for connection in &scene.connections {
        let [start, corner, end] = connection.points;
        for (from, to) in [(start, corner), (corner, end)] {
            let (x1, y1) = flip(from);
            let (x2, y2) = flip(to);
            ctx.draw(&CanvasLine {
                x1,
                y1,
                x2,
                y2,
                color: connection.color,
            });
        }
        if connection.kind == ConnectionKind::Weak {
            let (x, y) = flip(corner);
            ctx.print(x, y, Span::styled("~", Style::default().fg(connection.color)));
        }
    }
    ctx.layer();

    for node in &scene.nodes {
        let (x, y) = flip(Point::new(node.rect.left(), node.rect.bottom()));
        ctx.draw(&Rectangle {
            x,
            y,
            width: node.rect.size.width,
            height: node.rect.size.height,
            color: node.color,
        });
        let label = fit_label(&node.text, node.rect.size.width);
        if !label.is_empty() {
            let (x, y) = flip(label_anchor(&node.rect));
            let mut style = Style::default().fg(node.color);
            if node.selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            ctx.print(x, y, Span::styled(label, style));
        }
    }

    for &(from, to) in &scene.guides {
        let (x1, y1) = flip(from);
        let (x2, y2) = flip(to);
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color: GUIDE_COLOR,
        });
    }

    if let Some(rect) = &scene.marquee {
        let (x, y) = flip(Point::new(rect.left(), rect.bottom()));
        ctx.draw(&Rectangle {
            x,
            y,
            width: rect.size.width,
            height: rect.size.height,
            color: MARQUEE_COLOR,
        });
    }

    if let Some((from, to)) = scene.draft {
        let (x1, y1) = flip(from);
        let (x2, y2) = flip(to);
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color: DRAFT_COLOR,
        });
    }
}

pub(super) fn status_spans(app: &App) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    if let Some(prompt) = &app.prompt {
        spans.push(Span::styled(
            format!("{}: ", prompt.kind.label()),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
        spans.push(Span::styled(
            format!("{}_", prompt.buffer),
            Style::default().fg(FOOTER_VALUE_COLOR),
        ));
        spans.push(Span::styled(
            "  (Enter apply, Esc cancel)",
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
        return spans;
    }

    let view = app.controller.view();
    push_footer_entry(&mut spans, "Mode", mode_name(&view.mode));
    let connect = if view.connect_mode {
        format!("on ({})", view.connect_kind)
    } else {
        format!("off ({})", view.connect_kind)
    };
    push_footer_entry(&mut spans, "Connect", &connect);
    let zoom = app.model.document().viewport().zoom;
    push_footer_entry(&mut spans, "Zoom", &format!("{:.0}%", zoom * 100.0));
    let document = app.model.document();
    push_footer_entry(
        &mut spans,
        "Nodes",
        &format!("{}/{}", document.node_count(), document.connection_count()),
    );
    let selected = view.selected_nodes().count() + view.selected_connections().count();
    if selected > 0 {
        push_footer_entry(&mut spans, "Selected", &selected.to_string());
    }
    if view.filter.is_active() {
        let tags: Vec<&str> = view.filter.tags.iter().map(String::as_str).collect();
        push_footer_entry(&mut spans, "Filter", &tags.join(" "));
    }

    if let Some(toast) = &app.toast {
        let color = if toast.message.starts_with("Rejected") || toast.message.contains("failed") {
            FOOTER_ERROR_COLOR
        } else {
            FOOTER_TOAST_COLOR
        };
        spans.push(Span::styled(
            format!(" | {}", toast.message),
            Style::default().fg(color),
        ));
    } else {
        spans.push(Span::styled(
            " | q quit | s save | n new node | c connect | / filter",
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans
}

fn mode_name(mode: &Mode) -> &'static str {
    match mode {
        Mode::Idle => "idle",
        Mode::Dragging(_) => "drag",
        Mode::ConnectingDraft(_) => "connect",
        Mode::EditingLabel(_) => "edit",
        Mode::Marquee(_) => "select",
        Mode::Panning(_) => "pan",
    }
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            " | ".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{label}:"),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(FOOTER_VALUE_COLOR),
    ));
}
