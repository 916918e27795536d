// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nodemap and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Hosts the canvas in a ratatui + crossterm shell: mouse and key events are translated into
//! controller input, and the document is drawn on a braille canvas. One terminal cell spans
//! [`CELL_WIDTH`] x [`CELL_HEIGHT`] screen units.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{trace, warn};
use ratatui::{layout::Rect as CellRect, prelude::*};

use crate::geometry::Point;
use crate::interact::{
    Controller, InputEvent, InteractionConfig, Key, Modifiers, Outcome, PointerButton,
    PresentationAdapter, VisibilityFilter,
};
use crate::model::{ConnectionKind, Document};
use crate::ops::{ChangeEvent, GraphError, GraphModel};
use crate::store::DocumentFile;

mod draw;

pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);
const TOAST_DURATION: Duration = Duration::from_secs(3);
const KEY_PAN_CELLS: f64 = 4.0;

/// Runs the interactive terminal UI on `model`, saving to `file` when one is given.
pub fn run(
    model: GraphModel,
    config: InteractionConfig,
    file: Option<DocumentFile>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(model, Controller::new(config), file);

    while !app.should_quit {
        app.expire_toast(Instant::now());
        if app.redraw.take() {
            terminal.draw(|frame| draw::draw(frame, &mut app))?;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                Event::FocusLost => app.handle_focus_lost(),
                Event::Resize(_, _) => app.redraw.request(),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Redraw requests coming from the controller and the shell.
#[derive(Debug)]
struct Redraw {
    pending: bool,
}

impl Default for Redraw {
    fn default() -> Self {
        Self { pending: true }
    }
}

impl Redraw {
    fn request(&mut self) {
        self.pending = true;
    }

    fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl PresentationAdapter for Redraw {
    fn notify(&mut self, change: &ChangeEvent) {
        trace!("redraw after {:?} {:?}", change.kind, change.target);
        self.pending = true;
    }

    fn view_changed(&mut self) {
        self.pending = true;
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    Tag,
    Untag,
    Filter,
}

impl PromptKind {
    fn label(self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Untag => "untag",
            Self::Filter => "filter tags",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Prompt {
    kind: PromptKind,
    buffer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    column: u16,
    row: u16,
    at: Instant,
}

struct App {
    model: GraphModel,
    controller: Controller,
    redraw: Redraw,
    file: Option<DocumentFile>,
    saved_rev: u64,
    toast: Option<Toast>,
    prompt: Option<Prompt>,
    last_press: Option<Press>,
    /// Inner canvas area from the last frame; mouse cells are relative to it.
    canvas_area: CellRect,
    quit_armed: bool,
    should_quit: bool,
}

impl App {
    fn new(model: GraphModel, controller: Controller, file: Option<DocumentFile>) -> Self {
        let saved_rev = model.rev();
        Self {
            model,
            controller,
            redraw: Redraw::default(),
            file,
            saved_rev,
            toast: None,
            prompt: None,
            last_press: None,
            canvas_area: CellRect::new(1, 1, 80, 20),
            quit_armed: false,
            should_quit: false,
        }
    }

    fn is_dirty(&self) -> bool {
        self.model.rev() != self.saved_rev
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
        self.redraw.request();
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
            self.redraw.request();
        }
    }

    fn send(&mut self, event: InputEvent) -> bool {
        let outcome = self
            .controller
            .handle(&mut self.model, event, &mut self.redraw);
        self.report(&outcome);
        outcome.handled
    }

    fn report(&mut self, outcome: &Outcome) {
        if let Some(err) = &outcome.rejected {
            self.set_toast(format!("Rejected: {err}"));
        }
    }

    /// Centre of the cell at `column`/`row`, in screen units relative to the canvas.
    fn screen_point(&self, column: u16, row: u16) -> Point {
        let dx = f64::from(column) - f64::from(self.canvas_area.x);
        let dy = f64::from(row) - f64::from(self.canvas_area.y);
        Point::new((dx + 0.5) * CELL_WIDTH, (dy + 0.5) * CELL_HEIGHT)
    }

    fn canvas_center(&self) -> Point {
        Point::new(
            f64::from(self.canvas_area.width) * CELL_WIDTH / 2.0,
            f64::from(self.canvas_area.height) * CELL_HEIGHT / 2.0,
        )
    }

    fn handle_focus_lost(&mut self) {
        self.send(InputEvent::FocusLost);
        self.last_press = None;
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let point = self.screen_point(mouse.column, mouse.row);
        let modifiers = modifiers_from(mouse.modifiers);
        let event = match mouse.kind {
            MouseEventKind::Down(button) => {
                let button = pointer_button(button);
                if button == PointerButton::Primary && self.is_double_click(&mouse, now) {
                    self.last_press = None;
                    InputEvent::DoublePress { point }
                } else {
                    self.last_press = Some(Press {
                        column: mouse.column,
                        row: mouse.row,
                        at: now,
                    });
                    InputEvent::PointerDown {
                        point,
                        button,
                        modifiers,
                    }
                }
            }
            MouseEventKind::Up(button) => InputEvent::PointerUp {
                point,
                button: pointer_button(button),
                modifiers,
            },
            MouseEventKind::Drag(_) | MouseEventKind::Moved => InputEvent::PointerMove { point },
            MouseEventKind::ScrollUp => InputEvent::Wheel { point, delta: 1.0 },
            MouseEventKind::ScrollDown => InputEvent::Wheel { point, delta: -1.0 },
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return,
        };
        self.send(event);
    }

    fn is_double_click(&self, mouse: &MouseEvent, now: Instant) -> bool {
        self.last_press.is_some_and(|press| {
            press.column == mouse.column
                && press.row == mouse.row
                && now.saturating_duration_since(press.at) <= DOUBLE_CLICK_WINDOW
        })
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key.code);
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('s') => {
                    self.save();
                    return;
                }
                _ => {}
            }
        }

        if let Some(controller_key) = controller_key(key.code) {
            let event = InputEvent::Key {
                key: controller_key,
                modifiers: modifiers_from(key.modifiers),
            };
            if self.send(event) {
                return;
            }
        }
        self.handle_shortcut(key.code);
    }

    fn handle_shortcut(&mut self, code: KeyCode) {
        if code != KeyCode::Char('q') {
            self.quit_armed = false;
        }
        match code {
            KeyCode::Char('q') => self.request_quit(),
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('n') => {
                let center = self.canvas_center();
                self.send(InputEvent::DoublePress { point: center });
            }
            KeyCode::Char('e') => self.edit_selected_label(),
            KeyCode::Char('c') => {
                let enabled = !self.controller.view().connect_mode;
                self.controller.set_connect_mode(enabled);
                self.set_toast(if enabled {
                    "Connect mode on"
                } else {
                    "Connect mode off"
                });
            }
            KeyCode::Char('k') => {
                let kind = self.controller.view().connect_kind.toggled();
                self.controller.set_connect_kind(kind);
                self.set_toast(format!("New connections are {kind}"));
            }
            KeyCode::Char('a') => {
                self.controller.select_all(&self.model);
                self.redraw.request();
            }
            KeyCode::Char('g') => {
                let name = format!("Group {}", self.model.next_group_id().get());
                let result = self.controller.group_selection(&mut self.model, &name);
                match result {
                    Ok(Some(_)) => self.set_toast(format!("Created {name}")),
                    Ok(None) => self.set_toast("Select nodes to group"),
                    Err(err) => self.set_toast(format!("Rejected: {err}")),
                }
            }
            KeyCode::Char('u') => {
                let result = self.controller.ungroup_selection(&mut self.model);
                self.finish_command(result);
            }
            KeyCode::Char('z') => {
                let result = self.controller.toggle_collapse_selection(&mut self.model);
                self.finish_command(result);
            }
            KeyCode::Char('Z') => {
                match self.controller.toggle_group_collapse_selection(&mut self.model) {
                    Ok(0) => self.set_toast("Select grouped nodes first"),
                    Ok(_) => {}
                    Err(err) => self.set_toast(format!("Rejected: {err}")),
                }
            }
            KeyCode::Char('f') => {
                let result = self.controller.bring_selection_to_front(&mut self.model);
                self.finish_command(result);
            }
            KeyCode::Char('t') => self.open_prompt(PromptKind::Tag),
            KeyCode::Char('T') => self.open_prompt(PromptKind::Untag),
            KeyCode::Char('/') => self.open_prompt(PromptKind::Filter),
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_at_center(1.0),
            KeyCode::Char('-') => self.zoom_at_center(-1.0),
            KeyCode::Left => self.pan(KEY_PAN_CELLS * CELL_WIDTH, 0.0),
            KeyCode::Right => self.pan(-KEY_PAN_CELLS * CELL_WIDTH, 0.0),
            KeyCode::Up => self.pan(0.0, KEY_PAN_CELLS * CELL_HEIGHT),
            KeyCode::Down => self.pan(0.0, -KEY_PAN_CELLS * CELL_HEIGHT),
            KeyCode::Backspace => {
                self.controller.delete_selection(&mut self.model);
            }
            _ => {}
        }
        self.controller.flush(&mut self.model, &mut self.redraw);
    }

    fn finish_command(&mut self, result: Result<(), GraphError>) {
        if let Err(err) = result {
            self.set_toast(format!("Rejected: {err}"));
        }
        self.controller.flush(&mut self.model, &mut self.redraw);
    }

    fn request_quit(&mut self) {
        if !self.is_dirty() || self.quit_armed {
            self.should_quit = true;
            return;
        }
        self.quit_armed = true;
        self.set_toast("Unsaved changes: press q again to quit, s to save");
    }

    fn save(&mut self) {
        let Some(file) = &self.file else {
            self.set_toast("No file to save to (start with `nodemap <file>`)");
            return;
        };
        match file.save(self.model.document()) {
            Ok(()) => {
                self.saved_rev = self.model.rev();
                let message = format!("Saved {}", file.path().display());
                self.set_toast(message);
            }
            Err(err) => {
                warn!("save failed: {err}");
                self.set_toast(format!("Save failed: {err}"));
            }
        }
    }

    fn edit_selected_label(&mut self) {
        let Some(node_id) = self.controller.view().selected_nodes().next() else {
            self.set_toast("Select a node to edit");
            return;
        };
        let Some(node) = self.model.node(node_id) else {
            return;
        };
        let viewport = self.model.document().viewport();
        let point = viewport.canvas_to_screen(node.rect().center());
        self.send(InputEvent::DoublePress { point });
    }

    fn zoom_at_center(&mut self, delta: f64) {
        let point = self.canvas_center();
        self.send(InputEvent::Wheel { point, delta });
    }

    fn pan(&mut self, dx: f64, dy: f64) {
        let viewport = self.model.document().viewport().panned(dx, dy);
        if let Err(err) = self.model.set_viewport(viewport) {
            self.set_toast(format!("Rejected: {err}"));
        }
        self.controller.flush(&mut self.model, &mut self.redraw);
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        if kind != PromptKind::Filter && self.controller.view().selected_nodes().next().is_none() {
            self.set_toast("Select nodes first");
            return;
        }
        self.prompt = Some(Prompt {
            kind,
            buffer: String::new(),
        });
        self.redraw.request();
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        let Some(prompt) = &mut self.prompt else {
            return;
        };
        self.redraw.request();
        match code {
            KeyCode::Char(c) => prompt.buffer.push(c),
            KeyCode::Backspace => {
                prompt.buffer.pop();
            }
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.apply_prompt(prompt);
                }
            }
            _ => {}
        }
    }

    fn apply_prompt(&mut self, prompt: Prompt) {
        let text = prompt.buffer.trim();
        let result = match prompt.kind {
            PromptKind::Tag if !text.is_empty() => {
                self.controller.tag_selection(&mut self.model, text)
            }
            PromptKind::Untag if !text.is_empty() => {
                self.controller.untag_selection(&mut self.model, text)
            }
            PromptKind::Tag | PromptKind::Untag => Ok(()),
            PromptKind::Filter => {
                let filter = VisibilityFilter {
                    tags: text.split_whitespace().map(str::to_owned).collect(),
                    ..VisibilityFilter::default()
                };
                let message = if filter.is_active() {
                    format!("Showing tags: {text}")
                } else {
                    "Filter cleared".to_owned()
                };
                self.controller.set_filter(filter);
                self.controller.prune_stale(&self.model);
                self.set_toast(message);
                Ok(())
            }
        };
        self.finish_command(result);
    }
}

fn controller_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Delete => Some(Key::Delete),
        _ => None,
    }
}

fn modifiers_from(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        shift: modifiers.contains(KeyModifiers::SHIFT),
        alt: modifiers.contains(KeyModifiers::ALT),
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Right => PointerButton::Secondary,
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )
        .map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    );
}

/// A small roadmap used by `--demo`.
pub fn demo_document() -> Document {
    let mut model = GraphModel::new();
    match build_demo(&mut model) {
        Ok(()) => model.document().clone(),
        Err(err) => {
            warn!("demo document incomplete: {err}");
            model.document().clone()
        }
    }
}

fn build_demo(model: &mut GraphModel) -> Result<(), GraphError> {
    let root = model.add_node(Point::new(40.0, 200.0), "Product roadmap")?;
    let design = model.add_node(Point::new(300.0, 60.0), "Design")?;
    let build = model.add_node(Point::new(300.0, 220.0), "Build")?;
    let ship = model.add_node(Point::new(300.0, 380.0), "Ship")?;
    let research = model.add_node(Point::new(560.0, 20.0), "User research")?;
    let mockups = model.add_node(Point::new(560.0, 100.0), "Mockups")?;
    let api = model.add_node(Point::new(560.0, 200.0), "API")?;
    let client = model.add_node(Point::new(560.0, 280.0), "Client")?;
    let launch = model.add_node(Point::new(560.0, 400.0), "Launch")?;

    for (parent, child) in [
        (root, design),
        (root, build),
        (root, ship),
        (design, research),
        (design, mockups),
        (build, api),
        (build, client),
        (ship, launch),
    ] {
        model.add_connection(parent, child, ConnectionKind::Strong)?;
    }
    model.add_connection(mockups, client, ConnectionKind::Weak)?;

    let team = model.add_group("Platform team", None)?;
    for node_id in [build, api, client] {
        model.set_node_group(node_id, Some(team))?;
    }
    model.add_tag(api, "backend")?;
    model.add_tag(client, "frontend")?;
    model.add_tag(mockups, "frontend")?;
    model.add_note(launch, "Coordinate the announcement with support")?;
    model.take_changes();
    Ok(())
}
