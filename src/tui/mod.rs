//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Panels and focus
//!
//! Three input panels (API key, schema, question) share the keyboard; Tab
//! and Shift+Tab move focus between them. Copy, upload, scrolling and quit
//! work from any panel.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (a request in flight, or a success banner counting down):
//!   draws every ~80ms so spinners move and banners disappear on time.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize or
//!   replies from background tasks.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

pub mod clipboard;
mod component;
mod components;
mod event;
mod sql;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use log::{debug, info, warn};
use tui_scrollview::ScrollViewState;

use crate::api::tasks::run_request;
use crate::api::{HttpService, Text2SqlService};
use crate::core::action::{Action, Effect, Request, update};
use crate::core::config::ResolvedConfig;
use crate::core::form::FormPhase;
use crate::core::state::App;
use crate::tui::clipboard::{ClipboardSink, SystemClipboard};
use crate::tui::component::EventHandler;
use crate::tui::components::{FieldEvent, SchemaEvent, SchemaInput, TextField};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which input panel receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ApiKey,
    Schema,
    Question,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::ApiKey => Focus::Schema,
            Focus::Schema => Focus::Question,
            Focus::Question => Focus::ApiKey,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::ApiKey => Focus::Question,
            Focus::Schema => Focus::ApiKey,
            Focus::Question => Focus::Schema,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub key_field: TextField,
    pub schema_input: SchemaInput,
    pub question_field: TextField,
    pub results_scroll: ScrollViewState,
    pub server_url: String,
}

impl TuiState {
    pub fn new(server_url: String) -> Self {
        Self {
            focus: Focus::ApiKey, // Nothing else works until a key is set
            key_field: TextField::new("sk-...").masked(),
            schema_input: SchemaInput::default(),
            question_field: TextField::new("e.g. Show me the ten customers with the most orders this year")
                .multiline(),
            results_scroll: ScrollViewState::default(),
            server_url,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Carries out effects until one needs nothing further. Returns true on quit.
fn apply(
    app: &mut App,
    tui: &mut TuiState,
    ctx: &mut LoopContext,
    action: Action,
) -> bool {
    let mut next = Some(action);
    while let Some(action) = next.take() {
        match update(app, action) {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::Spawn(request) => spawn_request(ctx.service.clone(), request, ctx.tx.clone()),
            Effect::ClearQuestionInput => tui.question_field.clear(),
            Effect::CopyToClipboard(text) => {
                next = Some(clipboard::copy(ctx.clipboard.as_mut(), &text));
            }
        }
    }
    false
}

/// Handles owned by the event loop that effects need.
struct LoopContext {
    service: Arc<dyn Text2SqlService>,
    tx: mpsc::Sender<Action>,
    clipboard: Box<dyn ClipboardSink>,
}

/// Routes one input event. Returns true on quit.
fn handle_event(app: &mut App, tui: &mut TuiState, ctx: &mut LoopContext, event: TuiEvent) -> bool {
    match event {
        TuiEvent::ForceQuit | TuiEvent::Escape => apply(app, tui, ctx, Action::Quit),
        TuiEvent::Resize => false,
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next();
            false
        }
        TuiEvent::FocusPrev => {
            tui.focus = tui.focus.prev();
            false
        }
        TuiEvent::Upload => apply(app, tui, ctx, Action::UploadSchema),
        TuiEvent::Copy => apply(app, tui, ctx, Action::CopyResult),
        TuiEvent::ScrollUp => {
            tui.results_scroll.scroll_up();
            false
        }
        TuiEvent::ScrollDown => {
            tui.results_scroll.scroll_down();
            false
        }
        TuiEvent::ScrollPageUp => {
            tui.results_scroll.scroll_page_up();
            false
        }
        TuiEvent::ScrollPageDown => {
            tui.results_scroll.scroll_page_down();
            false
        }
        _ => match tui.focus {
            Focus::ApiKey => match tui.key_field.handle_event(&event) {
                Some(FieldEvent::Submit(key)) => apply(app, tui, ctx, Action::SubmitApiKey(key)),
                _ => false,
            },
            Focus::Schema => match tui.schema_input.handle_event(&event) {
                Some(SchemaEvent::Select { raw, via }) => apply(app, tui, ctx, Action::SelectSchema { raw, via }),
                None => false,
            },
            Focus::Question => match tui.question_field.handle_event(&event) {
                Some(FieldEvent::Submit(question)) => apply(app, tui, ctx, Action::SubmitQuestion(question)),
                _ => false,
            },
        },
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let service: Arc<dyn Text2SqlService> = Arc::new(HttpService::new(config.server_url.clone()));
    info!("Using text-to-SQL service at {}", config.server_url);

    let mut app = App::new();
    let mut tui = TuiState::new(config.server_url.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut ctx = LoopContext {
        service,
        tx,
        clipboard: Box::new(SystemClipboard::default()),
    };

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        let animating = app.is_busy() || has_banner(&app);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event.into_iter().chain(std::iter::from_fn(poll_event_immediate)) {
            if handle_event(&mut app, &mut tui, &mut ctx, event) {
                should_quit = true;
                break;
            }
        }

        // Replies from background requests
        while !should_quit && let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit = apply(&mut app, &mut tui, &mut ctx, action);
        }

        if apply(&mut app, &mut tui, &mut ctx, Action::Tick(Instant::now())) {
            should_quit = true;
        }

        if should_quit {
            break Ok(());
        }
    };

    ratatui::restore();
    info!("Exiting");
    result
}

/// A success or copied banner is waiting to expire.
fn has_banner(app: &App) -> bool {
    [&app.key, &app.schema.phase, &app.copy]
        .into_iter()
        .any(FormPhase::is_succeeded)
}

fn spawn_request(service: Arc<dyn Text2SqlService>, request: Request, tx: mpsc::Sender<Action>) {
    info!("Spawning request: {}", request_name(&request));
    tokio::spawn(async move {
        let action = run_request(service, request).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver request result: receiver dropped");
        }
    });
}

fn request_name(request: &Request) -> &'static str {
    match request {
        Request::RegisterKey { .. } => "set-api-key",
        Request::UploadSchema { .. } => "upload-schema",
        Request::Convert { .. } => "convert",
        Request::FetchHistory { .. } => "history",
    }
}
