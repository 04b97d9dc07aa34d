//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the chat view,
//! translates keyboard events into `core::Action` values and performs the
//! `Effect`s the reducer asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Requests
//!
//! Every `Effect::SpawnQuery` becomes one tokio task that awaits the
//! `QueryClient` and posts `Action::QueryCompleted` back over a channel. The
//! loop drains that channel once per iteration, so replies are applied in
//! the order they complete. Tasks are tracked by `RequestId` and aborted when
//! the view closes (and on every new send under `ReplyOrder::Latest`).
//!
//! ## Redraw Strategy
//!
//! - **Busy** (loading or requests in flight): draws every ~80ms so the
//!   spinner animates and replies show up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tokio::task::AbortHandle;

use crate::ReplyOrder;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{ChatState, RequestId};
use crate::query::{HttpQueryClient, QueryClient};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const BUSY_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: redraws reset the blink timer
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Requests that have been spawned and not yet reported back.
#[derive(Default)]
struct InFlight {
    handles: Vec<(RequestId, AbortHandle)>,
}

impl InFlight {
    fn track(&mut self, id: RequestId, handle: AbortHandle) {
        self.handles.push((id, handle));
    }

    fn finish(&mut self, id: RequestId) {
        self.handles.retain(|(tracked, _)| *tracked != id);
    }

    fn abort_all(&mut self) {
        for (id, handle) in self.handles.drain(..) {
            debug!("Aborting request {}", id);
            handle.abort();
        }
    }

    fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Everything one run of the chat view owns.
struct ChatSession {
    state: ChatState,
    tui: TuiState,
    client: Arc<dyn QueryClient>,
    tx: mpsc::Sender<Action>,
    rx: mpsc::Receiver<Action>,
    in_flight: InFlight,
}

impl ChatSession {
    fn new(client: Arc<dyn QueryClient>, reply_order: ReplyOrder) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: ChatState::new(reply_order),
            tui: TuiState::new(),
            client,
            tx,
            rx,
            in_flight: InFlight::default(),
        }
    }

    fn is_busy(&self) -> bool {
        self.state.is_loading || !self.in_flight.is_empty()
    }

    /// Apply an action and perform its effect. Returns `true` to quit.
    fn dispatch(&mut self, action: Action) -> bool {
        match update(&mut self.state, action) {
            Effect::None => false,
            Effect::Quit => true,
            Effect::SpawnQuery {
                id,
                query,
                abort_pending,
            } => {
                if abort_pending {
                    self.in_flight.abort_all();
                }
                let handle = spawn_query(self.client.clone(), id, query, self.tx.clone());
                self.in_flight.track(id, handle);
                false
            }
        }
    }

    /// Route one terminal event. Returns `true` to quit.
    fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            // Resize just needs a redraw
            TuiEvent::Resize => false,
            TuiEvent::Quit => self.dispatch(Action::Quit),
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown
            | TuiEvent::ScrollToBottom => {
                self.tui.message_list.handle_event(&event);
                false
            }
            _ => match self.tui.input_box.handle_event(&event) {
                Some(InputEvent::Changed) => {
                    let text = self.tui.input_box.buffer.clone();
                    self.dispatch(Action::InputChanged(text))
                }
                Some(InputEvent::Submit) => {
                    let before = self.state.messages.len();
                    let quit = self.dispatch(Action::Send);
                    self.tui.input_box.sync(&self.state.input);
                    if self.state.messages.len() > before {
                        // Show the message just sent
                        self.tui.message_list.stick_to_bottom = true;
                    }
                    quit
                }
                Some(InputEvent::CursorMoved) | None => false,
            },
        }
    }

    /// Apply every reply that arrived since the last call.
    /// Returns whether anything was applied.
    fn drain_completions(&mut self) -> bool {
        let mut applied = false;
        while let Ok(action) = self.rx.try_recv() {
            if let Action::QueryCompleted { id, .. } = &action {
                self.in_flight.finish(*id);
            }
            debug!("Event loop received: {:?}", action);
            self.dispatch(action);
            applied = true;
        }
        applied
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        let start_time = Instant::now();
        let mut needs_redraw = true; // Force first frame

        loop {
            let busy = self.is_busy();
            if busy {
                needs_redraw = true;
            }

            if needs_redraw {
                let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
                terminal.draw(|f| {
                    ui::draw_ui(f, &self.state, &mut self.tui, self.client.endpoint(), spinner_frame)
                })?;
                needs_redraw = false;
            }

            let timeout = if busy { BUSY_POLL } else { IDLE_POLL };

            // Process first event + drain ALL pending events before next draw
            let mut next = poll_event_timeout(timeout)?;
            while let Some(event) = next {
                needs_redraw = true;
                if self.handle_event(event) {
                    return Ok(());
                }
                next = poll_event_immediate()?;
            }

            if self.drain_completions() {
                needs_redraw = true;
            }
        }
    }
}

/// Run the chat view against the configured HTTP endpoint.
pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let client = HttpQueryClient::new(config.endpoint.clone(), config.timeout)
        .map_err(io::Error::other)?;
    run_with_client(Arc::new(client), config.reply_order)
}

/// Run the chat view with any `QueryClient`. Must be called inside a tokio runtime.
pub fn run_with_client(client: Arc<dyn QueryClient>, reply_order: ReplyOrder) -> io::Result<()> {
    let mut session = ChatSession::new(client, reply_order);

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        warn!("Failed to enable terminal modes: {}", e);
    }

    let result = session.event_loop(&mut terminal);

    // Outstanding requests die with the view
    session.in_flight.abort_all();
    drop(terminal_mode_guard);
    ratatui::restore();

    info!("Chat view closed after {} messages", session.state.messages.len());
    result
}

fn spawn_query(
    client: Arc<dyn QueryClient>,
    id: RequestId,
    query: String,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning query {} to {}", id, client.endpoint());
    let handle = tokio::spawn(async move {
        let outcome = client.query(&query).await;
        if tx.send(Action::QueryCompleted { id, outcome }).is_err() {
            warn!("Failed to deliver reply for {}: receiver dropped", id);
        }
    });
    handle.abort_handle()
}
