//! Terminal Tambola (default binary).
//!
//! One player, up to ten tickets, numbers called by key press or by the
//! auto-call countdown. Configuration comes from `TAMBOLA_*` environment
//! variables (see [`tambola::config`]).

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use rand::Rng;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tambola::core::{Clock, GameEvent, GameSession, MarkOutcome};
use tambola::input::{handle_key_event, should_quit, TicketCursor};
use tambola::term::{FrameBuffer, GameView, HudStatus, TerminalRenderer, Viewport};
use tambola::types::GameAction;
use tambola::{AutoCall, EventLog, GameConfig};

/// Upper bound on one loop iteration while idle.
const FRAME_MS: u32 = 100;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_tracing(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let options = config.session_options();
    let result = match config.seed {
        Some(seed) => run(&mut term, GameSession::with_seed(seed, options), &config),
        None => run(&mut term, GameSession::from_entropy(options), &config),
    };

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to `TAMBOLA_LOG_FILE`; the terminal itself is busy with the game.
fn init_tracing(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run<R: Rng, C: Clock>(
    term: &mut TerminalRenderer,
    mut session: GameSession<R, C>,
    config: &GameConfig,
) -> Result<()> {
    let mut event_log = config
        .event_log
        .as_ref()
        .map(EventLog::open)
        .transpose()?;

    let view = GameView::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut cursor = TicketCursor::new();
    let mut auto = AutoCall::new(config.auto_call_ms, config.auto_call);
    let mut message: Option<String> = None;
    let mut last_tick = Instant::now();

    info!(
        tickets = session.ticket_count(),
        auto_call = auto.enabled(),
        "game started"
    );

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((100, 40));
        let snap = session.snapshot();
        let hud = HudStatus {
            cursor: Some((cursor.ticket(), cursor.pos())),
            auto_call_ms: auto.remaining_ms(),
            message: message.as_deref(),
        };
        view.render_into(&snap, &hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next auto-call is due.
        let timeout = Duration::from_millis(auto.poll_timeout_ms(FRAME_MS) as u64);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!(called = session.caller().called_numbers().len(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if let Some(text) = apply_action(&mut session, &mut cursor, &mut auto, action)
                        {
                            message = Some(text);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Auto-call.
        let elapsed = last_tick.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last_tick = Instant::now();
        if auto.tick(elapsed) && session.draw().is_none() {
            auto.set_enabled(false);
        }
        if !session.is_active() && auto.enabled() {
            auto.set_enabled(false);
        }

        // Events.
        let events = session.take_events();
        if let Some(text) = events.iter().rev().find_map(describe_event) {
            message = Some(text);
        }
        if let Some(log) = event_log.as_mut() {
            if let Err(err) = log.append_all(&events) {
                warn!(error = %err, "event log disabled");
                event_log = None;
            }
        }
    }
}

/// Apply one key action. Returns a status message, if the action has one.
fn apply_action<R: Rng, C: Clock>(
    session: &mut GameSession<R, C>,
    cursor: &mut TicketCursor,
    auto: &mut AutoCall,
    action: GameAction,
) -> Option<String> {
    match action {
        GameAction::Draw => {
            auto.restart();
            match session.draw() {
                Some(_) => None,
                None => Some("All 90 numbers have been called".to_string()),
            }
        }
        GameAction::Mark => match session.toggle(cursor.ticket(), cursor.pos()) {
            Ok(MarkOutcome::Ignored) => Some("Only called numbers can be marked".to_string()),
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        },
        GameAction::ToggleAutoCall => {
            let on = auto.toggle();
            Some(if on { "Auto-call on" } else { "Auto-call off" }.to_string())
        }
        GameAction::ToggleMarkMode => {
            session.apply_action(action);
            Some(format!("Mark mode: {}", session.mark_mode().as_str()))
        }
        GameAction::AddTicket => match session.add_ticket() {
            Ok(index) => {
                cursor.select(index, session.ticket_count());
                Some(format!("Ticket {} added", index + 1))
            }
            Err(err) => Some(err.to_string()),
        },
        GameAction::Reset | GameAction::NewTickets => {
            session.apply_action(action);
            auto.restart();
            cursor.clamp(session.ticket_count());
            None
        }
        other => {
            cursor.apply(other, session.ticket_count());
            None
        }
    }
}

fn describe_event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::Won {
            ticket,
            pattern,
            prize,
        } => Some(format!(
            "Ticket {}: {}! +{}",
            ticket + 1,
            pattern.display_name(),
            prize
        )),
        GameEvent::Completed { .. } => Some("All 90 numbers have been called".to_string()),
        GameEvent::Reset { new_tickets: true } => Some("New tickets dealt".to_string()),
        GameEvent::Reset { new_tickets: false } => Some("Game reset".to_string()),
        GameEvent::Called(_) => None,
    }
}
