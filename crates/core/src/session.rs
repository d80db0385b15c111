//! Game session - one caller plus the player's tickets
//!
//! The session is the orchestration layer the binaries drive:
//!
//! 1. [`GameSession::draw`] calls a number, auto-marks it on every ticket in
//!    [`MarkMode::Assist`], then evaluates every ticket.
//! 2. [`GameSession::mark`] and [`GameSession::toggle`] apply a manual mark and
//!    re-evaluate that ticket.
//! 3. Everything observable is queued as a [`GameEvent`] and drained with
//!    [`GameSession::take_events`].
//!
//! Sessions are independent values; nothing is shared between them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::caller::{NumberCall, NumberCaller};
use crate::clock::{Clock, SystemClock};
use crate::detector::WinPattern;
use crate::error::SessionError;
use crate::generator::TicketGenerator;
use crate::player::{MarkOutcome, PlayerTicket};
use crate::prize::PrizeTable;
use crate::rng::SimpleRng;
use crate::snapshot::{SessionSnapshot, TicketSnapshot};
use crate::types::{
    CellPos, GameAction, MarkMode, PatternKind, DEFAULT_RECENT_CALLS, DEFAULT_TICKET_COUNT,
    MAX_TICKETS,
};

/// Setup for a new session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Clamped to `1..=MAX_TICKETS`.
    pub ticket_count: usize,
    pub mark_mode: MarkMode,
    pub prizes: PrizeTable,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            ticket_count: DEFAULT_TICKET_COUNT,
            mark_mode: MarkMode::default(),
            prizes: PrizeTable::default(),
        }
    }
}

/// A pattern completed on one of the session's tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketWin {
    pub ticket: usize,
    pub pattern: WinPattern,
}

/// What one draw did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub number: u8,
    /// Cells auto-marked by this draw, as `(ticket, cell)`.
    pub marked: Vec<(usize, CellPos)>,
    /// Every pattern completed by this draw, across all tickets.
    pub wins: Vec<TicketWin>,
}

/// Observable session event, one JSON object per event on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GameEvent {
    Called(NumberCall),
    Won {
        ticket: usize,
        pattern: PatternKind,
        prize: u32,
    },
    /// The pool ran out.
    Completed { total_called: usize },
    Reset { new_tickets: bool },
}

pub struct GameSession<R, C = SystemClock> {
    caller: NumberCaller<R, C>,
    generator: TicketGenerator<R>,
    players: Vec<PlayerTicket>,
    mark_mode: MarkMode,
    prizes: PrizeTable,
    events: Vec<GameEvent>,
}

impl GameSession<SimpleRng> {
    /// Reproducible session: tickets and calls both follow from `seed`.
    pub fn with_seed(seed: u32, options: SessionOptions) -> Self {
        Self::with_parts(
            NumberCaller::with_seed(seed),
            TicketGenerator::with_seed(seed.wrapping_add(1)),
            options,
        )
    }
}

impl GameSession<StdRng> {
    pub fn from_entropy(options: SessionOptions) -> Self {
        Self::with_parts(
            NumberCaller::new(StdRng::from_entropy()),
            TicketGenerator::new(StdRng::from_entropy()),
            options,
        )
    }
}

impl<R: Rng, C: Clock> GameSession<R, C> {
    pub fn with_parts(
        caller: NumberCaller<R, C>,
        mut generator: TicketGenerator<R>,
        options: SessionOptions,
    ) -> Self {
        let count = options.ticket_count.clamp(1, MAX_TICKETS);
        let players = generator
            .generate_multiple_tickets(count)
            .into_iter()
            .map(|t| PlayerTicket::new(t, options.prizes))
            .collect();
        info!(tickets = count, mode = options.mark_mode.as_str(), "session created");

        Self {
            caller,
            generator,
            players,
            mark_mode: options.mark_mode,
            prizes: options.prizes,
            events: Vec::new(),
        }
    }

    /// Call the next number. `None` once all 90 are out.
    pub fn draw(&mut self) -> Option<DrawOutcome> {
        let number = self.caller.pick_random_number()?;
        if let Some(call) = self.caller.state().call_history.last() {
            self.events.push(GameEvent::Called(*call));
        }

        let mut marked = Vec::new();
        if self.mark_mode.auto_marks() {
            for (idx, player) in self.players.iter_mut().enumerate() {
                if let Some(pos) = player.auto_mark(number) {
                    marked.push((idx, pos));
                }
            }
        }

        let wins = self.evaluate_all();

        if !self.caller.is_active() {
            self.events.push(GameEvent::Completed {
                total_called: self.caller.called_numbers().len(),
            });
        }

        Some(DrawOutcome {
            number,
            marked,
            wins,
        })
    }

    /// Manual mark. Uncalled numbers and blank cells are a silent no-op.
    pub fn mark(&mut self, ticket: usize, pos: CellPos) -> Result<MarkOutcome, SessionError> {
        self.apply_mark(ticket, pos, false)
    }

    /// Manual mark, or unmark if the cell is already marked.
    pub fn toggle(&mut self, ticket: usize, pos: CellPos) -> Result<MarkOutcome, SessionError> {
        self.apply_mark(ticket, pos, true)
    }

    fn apply_mark(
        &mut self,
        ticket: usize,
        pos: CellPos,
        toggle: bool,
    ) -> Result<MarkOutcome, SessionError> {
        let count = self.players.len();
        let player = self
            .players
            .get_mut(ticket)
            .ok_or(SessionError::UnknownTicket {
                index: ticket,
                count,
            })?;
        if !pos.in_bounds() {
            return Err(SessionError::CellOutOfBounds { pos });
        }

        let called = self.caller.called_numbers();
        let outcome = if toggle {
            player.toggle(pos, called)
        } else {
            player.mark(pos, called)
        };

        if outcome == MarkOutcome::Marked {
            for pattern in player.evaluate(called) {
                info!(ticket, pattern = %pattern.kind, prize = pattern.prize, "pattern completed");
                self.events.push(GameEvent::Won {
                    ticket,
                    pattern: pattern.kind,
                    prize: pattern.prize,
                });
            }
        }
        Ok(outcome)
    }

    fn evaluate_all(&mut self) -> Vec<TicketWin> {
        let called = self.caller.called_numbers();
        let mut wins = Vec::new();
        for (idx, player) in self.players.iter_mut().enumerate() {
            for pattern in player.evaluate(called) {
                info!(ticket = idx, pattern = %pattern.kind, prize = pattern.prize, "pattern completed");
                self.events.push(GameEvent::Won {
                    ticket: idx,
                    pattern: pattern.kind,
                    prize: pattern.prize,
                });
                wins.push(TicketWin {
                    ticket: idx,
                    pattern,
                });
            }
        }
        wins
    }

    /// Deal one more ticket. Returns its index.
    pub fn add_ticket(&mut self) -> Result<usize, SessionError> {
        if self.players.len() >= MAX_TICKETS {
            return Err(SessionError::TicketLimit { limit: MAX_TICKETS });
        }
        let ticket = self.generator.generate_single_ticket();
        self.players.push(PlayerTicket::new(ticket, self.prizes));
        let index = self.players.len() - 1;
        info!(ticket = index, "ticket added");
        Ok(index)
    }

    /// New game with the same tickets.
    pub fn reset(&mut self) {
        self.caller.reset();
        for player in self.players.iter_mut() {
            player.clear();
        }
        self.events.push(GameEvent::Reset { new_tickets: false });
        info!("game reset");
    }

    /// New game with freshly dealt tickets (same count).
    pub fn new_tickets(&mut self) {
        self.caller.reset();
        let count = self.players.len();
        let prizes = self.prizes;
        self.players = self
            .generator
            .generate_multiple_tickets(count)
            .into_iter()
            .map(|t| PlayerTicket::new(t, prizes))
            .collect();
        self.events.push(GameEvent::Reset { new_tickets: true });
        info!(tickets = count, "new tickets dealt");
    }

    /// Apply a session-level action. Cursor actions are not handled here.
    ///
    /// Returns true if the session changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Draw => self.draw().is_some(),
            GameAction::Reset => {
                self.reset();
                true
            }
            GameAction::NewTickets => {
                self.new_tickets();
                true
            }
            GameAction::ToggleMarkMode => {
                self.set_mark_mode(self.mark_mode.toggled());
                true
            }
            GameAction::AddTicket => self.add_ticket().is_ok(),
            _ => false,
        }
    }
}

impl<R, C> GameSession<R, C> {
    pub fn mark_mode(&self) -> MarkMode {
        self.mark_mode
    }

    /// Only affects later draws; numbers already called stay as marked.
    pub fn set_mark_mode(&mut self, mode: MarkMode) {
        if mode != self.mark_mode {
            info!(mode = mode.as_str(), "mark mode changed");
        }
        self.mark_mode = mode;
    }

    pub fn caller(&self) -> &NumberCaller<R, C> {
        &self.caller
    }

    /// For subscribing to caller updates.
    pub fn caller_mut(&mut self) -> &mut NumberCaller<R, C> {
        &mut self.caller
    }

    pub fn players(&self) -> &[PlayerTicket] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&PlayerTicket> {
        self.players.get(index)
    }

    pub fn ticket_count(&self) -> usize {
        self.players.len()
    }

    pub fn prizes(&self) -> &PrizeTable {
        &self.prizes
    }

    pub fn is_active(&self) -> bool {
        self.caller.is_active()
    }

    /// Drain queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tickets: self.players.iter().map(TicketSnapshot::from).collect(),
            called: self.caller.called_numbers().to_vec(),
            current: self.caller.current_number(),
            recent: self
                .caller
                .recent_calls(DEFAULT_RECENT_CALLS)
                .iter()
                .map(|c| c.number)
                .collect(),
            bands: self.caller.numbers_by_range(),
            stats: self.caller.game_stats(),
            mark_mode: self.mark_mode,
            is_active: self.caller.is_active(),
        }
    }
}

impl<R, C> std::fmt::Debug for GameSession<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("tickets", &self.players.len())
            .field("called", &self.caller.called_numbers().len())
            .field("mark_mode", &self.mark_mode)
            .field("pending_events", &self.events.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(mode: MarkMode) -> GameSession<SimpleRng> {
        GameSession::with_seed(
            77,
            SessionOptions {
                mark_mode: mode,
                ..SessionOptions::default()
            },
        )
    }

    #[test]
    fn ticket_count_is_clamped() {
        let s = GameSession::with_seed(
            1,
            SessionOptions {
                ticket_count: 40,
                ..SessionOptions::default()
            },
        );
        assert_eq!(s.ticket_count(), MAX_TICKETS);

        let s = GameSession::with_seed(
            1,
            SessionOptions {
                ticket_count: 0,
                ..SessionOptions::default()
            },
        );
        assert_eq!(s.ticket_count(), 1);
    }

    #[test]
    fn assist_mode_marks_every_ticket() {
        let mut s = session(MarkMode::Assist);
        for _ in 0..30 {
            let outcome = s.draw().unwrap();
            for (idx, player) in s.players().iter().enumerate() {
                let on_ticket = player.ticket().position_of(outcome.number);
                let marked_here = outcome.marked.iter().any(|&(t, _)| t == idx);
                assert_eq!(on_ticket.is_some(), marked_here);
            }
        }
    }

    #[test]
    fn manual_mode_marks_nothing_on_draw() {
        let mut s = session(MarkMode::Manual);
        for _ in 0..90 {
            let outcome = s.draw().unwrap();
            assert!(outcome.marked.is_empty());
            assert!(outcome.wins.is_empty());
        }
        assert!(s.draw().is_none());
        assert!(s.players().iter().all(|p| p.marks().marked_count() == 0));
    }

    #[test]
    fn full_game_in_assist_mode_completes_everything() {
        let mut s = session(MarkMode::Assist);
        let mut wins = Vec::new();
        while let Some(outcome) = s.draw() {
            wins.extend(outcome.wins);
        }
        assert_eq!(wins.len(), s.ticket_count() * PatternKind::ALL.len());

        let events = s.take_events();
        let called = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Called(_)))
            .count();
        assert_eq!(called, 90);
        assert_eq!(
            events.last(),
            Some(&GameEvent::Completed { total_called: 90 })
        );
        assert!(s.take_events().is_empty());
    }

    #[test]
    fn mark_errors() {
        let mut s = session(MarkMode::Manual);
        assert_eq!(
            s.mark(5, CellPos::new(0, 0)),
            Err(SessionError::UnknownTicket { index: 5, count: 3 })
        );
        assert_eq!(
            s.mark(0, CellPos::new(3, 0)),
            Err(SessionError::CellOutOfBounds {
                pos: CellPos::new(3, 0)
            })
        );
    }

    #[test]
    fn manual_mark_follows_calls() {
        let mut s = session(MarkMode::Manual);
        let pos = s.players()[0].ticket().row_cells(0)[0];
        let number = s.players()[0].ticket().number_at(pos).unwrap();

        assert_eq!(s.mark(0, pos), Ok(MarkOutcome::Ignored));
        while !s.caller().is_number_called(number) {
            s.draw();
        }
        assert_eq!(s.mark(0, pos), Ok(MarkOutcome::Marked));
        assert_eq!(s.toggle(0, pos), Ok(MarkOutcome::Unmarked));
    }

    #[test]
    fn add_ticket_stops_at_limit() {
        let mut s = session(MarkMode::Assist);
        for expected in 3..MAX_TICKETS {
            assert_eq!(s.add_ticket(), Ok(expected));
        }
        assert_eq!(
            s.add_ticket(),
            Err(SessionError::TicketLimit { limit: MAX_TICKETS })
        );
        assert!(!s.apply_action(GameAction::AddTicket));
    }

    #[test]
    fn reset_keeps_tickets_new_tickets_replaces_them() {
        let mut s = session(MarkMode::Assist);
        for _ in 0..40 {
            s.draw();
        }
        let before: Vec<_> = s.players().iter().map(|p| p.ticket().clone()).collect();

        s.reset();
        let after: Vec<_> = s.players().iter().map(|p| p.ticket().clone()).collect();
        assert_eq!(before, after);
        assert!(s.caller().called_numbers().is_empty());
        assert!(s.players().iter().all(|p| p.completed().is_empty()));

        s.new_tickets();
        let fresh: Vec<_> = s.players().iter().map(|p| p.ticket().clone()).collect();
        assert_eq!(fresh.len(), before.len());
        assert_ne!(fresh, before);

        let events = s.take_events();
        assert!(events.contains(&GameEvent::Reset { new_tickets: false }));
        assert!(events.contains(&GameEvent::Reset { new_tickets: true }));
    }

    #[test]
    fn actions_drive_the_session() {
        let mut s = session(MarkMode::Assist);
        assert!(s.apply_action(GameAction::Draw));
        assert!(s.apply_action(GameAction::ToggleMarkMode));
        assert_eq!(s.mark_mode(), MarkMode::Manual);
        assert!(!s.apply_action(GameAction::MoveLeft));
        assert_eq!(s.snapshot().called.len(), 1);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let mut s = session(MarkMode::Assist);
        for _ in 0..12 {
            s.draw();
        }
        let snap = s.snapshot();
        assert_eq!(snap.called, s.caller().called_numbers());
        assert_eq!(snap.current, snap.called.last().copied());
        assert_eq!(snap.recent.len(), DEFAULT_RECENT_CALLS);
        assert_eq!(snap.recent[0], snap.current.unwrap());
        assert_eq!(snap.stats.total_called, 12);
        assert_eq!(snap.tickets.len(), 3);
        let banded: usize = snap.bands.iter().map(|b| b.numbers.len()).sum();
        assert_eq!(banded, 12);
    }
}
