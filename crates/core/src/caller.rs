//! Number caller - draws 1..=90 without replacement
//!
//! The caller is a two-state machine:
//!
//! - **Active**: numbers remain in the pool
//! - **Complete**: the pool is empty; further draws return `None`
//!
//! Only [`NumberCaller::pick_random_number`] and [`NumberCaller::reset`] mutate
//! state. Each of them notifies every subscriber synchronously, with the state
//! after the mutation, before returning.
//!
//! One caller belongs to one game session. There is no global instance, so any
//! number of sessions can run in the same process.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::rng::SimpleRng;
use crate::types::{CALL_BANDS, DEFAULT_RECENT_CALLS, MAX_NUMBER, MIN_NUMBER};

/// One entry of the call history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NumberCall {
    pub number: u8,
    pub timestamp: DateTime<Utc>,
    /// 1-based position in the call sequence.
    pub call_index: usize,
}

/// Full caller state, as handed to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerState {
    /// Numbers in the order they were called.
    pub called_numbers: Vec<u8>,
    pub current_number: Option<u8>,
    /// Numbers still in the pool, ascending.
    pub available_numbers: Vec<u8>,
    pub is_active: bool,
    pub call_history: Vec<NumberCall>,
}

impl CallerState {
    /// Fresh state: full pool, nothing called.
    pub fn initial() -> Self {
        Self {
            called_numbers: Vec::with_capacity(MAX_NUMBER as usize),
            current_number: None,
            available_numbers: (MIN_NUMBER..=MAX_NUMBER).collect(),
            is_active: true,
            call_history: Vec::with_capacity(MAX_NUMBER as usize),
        }
    }
}

impl Default for CallerState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Called numbers falling in one display band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalledBand {
    pub min: u8,
    pub max: u8,
    /// Called numbers inside `min..=max`, in call order.
    pub numbers: Vec<u8>,
}

impl CalledBand {
    /// Label such as `"1-18"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.min, self.max)
    }
}

/// Progress summary of a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStats {
    pub total_called: usize,
    pub remaining: usize,
    pub progress_percentage: f64,
    pub is_complete: bool,
    /// Mean gap between consecutive calls; 0 with fewer than two calls.
    pub average_call_ms: f64,
    pub game_start_time: Option<DateTime<Utc>>,
    pub last_call_time: Option<DateTime<Utc>>,
}

/// Handle returned by [`NumberCaller::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CallerState)>;

/// Draws numbers for one game.
pub struct NumberCaller<R, C = SystemClock> {
    state: CallerState,
    rng: R,
    clock: C,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl NumberCaller<SimpleRng> {
    /// Reproducible caller: the same seed calls the same sequence.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl NumberCaller<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> NumberCaller<R> {
    pub fn new(rng: R) -> Self {
        Self::with_clock(rng, SystemClock)
    }
}

impl<R: Rng, C: Clock> NumberCaller<R, C> {
    pub fn with_clock(rng: R, clock: C) -> Self {
        Self {
            state: CallerState::initial(),
            rng,
            clock,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Draw the next number, or `None` once the pool is exhausted.
    ///
    /// Every remaining number is equally likely. Calling again after the pool
    /// is empty keeps returning `None` (and keeps notifying subscribers).
    pub fn pick_random_number(&mut self) -> Option<u8> {
        if self.state.available_numbers.is_empty() {
            self.state.is_active = false;
            self.notify();
            return None;
        }

        let idx = self.rng.gen_range(0..self.state.available_numbers.len());
        let number = self.state.available_numbers.remove(idx);

        self.state.called_numbers.push(number);
        self.state.current_number = Some(number);
        let call_index = self.state.called_numbers.len();
        self.state.call_history.push(NumberCall {
            number,
            timestamp: self.clock.now(),
            call_index,
        });
        debug!(number, call_index, "number called");

        if self.state.available_numbers.is_empty() {
            self.state.is_active = false;
            info!(calls = call_index, "number pool exhausted");
        }

        self.notify();
        Some(number)
    }

    /// Back to a full pool with no history.
    pub fn reset(&mut self) {
        self.state = CallerState::initial();
        debug!("caller reset");
        self.notify();
    }

    /// Register a callback run after every draw and reset.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CallerState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(state);
        }
    }
}

impl<R, C> NumberCaller<R, C> {
    pub fn state(&self) -> &CallerState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> CallerState {
        self.state.clone()
    }

    pub fn called_numbers(&self) -> &[u8] {
        &self.state.called_numbers
    }

    pub fn current_number(&self) -> Option<u8> {
        self.state.current_number
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn remaining(&self) -> usize {
        self.state.available_numbers.len()
    }

    pub fn is_number_called(&self, number: u8) -> bool {
        self.state.called_numbers.contains(&number)
    }

    /// Last `count` calls, most recent first.
    pub fn recent_calls(&self, count: usize) -> Vec<NumberCall> {
        self.state
            .call_history
            .iter()
            .rev()
            .take(count)
            .copied()
            .collect()
    }

    /// [`Self::recent_calls`] with the default strip length.
    pub fn default_recent_calls(&self) -> Vec<NumberCall> {
        self.recent_calls(DEFAULT_RECENT_CALLS)
    }

    /// Partition the called numbers into the five display bands.
    pub fn numbers_by_range(&self) -> [CalledBand; 5] {
        CALL_BANDS.map(|(min, max)| CalledBand {
            min,
            max,
            numbers: self
                .state
                .called_numbers
                .iter()
                .copied()
                .filter(|n| (min..=max).contains(n))
                .collect(),
        })
    }

    pub fn game_stats(&self) -> GameStats {
        let total_called = self.state.called_numbers.len();
        let remaining = self.state.available_numbers.len();
        let history = &self.state.call_history;

        GameStats {
            total_called,
            remaining,
            progress_percentage: total_called as f64 / MAX_NUMBER as f64 * 100.0,
            is_complete: !self.state.is_active && remaining == 0,
            average_call_ms: average_call_ms(history),
            game_start_time: history.first().map(|c| c.timestamp),
            last_call_time: history.last().map(|c| c.timestamp),
        }
    }
}

fn average_call_ms(history: &[NumberCall]) -> f64 {
    if history.len() < 2 {
        return 0.0;
    }
    let total: i64 = history
        .windows(2)
        .map(|w| (w[1].timestamp - w[0].timestamp).num_milliseconds())
        .sum();
    total as f64 / (history.len() - 1) as f64
}

impl<R, C> std::fmt::Debug for NumberCaller<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberCaller")
            .field("state", &self.state)
            .field("subscribers", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
