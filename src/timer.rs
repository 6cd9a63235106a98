//! The session and per-card countdowns.
//!
//! Both run off the app's tick and hold at most one countdown each. A
//! countdown is tied to the session (and card) it was armed for; when either
//! changes the old one is dropped before a new one is armed, so a stale
//! countdown can never fire into a later card.

use crate::game::{Action, GameState, GameStatus};
use std::time::{Duration, SystemTime};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    total: Duration,
    remaining: Duration,
    fired: bool,
}

impl Countdown {
    pub fn new(secs: u64) -> Self {
        let total = Duration::from_secs(secs);
        Self {
            total,
            remaining: total,
            fired: false,
        }
    }

    /// Returns true on the tick that reaches zero, and never again after that.
    pub fn on_tick(&mut self, elapsed: Duration) -> bool {
        if self.fired {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.fired = true;
            return true;
        }
        false
    }

    /// Whole seconds left, rounded up so "00:00" only shows once expired
    pub fn remaining_secs(&self) -> u64 {
        let secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// 0.0 ..= 1.0, for the progress gauge
    pub fn fraction_remaining(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        self.remaining.as_secs_f64() / self.total.as_secs_f64()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Identifies what a countdown was armed for
type SessionKey = Option<SystemTime>;
type CardKey = (Option<SystemTime>, usize);

#[derive(Debug, Default)]
pub struct Timers {
    session: Option<(SessionKey, Countdown)>,
    character: Option<(CardKey, Countdown)>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&Countdown> {
        self.session.as_ref().map(|(_, c)| c)
    }

    pub fn character(&self) -> Option<&Countdown> {
        self.character.as_ref().map(|(_, c)| c)
    }

    /// Bring the countdowns in line with `state`. Call after every dispatch.
    pub fn sync(&mut self, state: &GameState) {
        if state.status != GameStatus::Playing {
            self.cancel_all();
            return;
        }

        let session_key = state.start_time;
        if !state.options.use_timer {
            self.session = None;
        } else if self.session.as_ref().map(|(k, _)| *k) != Some(session_key) {
            debug!(secs = state.options.timer_duration, "arming session countdown");
            self.session = Some((session_key, Countdown::new(state.options.timer_duration)));
        }

        let card_key = (state.start_time, state.current_index);
        if !state.options.character_timer || state.current_character().is_none() {
            self.character = None;
        } else if self.character.as_ref().map(|(k, _)| *k) != Some(card_key) {
            debug!(
                card = state.current_index,
                secs = state.options.character_timer_duration,
                "arming card countdown"
            );
            self.character = Some((
                card_key,
                Countdown::new(state.options.character_timer_duration),
            ));
        }
    }

    pub fn cancel_all(&mut self) {
        self.session = None;
        self.character = None;
    }

    /// Advance the running countdowns and return what an expiry should dispatch.
    ///
    /// A countdown only runs while its flag in `state` is set. A session expiry
    /// ends the game, so a card expiring on the same tick is dropped.
    pub fn on_tick(&mut self, elapsed: Duration, state: &GameState) -> Vec<Action> {
        if state.status != GameStatus::Playing {
            return Vec::new();
        }

        if state.session_timer_active {
            if let Some((_, countdown)) = self.session.as_mut() {
                if countdown.on_tick(elapsed) {
                    debug!("session countdown expired");
                    return vec![Action::StopTimer, Action::SetGameStatus(GameStatus::Results)];
                }
            }
        }

        if state.character_timer_active {
            if let Some((_, countdown)) = self.character.as_mut() {
                if countdown.on_tick(elapsed) {
                    debug!(card = state.current_index, "card countdown expired");
                    return vec![Action::StopCharacterTimer, Action::SubmitAnswer(String::new())];
                }
            }
        }

        Vec::new()
    }
}
