use std::time::{Duration, Instant};

use crate::game::Game;

/// Periodic gravity trigger.
///
/// Holds only timing state. `drive` calls `Game::tick` on the live game when
/// the period elapses, so a tick always sees the current piece and position.
#[derive(Clone, Copy, Debug)]
pub struct Gravity {
    interval: Duration,
    last_fired: Option<Instant>,
}

impl Gravity {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
        }
    }

    /// Starts (or restarts) the period from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.last_fired = Some(now);
    }

    pub fn disarm(&mut self) {
        self.last_fired = None;
    }

    pub fn is_armed(&self) -> bool {
        self.last_fired.is_some()
    }

    /// Fires at most once per call. After firing the next period starts at
    /// `now`. A disarmed trigger never fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_fired {
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.last_fired = Some(now);
                true
            }
            _ => false,
        }
    }

    /// How long an input poll may block before the next tick is due. `None`
    /// while disarmed.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.last_fired.map(|last| {
            self.interval
                .checked_sub(now.saturating_duration_since(last))
                .unwrap_or(Duration::ZERO)
        })
    }

    /// One driver step. Ticks `game` if the period has elapsed, and disarms
    /// the trigger whenever play has stopped, including when this tick ended
    /// the game. Returns whether a tick ran.
    pub fn drive(&mut self, game: &mut Game, now: Instant) -> bool {
        if !game.is_playing() {
            self.disarm();
            return false;
        }
        let fired = self.poll(now);
        if fired {
            game.tick();
        }
        if !game.is_playing() {
            self.disarm();
        }
        fired
    }
}
