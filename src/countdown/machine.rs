//! Four-state countdown driven by a single button.
//!
//! # State Machine
//!
//! ```text
//!        press            press
//! Idle ────────► Running ───────► Paused
//!  ▲               │  ▲             │
//!  │ press         │  └─────────────┘
//!  │               │ remaining hits 0     press
//! Finished ◄───────┘
//! ```
//!
//! The tick source runs only while the machine is `Running`. Each tick takes one
//! off `remaining`; reaching zero forces `Finished` and stops the source. The
//! source is also stopped when the machine is dropped.

use super::ticker::TickSource;

/// Default number of ticks to count down from.
pub const DEFAULT_START: u32 = 10;

/// Lifecycle state of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle,
    Running,
    Paused,
    Finished,
}

impl CountdownState {
    /// Text for the single button, a pure function of state.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Start",
            Self::Running => "Pause",
            Self::Paused => "Resume",
            Self::Finished => "Restart",
        }
    }
}

/// A countdown owning its tick source.
#[derive(Debug)]
pub struct CountdownMachine<T: TickSource> {
    state: CountdownState,
    remaining: u32,
    start: u32,
    ticker: T,
}

impl<T: TickSource> CountdownMachine<T> {
    /// Creates an idle countdown starting at `start`.
    pub fn new(start: u32, ticker: T) -> Self {
        let mut machine = Self {
            state: CountdownState::Idle,
            remaining: start,
            start,
            ticker,
        };
        machine.settle();
        machine
    }

    /// Handles a button press and returns the new state.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcatalog::countdown::{CountdownMachine, CountdownState, ManualTicker};
    ///
    /// let mut countdown = CountdownMachine::new(10, ManualTicker::new());
    /// assert_eq!(countdown.press(), CountdownState::Running);
    /// countdown.advance(3);
    /// assert_eq!(countdown.press(), CountdownState::Paused);
    /// assert_eq!(countdown.remaining(), 7);
    /// assert_eq!(countdown.label(), "Resume");
    /// ```
    pub fn press(&mut self) -> CountdownState {
        let previous = self.state;
        match self.state {
            CountdownState::Idle | CountdownState::Paused => {
                self.state = CountdownState::Running;
                self.ticker.start();
                self.settle();
            }
            CountdownState::Running => {
                self.state = CountdownState::Paused;
                self.ticker.stop();
            }
            CountdownState::Finished => {
                self.state = CountdownState::Idle;
                self.remaining = self.start;
                self.ticker.stop();
            }
        }

        tracing::debug!(
            from = ?previous,
            to = ?self.state,
            remaining = self.remaining,
            "countdown button pressed"
        );
        self.state
    }

    /// Applies one tick. Ticks outside `Running` are ignored.
    ///
    /// Returns `true` if the tick was applied.
    pub fn tick(&mut self) -> bool {
        if self.state != CountdownState::Running {
            tracing::trace!(state = ?self.state, "ignoring tick outside running state");
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.settle();
        true
    }

    /// Lets `periods` host timer periods elapse, returning how many ticks applied.
    ///
    /// Each period is first acknowledged by the tick source; a period the source
    /// does not count (because it was stopped) ends the advance.
    pub fn advance(&mut self, periods: u32) -> u32 {
        let mut applied = 0;
        for _ in 0..periods {
            if !self.ticker.acknowledge() || !self.tick() {
                break;
            }
            applied += 1;
        }
        applied
    }

    #[must_use]
    pub const fn state(&self) -> CountdownState {
        self.state
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn start_value(&self) -> u32 {
        self.start
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.state.label()
    }

    #[must_use]
    pub const fn ticker(&self) -> &T {
        &self.ticker
    }

    /// Forces `Finished` once nothing is left to count.
    fn settle(&mut self) {
        if self.remaining == 0 && self.state != CountdownState::Finished {
            tracing::debug!(from = ?self.state, "countdown finished");
            self.state = CountdownState::Finished;
            self.ticker.stop();
        }
    }
}

impl<T: TickSource> Drop for CountdownMachine<T> {
    fn drop(&mut self) {
        self.ticker.stop();
    }
}
