//! Tick sources driving the countdown.
//!
//! A [`TickSource`] is a cancellable repeating timer. The countdown starts and
//! stops it; the host reports each elapsed period through
//! [`TickSource::acknowledge`], which decides whether that period counts.
//! Stopping an already stopped source is a no-op.

use std::cell::Cell;
use std::rc::Rc;

/// A repeating timer that can be started, stopped, and polled.
pub trait TickSource: std::fmt::Debug {
    /// Starts (or restarts) periodic ticking.
    fn start(&mut self);

    /// Stops ticking. Must be idempotent.
    fn stop(&mut self);

    /// Whether the source is currently ticking.
    fn is_running(&self) -> bool;

    /// Called when one host timer period has elapsed.
    ///
    /// Returns `true` if the period should be applied as a tick. The default
    /// only counts periods while running.
    fn acknowledge(&mut self) -> bool {
        self.is_running()
    }
}

impl<T: TickSource + ?Sized> TickSource for Box<T> {
    fn start(&mut self) {
        (**self).start();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }

    fn acknowledge(&mut self) -> bool {
        (**self).acknowledge()
    }
}

/// A virtual-time tick source.
///
/// Clones share state, so a test can keep a handle after moving the ticker into
/// a countdown and observe starts and stops, including the stop on drop.
///
/// # Examples
///
/// ```
/// use zcatalog::countdown::{ManualTicker, TickSource};
///
/// let handle = ManualTicker::new();
/// let mut ticker = handle.clone();
/// ticker.start();
/// ticker.stop();
/// ticker.stop();
/// assert!(!handle.is_running());
/// assert_eq!((handle.starts(), handle.stops()), (1, 1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    running: Rc<Cell<bool>>,
    starts: Rc<Cell<u32>>,
    stops: Rc<Cell<u32>>,
}

impl ManualTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the source went from stopped to running.
    #[must_use]
    pub fn starts(&self) -> u32 {
        self.starts.get()
    }

    /// Number of times the source went from running to stopped.
    #[must_use]
    pub fn stops(&self) -> u32 {
        self.stops.get()
    }
}

impl TickSource for ManualTicker {
    fn start(&mut self) {
        if !self.running.replace(true) {
            self.starts.set(self.starts.get() + 1);
        }
    }

    fn stop(&mut self) {
        if self.running.replace(false) {
            self.stops.set(self.stops.get() + 1);
        }
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_stop_is_a_no_op() {
        let mut ticker = ManualTicker::new();
        ticker.stop();
        assert_eq!(ticker.stops(), 0);
        ticker.start();
        ticker.stop();
        ticker.stop();
        assert_eq!(ticker.stops(), 1);
    }

    #[test]
    fn acknowledges_only_while_running() {
        let mut ticker: Box<dyn TickSource> = Box::new(ManualTicker::new());
        assert!(!ticker.acknowledge());
        ticker.start();
        assert!(ticker.acknowledge());
    }
}
