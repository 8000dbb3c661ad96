//! Playback: Stopped → Playing → Stopped, driven by a host repeating timer.
//!
//! The scheduler owns the timer handle. `playing` is exactly "a handle is
//! held", so a stopped scheduler can never leave a timer behind, and dropping
//! the scheduler cancels whatever is running.

use std::str::FromStr;

use crate::error::ParseError;
use crate::selection::SelectionState;

/// Frame rates offered by the speed selector.
pub const PLAYBACK_SPEEDS: [u32; 6] = [1, 2, 5, 10, 15, 30];
pub const DEFAULT_FPS: u32 = 10;

/// A running host timer. Cancelling consumes it.
pub trait TimerHandle {
    fn cancel(self);
}

/// Timer period for a frame rate, in whole milliseconds.
pub fn period_ms(fps: u32) -> u32 {
    (1000.0 / fps.max(1) as f64).round() as u32
}

/// Parse a speed selector value ("10" or "10fps").
pub fn parse_fps(value: &str) -> Result<u32, ParseError> {
    let trimmed = value.trim().trim_end_matches("fps").trim();
    u32::from_str(trimmed)
        .ok()
        .filter(|fps| PLAYBACK_SPEEDS.contains(fps))
        .ok_or_else(|| ParseError::PlaybackSpeed(value.to_string()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced(usize),
    Stopped,
}

pub struct PlaybackScheduler<H: TimerHandle> {
    fps: u32,
    timer: Option<H>,
}

impl<H: TimerHandle> PlaybackScheduler<H> {
    pub fn new(fps: u32) -> Self {
        Self { fps: fps.max(1), timer: None }
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Start the repeating timer. No-op when already playing.
    pub fn start(&mut self, spawn: impl FnOnce(u32) -> H) -> bool {
        if self.timer.is_some() {
            return false;
        }
        let period = period_ms(self.fps);
        log::debug!("Playback started at {} fps ({period} ms)", self.fps);
        self.timer = Some(spawn(period));
        true
    }

    /// Cancel the timer. Idempotent; returns whether anything was running.
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(handle) => {
                handle.cancel();
                log::debug!("Playback stopped");
                true
            }
            None => false,
        }
    }

    /// Change rate. While playing the timer is restarted with the new
    /// period rather than altered mid-interval.
    pub fn set_fps(&mut self, fps: u32, spawn: impl FnOnce(u32) -> H) {
        self.fps = fps.max(1);
        if self.stop() {
            self.start(spawn);
        }
    }

    /// One timer tick: advance the selection, or stop at the last slice.
    pub fn tick(&mut self, selection: &mut SelectionState, total: usize) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Stopped;
        }
        let current = selection.current();
        if current + 1 < total {
            selection.set_current(current + 1, total);
            TickOutcome::Advanced(current + 1)
        } else {
            self.stop();
            TickOutcome::Stopped
        }
    }

    pub fn destroy(&mut self) {
        self.stop();
    }
}

impl<H: TimerHandle> Drop for PlaybackScheduler<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the periods it was started with and how many were cancelled.
    #[derive(Clone, Default)]
    pub(crate) struct FakeClock {
        pub started: Rc<RefCell<Vec<u32>>>,
        pub cancelled: Rc<RefCell<usize>>,
    }

    pub(crate) struct FakeTimer {
        cancelled: Rc<RefCell<usize>>,
    }

    impl TimerHandle for FakeTimer {
        fn cancel(self) {
            *self.cancelled.borrow_mut() += 1;
        }
    }

    impl FakeClock {
        pub fn spawn(&self) -> impl FnOnce(u32) -> FakeTimer + '_ {
            move |period| {
                self.started.borrow_mut().push(period);
                FakeTimer { cancelled: self.cancelled.clone() }
            }
        }

        pub fn running(&self) -> usize {
            self.started.borrow().len() - *self.cancelled.borrow()
        }
    }

    #[test]
    fn test_runs_to_end_then_stops() {
        let clock = FakeClock::default();
        let mut p = PlaybackScheduler::new(10);
        let mut sel = SelectionState::default();
        sel.set_current(8, 10);
        assert!(p.start(clock.spawn()));
        assert_eq!(p.tick(&mut sel, 10), TickOutcome::Advanced(9));
        assert!(p.is_playing());
        assert_eq!(p.tick(&mut sel, 10), TickOutcome::Stopped);
        assert!(!p.is_playing());
        assert_eq!(sel.current(), 9);
        assert_eq!(clock.running(), 0);
        // A stale tick after stopping changes nothing.
        assert_eq!(p.tick(&mut sel, 10), TickOutcome::Stopped);
        assert_eq!(sel.current(), 9);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let clock = FakeClock::default();
        let mut p = PlaybackScheduler::new(5);
        assert!(p.start(clock.spawn()));
        assert!(!p.start(clock.spawn()));
        assert_eq!(*clock.started.borrow(), vec![200]);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let clock = FakeClock::default();
        let mut p = PlaybackScheduler::new(5);
        p.start(clock.spawn());
        assert!(p.stop());
        assert!(!p.stop());
        assert_eq!(*clock.cancelled.borrow(), 1);
    }

    #[test]
    fn test_fps_change_restarts_timer() {
        let clock = FakeClock::default();
        let mut p = PlaybackScheduler::new(10);
        p.set_fps(2, clock.spawn());
        assert!(clock.started.borrow().is_empty());
        p.start(clock.spawn());
        p.set_fps(30, clock.spawn());
        assert_eq!(*clock.started.borrow(), vec![500, 33]);
        assert_eq!(clock.running(), 1);
        assert_eq!(p.fps(), 30);
    }

    #[test]
    fn test_drop_cancels_timer() {
        let clock = FakeClock::default();
        {
            let mut p = PlaybackScheduler::new(10);
            p.start(clock.spawn());
        }
        assert_eq!(clock.running(), 0);

        let mut p = PlaybackScheduler::new(10);
        p.start(clock.spawn());
        p.destroy();
        assert!(!p.is_playing());
        assert_eq!(clock.running(), 0);
    }

    #[test]
    fn test_parse_fps() {
        assert_eq!(parse_fps("15"), Ok(15));
        assert_eq!(parse_fps("30fps"), Ok(30));
        assert!(parse_fps("7").is_err());
        assert!(parse_fps("fast").is_err());
    }
}
