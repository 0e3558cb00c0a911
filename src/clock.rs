//! Time sources and frame-rate tracking.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

use log::debug;

/// Monotonic time source, in seconds since the clock's origin
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall-clock time from process start of the clock
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for offline rendering and tests
///
/// Clones share the same time, so a caller can keep a handle after
/// giving one away.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dt_s: f64) {
        self.now.set(self.now.get() + dt_s);
    }

    pub fn set(&self, now_s: f64) {
        self.now.set(now_s);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

const FPS_WINDOW: usize = 60;

/// Rolling frame-rate average over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsTracker {
    frame_times: VecDeque<f64>,
    last_frame: Option<f64>,
    last_report: f64,
    min_fps: f32,
    max_fps: f32,
}

impl Default for FpsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsTracker {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(FPS_WINDOW + 1),
            last_frame: None,
            last_report: 0.0,
            min_fps: f32::MAX,
            max_fps: 0.0,
        }
    }

    /// Record a frame presented at `now_s`
    ///
    /// The first call only sets the reference point.
    pub fn record_frame(&mut self, now_s: f64) {
        let Some(last) = self.last_frame.replace(now_s) else {
            self.last_report = now_s;
            return;
        };

        self.frame_times.push_back((now_s - last).max(0.0));
        if self.frame_times.len() > FPS_WINDOW {
            self.frame_times.pop_front();
        }

        if let Some(fps) = self.current_fps() {
            self.min_fps = self.min_fps.min(fps);
            self.max_fps = self.max_fps.max(fps);
        }

        if now_s - self.last_report > 1.0 {
            let (min, avg, max) = self.stats();
            debug!("FPS - Min: {:.1}, Avg: {:.1}, Max: {:.1}", min, avg, max);
            self.last_report = now_s;
        }
    }

    /// Average frame rate over the window, if any frame time is measurable
    pub fn current_fps(&self) -> Option<f32> {
        if self.frame_times.is_empty() {
            return None;
        }
        let total: f64 = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as f64;
        (avg_frame_time > 0.0).then(|| (1.0 / avg_frame_time) as f32)
    }

    /// Whether the frame budget still allows optional work
    pub fn above(&self, min_fps: f32) -> bool {
        self.current_fps().map_or(true, |fps| fps > min_fps)
    }

    pub fn stats(&self) -> (f32, f32, f32) {
        (self.min_fps, self.current_fps().unwrap_or(0.0), self.max_fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(0.5);
        handle.advance(0.25);
        assert_eq!(clock.now(), 0.75);
        clock.set(10.0);
        assert_eq!(handle.now(), 10.0);
    }

    #[test]
    fn test_unmeasured_tracker_allows_work() {
        let mut fps = FpsTracker::new();
        assert!(fps.above(30.0));
        fps.record_frame(0.0);
        assert_eq!(fps.current_fps(), None);
        assert!(fps.above(30.0));
    }

    #[test]
    fn test_rolling_average() {
        let mut fps = FpsTracker::new();
        for i in 0..=FPS_WINDOW {
            fps.record_frame(i as f64 * 0.02);
        }
        let mut now = FPS_WINDOW as f64 * 0.02;
        let rate = fps.current_fps().unwrap();
        assert!((rate - 50.0).abs() < 0.1);
        assert!(fps.above(30.0));

        // Slow frames push the old ones out of the window
        for _ in 0..FPS_WINDOW {
            now += 0.05;
            fps.record_frame(now);
        }
        let rate = fps.current_fps().unwrap();
        assert!((rate - 20.0).abs() < 0.1);
        assert!(!fps.above(30.0));

        let (min, _, max) = fps.stats();
        assert!(min <= 20.1 && max >= 49.9);
    }
}
