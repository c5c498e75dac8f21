use std::fmt;
use std::time::{Duration, Instant};

/// Default reporting window.
const REPORT_INTERVAL: Duration = Duration::from_millis(5000);

/// Frame-rate summary for one completed reporting window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FpsReport {
    /// Frames presented during the window, including the one that closed it.
    pub frames: u32,
    /// Real length of the window in seconds, not the nominal interval.
    pub seconds: f32,
    /// `frames / seconds`.
    pub fps: f32,
}

impl fmt::Display for FpsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames in {} seconds = {} FPS",
            self.frames, self.seconds, self.fps
        )
    }
}

/// Counts presented frames and rolls a report at a fixed interval.
///
/// The counter is wall-clock driven: while no frames are presented (window
/// unfocused, loop paused) the open window simply grows, and the next report
/// spans the real elapsed time. `tick_at` takes the timestamp so tests can
/// feed a synthetic clock.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval: Duration,
    window_start: Instant,
    frames: u32,
}

impl FpsCounter {
    /// Counter with the standard 5 second reporting window.
    pub fn new() -> Self {
        Self::with_interval(REPORT_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            window_start: Instant::now(),
            frames: 0,
        }
    }

    /// Frames accounted so far in the currently open window.
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Accounts one presented frame; returns a report when the window closes.
    pub fn tick(&mut self) -> Option<FpsReport> {
        self.tick_at(Instant::now())
    }

    /// Like [`FpsCounter::tick`], with the timestamp injected.
    pub fn tick_at(&mut self, now: Instant) -> Option<FpsReport> {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }

        let seconds = elapsed.as_secs_f32();
        let report = FpsReport {
            frames: self.frames,
            seconds,
            fps: self.frames as f32 / seconds,
        };

        self.window_start = now;
        self.frames = 0;

        Some(report)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_report_before_the_interval() {
        let mut counter = FpsCounter::with_interval(Duration::from_secs(5));
        let start = counter.window_start;

        assert!(counter.tick_at(start + Duration::from_secs(1)).is_none());
        assert!(counter.tick_at(start + Duration::from_secs(4)).is_none());
        assert!(
            counter
                .tick_at(start + Duration::from_millis(4999))
                .is_none()
        );
    }

    #[test]
    fn reports_after_the_interval_and_resets() {
        let mut counter = FpsCounter::with_interval(Duration::from_secs(5));
        let start = counter.window_start;

        for i in 1..300 {
            assert!(
                counter
                    .tick_at(start + Duration::from_millis(i * 16))
                    .is_none()
            );
        }

        let report = counter
            .tick_at(start + Duration::from_secs(5))
            .expect("window should close at the interval");
        assert_eq!(report.frames, 300);
        assert!((report.seconds - 5.0).abs() < 1e-6);
        assert!((report.fps - 60.0).abs() < 1e-3);

        // The next window starts empty at the report timestamp.
        assert!(counter.tick_at(start + Duration::from_secs(6)).is_none());
        assert_eq!(counter.frames(), 1);
    }

    #[test]
    fn closing_frame_counts_toward_the_report() {
        let mut counter = FpsCounter::with_interval(Duration::from_secs(5));
        let start = counter.window_start;

        let report = counter
            .tick_at(start + Duration::from_secs(5))
            .expect("a single late frame still closes the window");
        assert_eq!(report.frames, 1);
        assert!((report.fps - 0.2).abs() < 1e-6);
    }

    #[test]
    fn a_stall_widens_the_window_instead_of_dropping_it() {
        let mut counter = FpsCounter::with_interval(Duration::from_secs(5));
        let start = counter.window_start;

        counter.tick_at(start + Duration::from_secs(1));
        // No ticks for a long while, then one frame far past the interval.
        let report = counter
            .tick_at(start + Duration::from_secs(20))
            .expect("late frame closes the stalled window");
        assert_eq!(report.frames, 2);
        assert!((report.seconds - 20.0).abs() < 1e-6);
    }

    #[test]
    fn report_formats_like_a_frame_counter_line() {
        let report = FpsReport {
            frames: 301,
            seconds: 5.0,
            fps: 60.2,
        };
        assert_eq!(report.to_string(), "301 frames in 5 seconds = 60.2 FPS");
    }
}
