use std::time::Instant;

use super::clock::ManualClock;

/// Frame metadata - carries frame number and timing info in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time_ms: f64,
    pub delta_ms: f64,
}

impl FrameInfo {
    pub fn new(number: u64, time_ms: f64, delta_ms: f64) -> Self {
        Self {
            number,
            time_ms,
            delta_ms,
        }
    }
}

/// Infinite iterator that yields real-time frame information
/// Use this in a loop: `for frame in frames { ... }`
pub struct FrameIterator {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
}

impl FrameIterator {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

impl Default for FrameIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameIterator {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f64() * 1000.0;
        let time = now.duration_since(self.start_time).as_secs_f64() * 1000.0;

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}

/// Deterministic frames at a fixed rate
/// Each frame advances the shared [`ManualClock`] before it is yielded
pub struct FixedStepFrames {
    clock: ManualClock,
    step_ms: f64,
    frame_number: u64,
}

impl FixedStepFrames {
    /// Frames at `fps` per second driving `clock`
    pub fn new(clock: ManualClock, fps: f64) -> Self {
        Self {
            clock,
            step_ms: 1000.0 / fps.max(f64::EPSILON),
            frame_number: 0,
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }
}

impl Iterator for FixedStepFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        use super::clock::TimeSource;

        self.clock.advance(self.step_ms);
        let info = FrameInfo::new(self.frame_number, self.clock.now_ms(), self.step_ms);
        self.frame_number += 1;

        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::TimeSource;

    #[test]
    fn frame_iterator_counts_frames() {
        let mut frames = FrameIterator::new();

        let first = frames.next().unwrap();
        let second = frames.next().unwrap();

        assert_eq!(first.number, 0);
        assert_eq!(second.number, 1);
        assert!(second.time_ms >= first.time_ms);
        assert_eq!(frames.frame_number(), 2);
    }

    #[test]
    fn fixed_step_frames_advance_clock() {
        let clock = ManualClock::new();
        let mut frames = FixedStepFrames::new(clock.clone(), 50.0);

        let first = frames.next().unwrap();
        assert_eq!(first.delta_ms, 20.0);
        assert_eq!(first.time_ms, 20.0);

        let third = frames.nth(1).unwrap();
        assert_eq!(third.number, 2);
        assert_eq!(clock.now_ms(), 60.0);
    }
}
