//! Entrance animation of the assistant bubble on the landing view

use std::time::{Duration, Instant};

/// Phase of the bubble's entrance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubblePhase {
    /// Not shown yet
    Hidden,
    /// Sliding in
    Entering,
    /// Fully visible
    Shown,
}

#[derive(Debug)]
pub struct BubbleState {
    pub start_time: Instant,
    pub phase: BubblePhase,
    /// 0.0 (off screen) to 1.0 (in place)
    pub progress: f32,
    reduce_motion: bool,
}

impl BubbleState {
    /// Delay before the bubble appears
    pub const APPEAR_DELAY: Duration = Duration::from_secs(3);
    /// Length of the slide-in
    pub const ANIMATION_DURATION: Duration = Duration::from_millis(500);

    pub fn new(start_time: Instant, reduce_motion: bool) -> Self {
        Self {
            start_time,
            phase: BubblePhase::Hidden,
            progress: 0.0,
            reduce_motion,
        }
    }

    /// Update the phase for `now`
    pub fn update(&mut self, now: Instant) {
        if self.phase == BubblePhase::Shown {
            return;
        }
        let elapsed = now.saturating_duration_since(self.start_time);

        if elapsed < Self::APPEAR_DELAY {
            self.phase = BubblePhase::Hidden;
            self.progress = 0.0;
        } else if self.reduce_motion || elapsed >= Self::APPEAR_DELAY + Self::ANIMATION_DURATION {
            self.phase = BubblePhase::Shown;
            self.progress = 1.0;
        } else {
            self.phase = BubblePhase::Entering;
            let animation_elapsed = elapsed - Self::APPEAR_DELAY;
            let linear =
                animation_elapsed.as_secs_f32() / Self::ANIMATION_DURATION.as_secs_f32();
            self.progress = simple_easing::cubic_out(linear);
        }
    }

    /// Show the bubble right away (user interacted with it)
    pub fn skip(&mut self) {
        self.phase = BubblePhase::Shown;
        self.progress = 1.0;
    }

    pub fn is_visible(&self) -> bool {
        self.phase != BubblePhase::Hidden
    }

    /// Rows the bubble is still shifted down by, for a bubble `height` rows tall
    pub fn offset(&self, height: u16) -> u16 {
        ((1.0 - self.progress) * height as f32).round() as u16
    }
}
