use rand::Rng;
use rand::rngs::StdRng;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::kit::DrumPad;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Smallest and largest label size
pub const MIN_LABEL_SIZE: u16 = 30;
pub const MAX_LABEL_SIZE: u16 = 49;

/// `#RRGGBB` label color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelColor(String);

impl LabelColor {
    /// Sample each of the six hex digits independently and uniformly.
    /// Every color is reachable, unreadable ones included.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut color = String::with_capacity(7);
        color.push('#');
        for _ in 0..6 {
            color.push(HEX_DIGITS[rng.gen_range(0..16)] as char);
        }
        LabelColor(color)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#')?;
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Label size, uniform over 30..=49
pub fn random_size<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    rng.gen_range(MIN_LABEL_SIZE..=MAX_LABEL_SIZE)
}

/// One mounted rendering of a pad label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelAnimation {
    pub pad: DrumPad,
    pub color: LabelColor,
    pub size: u16,
    /// Bumped on every mount; a new generation restarts the animation
    pub generation: u64,
    pub started: Instant,
}

impl LabelAnimation {
    /// Fraction of the animation elapsed at `now`, 0.0 to 1.0
    pub fn progress(&self, now: Instant, duration: Duration) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnimationState {
    Idle,
    Showing(LabelAnimation),
}

/// Owns the single "currently animating pad" value
///
/// Idle → Showing(k) on trigger, Showing(k) → Showing(k') on any further
/// trigger (no queue, no intermediate Idle), Showing(k) → Idle when the
/// animation ends.
pub struct Animator {
    state: AnimationState,
    duration: Duration,
    generation: u64,
    rng: StdRng,
}

impl Animator {
    pub fn new(duration: Duration, rng: StdRng) -> Self {
        Self {
            state: AnimationState::Idle,
            duration,
            generation: 0,
            rng,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Pad whose label is showing, if any
    pub fn current_pad(&self) -> Option<DrumPad> {
        match &self.state {
            AnimationState::Idle => None,
            AnimationState::Showing(anim) => Some(anim.pad),
        }
    }

    /// Mount a fresh label for `pad`, replacing whatever is showing.
    /// Color and size are drawn once here, not per frame.
    pub fn mount(&mut self, pad: DrumPad, now: Instant) {
        self.generation += 1;
        let anim = LabelAnimation {
            pad,
            color: LabelColor::random(&mut self.rng),
            size: random_size(&mut self.rng),
            generation: self.generation,
            started: now,
        };
        debug!(
            pad = %pad,
            color = anim.color.as_str(),
            size = anim.size,
            generation = anim.generation,
            "Label mounted"
        );
        self.state = AnimationState::Showing(anim);
    }

    /// Animation-end handler
    pub fn animation_end(&mut self) {
        if let AnimationState::Showing(anim) = &self.state {
            debug!(pad = %anim.pad, generation = anim.generation, "Label animation ended");
        }
        self.state = AnimationState::Idle;
    }

    /// Fire the animation-end handler once the showing label has run its
    /// course. Returns true if it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let finished = match &self.state {
            AnimationState::Showing(anim) => {
                now.saturating_duration_since(anim.started) >= self.duration
            }
            AnimationState::Idle => false,
        };
        if finished {
            self.animation_end();
        }
        finished
    }
}
