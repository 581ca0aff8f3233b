use crossbeam_channel::Sender;
use rand::rngs::StdRng;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::animation::Animator;
use super::layout;
use crate::kit::DrumPad;
use crate::types::events::KitEvent;

/// UI application state
pub struct App {
    /// Label animation (the single piece of transient UI state)
    pub animation: Animator,
    /// Last drawn screen area, for mouse hit testing
    pub viewport: Rect,
    /// Hits currently sounding, reported by the audio thread
    pub active_voices: usize,
    /// Whether to quit the application
    pub should_quit: bool,
    /// Whether to show help overlay
    pub show_help: bool,
    event_tx: Sender<KitEvent>,
}

impl App {
    pub fn new(event_tx: Sender<KitEvent>, animation_duration: Duration, rng: StdRng) -> Self {
        Self {
            animation: Animator::new(animation_duration, rng),
            viewport: Rect::default(),
            active_voices: 0,
            should_quit: false,
            show_help: false,
            event_tx,
        }
    }

    /// Play a pad and restart its label animation
    ///
    /// Playback is fire-and-forget: the event is queued for the audio
    /// thread and this returns immediately.
    pub fn trigger(&mut self, pad: DrumPad, now: Instant) {
        if let Err(err) = self.event_tx.try_send(KitEvent::trigger(pad)) {
            warn!(pad = %pad, "Audio thread not receiving triggers: {}", err);
        }
        self.animation.mount(pad, now);
    }

    /// Key-down handler. Returns true if the key is bound to a pad.
    pub fn press_key(&mut self, key: char, now: Instant) -> bool {
        match DrumPad::from_key(key) {
            Some(pad) => {
                debug!(pad = %pad, source = "keyboard", "Pad pressed");
                self.trigger(pad, now);
                true
            }
            None => false,
        }
    }

    /// Pointer-press handler. Returns true if the press landed on a button.
    pub fn press_at(&mut self, column: u16, row: u16, now: Instant) -> bool {
        match layout::button_at(self.viewport, column, row) {
            Some(pad) => {
                debug!(pad = %pad, source = "pointer", "Pad pressed");
                self.trigger(pad, now);
                true
            }
            None => false,
        }
    }

    /// Advance time; ends the label animation once it has run its course
    pub fn tick(&mut self, now: Instant) {
        self.animation.tick(now);
    }

    /// Whether a pad's button carries the active marker
    pub fn is_active(&self, pad: DrumPad) -> bool {
        self.animation.current_pad() == Some(pad)
    }

    /// Mark app for quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Toggle help screen visibility
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}
