use crate::kit::DrumPad;

/// Events sent from the UI thread to the audio thread
/// Must be simple and fast to construct/parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KitEvent {
    /// Start a new hit of a pad's sound, layered over anything already playing
    Trigger(DrumPad),
}

impl KitEvent {
    pub fn trigger(pad: DrumPad) -> Self {
        KitEvent::Trigger(pad)
    }
}
