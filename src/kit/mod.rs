pub mod membrane;
pub mod metal;
pub mod pad;
pub mod patch;
pub mod sample;
pub mod snare;
pub mod table;
pub mod voice;

pub use pad::DrumPad;
pub use table::{DrumSound, SoundTable};
