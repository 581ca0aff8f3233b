use std::sync::Arc;

use super::pad::DrumPad;
use super::patch::{DrumPatch, MembranePatch, MetalPatch, SnarePatch};
use super::sample::SampleData;
use super::voice::DrumVoice;

/// Audio resource bound to a pad
#[derive(Debug, Clone)]
pub enum DrumSound {
    /// Synthesized on the audio thread from a patch
    Synth(DrumPatch),
    /// Decoded WAV file, shared by every hit of the pad
    Sample(Arc<SampleData>),
}

/// Pad → sound mapping, exactly one entry per pad
///
/// Built once at startup and handed to the audio thread; never mutated
/// while the stream is running.
#[derive(Debug, Clone)]
pub struct SoundTable {
    sounds: [DrumSound; 8],
}

impl SoundTable {
    /// The built-in synthesized kit
    pub fn builtin() -> Self {
        Self {
            sounds: DrumPad::ALL.map(|pad| DrumSound::Synth(builtin_patch(pad))),
        }
    }

    pub fn sound(&self, pad: DrumPad) -> &DrumSound {
        &self.sounds[pad.index()]
    }

    /// Replace the sound bound to a pad
    pub fn set(&mut self, pad: DrumPad, sound: DrumSound) {
        self.sounds[pad.index()] = sound;
    }

    /// Start a new, independent hit of a pad's sound
    pub fn voice(&self, pad: DrumPad, sample_rate: f32, seed: u32) -> DrumVoice {
        DrumVoice::start(self.sound(pad), sample_rate, seed)
    }
}

impl Default for SoundTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Factory patch for each pad
pub fn builtin_patch(pad: DrumPad) -> DrumPatch {
    match pad {
        DrumPad::A => DrumPatch::Membrane(MembranePatch::default()),
        DrumPad::S => DrumPatch::Snare(SnarePatch::default()),
        DrumPad::D => DrumPatch::Membrane(tom(260.0, 190.0, 0.4)),
        DrumPad::F => DrumPatch::Membrane(tom(210.0, 150.0, 0.5)),
        DrumPad::G => DrumPatch::Membrane(tom(170.0, 110.0, 0.6)),
        DrumPad::H => DrumPatch::Metal(MetalPatch {
            brightness: 8000.0,
            decay: 0.06,
            metallic: 0.3,
        }),
        DrumPad::J => DrumPatch::Metal(MetalPatch {
            brightness: 5000.0,
            decay: 1.6,
            metallic: 0.5,
        }),
        DrumPad::K => DrumPatch::Metal(MetalPatch {
            brightness: 6500.0,
            decay: 1.0,
            metallic: 0.85,
        }),
    }
}

fn tom(pitch_start: f32, pitch_end: f32, decay: f32) -> MembranePatch {
    MembranePatch {
        pitch_start,
        pitch_end,
        pitch_decay: 0.08,
        decay,
        click: 0.15,
    }
}
