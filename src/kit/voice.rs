use super::{
    membrane::Membrane, metal::Metal, patch::DrumPatch, sample::SamplePlayer, snare::SnareDrum,
    table::DrumSound,
};

/// One playing hit of a drum pad
/// Built fresh for every trigger and dropped once it falls silent
pub enum DrumVoice {
    Membrane(Membrane),
    Snare(SnareDrum),
    Metal(Metal),
    Sample(SamplePlayer),
}

impl DrumVoice {
    /// Create an already-triggered voice for a sound
    ///
    /// # Arguments
    /// * `sound` - Sound table entry to voice
    /// * `sample_rate` - Output sample rate in Hz
    /// * `seed` - Noise seed, varied per hit so overlapping hits decorrelate
    pub fn start(sound: &DrumSound, sample_rate: f32, seed: u32) -> Self {
        let mut voice = match sound {
            DrumSound::Synth(DrumPatch::Membrane(p)) => {
                DrumVoice::Membrane(Membrane::new(sample_rate, p, seed))
            }
            DrumSound::Synth(DrumPatch::Snare(p)) => {
                DrumVoice::Snare(SnareDrum::new(sample_rate, p, seed))
            }
            DrumSound::Synth(DrumPatch::Metal(p)) => {
                DrumVoice::Metal(Metal::new(sample_rate, p, seed))
            }
            DrumSound::Sample(data) => {
                DrumVoice::Sample(SamplePlayer::new(data.clone(), sample_rate))
            }
        };
        voice.trigger();
        voice
    }

    fn trigger(&mut self) {
        match self {
            DrumVoice::Membrane(m) => m.trigger(),
            DrumVoice::Snare(s) => s.trigger(),
            DrumVoice::Metal(m) => m.trigger(),
            // Samples start at frame zero on construction
            DrumVoice::Sample(_) => {}
        }
    }

    /// Check if the voice is still generating audio
    pub fn is_active(&self) -> bool {
        match self {
            DrumVoice::Membrane(m) => m.is_active(),
            DrumVoice::Snare(s) => s.is_active(),
            DrumVoice::Metal(m) => m.is_active(),
            DrumVoice::Sample(p) => p.is_active(),
        }
    }

    pub fn next_sample(&mut self) -> f32 {
        match self {
            DrumVoice::Membrane(m) => m.next_sample(),
            DrumVoice::Snare(s) => s.next_sample(),
            DrumVoice::Metal(m) => m.next_sample(),
            DrumVoice::Sample(p) => p.next_sample(),
        }
    }
}
