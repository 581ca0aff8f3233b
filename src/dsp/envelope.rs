/// One-shot attack/decay envelope for percussive voices
///
/// Drums have no sustain or release stage: a trigger ramps linearly up to
/// full level over the attack time, then falls back to silence over the
/// decay time along a quadratic curve and goes idle on its own.
pub struct Envelope {
    stage: Stage,
    /// Attack length in samples (at least 1)
    attack_samples: u32,
    /// Decay length in samples (at least 1)
    decay_samples: u32,
    /// Samples elapsed in the current stage
    position: u32,
    sample_rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Attack,
    Decay,
}

impl Envelope {
    /// Create a new idle envelope with 1ms attack and 100ms decay
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            stage: Stage::Idle,
            attack_samples: 1,
            decay_samples: 1,
            position: 0,
            sample_rate,
        };
        env.set_times(0.001, 0.1);
        env
    }

    /// Set attack and decay times in seconds
    pub fn set_times(&mut self, attack: f32, decay: f32) {
        self.attack_samples = self.to_samples(attack);
        self.decay_samples = self.to_samples(decay);
    }

    fn to_samples(&self, seconds: f32) -> u32 {
        (seconds.max(0.0) * self.sample_rate).max(1.0) as u32
    }

    /// Restart the envelope from silence
    pub fn trigger(&mut self) {
        self.stage = Stage::Attack;
        self.position = 0;
    }

    pub fn is_active(&self) -> bool {
        self.stage != Stage::Idle
    }

    /// Total length of one hit in samples
    #[cfg(test)]
    pub fn length_samples(&self) -> u32 {
        self.attack_samples + self.decay_samples
    }

    /// Generate next envelope level (0.0 to 1.0)
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            Stage::Idle => 0.0,
            Stage::Attack => {
                let level = self.position as f32 / self.attack_samples as f32;
                self.position += 1;
                if self.position >= self.attack_samples {
                    self.stage = Stage::Decay;
                    self.position = 0;
                }
                level
            }
            Stage::Decay => {
                let remaining = 1.0 - self.position as f32 / self.decay_samples as f32;
                self.position += 1;
                if self.position >= self.decay_samples {
                    self.stage = Stage::Idle;
                    self.position = 0;
                }
                remaining * remaining
            }
        }
    }
}
