/// VCA (Voltage Controlled Amplifier)
/// Shapes a signal by an envelope level and a fixed output gain
pub struct VCA {
    gain: f32,
}

impl VCA {
    pub fn new(gain: f32) -> Self {
        Self {
            gain: gain.clamp(0.0, 1.0),
        }
    }

    /// signal: audio input
    /// modulation: envelope level (0.0 to 1.0)
    pub fn process(&self, signal: f32, modulation: f32) -> f32 {
        signal * modulation * self.gain
    }
}

impl Default for VCA {
    fn default() -> Self {
        Self::new(0.8)
    }
}
