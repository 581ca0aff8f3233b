/// Wave shape of a drum partial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Shell and membrane body tone
    Sine,
    /// Hard-edged partial for cymbal clusters
    Square,
}

impl Shape {
    fn at(self, phase: f32) -> f32 {
        match self {
            Shape::Sine => (phase * std::f32::consts::TAU).sin(),
            Shape::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Phase accumulator for one drum partial
///
/// The frequency is supplied per sample rather than stored, so a membrane
/// can sweep its pitch continuously without phase jumps.
pub struct Oscillator {
    /// Position within the current cycle (0.0 to 1.0)
    phase: f32,
    sample_period: f32,
    shape: Shape,
}

impl Oscillator {
    pub fn new(sample_rate: f32, shape: Shape) -> Self {
        Self {
            phase: 0.0,
            sample_period: 1.0 / sample_rate,
            shape,
        }
    }

    /// Output at the current phase, then advance by one sample at `frequency` Hz
    pub fn next_sample(&mut self, frequency: f32) -> f32 {
        let output = self.shape.at(self.phase);
        self.phase = (self.phase + frequency * self.sample_period).fract();
        output
    }

    /// Restart the cycle so every hit begins on the same transient
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
