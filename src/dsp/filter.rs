use std::f32::consts::TAU;

/// Lowest wire rattle kept; everything under it belongs to the shell
const WIRE_LOW_HZ: f32 = 1000.0;
/// Wire band top at zero snap, and how far full snap raises it
const WIRE_TOP_HZ: f32 = 3000.0;
const WIRE_TOP_SNAP_HZ: f32 = 6000.0;

/// RC time constant and sample period for a one-pole stage
fn rc_and_period(sample_rate: f32, cutoff_hz: f32) -> (f32, f32) {
    (1.0 / (TAU * cutoff_hz), 1.0 / sample_rate)
}

/// One-pole RC low-pass
struct LowPass {
    alpha: f32,
    output: f32,
}

impl LowPass {
    fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let (rc, dt) = rc_and_period(sample_rate, cutoff_hz);
        Self {
            alpha: dt / (rc + dt),
            output: 0.0,
        }
    }

    fn process(&mut self, input: f32) -> f32 {
        self.output += self.alpha * (input - self.output);
        self.output
    }

    fn reset(&mut self) {
        self.output = 0.0;
    }
}

/// One-pole RC high-pass
///
/// Metal voices run their partials and noise through it at the patch's
/// `brightness`, so a brighter cymbal loses more of its low ring.
pub struct HighPass {
    alpha: f32,
    previous_input: f32,
    output: f32,
}

impl HighPass {
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let (rc, dt) = rc_and_period(sample_rate, cutoff_hz);
        Self {
            alpha: rc / (rc + dt),
            previous_input: 0.0,
            output: 0.0,
        }
    }

    pub fn process(&mut self, input: f32) -> f32 {
        self.output = self.alpha * (self.output + input - self.previous_input);
        self.previous_input = input;
        self.output
    }

    pub fn reset(&mut self) {
        self.previous_input = 0.0;
        self.output = 0.0;
    }
}

/// Band-pass that turns white noise into snare wire rattle
///
/// The low edge is fixed above the shell tone. The top edge opens with
/// `snap`, from a dull brush at 0.0 to a crisp crack at 1.0.
pub struct WireBand {
    shell_cut: HighPass,
    top: LowPass,
}

impl WireBand {
    pub fn new(sample_rate: f32, snap: f32) -> Self {
        let top_hz = WIRE_TOP_HZ + WIRE_TOP_SNAP_HZ * snap.clamp(0.0, 1.0);
        Self {
            shell_cut: HighPass::new(sample_rate, WIRE_LOW_HZ),
            top: LowPass::new(sample_rate, top_hz),
        }
    }

    pub fn process(&mut self, noise: f32) -> f32 {
        self.top.process(self.shell_cut.process(noise))
    }

    pub fn reset(&mut self) {
        self.shell_cut.reset();
        self.top.reset();
    }
}
