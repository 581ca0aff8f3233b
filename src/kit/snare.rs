use super::patch::SnarePatch;
use crate::dsp::{
    envelope::Envelope,
    filter::WireBand,
    noise::NoiseGenerator,
    oscillator::{Oscillator, Shape},
    vca::VCA,
};

/// Second shell mode relative to the fundamental
const SHELL_OVERTONE: f32 = 1.83;

/// Snare drum synthesizer
/// Combines tonal component (shell resonance) + noise component (snare wires)
pub struct SnareDrum {
    shell: Oscillator,
    overtone: Oscillator,
    tone_freq: f32,
    tone_envelope: Envelope,

    noise: NoiseGenerator,
    wires: WireBand,
    noise_envelope: Envelope,

    tone_mix: f32,
    vca: VCA,
}

impl SnareDrum {
    pub fn new(sample_rate: f32, patch: &SnarePatch, seed: u32) -> Self {
        // Tone is shorter than the rattle
        let mut tone_envelope = Envelope::new(sample_rate);
        tone_envelope.set_times(0.001, patch.decay * 0.5);

        // Higher snap = faster noise attack (0.001s down to 0.0002s)
        let mut noise_envelope = Envelope::new(sample_rate);
        noise_envelope.set_times(0.001 * (1.0 - patch.snap * 0.8), patch.decay);

        Self {
            shell: Oscillator::new(sample_rate, Shape::Sine),
            overtone: Oscillator::new(sample_rate, Shape::Sine),
            tone_freq: patch.tone_freq,
            tone_envelope,
            noise: NoiseGenerator::for_hit(seed),
            wires: WireBand::new(sample_rate, patch.snap),
            noise_envelope,
            tone_mix: patch.tone_mix,
            vca: VCA::default(),
        }
    }

    pub fn trigger(&mut self) {
        self.shell.reset();
        self.overtone.reset();
        self.wires.reset();

        self.tone_envelope.trigger();
        self.noise_envelope.trigger();
    }

    pub fn is_active(&self) -> bool {
        self.tone_envelope.is_active() || self.noise_envelope.is_active()
    }

    pub fn next_sample(&mut self) -> f32 {
        let tone = (self.shell.next_sample(self.tone_freq)
            + self.overtone.next_sample(self.tone_freq * SHELL_OVERTONE))
            * 0.5;
        let tone_out = tone * self.tone_envelope.next_sample();

        let rattle = self.wires.process(self.noise.next_sample());
        let noise_out = rattle * self.noise_envelope.next_sample();

        let mixed = tone_out * self.tone_mix + noise_out * (1.0 - self.tone_mix);
        self.vca.process(mixed, 1.0)
    }
}
