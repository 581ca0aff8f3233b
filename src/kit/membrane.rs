use super::patch::MembranePatch;
use crate::dsp::{
    envelope::Envelope,
    noise::NoiseGenerator,
    oscillator::{Oscillator, Shape},
    vca::VCA,
};

/// Kick drum and tom synthesizer
/// Uses a pitch-swept sine wave (high frequency → low frequency)
/// plus a noise transient for the beater "click"
pub struct Membrane {
    oscillator: Oscillator,
    pitch_envelope: Envelope,
    amp_envelope: Envelope,
    click_envelope: Envelope,
    noise: NoiseGenerator,
    vca: VCA,
    start_frequency: f32,
    end_frequency: f32,
    click_amount: f32,
}

impl Membrane {
    pub fn new(sample_rate: f32, patch: &MembranePatch, seed: u32) -> Self {
        let mut pitch_envelope = Envelope::new(sample_rate);
        pitch_envelope.set_times(0.0, patch.pitch_decay);

        let mut amp_envelope = Envelope::new(sample_rate);
        amp_envelope.set_times(0.001, patch.decay);

        // Very short transient
        let mut click_envelope = Envelope::new(sample_rate);
        click_envelope.set_times(0.0, 0.005);

        Self {
            oscillator: Oscillator::new(sample_rate, Shape::Sine),
            pitch_envelope,
            amp_envelope,
            click_envelope,
            noise: NoiseGenerator::for_hit(seed),
            vca: VCA::default(),
            start_frequency: patch.pitch_start,
            end_frequency: patch.pitch_end,
            click_amount: patch.click,
        }
    }

    pub fn trigger(&mut self) {
        self.oscillator.reset();
        self.pitch_envelope.trigger();
        self.amp_envelope.trigger();
        self.click_envelope.trigger();
    }

    pub fn is_active(&self) -> bool {
        self.amp_envelope.is_active()
    }

    pub fn next_sample(&mut self) -> f32 {
        let pitch_env = self.pitch_envelope.next_sample();
        let frequency =
            self.end_frequency + (self.start_frequency - self.end_frequency) * pitch_env;

        let tone = self.oscillator.next_sample(frequency);
        let click =
            self.noise.next_sample() * self.click_envelope.next_sample() * self.click_amount;

        let amp_env = self.amp_envelope.next_sample();
        self.vca.process(tone + click, amp_env)
    }
}
