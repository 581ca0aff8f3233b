use super::patch::MetalPatch;
use crate::dsp::{
    envelope::Envelope,
    filter::HighPass,
    noise::NoiseGenerator,
    oscillator::{Oscillator, Shape},
    vca::VCA,
};

/// Inharmonic square-wave partials (Hz) for the metallic tone
const PARTIALS: [f32; 6] = [205.3, 304.4, 369.6, 522.7, 540.0, 800.0];

/// Hi-hat and cymbal synthesizer
/// High-passed blend of white noise and inharmonic square partials
pub struct Metal {
    noise: NoiseGenerator,
    partials: [Oscillator; 6],
    filter: HighPass,
    envelope: Envelope,
    metallic: f32,
    vca: VCA,
}

impl Metal {
    pub fn new(sample_rate: f32, patch: &MetalPatch, seed: u32) -> Self {
        let partials = PARTIALS.map(|_| Oscillator::new(sample_rate, Shape::Square));

        let mut envelope = Envelope::new(sample_rate);
        envelope.set_times(0.001, patch.decay);

        Self {
            noise: NoiseGenerator::for_hit(seed),
            partials,
            filter: HighPass::new(sample_rate, patch.brightness),
            envelope,
            metallic: patch.metallic,
            vca: VCA::default(),
        }
    }

    pub fn trigger(&mut self) {
        for osc in &mut self.partials {
            osc.reset();
        }
        self.filter.reset();
        self.envelope.trigger();
    }

    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }

    pub fn next_sample(&mut self) -> f32 {
        let tone: f32 = self
            .partials
            .iter_mut()
            .zip(PARTIALS)
            .map(|(osc, freq)| osc.next_sample(freq))
            .sum::<f32>()
            / PARTIALS.len() as f32;
        let noise = self.noise.next_sample();

        let mixed = noise * (1.0 - self.metallic) + tone * self.metallic;
        let filtered = self.filter.process(mixed);

        self.vca.process(filtered, self.envelope.next_sample())
    }
}
