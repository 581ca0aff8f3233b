use crossbeam_channel::Receiver;
use tracing::trace;

use crate::kit::{DrumPad, SoundTable, voice::DrumVoice};
use crate::types::events::KitEvent;

/// Hits expected to overlap in normal playing; the voice list grows past
/// this only under very fast rolls
const INITIAL_VOICE_CAPACITY: usize = 64;

struct ActiveVoice {
    pad: DrumPad,
    voice: DrumVoice,
}

/// Drum kit mixer
/// Owns every sounding hit and runs inside the audio callback. Each trigger
/// adds a new voice; earlier hits keep ringing until they fall silent.
pub struct KitMixer {
    sounds: SoundTable,
    voices: Vec<ActiveVoice>,
    event_rx: Receiver<KitEvent>,
    sample_rate: f32,
    gain: f32,
    /// Hit counter, used to seed per-hit noise
    hits: u32,
    mono: Vec<f32>,
}

impl KitMixer {
    /// # Arguments
    /// * `sample_rate` - Output sample rate in Hz
    /// * `sounds` - Pad → sound table
    /// * `gain` - Master output gain (0.0 to 1.0)
    /// * `event_rx` - Trigger events from the UI thread
    pub fn new(
        sample_rate: f32,
        sounds: SoundTable,
        gain: f32,
        event_rx: Receiver<KitEvent>,
    ) -> Self {
        Self {
            sounds,
            voices: Vec::with_capacity(INITIAL_VOICE_CAPACITY),
            event_rx,
            sample_rate,
            gain: gain.clamp(0.0, 1.0),
            hits: 0,
            mono: vec![0.0; 1024],
        }
    }

    /// Number of hits currently sounding
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    fn start_hit(&mut self, pad: DrumPad) {
        self.hits = self.hits.wrapping_add(1);
        let seed = self.hits.wrapping_mul(0x9E37_79B9) ^ pad.index() as u32;
        let voice = self.sounds.voice(pad, self.sample_rate, seed);
        self.voices.push(ActiveVoice { pad, voice });
        trace!(pad = %pad, voices = self.voices.len(), "Hit started");
    }

    /// Render the mix into an interleaved output buffer
    ///
    /// The mono kit mix is written to every channel.
    pub fn process(&mut self, output: &mut [f32], num_channels: usize) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                KitEvent::Trigger(pad) => self.start_hit(pad),
            }
        }

        let num_channels = num_channels.max(1);
        let frames = output.len() / num_channels;
        if self.mono.len() < frames {
            self.mono.resize(frames, 0.0);
        }
        let mono = &mut self.mono[..frames];
        mono.fill(0.0);

        for active in &mut self.voices {
            for sample in mono.iter_mut() {
                if !active.voice.is_active() {
                    break;
                }
                *sample += active.voice.next_sample();
            }
        }

        self.voices.retain(|active| {
            let keep = active.voice.is_active();
            if !keep {
                trace!(pad = %active.pad, "Hit finished");
            }
            keep
        });

        for (frame, &sample) in output.chunks_mut(num_channels).zip(mono.iter()) {
            let value = (sample * self.gain).clamp(-1.0, 1.0);
            frame.fill(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn mixer() -> (crossbeam_channel::Sender<KitEvent>, KitMixer) {
        let (tx, rx) = unbounded();
        (tx, KitMixer::new(44100.0, SoundTable::builtin(), 1.0, rx))
    }

    #[test]
    fn test_silent_without_triggers() {
        let (_tx, mut mixer) = mixer();
        let mut output = vec![1.0f32; 512];
        mixer.process(&mut output, 2);

        assert!(output.iter().all(|&s| s == 0.0));
        assert_eq!(mixer.active_voices(), 0);
    }

    #[test]
    fn test_trigger_plays_on_every_channel() {
        let (tx, mut mixer) = mixer();
        tx.send(KitEvent::trigger(DrumPad::A)).unwrap();

        let mut output = vec![0.0f32; 512 * 2];
        mixer.process(&mut output, 2);

        let left_has_audio = output.iter().step_by(2).any(|&s| s.abs() > 0.001);
        let right_has_audio = output.iter().skip(1).step_by(2).any(|&s| s.abs() > 0.001);
        assert!(left_has_audio, "Left channel should have audio");
        assert!(right_has_audio, "Right channel should have audio");
        assert_eq!(mixer.active_voices(), 1);
    }

    #[test]
    fn test_overlapping_hits_of_same_pad() {
        let (tx, mut mixer) = mixer();
        tx.send(KitEvent::trigger(DrumPad::J)).unwrap();
        tx.send(KitEvent::trigger(DrumPad::J)).unwrap();

        let mut output = vec![0.0f32; 256];
        mixer.process(&mut output, 1);
        assert_eq!(mixer.active_voices(), 2);

        // A later hit does not cut off the ringing ones
        tx.send(KitEvent::trigger(DrumPad::S)).unwrap();
        mixer.process(&mut output, 1);
        assert_eq!(mixer.active_voices(), 3);
    }

    #[test]
    fn test_finished_hits_are_dropped() {
        let (tx, mut mixer) = mixer();
        tx.send(KitEvent::trigger(DrumPad::H)).unwrap();

        // Closed hat lasts ~61ms; half a second is plenty
        let mut output = vec![0.0f32; 512];
        for _ in 0..44 {
            mixer.process(&mut output, 1);
        }

        assert_eq!(mixer.active_voices(), 0);
        assert!(output.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_zero_gain_is_silent() {
        let (tx, rx) = unbounded();
        let mut mixer = KitMixer::new(44100.0, SoundTable::builtin(), 0.0, rx);
        tx.send(KitEvent::trigger(DrumPad::A)).unwrap();

        let mut output = vec![0.0f32; 512];
        mixer.process(&mut output, 1);

        assert!(output.iter().all(|&s| s == 0.0));
        assert_eq!(mixer.active_voices(), 1);
    }

    #[test]
    fn test_grows_buffer_for_large_callbacks() {
        let (tx, mut mixer) = mixer();
        tx.send(KitEvent::trigger(DrumPad::S)).unwrap();

        let mut output = vec![0.0f32; 4096 * 2];
        mixer.process(&mut output, 2);

        assert!(output[4000 * 2..].iter().any(|&s| s.abs() > 0.0));
    }
}
