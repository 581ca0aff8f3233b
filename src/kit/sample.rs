use hound::WavReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("failed to read WAV file {path}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("WAV file {0} contains no audio")]
    Empty(PathBuf),
    #[error("WAV file {0} declares a sample rate of 0 Hz")]
    InvalidSampleRate(PathBuf),
}

/// A fully decoded one-shot sample, mixed down to mono
#[derive(Debug)]
pub struct SampleData {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleData {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Decode a WAV file into memory
    ///
    /// Integer samples are scaled to [-1.0, 1.0] by their bit depth; float
    /// samples are taken as-is. Multi-channel files are averaged to mono.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SampleError> {
        let path = path.as_ref();
        let wav_error = |source| SampleError::Wav {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = WavReader::open(path).map_err(wav_error)?;
        let spec = reader.spec();
        // A player could never advance through a 0 Hz sample
        if spec.sample_rate == 0 {
            return Err(SampleError::InvalidSampleRate(path.to_path_buf()));
        }

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(wav_error)?,
            hound::SampleFormat::Int => {
                // i64 avoids overflow for 32-bit samples
                let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|s| s as f32 * scale))
                    .collect::<Result<_, _>>()
                    .map_err(wav_error)?
            }
        };

        let channels = spec.channels.max(1) as usize;
        let samples: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        if samples.is_empty() {
            return Err(SampleError::Empty(path.to_path_buf()));
        }

        let data = Self::new(samples, spec.sample_rate);
        info!(
            path = %path.display(),
            frames = data.len(),
            sample_rate = data.sample_rate(),
            channels = spec.channels,
            "Loaded drum sample"
        );

        Ok(data)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// Plays one shared sample once, resampling linearly to the output rate
pub struct SamplePlayer {
    data: Arc<SampleData>,
    position: f64,
    step: f64,
}

impl SamplePlayer {
    pub fn new(data: Arc<SampleData>, output_rate: f32) -> Self {
        let step = data.sample_rate as f64 / output_rate as f64;
        Self {
            data,
            position: 0.0,
            step,
        }
    }

    pub fn is_active(&self) -> bool {
        (self.position as usize) < self.data.samples.len()
    }

    pub fn next_sample(&mut self) -> f32 {
        let samples = &self.data.samples;
        let index = self.position as usize;
        let Some(&current) = samples.get(index) else {
            return 0.0;
        };
        let next = samples.get(index + 1).copied().unwrap_or(0.0);
        let frac = (self.position - index as f64) as f32;

        self.position += self.step;
        current + (next - current) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_wav<S: hound::Sample + Copy>(path: &Path, spec: WavSpec, samples: &[S]) {
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_load_int_wav_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kick.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav(&path, spec, &[0i16, 16384, -32768, 32767]);

        let data = SampleData::load(&path).unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.sample_rate(), 22050);
        assert_eq!(data.samples[1], 0.5);
        assert_eq!(data.samples[2], -1.0);
        assert!(data.samples[3] < 1.0 && data.samples[3] > 0.999);
    }

    #[test]
    fn test_load_float_stereo_mixes_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ride.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        write_wav(&path, spec, &[1.0f32, 0.0, 0.5, 0.5, -1.0, 0.0]);

        let data = SampleData::load(&path).unwrap();
        assert_eq!(data.samples, vec![0.5, 0.5, -0.5]);
    }

    #[test]
    fn test_load_empty_wav_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav::<i16>(&path, spec, &[]);

        assert!(matches!(SampleData::load(&path), Err(SampleError::Empty(_))));
    }

    #[test]
    fn test_load_zero_sample_rate_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snare.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav(&path, spec, &[1000i16, -1000]);

        // Zero the fmt chunk's sample rate and byte rate
        let mut bytes = std::fs::read(&path).unwrap();
        bytes[24..32].fill(0);
        std::fs::write(&path, bytes).unwrap();

        let err = SampleData::load(&path).unwrap_err();
        assert!(matches!(err, SampleError::InvalidSampleRate(p) if p == path));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = SampleData::load("/nonexistent/kick-01.wav").unwrap_err();
        assert!(matches!(err, SampleError::Wav { .. }));
    }

    #[test]
    fn test_player_runs_once() {
        let data = Arc::new(SampleData::new(vec![0.25, 0.5, 0.75], 44100));
        let mut player = SamplePlayer::new(data, 44100.0);

        let out: Vec<f32> = (0..3).map(|_| player.next_sample()).collect();
        assert_eq!(out, vec![0.25, 0.5, 0.75]);
        assert!(!player.is_active());
        assert_eq!(player.next_sample(), 0.0);
    }

    #[test]
    fn test_player_resamples() {
        let data = Arc::new(SampleData::new(vec![0.0, 1.0], 22050));
        let mut player = SamplePlayer::new(data, 44100.0);

        assert_eq!(player.next_sample(), 0.0);
        assert_eq!(player.next_sample(), 0.5);
        assert_eq!(player.next_sample(), 1.0);
        assert!(player.is_active());
        player.next_sample();
        assert!(!player.is_active());
    }
}
