use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::kit::patch::{DrumPatch, MembranePatch, MetalPatch, SnarePatch};
use crate::kit::sample::SampleData;
use crate::kit::{DrumPad, DrumSound, SoundTable};

/// Top-level configuration structure
/// Every section is optional; an empty file yields the built-in kit
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KitConfig {
    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    /// Per-pad overrides of the built-in sound table
    #[serde(default)]
    pub pads: BTreeMap<DrumPad, PadSound>,

    /// Directory relative sample paths are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

impl KitConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.audio.validate()?;
        self.animation.validate()?;

        for (pad, sound) in &self.pads {
            sound
                .validate()
                .with_context(|| format!("Invalid sound for pad '{}'", pad))?;
        }

        Ok(())
    }

    /// Build the sound table, loading any sample files
    pub fn sound_table(&self) -> Result<SoundTable> {
        let mut table = SoundTable::builtin();

        for (&pad, sound) in &self.pads {
            let sound = match sound {
                PadSound::Sample { path } => {
                    let path = self.resolve(path);
                    let data = SampleData::load(&path)
                        .with_context(|| format!("Failed to load sample for pad '{}'", pad))?;
                    DrumSound::Sample(Arc::new(data))
                }
                PadSound::Membrane(p) => DrumSound::Synth(DrumPatch::Membrane(*p)),
                PadSound::Snare(p) => DrumSound::Synth(DrumPatch::Snare(*p)),
                PadSound::Metal(p) => DrumSound::Synth(DrumPatch::Metal(*p)),
            };
            table.set(pad, sound);
        }

        Ok(table)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Audio output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioConfig {
    /// Output device name substring or index; host default when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,

    #[serde(default = "default_gain")]
    pub gain: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            gain: default_gain(),
        }
    }
}

impl AudioConfig {
    pub fn validate(&self) -> Result<()> {
        if self.gain < 0.0 || self.gain > 1.0 {
            return Err(anyhow!("Gain must be between 0.0 and 1.0"));
        }
        Ok(())
    }
}

/// Label animation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimationConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.duration_ms < 100 || self.duration_ms > 10_000 {
            return Err(anyhow!("Animation duration_ms must be between 100 and 10000"));
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Sound override for a single pad
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PadSound {
    /// WAV file, relative to the config file's directory
    Sample { path: PathBuf },
    Membrane(MembranePatch),
    Snare(SnarePatch),
    Metal(MetalPatch),
}

impl PadSound {
    pub fn validate(&self) -> Result<()> {
        match self {
            PadSound::Sample { path } => {
                if path.as_os_str().is_empty() {
                    return Err(anyhow!("Sample path must not be empty"));
                }
                Ok(())
            }
            PadSound::Membrane(p) => p.validate(),
            PadSound::Snare(p) => p.validate(),
            PadSound::Metal(p) => p.validate(),
        }
    }
}

// Default value functions for serde
fn default_gain() -> f32 {
    0.8
}

fn default_duration_ms() -> u64 {
    1000
}
