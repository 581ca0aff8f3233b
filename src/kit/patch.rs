use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Pitch-swept membrane: kick drum and toms
/// A sine sweeps from `pitch_start` down to `pitch_end`, plus a noise
/// transient for the beater click
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MembranePatch {
    #[serde(rename = "pitchstart")]
    pub pitch_start: f32,
    #[serde(rename = "pitchend")]
    pub pitch_end: f32,
    #[serde(rename = "pitchdecay")]
    pub pitch_decay: f32,
    pub decay: f32,
    pub click: f32,
}

impl Default for MembranePatch {
    fn default() -> Self {
        Self {
            pitch_start: 150.0,
            pitch_end: 40.0,
            pitch_decay: 0.05,
            decay: 0.3,
            click: 0.3,
        }
    }
}

impl MembranePatch {
    pub fn validate(&self) -> Result<()> {
        if self.pitch_start < 40.0 || self.pitch_start > 400.0 {
            return Err(anyhow!("Membrane pitchstart must be between 40 and 400 Hz"));
        }
        if self.pitch_end < 30.0 || self.pitch_end > 300.0 {
            return Err(anyhow!("Membrane pitchend must be between 30 and 300 Hz"));
        }
        if self.pitch_end > self.pitch_start {
            return Err(anyhow!("Membrane pitchend must not exceed pitchstart"));
        }
        if self.pitch_decay < 0.005 || self.pitch_decay > 0.5 {
            return Err(anyhow!("Membrane pitchdecay must be between 0.005 and 0.5 seconds"));
        }
        if self.decay < 0.05 || self.decay > 2.0 {
            return Err(anyhow!("Membrane decay must be between 0.05 and 2.0 seconds"));
        }
        if self.click < 0.0 || self.click > 1.0 {
            return Err(anyhow!("Membrane click must be between 0.0 and 1.0"));
        }
        Ok(())
    }
}

/// Snare: two-oscillator shell tone plus filtered noise for the wires
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SnarePatch {
    #[serde(rename = "tonefreq")]
    pub tone_freq: f32,
    #[serde(rename = "tonemix")]
    pub tone_mix: f32,
    pub decay: f32,
    pub snap: f32,
}

impl Default for SnarePatch {
    fn default() -> Self {
        Self {
            tone_freq: 200.0,
            tone_mix: 0.6,
            decay: 0.15,
            snap: 0.7,
        }
    }
}

impl SnarePatch {
    pub fn validate(&self) -> Result<()> {
        if self.tone_freq < 150.0 || self.tone_freq > 300.0 {
            return Err(anyhow!("Snare tonefreq must be between 150 and 300 Hz"));
        }
        if self.tone_mix < 0.0 || self.tone_mix > 1.0 {
            return Err(anyhow!("Snare tonemix must be between 0.0 and 1.0"));
        }
        if self.decay < 0.05 || self.decay > 0.5 {
            return Err(anyhow!("Snare decay must be between 0.05 and 0.5 seconds"));
        }
        if self.snap < 0.0 || self.snap > 1.0 {
            return Err(anyhow!("Snare snap must be between 0.0 and 1.0"));
        }
        Ok(())
    }
}

/// Metallic noise voice: hi-hat, crash and ride
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MetalPatch {
    /// High-pass cutoff in Hz
    pub brightness: f32,
    pub decay: f32,
    /// Balance between white noise (0.0) and square-wave partials (1.0)
    pub metallic: f32,
}

impl Default for MetalPatch {
    fn default() -> Self {
        Self {
            brightness: 7000.0,
            decay: 0.05,
            metallic: 0.4,
        }
    }
}

impl MetalPatch {
    pub fn validate(&self) -> Result<()> {
        if self.brightness < 2000.0 || self.brightness > 12000.0 {
            return Err(anyhow!("Metal brightness must be between 2000 and 12000 Hz"));
        }
        if self.decay < 0.02 || self.decay > 3.0 {
            return Err(anyhow!("Metal decay must be between 0.02 and 3.0 seconds"));
        }
        if self.metallic < 0.0 || self.metallic > 1.0 {
            return Err(anyhow!("Metal metallic must be between 0.0 and 1.0"));
        }
        Ok(())
    }
}

/// Parameter set for one synthesized drum voice
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrumPatch {
    Membrane(MembranePatch),
    Snare(SnarePatch),
    Metal(MetalPatch),
}

impl DrumPatch {
    pub fn validate(&self) -> Result<()> {
        match self {
            DrumPatch::Membrane(p) => p.validate(),
            DrumPatch::Snare(p) => p.validate(),
            DrumPatch::Metal(p) => p.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(MembranePatch::default().validate().is_ok());
        assert!(SnarePatch::default().validate().is_ok());
        assert!(MetalPatch::default().validate().is_ok());
    }

    #[test]
    fn test_membrane_sweep_must_fall() {
        let patch = MembranePatch {
            pitch_start: 100.0,
            pitch_end: 200.0,
            ..MembranePatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let snare = SnarePatch {
            snap: 1.5,
            ..SnarePatch::default()
        };
        assert!(DrumPatch::Snare(snare).validate().is_err());

        let metal = MetalPatch {
            decay: 10.0,
            ..MetalPatch::default()
        };
        assert!(DrumPatch::Metal(metal).validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let patch: DrumPatch = serde_yaml::from_str("membrane: { pitchstart: 240 }").unwrap();
        match patch {
            DrumPatch::Membrane(m) => {
                assert_eq!(m.pitch_start, 240.0);
                assert_eq!(m.pitch_end, 40.0);
                assert_eq!(m.click, 0.3);
            }
            other => panic!("expected membrane patch, got {:?}", other),
        }
    }
}
