use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the eight drum-kit controls, independent of the input device that
/// triggered it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum DrumPad {
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
}

/// Raised when a configuration key does not name one of the eight pads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown drum pad '{0}' (expected one of a, s, d, f, g, h, j, k)")]
pub struct PadKeyError(pub String);

impl DrumPad {
    /// All pads in panel order
    pub const ALL: [DrumPad; 8] = [
        DrumPad::A,
        DrumPad::S,
        DrumPad::D,
        DrumPad::F,
        DrumPad::G,
        DrumPad::H,
        DrumPad::J,
        DrumPad::K,
    ];

    /// Look up the pad bound to a keyboard character. Matching is
    /// case-insensitive; any other character yields `None`.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'a' => Some(DrumPad::A),
            's' => Some(DrumPad::S),
            'd' => Some(DrumPad::D),
            'f' => Some(DrumPad::F),
            'g' => Some(DrumPad::G),
            'h' => Some(DrumPad::H),
            'j' => Some(DrumPad::J),
            'k' => Some(DrumPad::K),
            _ => None,
        }
    }

    /// Canonical (lowercase) key for this pad
    pub fn key(self) -> char {
        match self {
            DrumPad::A => 'a',
            DrumPad::S => 's',
            DrumPad::D => 'd',
            DrumPad::F => 'f',
            DrumPad::G => 'g',
            DrumPad::H => 'h',
            DrumPad::J => 'j',
            DrumPad::K => 'k',
        }
    }

    /// Human-readable drum part name
    pub fn label(self) -> &'static str {
        match self {
            DrumPad::A => "Bass Drum",
            DrumPad::S => "Snare Drum",
            DrumPad::D => "Tom 1",
            DrumPad::F => "Tom 2",
            DrumPad::G => "Tom 3",
            DrumPad::H => "Hi-Hat",
            DrumPad::J => "Crash Cymbal",
            DrumPad::K => "Ride Cymbal",
        }
    }

    /// Position in panel order, also the slot in per-pad tables
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DrumPad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for DrumPad {
    type Err = PadKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => DrumPad::from_key(c).ok_or_else(|| PadKeyError(s.to_string())),
            _ => Err(PadKeyError(s.to_string())),
        }
    }
}

impl TryFrom<String> for DrumPad {
    type Error = PadKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DrumPad> for String {
    fn from(pad: DrumPad) -> Self {
        pad.key().to_string()
    }
}
