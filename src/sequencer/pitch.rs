// Pitch
// MIDI note numbers with scientific pitch names (C4 = 60)

use serde::{Serialize, Serializer};
use std::fmt;

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pitch {
    midi: u8,
}

impl Pitch {
    pub const C1: Pitch = Pitch { midi: 24 };
    pub const C2: Pitch = Pitch { midi: 36 };

    pub const fn from_midi(midi: u8) -> Self {
        Pitch { midi: if midi > 127 { 127 } else { midi } }
    }

    pub fn midi(&self) -> u8 {
        self.midi
    }

    /// Parse a name like "C2", "F#4" or "Bb3"
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let mut chars = name.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let natural: i32 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        let rest = chars.as_str();
        let (shift, octave) = if let Some(octave) = rest.strip_prefix('#') {
            (1, octave)
        } else if let Some(octave) = rest.strip_prefix('b') {
            (-1, octave)
        } else {
            (0, rest)
        };

        let octave: i32 = octave.parse().ok()?;
        let midi = (octave + 1) * 12 + natural + shift;
        u8::try_from(midi).ok().filter(|m| *m <= 127).map(Pitch::from_midi)
    }

    /// Name with sharps, e.g. "A#2"
    pub fn name(&self) -> String {
        let octave = i32::from(self.midi) / 12 - 1;
        format!("{}{}", NOTE_NAMES[usize::from(self.midi % 12)], octave)
    }

    /// Equal-tempered frequency with A4 = 440 Hz
    pub fn frequency(&self) -> f64 {
        440.0 * 2f64.powf((f64::from(self.midi) - 69.0) / 12.0)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl Serialize for Pitch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}
