// Tempo Bands
// Slow / medium / fast labels for a BPM value

use serde::{Deserialize, Serialize};

use crate::config::TempoBands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempoBand {
    Slow,
    Medium,
    Fast,
}

impl TempoBand {
    pub fn classify(bpm: u32, bands: &TempoBands) -> Self {
        if bpm < bands.slow_below {
            TempoBand::Slow
        } else if bpm < bands.medium_below {
            TempoBand::Medium
        } else {
            TempoBand::Fast
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TempoBand::Slow => "Slow",
            TempoBand::Medium => "Medium",
            TempoBand::Fast => "Fast",
        }
    }
}
