// Drum Patterns
// Two-bar, 32-step loops in the 160-180 BPM range

use super::types::PatternRecord;

/// Built-in drum loops
///
/// Each pattern is 32 sixteenth-note steps (two bars of 4/4).
/// `X` is a hit, `-` is a rest.
pub fn drum_patterns() -> Vec<PatternRecord> {
    vec![
        PatternRecord::drum(
            "drum-amen-roller",
            "Amen Roller",
            "Driving • Relentless",
            "waveform",
            174,
            "X-X-X--XX-X-X--XX-X-X--XX-XXX--X",
        ),
        PatternRecord::drum(
            "drum-two-step",
            "Two-Step Stepper",
            "Groovy • Tight",
            "rings",
            172,
            "X-------X-X-----X-------X-X---X-",
        ),
        PatternRecord::drum(
            "drum-halftime-fog",
            "Halftime Fog",
            "Sparse • Brooding",
            "compass",
            160,
            "X-------X-------X-------X-------",
        ),
        PatternRecord::drum(
            "drum-four-floor",
            "Four to the Floor",
            "Hypnotic • Punchy",
            "rings",
            168,
            "X---X---X---X---X---X---X---X---",
        ),
        PatternRecord::drum(
            "drum-stutter-break",
            "Stutter Break",
            "Stuttering • Nervous",
            "waveform",
            176,
            "XX-XX-X-XX-X-XX-XX-XX-X-XX-XXX-X",
        ),
        PatternRecord::drum(
            "drum-rolling-hats",
            "Rolling Hats",
            "Urgent • Crisp",
            "heart",
            180,
            "XXXXXXXXXXXXXXXXXXXXXX-XXXXXXXXX",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drum_patterns_are_32_steps() {
        for record in drum_patterns() {
            let pattern = record.pattern().unwrap();
            assert_eq!(pattern.len(), 32, "{} has wrong length", record.id);
            assert!(pattern.chars().all(|c| c == 'X' || c == '-'));
        }
    }

    #[test]
    fn test_drum_bpm_range() {
        for record in drum_patterns() {
            let bpm = record.bpm().unwrap();
            assert!((160..=180).contains(&bpm), "{} bpm {}", record.id, bpm);
        }
    }
}
