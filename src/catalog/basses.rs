// Bass Patterns
// Chord progressions the preview plays as root notes, one per half bar

use super::types::PatternRecord;

/// Built-in bass progressions
pub fn bass_patterns() -> Vec<PatternRecord> {
    vec![
        PatternRecord::bass(
            "bass-night-drive",
            "Night Drive",
            "Tense • Cinematic",
            "compass",
            "A minor",
            "Am - F - C - G",
        ),
        PatternRecord::bass(
            "bass-sunrise",
            "Sunrise Pulse",
            "Hopeful • Warm",
            "heart",
            "C major",
            "C - Am - F - G",
        ),
        PatternRecord::bass(
            "bass-reese-dread",
            "Reese Dread",
            "Dark • Deep",
            "waveform",
            "E minor",
            "Em - C - D - Bm",
        ),
        PatternRecord::bass(
            "bass-liquid-walk",
            "Liquid Walk",
            "Nostalgic • Lush",
            "rings",
            "D major",
            "D - Bm - G - A",
        ),
        PatternRecord::bass(
            "bass-phrygian-grind",
            "Phrygian Grind",
            "Aggressive • Brooding",
            "waveform",
            "E phrygian",
            "Em - F - Em - Dm",
        ),
        PatternRecord::bass(
            "bass-low-tide",
            "Low Tide",
            "Melancholic • Wide",
            "compass",
            "F minor",
            "Fm - Db - Ab - Eb",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bass_patterns_have_progressions() {
        for record in bass_patterns() {
            let prog = record.prog().unwrap();
            assert!(prog.split('-').count() >= 2, "{} too short", record.id);
            assert!(!record.key().unwrap().is_empty());
        }
    }
}
