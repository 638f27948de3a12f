// Lead Patterns
// Scale-degree motifs the preview plays as eighth notes

use super::types::PatternRecord;

/// Built-in lead motifs
///
/// Degrees are 1-based and may carry accidentals (`b3`, `#4`, `♭7`).
pub fn lead_patterns() -> Vec<PatternRecord> {
    vec![
        PatternRecord::lead(
            "lead-glass-arp",
            "Glass Arp",
            "Shimmery • Airy",
            "rings",
            "E minor pentatonic",
            "1-3-5-7-5-3",
        ),
        PatternRecord::lead(
            "lead-anthem-hook",
            "Anthem Hook",
            "Heroic • Anthemic",
            "heart",
            "G major",
            "5-5-6-5-8-7",
        ),
        PatternRecord::lead(
            "lead-ghost-call",
            "Ghost Call",
            "Mysterious • Distant",
            "compass",
            "D minor",
            "1-b3-5-4-b3-1",
        ),
        PatternRecord::lead(
            "lead-rising-line",
            "Rising Line",
            "Hopeful • Upward",
            "waveform",
            "C major",
            "1-2-3-5-6-8",
        ),
        PatternRecord::lead(
            "lead-lydian-float",
            "Lydian Float",
            "Dreamy • Ethereal",
            "rings",
            "F lydian",
            "1-#4-5-3-2-1",
        ),
        PatternRecord::lead(
            "lead-minor-stab",
            "Minor Stab",
            "Dark • Sharp",
            "waveform",
            "F minor pentatonic",
            "1-1-4-3-1-5",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_patterns_have_motifs() {
        for record in lead_patterns() {
            let motif = record.motif().unwrap();
            assert!(motif.split('-').count() >= 3, "{} too short", record.id);
        }
    }
}
