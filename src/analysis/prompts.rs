// Prompt Templates
// Ready-made LLM prompts for generating material around a pattern

use super::tags::extract_tags;
use crate::catalog::{PatternDetails, PatternRecord};

/// First tag lowercased, or a fallback word when the mood is empty
fn lead_tag(tags: &[String], fallback: &str) -> String {
    tags.first()
        .map(|t| t.to_lowercase())
        .unwrap_or_else(|| fallback.to_string())
}

/// Three prompt suggestions tailored to the record's category
pub fn prompt_templates(record: &PatternRecord) -> Vec<String> {
    let tags = extract_tags(&record.mood);
    let character = tags.join(" and ");

    match &record.details {
        PatternDetails::Drum { bpm, pattern } => vec![
            format!(
                "Write a {} BPM drum loop with a {} feel in the spirit of \"{}\". Keep it to 2 bars (32 sixteenth steps) and lean on {} elements.",
                bpm,
                character,
                record.title,
                lead_tag(&tags, "rhythmic")
            ),
            format!(
                "Vary this drum loop: \"{}\". Hold on to its {} feel while adding complexity.",
                pattern,
                lead_tag(&tags, "original")
            ),
            format!(
                "Design a second drum layer that sits under \"{}\" at {} BPM with a {} mood.",
                record.title,
                bpm,
                tags.join(", ")
            ),
        ],
        PatternDetails::Bass { key, prog } => vec![
            format!(
                "Write a bassline in {} with a {} character, built on the progression {}.",
                key, character, prog
            ),
            format!(
                "Generate a {} bass pattern that follows the chords {}.",
                lead_tag(&tags, "melodic"),
                prog
            ),
            format!(
                "Design a sub-bass layer for \"{}\" that brings out its {} character.",
                record.title, character
            ),
        ],
        PatternDetails::Lead { key, motif } => vec![
            format!(
                "Write a lead melody in {} that grows out of the motif {}, with a {} character.",
                key, motif, character
            ),
            format!(
                "Generate a {} lead hook developed from the scale degrees {}.",
                lead_tag(&tags, "melodic"),
                motif
            ),
            format!(
                "Design a counter-melody for \"{}\" that keeps its {} atmosphere.",
                record.title, character
            ),
        ],
    }
}
