// Markdown Export
// Structured text for pasting into a language model prompt

use chrono::{DateTime, Utc};

use crate::analysis::{analyze_density_with_bands, TempoBand};
use crate::catalog::{Catalog, Category, PatternDetails, PatternRecord};
use crate::config::StudioConfig;
use crate::state::SelectionState;

fn export_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn section_title(category: Category) -> &'static str {
    match category {
        Category::Drum => "Drum Patterns",
        Category::Bass => "Bass Patterns",
        Category::Lead => "Lead Melodies",
    }
}

fn fenced(body: &str) -> String {
    format!("```\n{}\n```\n", body)
}

/// Full write-up of one pattern
pub fn format_pattern(record: &PatternRecord, config: &StudioConfig) -> String {
    let category = record.category();
    let mut out = format!("# {}: {}\n\n", category.display_name(), record.title);
    out.push_str(&format!("**ID:** `{}`\n", record.id));

    match &record.details {
        PatternDetails::Drum { bpm, pattern } => {
            let density = analyze_density_with_bands(pattern, &config.density_bands);
            out.push_str(&format!("**BPM:** {}\n", bpm));
            out.push_str(&format!("**Mood:** {}\n", record.mood));
            out.push_str(&format!("**Icon:** {}\n\n", record.icon));
            out.push_str("## Pattern (32 steps, 2 bars)\n");
            out.push_str(&fenced(pattern));
            out.push_str("\n## Reading the Grid\n");
            out.push_str("- One character per 16th note\n");
            out.push_str("- `X` is a hit, `-` is a rest\n");
            out.push_str(&format!(
                "- {} hits over {} steps ({}%, {})\n",
                density.hit_count,
                density.total,
                density.percentage,
                density.complexity.label()
            ));
            out.push_str(&format!("- Loops every 2 bars at {} BPM\n\n", bpm));
            out.push_str("## Ask\n");
            out.push_str("1. Split into a kick/snare/hat step map over 32 steps\n");
            out.push_str("2. Add accents as velocity changes\n");
            out.push_str("3. Keep it usable as a 2-bar loop\n");
        }
        PatternDetails::Bass { key, prog } => {
            out.push_str(&format!("**Key:** {}\n", key));
            out.push_str(&format!("**Progression:** {}\n", prog));
            out.push_str(&format!("**Mood:** {}\n", record.mood));
            out.push_str(&format!("**Icon:** {}\n\n", record.icon));
            out.push_str("## Chord Progression\n");
            out.push_str(&fenced(prog));
            out.push_str("\n## Ask\n");
            out.push_str("1. Write a bassline on the chord roots\n");
            out.push_str("2. Stay within C1 to C3\n");
            out.push_str("3. Give it a 16th-note rhythm\n");
            out.push_str("4. Suggest a synth patch (saw, sub, reese)\n");
        }
        PatternDetails::Lead { key, motif } => {
            out.push_str(&format!("**Key:** {}\n", key));
            out.push_str(&format!("**Motif:** {}\n", motif));
            out.push_str(&format!("**Mood:** {}\n", record.mood));
            out.push_str(&format!("**Icon:** {}\n\n", record.icon));
            out.push_str("## Motif (scale degrees)\n");
            out.push_str(&fenced(motif));
            out.push_str(&format!("\nDegrees are counted from the root of {}.\n\n", key));
            out.push_str("## Ask\n");
            out.push_str("1. Grow the motif into an 8 or 16 bar melody\n");
            out.push_str("2. Give the result as MIDI notes\n");
            out.push_str("3. Stay within C4 to C6\n");
            out.push_str("4. Add passing tones and rhythmic variation\n");
        }
    }

    out
}

fn selection_section(category: Category, record: Option<&PatternRecord>) -> String {
    let Some(record) = record else {
        return format!(
            "## {}\nNo {} pattern selected.\n\n",
            category.display_name(),
            category
        );
    };

    let mut out = format!("## {}: {}\n\n", category.display_name(), record.title);
    match &record.details {
        PatternDetails::Drum { bpm, pattern } => {
            out.push_str(&format!("- **BPM:** {}\n", bpm));
            out.push_str(&format!("- **Mood:** {}\n", record.mood));
            out.push_str(&format!("- **Pattern:** `{}`\n\n", pattern));
        }
        PatternDetails::Bass { key, prog } => {
            out.push_str(&format!("- **Key:** {}\n", key));
            out.push_str(&format!("- **Progression:** {}\n", prog));
            out.push_str(&format!("- **Mood:** {}\n\n", record.mood));
        }
        PatternDetails::Lead { key, motif } => {
            out.push_str(&format!("- **Key:** {}\n", key));
            out.push_str(&format!("- **Motif:** {}\n", motif));
            out.push_str(&format!("- **Mood:** {}\n\n", record.mood));
        }
    }
    out
}

/// The current three-slot sketch, with placeholders for empty slots
pub fn format_selection(
    selection: &SelectionState,
    config: &StudioConfig,
    exported_at: DateTime<Utc>,
) -> String {
    let tempo = selection.tempo();
    let band = TempoBand::classify(tempo, &config.tempo_bands);

    let mut out = String::from("# BeatGrid Sketch\n\n## Session\n");
    out.push_str(&format!("- **Tempo:** {} BPM ({})\n", tempo, band.label()));
    out.push_str(&format!("- **Exported:** {}\n\n---\n\n", export_date(exported_at)));

    for category in Category::ALL {
        out.push_str(&selection_section(category, selection.slot(category).map(|r| r.as_ref())));
    }

    out.push_str("---\n\n## Ask\n\n");
    out.push_str("Turn this sketch into production material:\n\n");
    out.push_str("1. Drums as a kick/snare/hat MIDI step map (32 steps)\n");
    out.push_str("2. Bass as a 16th-note line on the chord roots\n");
    out.push_str("3. Lead as an 8 to 16 bar melody in MIDI notes\n");
    out
}

/// Every pattern in the catalog plus a compatibility guide
pub fn format_catalog(
    catalog: &Catalog,
    config: &StudioConfig,
    exported_at: DateTime<Utc>,
) -> String {
    let (low, high) = config.tempo_range;
    let summary = catalog.summary();

    let mut out = String::from("# BeatGrid Catalog\n\n");
    out.push_str(&format!("**Tempo Range:** {}-{} BPM\n", low, high));
    out.push_str(&format!("**Exported:** {}\n", export_date(exported_at)));
    out.push_str(&format!(
        "**Patterns:** {} drums, {} basses, {} leads\n",
        summary.drums, summary.basses, summary.leads
    ));

    for category in Category::ALL {
        out.push_str(&format!("\n---\n\n## {}\n\n", section_title(category)));
        for record in catalog.list(category) {
            out.push_str(&format!("### {} (`{}`)\n", record.title, record.id));
            match &record.details {
                PatternDetails::Drum { bpm, pattern } => {
                    out.push_str(&format!("- **BPM:** {}\n", bpm));
                    out.push_str(&format!("- **Pattern:** `{}`\n", pattern));
                }
                PatternDetails::Bass { key, prog } => {
                    out.push_str(&format!("- **Key:** {}\n", key));
                    out.push_str(&format!("- **Progression:** {}\n", prog));
                }
                PatternDetails::Lead { key, motif } => {
                    out.push_str(&format!("- **Key:** {}\n", key));
                    out.push_str(&format!("- **Motif:** {}\n", motif));
                }
            }
            out.push_str(&format!("- **Mood:** {}\n\n", record.mood));
        }
    }

    let bands = config.tempo_bands;
    out.push_str("---\n\n## Combining Patterns\n\n");
    out.push_str("- Pair basses and leads that share a key, or at least its quality\n");
    out.push_str(&format!("- Slow: below {} BPM\n", bands.slow_below));
    out.push_str(&format!(
        "- Medium: {} to {} BPM\n",
        bands.slow_below,
        bands.medium_below.saturating_sub(1)
    ));
    out.push_str(&format!("- Fast: {} BPM and up\n", bands.medium_below));
    out
}
