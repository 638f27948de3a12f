// Pattern Compatibility
// Read-only ranking of catalog records against a key, tempo, or mood

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::tags::extract_tags;
use crate::catalog::PatternRecord;

/// How a record's key relates to the target key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRelation {
    /// Identical key name (case-insensitive)
    SameKey,
    /// Both major, both minor, or both pentatonic
    SameQuality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMatch {
    pub id: String,
    pub relation: KeyRelation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmMatch {
    pub id: String,
    pub bpm: u32,
    pub distance: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodMatch {
    pub id: String,

    /// Shared tags as a fraction of the target's tags, in (0, 1]
    pub similarity: f64,

    pub common_motifs: Vec<String>,
}

/// Records whose key is compatible with `key`
///
/// Exact key matches rank first, then same-quality matches, each group in
/// catalog order. Records without a key (drums) are skipped.
pub fn find_compatible_by_key(key: &str, patterns: &[Arc<PatternRecord>]) -> Vec<KeyMatch> {
    let target = key.trim().to_lowercase();
    if target.is_empty() {
        return Vec::new();
    }

    let is_major = target.contains("major");
    let is_minor = target.contains("minor");
    let is_pentatonic = target.contains("pentatonic");

    let mut matches: Vec<KeyMatch> = patterns
        .iter()
        .filter_map(|record| {
            let candidate = record.key()?.trim().to_lowercase();
            let relation = if candidate == target {
                KeyRelation::SameKey
            } else if (is_major && candidate.contains("major"))
                || (is_minor && candidate.contains("minor"))
                || (is_pentatonic && candidate.contains("pentatonic"))
            {
                KeyRelation::SameQuality
            } else {
                return None;
            };
            Some(KeyMatch {
                id: record.id.clone(),
                relation,
            })
        })
        .collect();

    // Stable sort keeps catalog order within each relation
    matches.sort_by_key(|m| m.relation);
    matches
}

/// Drum records within `tolerance` BPM of `bpm`, closest first
pub fn find_compatible_by_bpm(bpm: u32, patterns: &[Arc<PatternRecord>], tolerance: u32) -> Vec<BpmMatch> {
    if bpm == 0 {
        return Vec::new();
    }

    let mut matches: Vec<BpmMatch> = patterns
        .iter()
        .filter_map(|record| {
            let candidate = record.bpm()?;
            let distance = candidate.abs_diff(bpm);
            (distance <= tolerance).then(|| BpmMatch {
                id: record.id.clone(),
                bpm: candidate,
                distance,
            })
        })
        .collect();

    matches.sort_by_key(|m| m.distance);
    matches
}

/// Records sharing at least one mood tag with `mood`, most similar first
pub fn find_compatible_by_mood(mood: &str, patterns: &[Arc<PatternRecord>]) -> Vec<MoodMatch> {
    let target_tags = extract_tags(mood);
    if target_tags.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<MoodMatch> = patterns
        .iter()
        .filter_map(|record| {
            let record_tags = extract_tags(&record.mood);
            let common: Vec<String> = target_tags
                .iter()
                .filter(|tag| record_tags.contains(*tag))
                .cloned()
                .collect();

            if common.is_empty() {
                return None;
            }

            Some(MoodMatch {
                id: record.id.clone(),
                similarity: common.len() as f64 / target_tags.len() as f64,
                common_motifs: common,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches
}
