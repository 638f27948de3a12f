// Catalog Type Definitions
// Pattern records are immutable once the catalog is loaded

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three pattern categories, one per selection slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Drum,
    Bass,
    Lead,
}

impl Category {
    /// All categories in their natural order
    pub const ALL: [Category; 3] = [Category::Drum, Category::Bass, Category::Lead];

    /// Next category in the drum -> bass -> lead -> drum cycle
    pub fn next(&self) -> Category {
        match self {
            Category::Drum => Category::Bass,
            Category::Bass => Category::Lead,
            Category::Lead => Category::Drum,
        }
    }

    /// Convert from string representation
    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "drum" | "drums" => Some(Category::Drum),
            "bass" | "basses" => Some(Category::Bass),
            "lead" | "leads" => Some(Category::Lead),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Drum => "drum",
            Category::Bass => "bass",
            Category::Lead => "lead",
        }
    }

    /// Human-readable name for UI display
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Drum => "Drum Pattern",
            Category::Bass => "Bass Pattern",
            Category::Lead => "Lead Melody",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-specific pattern fields
///
/// Exactly one variant is populated per record. The JSON form is flat,
/// so the variant is recognised by which fields are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternDetails {
    /// 32-step hit/rest string over {X, -}
    Drum { bpm: u32, pattern: String },

    /// Hyphen-delimited chord symbols in a key
    Bass { key: String, prog: String },

    /// Hyphen-delimited scale degrees in a key
    Lead { key: String, motif: String },
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub id: String,
    pub title: String,

    /// Bullet-separated tags, e.g. "Tense • Cinematic"
    #[serde(default)]
    pub mood: String,

    /// Key into the icon lookup; unknown keys render nothing
    #[serde(default)]
    pub icon: String,

    #[serde(flatten)]
    pub details: PatternDetails,
}

impl PatternRecord {
    pub fn drum(id: &str, title: &str, mood: &str, icon: &str, bpm: u32, pattern: &str) -> Self {
        PatternRecord {
            id: id.to_string(),
            title: title.to_string(),
            mood: mood.to_string(),
            icon: icon.to_string(),
            details: PatternDetails::Drum {
                bpm,
                pattern: pattern.to_string(),
            },
        }
    }

    pub fn bass(id: &str, title: &str, mood: &str, icon: &str, key: &str, prog: &str) -> Self {
        PatternRecord {
            id: id.to_string(),
            title: title.to_string(),
            mood: mood.to_string(),
            icon: icon.to_string(),
            details: PatternDetails::Bass {
                key: key.to_string(),
                prog: prog.to_string(),
            },
        }
    }

    pub fn lead(id: &str, title: &str, mood: &str, icon: &str, key: &str, motif: &str) -> Self {
        PatternRecord {
            id: id.to_string(),
            title: title.to_string(),
            mood: mood.to_string(),
            icon: icon.to_string(),
            details: PatternDetails::Lead {
                key: key.to_string(),
                motif: motif.to_string(),
            },
        }
    }

    /// Category is determined by which detail fields are populated
    pub fn category(&self) -> Category {
        match self.details {
            PatternDetails::Drum { .. } => Category::Drum,
            PatternDetails::Bass { .. } => Category::Bass,
            PatternDetails::Lead { .. } => Category::Lead,
        }
    }

    pub fn bpm(&self) -> Option<u32> {
        match &self.details {
            PatternDetails::Drum { bpm, .. } => Some(*bpm),
            _ => None,
        }
    }

    pub fn pattern(&self) -> Option<&str> {
        match &self.details {
            PatternDetails::Drum { pattern, .. } => Some(pattern),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match &self.details {
            PatternDetails::Bass { key, .. } | PatternDetails::Lead { key, .. } => Some(key),
            PatternDetails::Drum { .. } => None,
        }
    }

    pub fn prog(&self) -> Option<&str> {
        match &self.details {
            PatternDetails::Bass { prog, .. } => Some(prog),
            _ => None,
        }
    }

    pub fn motif(&self) -> Option<&str> {
        match &self.details {
            PatternDetails::Lead { motif, .. } => Some(motif),
            _ => None,
        }
    }

    /// Short label shown next to the title: BPM for drums, key otherwise
    pub fn badge(&self) -> String {
        match &self.details {
            PatternDetails::Drum { bpm, .. } => format!("{} BPM", bpm),
            PatternDetails::Bass { key, .. } | PatternDetails::Lead { key, .. } => key.clone(),
        }
    }
}

/// Catalog summary for UI display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub drums: usize,
    pub basses: usize,
    pub leads: usize,
}
