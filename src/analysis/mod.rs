// Motif and Pattern Analysis
// Pure readers over catalog records: tags, density, compatibility

pub mod tags;
pub mod density;
pub mod compatibility;
pub mod tempo;
pub mod prompts;

// Re-export main types
pub use compatibility::{
    find_compatible_by_bpm, find_compatible_by_key, find_compatible_by_mood, BpmMatch, KeyMatch,
    KeyRelation, MoodMatch,
};
pub use density::{analyze_density, analyze_density_with_bands, ComplexityBand, DensityReport};
pub use prompts::prompt_templates;
pub use tags::{categorize, extract_tags, MotifCategories, TagCategory};
pub use tempo::TempoBand;
