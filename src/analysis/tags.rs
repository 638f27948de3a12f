// Motif Tags
// Splits mood strings into tags and sorts them into semantic categories

use serde::{Deserialize, Serialize};

/// Separator between tags in a mood string
pub const TAG_SEPARATOR: char = '•';

/// Semantic category a mood tag can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Energy,
    Emotion,
    Texture,
    Movement,
    Atmosphere,
}

impl TagCategory {
    pub const ALL: [TagCategory; 5] = [
        TagCategory::Energy,
        TagCategory::Emotion,
        TagCategory::Texture,
        TagCategory::Movement,
        TagCategory::Atmosphere,
    ];

    /// Canonical keyword list for this category
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            TagCategory::Energy => &["Bright", "Urgent", "Driving", "Relentless", "Hypnotic", "Punchy"],
            TagCategory::Emotion => &[
                "Tense", "Hopeful", "Nostalgic", "Dark", "Melancholic", "Mournful", "Longing",
                "Heroic", "Dreamy",
            ],
            TagCategory::Texture => &[
                "Cinematic", "Crisp", "Warm", "Shimmery", "Clean", "Sparse", "Ethereal", "Lush",
                "Iridescent",
            ],
            TagCategory::Movement => &[
                "Stuttering", "Propulsive", "Off-kilter", "Nervous", "Tight", "Groovy", "Funky",
            ],
            TagCategory::Atmosphere => &[
                "Airy", "Brooding", "Wide", "Open", "Deep", "Distant", "Mysterious", "Expansive",
                "Soft", "Sharp", "Upward", "Anthemic", "Laidback", "Hooky", "Aggressive",
            ],
        }
    }

    /// The single category a tag maps to, if any
    pub fn of(tag: &str) -> Option<TagCategory> {
        TagCategory::ALL
            .into_iter()
            .find(|category| category.keywords().contains(&tag))
    }
}

/// Tags grouped by semantic category, each list in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotifCategories {
    pub energy: Vec<String>,
    pub emotion: Vec<String>,
    pub texture: Vec<String>,
    pub movement: Vec<String>,
    pub atmosphere: Vec<String>,
}

impl MotifCategories {
    pub fn get(&self, category: TagCategory) -> &[String] {
        match category {
            TagCategory::Energy => &self.energy,
            TagCategory::Emotion => &self.emotion,
            TagCategory::Texture => &self.texture,
            TagCategory::Movement => &self.movement,
            TagCategory::Atmosphere => &self.atmosphere,
        }
    }

    fn get_mut(&mut self, category: TagCategory) -> &mut Vec<String> {
        match category {
            TagCategory::Energy => &mut self.energy,
            TagCategory::Emotion => &mut self.emotion,
            TagCategory::Texture => &mut self.texture,
            TagCategory::Movement => &mut self.movement,
            TagCategory::Atmosphere => &mut self.atmosphere,
        }
    }
}

/// Extract trimmed, non-empty tags from a mood string
pub fn extract_tags(mood: &str) -> Vec<String> {
    mood.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sort tags into semantic categories; unmapped tags are dropped
pub fn categorize<S: AsRef<str>>(tags: &[S]) -> MotifCategories {
    let mut categories = MotifCategories::default();
    for tag in tags {
        let tag = tag.as_ref();
        if let Some(category) = TagCategory::of(tag) {
            categories.get_mut(category).push(tag.to_string());
        }
    }
    categories
}
