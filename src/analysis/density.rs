// Pattern Density
// Hit/rest counts and complexity bands for drum step strings

use serde::{Deserialize, Serialize};

use crate::config::DensityBands;

/// Nominal length of a drum pattern in steps (two bars of sixteenths)
pub const PATTERN_STEPS: usize = 32;

/// Hit marker in a drum pattern string
pub const HIT: char = 'X';

/// Complexity band derived from density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplexityBand {
    Sparse,
    Moderate,
    Medium,
    Dense,
    VeryDense,
    /// Empty or missing pattern
    Unknown,
}

impl ComplexityBand {
    /// Classify a density value using half-open cutoffs
    pub fn classify(density: f64, bands: &DensityBands) -> Self {
        if density < bands.sparse_below {
            ComplexityBand::Sparse
        } else if density < bands.moderate_below {
            ComplexityBand::Moderate
        } else if density < bands.medium_below {
            ComplexityBand::Medium
        } else if density < bands.dense_below {
            ComplexityBand::Dense
        } else {
            ComplexityBand::VeryDense
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplexityBand::Sparse => "sparse",
            ComplexityBand::Moderate => "moderate",
            ComplexityBand::Medium => "medium",
            ComplexityBand::Dense => "dense",
            ComplexityBand::VeryDense => "very dense",
            ComplexityBand::Unknown => "unknown",
        }
    }
}

/// Density analysis of one drum pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityReport {
    pub hit_count: usize,
    pub rest_count: usize,
    pub total: usize,

    /// Fraction of hit steps, in [0, 1]
    pub density: f64,

    /// Density as a rounded percentage
    pub percentage: u32,

    pub complexity: ComplexityBand,
}

impl DensityReport {
    fn unknown() -> Self {
        DensityReport {
            hit_count: 0,
            rest_count: 0,
            total: 0,
            density: 0.0,
            percentage: 0,
            complexity: ComplexityBand::Unknown,
        }
    }
}

/// Analyze a drum pattern with the default band cutoffs
pub fn analyze_density(pattern: &str) -> DensityReport {
    analyze_density_with_bands(pattern, &DensityBands::default())
}

/// Analyze a drum pattern
///
/// Patterns shorter than 32 steps are padded with rests. Any character
/// other than `X` counts as a rest. An empty pattern is `Unknown`.
pub fn analyze_density_with_bands(pattern: &str, bands: &DensityBands) -> DensityReport {
    if pattern.is_empty() {
        return DensityReport::unknown();
    }

    let length = pattern.chars().count();
    let total = length.max(PATTERN_STEPS);
    let hit_count = pattern.chars().filter(|&c| c == HIT).count();
    let rest_count = total - hit_count;
    let density = hit_count as f64 / total as f64;

    DensityReport {
        hit_count,
        rest_count,
        total,
        density,
        percentage: (density * 100.0).round() as u32,
        complexity: ComplexityBand::classify(density, bands),
    }
}
