// Pattern Catalog
// Immutable, category-partitioned lists of drum, bass and lead patterns

pub mod types;
pub mod icons;
mod drums;
mod basses;
mod leads;

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

pub use icons::icon_svg;
pub use types::{CatalogSummary, Category, PatternDetails, PatternRecord};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Pattern '{id}' is a {found} pattern but was listed under {expected}")]
    WrongCategory {
        id: String,
        expected: Category,
        found: Category,
    },
    #[error("Duplicate pattern id: {0}")]
    DuplicateId(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// The full pattern catalog
///
/// Records are shared behind `Arc` so selection slots can reference them
/// without copying; nothing hands out mutable access after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    drums: Vec<Arc<PatternRecord>>,
    basses: Vec<Arc<PatternRecord>>,
    leads: Vec<Arc<PatternRecord>>,
}

impl Catalog {
    /// Catalog built from the embedded pattern data
    pub fn builtin() -> Self {
        // Embedded data is covered by tests; validation cannot fail here
        Self::from_records(drums::drum_patterns(), basses::bass_patterns(), leads::lead_patterns())
            .unwrap_or_else(|e| {
                log::error!("Embedded catalog is invalid: {}", e);
                Catalog::empty()
            })
    }

    pub fn empty() -> Self {
        Catalog {
            drums: Vec::new(),
            basses: Vec::new(),
            leads: Vec::new(),
        }
    }

    /// Build a catalog, checking category partition and id uniqueness
    pub fn from_records(
        drums: Vec<PatternRecord>,
        basses: Vec<PatternRecord>,
        leads: Vec<PatternRecord>,
    ) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        let mut partition = |records: Vec<PatternRecord>, expected: Category| {
            records
                .into_iter()
                .map(|record| {
                    if record.category() != expected {
                        return Err(CatalogError::WrongCategory {
                            id: record.id.clone(),
                            expected,
                            found: record.category(),
                        });
                    }
                    if !seen.insert(record.id.clone()) {
                        return Err(CatalogError::DuplicateId(record.id.clone()));
                    }
                    Ok(Arc::new(record))
                })
                .collect::<CatalogResult<Vec<_>>>()
        };

        let drums = partition(drums, Category::Drum)?;
        let basses = partition(basses, Category::Bass)?;
        let leads = partition(leads, Category::Lead)?;

        Ok(Catalog { drums, basses, leads })
    }

    /// Build a catalog from three JSON arrays (drums.json, basses.json, leads.json)
    pub fn from_json(drums: &str, basses: &str, leads: &str) -> CatalogResult<Self> {
        let drums: Vec<PatternRecord> = serde_json::from_str(drums)?;
        let basses: Vec<PatternRecord> = serde_json::from_str(basses)?;
        let leads: Vec<PatternRecord> = serde_json::from_str(leads)?;
        Self::from_records(drums, basses, leads)
    }

    /// All records of one category, in catalog order
    pub fn list(&self, category: Category) -> &[Arc<PatternRecord>] {
        match category {
            Category::Drum => &self.drums,
            Category::Bass => &self.basses,
            Category::Lead => &self.leads,
        }
    }

    /// Look up a record by id within one category
    pub fn get(&self, category: Category, id: &str) -> Option<Arc<PatternRecord>> {
        self.list(category).iter().find(|r| r.id == id).cloned()
    }

    /// Look up a record by id in any category
    pub fn find(&self, id: &str) -> Option<Arc<PatternRecord>> {
        self.iter().find(|r| r.id == id).cloned()
    }

    /// Iterate all records: drums, then basses, then leads
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PatternRecord>> {
        self.drums.iter().chain(self.basses.iter()).chain(self.leads.iter())
    }

    pub fn len(&self) -> usize {
        self.drums.len() + self.basses.len() + self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            drums: self.drums.len(),
            basses: self.basses.len(),
            leads: self.leads.len(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert!(!catalog.list(Category::Drum).is_empty());
        assert!(!catalog.list(Category::Bass).is_empty());
        assert!(!catalog.list(Category::Lead).is_empty());

        for category in Category::ALL {
            assert!(catalog.list(category).iter().all(|r| r.category() == category));
        }
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = Catalog::builtin();
        let ids: HashSet<_> = catalog.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_get_and_find() {
        let catalog = Catalog::builtin();
        let drum = catalog.get(Category::Drum, "drum-four-floor");
        assert!(drum.is_some());
        assert_eq!(drum.unwrap().title, "Four to the Floor");

        // Wrong category finds nothing
        assert!(catalog.get(Category::Bass, "drum-four-floor").is_none());
        assert!(catalog.find("drum-four-floor").is_some());
        assert!(catalog.find("no-such-id").is_none());
    }

    #[test]
    fn test_from_records_rejects_wrong_category() {
        let result = Catalog::from_records(
            vec![PatternRecord::bass("b", "B", "", "", "C major", "C")],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(CatalogError::WrongCategory { .. })));
    }

    #[test]
    fn test_from_records_rejects_duplicate_ids() {
        let result = Catalog::from_records(
            vec![PatternRecord::drum("x", "D", "", "", 170, "X")],
            vec![PatternRecord::bass("x", "B", "", "", "C major", "C")],
            vec![],
        );
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "x"));
    }

    #[test]
    fn test_from_json() {
        let drums = r#"[{"id":"d1","title":"Beat","mood":"Punchy","icon":"rings","bpm":170,"pattern":"X---X---"}]"#;
        let basses = r#"[{"id":"b1","title":"Sub","mood":"Deep","icon":"heart","key":"C major","prog":"C - G"}]"#;
        let leads = r#"[{"id":"l1","title":"Hook","mood":"Bright","icon":"compass","key":"A minor","motif":"1-3-5"}]"#;

        let catalog = Catalog::from_json(drums, basses, leads).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.summary(), CatalogSummary { drums: 1, basses: 1, leads: 1 });
        assert_eq!(catalog.get(Category::Lead, "l1").unwrap().motif(), Some("1-3-5"));
    }

    #[test]
    fn test_from_json_rejects_lead_in_bass_file() {
        let leads_as_basses = r#"[{"id":"l1","title":"Hook","key":"A minor","motif":"1-3-5"}]"#;
        let result = Catalog::from_json("[]", leads_as_basses, "[]");
        assert!(matches!(result, Err(CatalogError::WrongCategory { .. })));
    }
}
