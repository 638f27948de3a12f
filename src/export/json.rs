// JSON Export
// Downloadable documents for patterns, the selection and the whole catalog

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{Catalog, Category, PatternRecord};
use crate::state::SelectionState;

/// A named document ready to be written or downloaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    pub filename: String,
    pub contents: String,
}

/// Slot contents as full records
#[derive(Debug, Clone, Serialize)]
pub struct SelectedRecords {
    pub drum: Option<Arc<PatternRecord>>,
    pub bass: Option<Arc<PatternRecord>>,
    pub lead: Option<Arc<PatternRecord>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionExport {
    pub tempo: u32,
    pub selected: SelectedRecords,
    pub exported_at: DateTime<Utc>,
}

impl SelectionExport {
    pub fn new(selection: &SelectionState, exported_at: DateTime<Utc>) -> Self {
        SelectionExport {
            tempo: selection.tempo(),
            selected: SelectedRecords {
                drum: selection.drum().cloned(),
                bass: selection.bass().cloned(),
                lead: selection.lead().cloned(),
            },
            exported_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogExport {
    pub tempo: u32,
    pub drums: Vec<Arc<PatternRecord>>,
    pub basses: Vec<Arc<PatternRecord>>,
    pub leads: Vec<Arc<PatternRecord>>,
}

impl CatalogExport {
    pub fn new(catalog: &Catalog, tempo: u32) -> Self {
        CatalogExport {
            tempo,
            drums: catalog.list(Category::Drum).to_vec(),
            basses: catalog.list(Category::Bass).to_vec(),
            leads: catalog.list(Category::Lead).to_vec(),
        }
    }
}

pub fn pattern_filename(record: &PatternRecord) -> String {
    format!("{}-{}.json", record.category(), record.id)
}

pub fn selection_filename(at: DateTime<Utc>) -> String {
    format!("selection-{}.json", at.timestamp_millis())
}

pub fn catalog_filename(at: DateTime<Utc>) -> String {
    format!("beatgrid-{}.json", at.timestamp_millis())
}

pub fn export_pattern(record: &PatternRecord) -> serde_json::Result<ExportFile> {
    Ok(ExportFile {
        filename: pattern_filename(record),
        contents: serde_json::to_string_pretty(record)?,
    })
}

pub fn export_selection(
    selection: &SelectionState,
    exported_at: DateTime<Utc>,
) -> serde_json::Result<ExportFile> {
    Ok(ExportFile {
        filename: selection_filename(exported_at),
        contents: serde_json::to_string_pretty(&SelectionExport::new(selection, exported_at))?,
    })
}

pub fn export_catalog(
    catalog: &Catalog,
    tempo: u32,
    exported_at: DateTime<Utc>,
) -> serde_json::Result<ExportFile> {
    Ok(ExportFile {
        filename: catalog_filename(exported_at),
        contents: serde_json::to_string_pretty(&CatalogExport::new(catalog, tempo))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    fn at() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_741_944_413_589).unwrap()
    }

    #[test]
    fn test_filenames() {
        let record = PatternRecord::bass("bass-night-drive", "Night", "", "", "A minor", "Am - F");
        assert_eq!(pattern_filename(&record), "bass-bass-night-drive.json");
        assert_eq!(selection_filename(at()), "selection-1741944413589.json");
        assert_eq!(catalog_filename(at()), "beatgrid-1741944413589.json");
    }

    #[test]
    fn test_export_pattern_is_flat_record() {
        let record = PatternRecord::drum("d1", "Beat", "Raw", "rings", 174, "X-X-");
        let file = export_pattern(&record).unwrap();
        let value: Value = serde_json::from_str(&file.contents).unwrap();

        assert_eq!(value["id"], "d1");
        assert_eq!(value["bpm"], 174);
        assert_eq!(value["pattern"], "X-X-");
    }

    #[test]
    fn test_export_selection_shape() {
        let catalog = Catalog::builtin();
        let mut selection = SelectionState::new(172);
        selection.assign(catalog.list(Category::Lead)[0].clone());

        let file = export_selection(&selection, at()).unwrap();
        let value: Value = serde_json::from_str(&file.contents).unwrap();

        assert_eq!(value["tempo"], 172);
        assert!(value["selected"]["drum"].is_null());
        assert!(value["selected"]["bass"].is_null());
        assert_eq!(value["selected"]["lead"]["id"], catalog.list(Category::Lead)[0].id.as_str());
        assert!(value["exportedAt"].as_str().unwrap().starts_with("2025-03-14T"));
    }

    #[test]
    fn test_export_catalog_shape() {
        let catalog = Catalog::builtin();
        let file = export_catalog(&catalog, 170, at()).unwrap();
        let value: Value = serde_json::from_str(&file.contents).unwrap();

        assert_eq!(value["tempo"], 170);
        let summary = catalog.summary();
        assert_eq!(value["drums"].as_array().unwrap().len(), summary.drums);
        assert_eq!(value["basses"].as_array().unwrap().len(), summary.basses);
        assert_eq!(value["leads"].as_array().unwrap().len(), summary.leads);

        // Parses back into an identical catalog
        let reloaded = Catalog::from_json(
            &value["drums"].to_string(),
            &value["basses"].to_string(),
            &value["leads"].to_string(),
        )
        .unwrap();
        assert_eq!(reloaded.len(), catalog.len());
    }
}
