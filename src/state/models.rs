// Data models for session state
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{Catalog, Category, PatternRecord};

/// The three-slot composition plus tempo
///
/// Each slot holds at most one record of its own category. Slots are
/// assigned through the selection flow only; everything else reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    drum: Option<Arc<PatternRecord>>,
    bass: Option<Arc<PatternRecord>>,
    lead: Option<Arc<PatternRecord>>,
    tempo: u32,
}

impl SelectionState {
    /// An empty selection at the given tempo
    pub fn new(tempo: u32) -> Self {
        SelectionState {
            drum: None,
            bass: None,
            lead: None,
            tempo,
        }
    }

    pub fn slot(&self, category: Category) -> Option<&Arc<PatternRecord>> {
        match category {
            Category::Drum => self.drum.as_ref(),
            Category::Bass => self.bass.as_ref(),
            Category::Lead => self.lead.as_ref(),
        }
    }

    pub fn drum(&self) -> Option<&Arc<PatternRecord>> {
        self.drum.as_ref()
    }

    pub fn bass(&self) -> Option<&Arc<PatternRecord>> {
        self.bass.as_ref()
    }

    pub fn lead(&self) -> Option<&Arc<PatternRecord>> {
        self.lead.as_ref()
    }

    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// No slot populated
    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|&c| self.slot(c).is_none())
    }

    /// Every slot populated
    pub fn is_complete(&self) -> bool {
        Category::ALL.iter().all(|&c| self.slot(c).is_some())
    }

    pub fn selected_ids(&self) -> SelectedIds {
        SelectedIds {
            drum: self.drum.as_ref().map(|r| r.id.clone()),
            bass: self.bass.as_ref().map(|r| r.id.clone()),
            lead: self.lead.as_ref().map(|r| r.id.clone()),
        }
    }

    /// Put a record into the slot matching its category
    pub(crate) fn assign(&mut self, record: Arc<PatternRecord>) {
        match record.category() {
            Category::Drum => self.drum = Some(record),
            Category::Bass => self.bass = Some(record),
            Category::Lead => self.lead = Some(record),
        }
    }

    pub(crate) fn set_tempo(&mut self, tempo: u32) {
        self.tempo = tempo;
    }

    /// Empty all slots and restore the given tempo
    pub(crate) fn reset(&mut self, tempo: u32) {
        *self = SelectionState::new(tempo);
    }

    /// Rebuild a selection from persisted ids
    ///
    /// Ids are resolved against the live catalog within their own
    /// category; ids that no longer exist leave the slot empty.
    pub fn from_persisted(session: &PersistedSession, catalog: &Catalog) -> Self {
        let mut selection = SelectionState::new(session.tempo);
        for category in Category::ALL {
            let Some(id) = session.selected_ids.get(category) else {
                continue;
            };
            match catalog.get(category, id) {
                Some(record) => selection.assign(record),
                None => log::info!("Dropping stale {} selection '{}'", category, id),
            }
        }
        selection
    }
}

/// Slot contents by id reference only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedIds {
    pub drum: Option<String>,
    pub bass: Option<String>,
    pub lead: Option<String>,
}

impl SelectedIds {
    pub fn get(&self, category: Category) -> Option<&str> {
        match category {
            Category::Drum => self.drum.as_deref(),
            Category::Bass => self.bass.as_deref(),
            Category::Lead => self.lead.as_deref(),
        }
    }
}

/// The stored session document
///
/// Serialized as `{tempo, selectedIds: {drum, bass, lead}, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub tempo: u32,
    pub selected_ids: SelectedIds,
    pub timestamp: DateTime<Utc>,
}

impl PersistedSession {
    /// Snapshot a selection for storage
    pub fn capture(selection: &SelectionState) -> Self {
        PersistedSession {
            tempo: selection.tempo(),
            selected_ids: selection.selected_ids(),
            timestamp: Utc::now(),
        }
    }
}
