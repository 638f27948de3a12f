// Studio
// Owned application state: catalog, selection flow, persistence and playback

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;

use crate::analysis::{
    analyze_density_with_bands, categorize, extract_tags, find_compatible_by_bpm,
    find_compatible_by_key, find_compatible_by_mood, prompt_templates, BpmMatch, DensityReport,
    KeyMatch, MoodMatch, MotifCategories, TempoBand,
};
use crate::catalog::{Catalog, Category, PatternRecord};
use crate::config::StudioConfig;
use crate::export::{self, ExportFile, GistPayload, GistReceipt};
use crate::flow::{FlowError, FlowOutcome, FlowState, SelectionFlow};
use crate::notice::Notice;
use crate::sequencer::{AudioEngine, PlaybackController, Transport};
use crate::state::{KeyValueStore, SelectionState, SessionStore};

/// Derived, read-only facts about one pattern
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternInsights {
    pub id: String,
    pub tags: Vec<String>,
    pub categories: MotifCategories,
    pub density: Option<DensityReport>,
    pub tempo_band: Option<TempoBand>,
    pub key_matches: Vec<KeyMatch>,
    pub bpm_matches: Vec<BpmMatch>,
    pub mood_matches: Vec<MoodMatch>,
    pub prompts: Vec<String>,
}

/// The whole pattern-picking session
///
/// Selection changes go through the flow and are persisted as they
/// happen. Every rejected operation leaves exactly one notice.
pub struct Studio<S: KeyValueStore, T: Transport, E: AudioEngine> {
    catalog: Catalog,
    config: StudioConfig,
    flow: SelectionFlow,
    session: SessionStore<S>,
    player: PlaybackController<T, E>,
    notices: Vec<Notice>,
}

impl<S: KeyValueStore, T: Transport, E: AudioEngine> Studio<S, T, E> {
    /// A fresh, empty session
    pub fn new(catalog: Catalog, config: StudioConfig, store: S, transport: T, engine: E) -> Self {
        let session = SessionStore::new(store, config.storage_key.clone());
        Studio {
            flow: SelectionFlow::new(config.default_tempo),
            catalog,
            config,
            session,
            player: PlaybackController::new(transport, engine),
            notices: Vec::new(),
        }
    }

    /// A session resumed from storage when a saved one exists
    pub fn open(catalog: Catalog, config: StudioConfig, store: S, transport: T, engine: E) -> Self {
        let mut studio = Studio::new(catalog, config, store, transport, engine);
        studio.restore();
        studio
    }

    /// Rebuild the selection from the persisted ids; returns whether one was found
    pub fn restore(&mut self) -> bool {
        let Some(saved) = self.session.load() else {
            return false;
        };
        let selection = SelectionState::from_persisted(&saved, &self.catalog);
        log::info!(
            "Restored session from {} ({:?})",
            saved.timestamp.to_rfc3339(),
            selection.selected_ids()
        );
        self.flow = SelectionFlow::restored(selection);
        true
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        self.flow.selection()
    }

    pub fn flow_state(&self) -> &FlowState {
        self.flow.state()
    }

    pub fn player(&self) -> &PlaybackController<T, E> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlaybackController<T, E> {
        &mut self.player
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// Drain pending notices, oldest first
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn persist(&mut self) {
        if !self.session.save(self.flow.selection()) {
            self.notify(Notice::warning("Selection could not be saved"));
        }
    }

    fn apply(&mut self, result: Result<FlowOutcome, FlowError>) -> Option<FlowOutcome> {
        match result {
            Ok(outcome) => {
                if outcome.mutated_selection() {
                    self.persist();
                }
                Some(outcome)
            }
            Err(e) => {
                self.notify(Notice::rejected(&e));
                None
            }
        }
    }

    // Selection flow

    pub fn start_flow(&mut self, category: Category) -> FlowOutcome {
        self.flow.start_flow(category)
    }

    /// Stage the pattern with this id for the current step
    pub fn stage(&mut self, id: &str) -> Option<FlowOutcome> {
        let Some(record) = self.catalog.find(id) else {
            self.notify(Notice::warning(format!("Unknown pattern '{}'", id)));
            return None;
        };
        let result = self.flow.stage_candidate(record);
        self.apply(result)
    }

    pub fn confirm(&mut self) -> Option<FlowOutcome> {
        let result = self.flow.confirm_step();
        self.apply(result)
    }

    pub fn back(&mut self) -> Option<FlowOutcome> {
        let result = self.flow.go_back();
        self.apply(result)
    }

    pub fn edit_slot(&mut self, category: Category) -> Option<FlowOutcome> {
        let result = self.flow.start_single_slot_edit(category);
        self.apply(result)
    }

    /// Change the session tempo; a running transport follows in place
    pub fn set_tempo(&mut self, bpm: u32) -> Option<FlowOutcome> {
        let result = self.flow.set_tempo(bpm);
        let outcome = self.apply(result)?;
        if let Err(e) = self.player.set_tempo(bpm) {
            log::warn!("Transport rejected tempo {}: {}", bpm, e);
        }
        Some(outcome)
    }

    /// Pick one random pattern per category
    pub fn seed_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> FlowOutcome {
        let outcome = self.flow.seed_random(&self.catalog, rng);
        self.persist();
        self.notify(Notice::info("Random triplet selected"));
        outcome
    }

    /// Empty every slot, restore the default tempo and forget the saved session
    pub fn reset(&mut self) -> FlowOutcome {
        self.player.stop();
        let outcome = self.flow.reset(self.config.default_tempo);
        if let Err(e) = self.player.set_tempo(self.config.default_tempo) {
            log::warn!("Transport rejected default tempo: {}", e);
        }
        if !self.session.clear() {
            self.notify(Notice::warning("Saved selection could not be cleared"));
        }
        outcome
    }

    // Playback

    /// Play the current selection; returns whether playback started
    pub fn play(&mut self) -> bool {
        let selection = self.flow.selection().clone();
        match self.player.start(&selection) {
            Ok(_) => true,
            Err(e) => {
                self.notify(Notice::rejected(&e));
                false
            }
        }
    }

    pub fn stop(&mut self) {
        self.player.stop();
    }

    /// Advance playback by wall-clock seconds; returns triggers fired
    pub fn tick(&mut self, seconds: f64) -> usize {
        self.player.tick(seconds)
    }

    // Analysis

    /// Tags, density and suggestions for one pattern
    pub fn insights(&self, id: &str) -> Option<PatternInsights> {
        let record = self.catalog.find(id)?;
        let others: Vec<Arc<PatternRecord>> =
            self.catalog.iter().filter(|r| r.id != record.id).cloned().collect();

        let tags = extract_tags(&record.mood);
        let categories = categorize(tags.as_slice());

        Some(PatternInsights {
            id: record.id.clone(),
            density: record
                .pattern()
                .map(|p| analyze_density_with_bands(p, &self.config.density_bands)),
            tempo_band: record
                .bpm()
                .map(|bpm| TempoBand::classify(bpm, &self.config.tempo_bands)),
            key_matches: record
                .key()
                .map(|key| find_compatible_by_key(key, &others))
                .unwrap_or_default(),
            bpm_matches: record
                .bpm()
                .map(|bpm| find_compatible_by_bpm(bpm, &others, self.config.bpm_tolerance))
                .unwrap_or_default(),
            mood_matches: find_compatible_by_mood(&record.mood, &others),
            prompts: prompt_templates(&record),
            tags,
            categories,
        })
    }

    // Export

    pub fn pattern_markdown(&mut self, id: &str) -> Option<String> {
        match self.catalog.find(id) {
            Some(record) => Some(export::format_pattern(&record, &self.config)),
            None => {
                self.notify(Notice::warning(format!("Unknown pattern '{}'", id)));
                None
            }
        }
    }

    pub fn selection_markdown(&self) -> String {
        export::format_selection(self.flow.selection(), &self.config, Utc::now())
    }

    pub fn catalog_markdown(&self) -> String {
        export::format_catalog(&self.catalog, &self.config, Utc::now())
    }

    fn exported(&mut self, result: serde_json::Result<ExportFile>) -> Option<ExportFile> {
        match result {
            Ok(file) => Some(file),
            Err(e) => {
                log::warn!("Export failed: {}", e);
                self.notify(Notice::error(format!("Export failed: {}", e)));
                None
            }
        }
    }

    pub fn pattern_json(&mut self, id: &str) -> Option<ExportFile> {
        let Some(record) = self.catalog.find(id) else {
            self.notify(Notice::warning(format!("Unknown pattern '{}'", id)));
            return None;
        };
        let result = export::export_pattern(&record);
        self.exported(result)
    }

    pub fn selection_json(&mut self) -> Option<ExportFile> {
        let result = export::export_selection(self.flow.selection(), Utc::now());
        self.exported(result)
    }

    pub fn catalog_json(&mut self) -> Option<ExportFile> {
        let result = export::export_catalog(&self.catalog, self.flow.selection().tempo(), Utc::now());
        self.exported(result)
    }

    /// Request body for uploading the catalog as a private gist
    pub fn gist_payload(&mut self) -> Option<GistPayload> {
        match GistPayload::for_catalog(&self.catalog) {
            Ok(payload) => Some(payload),
            Err(e) => {
                log::warn!("Gist payload failed: {}", e);
                self.notify(Notice::error(e.to_string()));
                None
            }
        }
    }

    /// Read the host's gist upload response; the outcome is reported as a notice
    pub fn gist_saved(&mut self, body: &str) -> Option<GistReceipt> {
        match GistReceipt::from_response(body) {
            Ok(receipt) => {
                log::info!("Catalog published to {}", receipt.html_url);
                self.notify(Notice::info(format!("Gist saved: {}", receipt.html_url)));
                Some(receipt)
            }
            Err(e) => {
                log::warn!("Gist publish failed: {}", e);
                self.notify(Notice::error(e.to_string()));
                None
            }
        }
    }
}
