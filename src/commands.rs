// Tauri IPC Commands
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use tauri::State;

use crate::catalog::{icon_svg, Category};
use crate::export::json::CatalogExport;
use crate::export::{ExportFile, GistPayload, GistReceipt};
use crate::flow::{FlowOutcome, FlowState};
use crate::notice::Notice;
use crate::sequencer::{TransportClock, TriggerEvent, TriggerQueue};
use crate::state::{SelectionState, SqliteStore};
use crate::studio::{PatternInsights, Studio};

#[derive(Debug, Serialize)]
pub struct CommandError {
    message: String,
}

impl<E: std::fmt::Display> From<E> for CommandError {
    fn from(error: E) -> Self {
        CommandError {
            message: error.to_string(),
        }
    }
}

type CommandResult<T> = Result<T, CommandError>;

pub type DesktopStudio = Studio<SqliteStore, TransportClock, TriggerQueue>;

/// The studio shared by every command
pub struct StudioState(pub Mutex<DesktopStudio>);

impl StudioState {
    pub fn new(studio: DesktopStudio) -> Self {
        StudioState(Mutex::new(studio))
    }

    fn lock(&self) -> MutexGuard<'_, DesktopStudio> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Everything the UI needs to redraw after a command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioView {
    pub selection: SelectionState,
    pub flow: FlowState,
    pub outcome: Option<FlowOutcome>,
    pub playing: bool,
    pub notices: Vec<Notice>,
}

fn view(studio: &mut DesktopStudio, outcome: Option<FlowOutcome>) -> StudioView {
    StudioView {
        selection: studio.selection().clone(),
        flow: studio.flow_state().clone(),
        outcome,
        playing: studio.is_playing(),
        notices: studio.take_notices(),
    }
}

fn parse_category(category: &str) -> CommandResult<Category> {
    Category::from_string(category).ok_or_else(|| CommandError {
        message: format!("Unknown category: {}", category),
    })
}

// ==================== CATALOG COMMANDS ====================

#[tauri::command]
pub fn get_catalog(studio: State<'_, StudioState>) -> CommandResult<CatalogExport> {
    let studio = studio.lock();
    Ok(CatalogExport::new(studio.catalog(), studio.selection().tempo()))
}

#[tauri::command]
pub fn get_icon(key: String) -> Option<String> {
    icon_svg(&key).map(str::to_string)
}

#[tauri::command]
pub fn get_insights(studio: State<'_, StudioState>, id: String) -> CommandResult<PatternInsights> {
    studio.lock().insights(&id).ok_or_else(|| CommandError {
        message: format!("Unknown pattern: {}", id),
    })
}

// ==================== SELECTION COMMANDS ====================

#[tauri::command]
pub fn get_state(studio: State<'_, StudioState>) -> CommandResult<StudioView> {
    Ok(view(&mut studio.lock(), None))
}

#[tauri::command]
pub fn start_flow(studio: State<'_, StudioState>, category: String) -> CommandResult<StudioView> {
    let category = parse_category(&category)?;
    let mut studio = studio.lock();
    let outcome = studio.start_flow(category);
    Ok(view(&mut studio, Some(outcome)))
}

#[tauri::command]
pub fn stage_pattern(studio: State<'_, StudioState>, id: String) -> CommandResult<StudioView> {
    let mut studio = studio.lock();
    let outcome = studio.stage(&id);
    Ok(view(&mut studio, outcome))
}

#[tauri::command]
pub fn confirm_step(studio: State<'_, StudioState>) -> CommandResult<StudioView> {
    let mut studio = studio.lock();
    let outcome = studio.confirm();
    Ok(view(&mut studio, outcome))
}

#[tauri::command]
pub fn go_back(studio: State<'_, StudioState>) -> CommandResult<StudioView> {
    let mut studio = studio.lock();
    let outcome = studio.back();
    Ok(view(&mut studio, outcome))
}

#[tauri::command]
pub fn edit_slot(studio: State<'_, StudioState>, category: String) -> CommandResult<StudioView> {
    let category = parse_category(&category)?;
    let mut studio = studio.lock();
    let outcome = studio.edit_slot(category);
    Ok(view(&mut studio, outcome))
}

#[tauri::command]
pub fn set_tempo(studio: State<'_, StudioState>, bpm: u32) -> CommandResult<StudioView> {
    let mut studio = studio.lock();
    let outcome = studio.set_tempo(bpm);
    Ok(view(&mut studio, outcome))
}

#[tauri::command]
pub fn seed_random(studio: State<'_, StudioState>) -> CommandResult<StudioView> {
    let mut studio = studio.lock();
    let outcome = studio.seed_random(&mut rand::thread_rng());
    Ok(view(&mut studio, Some(outcome)))
}

#[tauri::command]
pub fn reset_session(studio: State<'_, StudioState>) -> CommandResult<StudioView> {
    let mut studio = studio.lock();
    let outcome = studio.reset();
    Ok(view(&mut studio, Some(outcome)))
}

// ==================== PLAYBACK COMMANDS ====================

#[tauri::command]
pub fn play(studio: State<'_, StudioState>) -> CommandResult<StudioView> {
    let mut studio = studio.lock();
    studio.play();
    Ok(view(&mut studio, None))
}

#[tauri::command]
pub fn stop(studio: State<'_, StudioState>) -> CommandResult<StudioView> {
    let mut studio = studio.lock();
    studio.stop();
    Ok(view(&mut studio, None))
}

/// Advance the transport and hand back the triggers that came due
#[tauri::command]
pub fn tick(studio: State<'_, StudioState>, seconds: f64) -> CommandResult<Vec<TriggerEvent>> {
    let mut studio = studio.lock();
    studio.tick(seconds);
    Ok(studio.player_mut().engine_mut().drain())
}

// ==================== EXPORT COMMANDS ====================

fn exported<T>(studio: &mut DesktopStudio, value: Option<T>) -> CommandResult<T> {
    value.ok_or_else(|| {
        let message = studio
            .take_notices()
            .into_iter()
            .map(|n| n.message)
            .collect::<Vec<_>>()
            .join("; ");
        CommandError { message }
    })
}

#[tauri::command]
pub fn export_pattern_markdown(studio: State<'_, StudioState>, id: String) -> CommandResult<String> {
    let mut studio = studio.lock();
    studio.pattern_markdown(&id).ok_or_else(|| CommandError {
        message: format!("Unknown pattern: {}", id),
    })
}

#[tauri::command]
pub fn export_selection_markdown(studio: State<'_, StudioState>) -> CommandResult<String> {
    Ok(studio.lock().selection_markdown())
}

#[tauri::command]
pub fn export_catalog_markdown(studio: State<'_, StudioState>) -> CommandResult<String> {
    Ok(studio.lock().catalog_markdown())
}

#[tauri::command]
pub fn export_pattern_json(studio: State<'_, StudioState>, id: String) -> CommandResult<ExportFile> {
    let mut studio = studio.lock();
    let file = studio.pattern_json(&id);
    exported(&mut studio, file)
}

#[tauri::command]
pub fn export_selection_json(studio: State<'_, StudioState>) -> CommandResult<ExportFile> {
    let mut studio = studio.lock();
    let file = studio.selection_json();
    exported(&mut studio, file)
}

#[tauri::command]
pub fn export_catalog_json(studio: State<'_, StudioState>) -> CommandResult<ExportFile> {
    let mut studio = studio.lock();
    let file = studio.catalog_json();
    exported(&mut studio, file)
}

// ==================== GIST COMMANDS ====================

/// Request body for the webview to POST to the gist API
#[tauri::command]
pub fn gist_payload(studio: State<'_, StudioState>) -> CommandResult<GistPayload> {
    let mut studio = studio.lock();
    let payload = studio.gist_payload();
    exported(&mut studio, payload)
}

/// Read the gist URL out of the API response the webview received
#[tauri::command]
pub fn gist_receipt(studio: State<'_, StudioState>, body: String) -> CommandResult<GistReceipt> {
    let mut studio = studio.lock();
    let receipt = studio.gist_saved(&body);
    exported(&mut studio, receipt)
}
