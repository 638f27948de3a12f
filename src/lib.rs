// BeatGrid - Pattern picker and preview sequencer
// Module declarations

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod export;
pub mod flow;
pub mod notice;
pub mod sequencer;
pub mod state;
pub mod studio;

#[cfg(feature = "desktop")]
mod commands;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let config = config::load_config(&state::get_config_path()?);

            let db = state::init_db(&state::get_db_path()?).map_err(|e| {
                log::error!("Failed to initialize database: {}", e);
                e
            })?;

            let studio = studio::Studio::open(
                catalog::Catalog::builtin(),
                config.clone(),
                state::SqliteStore::new(db),
                sequencer::TransportClock::new(config.default_tempo),
                sequencer::TriggerQueue::new(),
            );
            app.manage(commands::StudioState::new(studio));

            log::info!("BeatGrid initialized successfully");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_catalog,
            commands::get_icon,
            commands::get_insights,
            commands::get_state,
            commands::start_flow,
            commands::stage_pattern,
            commands::confirm_step,
            commands::go_back,
            commands::edit_slot,
            commands::set_tempo,
            commands::seed_random,
            commands::reset_session,
            commands::play,
            commands::stop,
            commands::tick,
            commands::export_pattern_markdown,
            commands::export_selection_markdown,
            commands::export_catalog_markdown,
            commands::export_pattern_json,
            commands::export_selection_json,
            commands::export_catalog_json,
            commands::gist_payload,
            commands::gist_receipt,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
