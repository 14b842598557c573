//! Preset load/save handlers
//!
//! Dialogs open in the last preset directory (engine first, then config,
//! then the documents/home directory). Failures are shown in the error
//! overlay; a successful load or save remembers the directory in both the
//! engine and the config file.

use std::path::{Path, PathBuf};

use iced::Task;

use polar_core::preset::PRESET_EXTENSION;
use polar_widgets::PresetOperation;

use crate::config;
use crate::ui::app::DesignerApp;
use crate::ui::message::Message;

const FILTER_NAME: &str = "Polar preset";
const DEFAULT_FILE_NAME: &str = "preset.json";

/// Open the native load dialog
pub fn open_load_dialog(app: &mut DesignerApp) -> Task<Message> {
    if !app.side_area_enabled() {
        return Task::none();
    }
    let directory = app.preset_dir();
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title("Load preset")
                .add_filter(FILTER_NAME, &[PRESET_EXTENSION])
                .set_directory(&directory)
                .pick_file()
                .await
                .map(|f| f.path().to_path_buf())
        },
        Message::PresetLoadPicked,
    )
}

/// Open the native save dialog
pub fn open_save_dialog(app: &mut DesignerApp) -> Task<Message> {
    if !app.side_area_enabled() {
        return Task::none();
    }
    let directory = app.preset_dir();
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .set_title("Save preset")
                .add_filter(FILTER_NAME, &[PRESET_EXTENSION])
                .set_directory(&directory)
                .set_file_name(DEFAULT_FILE_NAME)
                .save_file()
                .await
                .map(|f| f.path().to_path_buf())
        },
        Message::PresetSavePicked,
    )
}

pub fn load_picked(app: &mut DesignerApp, path: Option<PathBuf>) -> Task<Message> {
    let Some(path) = path else {
        log::debug!("Preset load cancelled");
        return Task::none();
    };

    match app.engine.load_preset(&path) {
        Ok(()) => {
            // The poller re-reads bands on the next tick; the choice
            // buttons are updated right away
            app.eq_mode = app.engine.equalization_mode();
            app.read_global_controls();
            app.status = format!("loaded {}", display_name(&path));
            remember_dir(app, &path);
        }
        Err(e) => failed(app, PresetOperation::Load, e.to_string()),
    }
    Task::none()
}

pub fn save_picked(app: &mut DesignerApp, path: Option<PathBuf>) -> Task<Message> {
    let Some(mut path) = path else {
        log::debug!("Preset save cancelled");
        return Task::none();
    };
    if path.extension().is_none() {
        path.set_extension(PRESET_EXTENSION);
    }

    match app.engine.save_preset(&path) {
        Ok(()) => {
            app.status = format!("saved {}", display_name(&path));
            remember_dir(app, &path);
        }
        Err(e) => failed(app, PresetOperation::Save, e.to_string()),
    }
    Task::none()
}

fn failed(app: &mut DesignerApp, operation: PresetOperation, message: String) {
    if let Err(e) = app
        .tracking
        .load_or_save_failed(operation, message, &mut app.bands)
    {
        log::warn!("Preset error not shown: {}", e);
    }
}

fn remember_dir(app: &mut DesignerApp, path: &Path) {
    let Some(dir) = path.parent() else {
        return;
    };
    app.engine.set_last_preset_dir(dir.to_path_buf());

    if app.config.last_preset_dir.as_deref() != Some(dir) {
        app.config.last_preset_dir = Some(dir.to_path_buf());
        if let Err(e) = config::save_config(&app.config, &app.config_path) {
            log::warn!("Failed to save config: {:#}", e);
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
