//! Preferences dialog
//!
//! Edits the list of chess engines (name and executable path). Changes apply
//! to [`EnginePreferences`] immediately but are only written to disk when
//! the user presses Save. Removing an engine asks for confirmation first.

use super::styles::UiColors;
use crate::core::settings_persistence::save_preferences;
use crate::core::{EngineDefinition, EnginePreferences, SettingsPath};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::path::Path;

/// Feedback line at the bottom of the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMessage {
    Info(String),
    Error(String),
}

/// Text fields of the add/edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineDraft {
    pub name: String,
    pub filepath: String,
}

impl EngineDraft {
    fn to_definition(&self) -> EngineDefinition {
        EngineDefinition::new(self.name.trim(), self.filepath.trim())
    }
}

/// State of the preferences dialog
#[derive(Resource, Debug, Default)]
pub struct PreferencesDialog {
    pub open: bool,
    pub draft: EngineDraft,
    /// Engine being edited in place, by its current name
    pub editing: Option<String>,
    /// Engine waiting for the user to confirm its removal
    pub pending_removal: Option<String>,
    pub message: Option<DialogMessage>,
}

impl PreferencesDialog {
    pub fn open(&mut self) {
        self.open = true;
        self.message = None;
    }

    /// Load an engine into the form for editing
    pub fn start_edit(&mut self, engine: &EngineDefinition) {
        self.draft = EngineDraft {
            name: engine.name.clone(),
            filepath: engine.filepath.clone(),
        };
        self.editing = Some(engine.name.clone());
        self.message = None;
    }

    pub fn cancel_edit(&mut self) {
        self.draft = EngineDraft::default();
        self.editing = None;
    }

    /// Add the drafted engine, or replace the one being edited
    pub fn submit(&mut self, preferences: &mut EnginePreferences) -> bool {
        let engine = self.draft.to_definition();
        let name = engine.name.clone();
        let result = match self.editing.as_deref() {
            Some(current) => preferences.replace(current, engine),
            None => preferences.add(engine),
        };

        match result {
            Ok(()) => {
                let verb = if self.editing.is_some() { "Updated" } else { "Added" };
                info!("[PREFERENCES] {} engine `{}`", verb, name);
                self.message = Some(DialogMessage::Info(format!("{} `{}`", verb, name)));
                self.cancel_edit();
                true
            }
            Err(e) => {
                self.message = Some(DialogMessage::Error(e.to_string()));
                false
            }
        }
    }

    pub fn request_removal(&mut self, name: &str) {
        self.pending_removal = Some(name.to_string());
    }

    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    /// Remove the engine awaiting confirmation
    pub fn confirm_removal(&mut self, preferences: &mut EnginePreferences) -> Option<EngineDefinition> {
        let name = self.pending_removal.take()?;
        let removed = preferences.remove(&name);
        if removed.is_some() {
            info!("[PREFERENCES] Removed engine `{}`", name);
            self.message = Some(DialogMessage::Info(format!("Removed `{}`", name)));
            if self.editing.as_deref() == Some(name.as_str()) {
                self.cancel_edit();
            }
        }
        removed
    }

    /// Write the preferences to `path`
    pub fn save(&mut self, path: &Path, preferences: &EnginePreferences) -> bool {
        match save_preferences(path, preferences) {
            Ok(()) => {
                info!("[PREFERENCES] Saved {} engine(s) to {}", preferences.len(), path.display());
                self.message = Some(DialogMessage::Info("Saved".to_string()));
                true
            }
            Err(e) => {
                error!("[PREFERENCES] Failed to save {}: {}", path.display(), e);
                self.message = Some(DialogMessage::Error(format!("Save failed: {}", e)));
                false
            }
        }
    }
}

#[derive(SystemParam)]
pub struct PreferencesUiParams<'w, 's> {
    pub contexts: EguiContexts<'w, 's>,
    pub dialog: ResMut<'w, PreferencesDialog>,
    pub preferences: ResMut<'w, EnginePreferences>,
    pub settings_path: Res<'w, SettingsPath>,
}

pub fn preferences_dialog_ui(mut params: PreferencesUiParams) {
    if !params.dialog.open {
        return;
    }
    let Ok(ctx) = params.contexts.ctx_mut() else {
        return;
    };

    let dialog = &mut params.dialog;
    let preferences = &mut params.preferences;
    let path = &params.settings_path.0;

    let mut open = true;
    egui::Window::new("Preferences")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(480.0)
        .show(ctx, |ui| {
            ui.heading("Engines");
            engine_list(ui, dialog, preferences);
            ui.separator();
            engine_form(ui, dialog, preferences);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    dialog.save(path, preferences);
                }
                if ui.button("Close").clicked() {
                    dialog.open = false;
                }
            });

            match &dialog.message {
                Some(DialogMessage::Info(text)) => {
                    ui.colored_label(UiColors::SUCCESS, text.as_str());
                }
                Some(DialogMessage::Error(text)) => {
                    ui.colored_label(UiColors::DANGER, text.as_str());
                }
                None => {}
            }
        });

    if !open {
        dialog.open = false;
        dialog.cancel_removal();
    }
}

fn engine_list(ui: &mut egui::Ui, dialog: &mut PreferencesDialog, preferences: &mut ResMut<EnginePreferences>) {
    if preferences.is_empty() {
        ui.colored_label(UiColors::TEXT_TERTIARY, "No engines configured");
        return;
    }

    egui::Grid::new("engine_list")
        .num_columns(4)
        .striped(true)
        .show(ui, |ui| {
            for engine in preferences.engines() {
                ui.label(engine.name.as_str());
                ui.colored_label(UiColors::TEXT_SECONDARY, engine.filepath.as_str());
                if ui.small_button("Edit").clicked() {
                    dialog.start_edit(engine);
                }
                if ui.small_button("Remove").clicked() {
                    dialog.request_removal(&engine.name);
                }
                ui.end_row();
            }
        });

    let Some(name) = dialog.pending_removal.clone() else {
        return;
    };
    ui.horizontal(|ui| {
        ui.colored_label(UiColors::WARNING, format!("Remove `{}`?", name));
        if ui.button("Remove").clicked() {
            dialog.confirm_removal(preferences);
        }
        if ui.button("Cancel").clicked() {
            dialog.cancel_removal();
        }
    });
}

fn engine_form(ui: &mut egui::Ui, dialog: &mut PreferencesDialog, preferences: &mut ResMut<EnginePreferences>) {
    let title = match &dialog.editing {
        Some(name) => format!("Edit `{}`", name),
        None => "Add engine".to_string(),
    };
    ui.label(title);

    egui::Grid::new("engine_form").num_columns(2).show(ui, |ui| {
        ui.label("Name");
        ui.text_edit_singleline(&mut dialog.draft.name);
        ui.end_row();
        ui.label("Path");
        ui.text_edit_singleline(&mut dialog.draft.filepath);
        ui.end_row();
    });

    ui.horizontal(|ui| {
        let label = if dialog.editing.is_some() { "Apply" } else { "Add" };
        if ui.button(label).clicked() {
            dialog.submit(preferences);
        }
        if dialog.editing.is_some() && ui.button("Cancel").clicked() {
            dialog.cancel_edit();
        }
    });
}
