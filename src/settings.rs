use std::path::PathBuf;

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::placement::DEFAULT_NUDGE_STEP;
use crate::print::PageSetup;
use crate::stroke::Pen;

/// Storage key for the persisted settings
pub const SETTINGS_KEY: &str = "printer_app_settings";

/// User-tunable settings, persisted between runs through eframe storage.
/// The drawing itself is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    pub pen: Pen,
    pub nudge_step: f32,
    pub initial_offset: Pos2,
    pub page: PageSetup,
    /// Spooler invoked with the rendered page's path as its only argument
    pub print_command: String,
    pub export_path: PathBuf,
    /// Open the print preview right after clearing the drawing
    pub preview_on_clear: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pen: Pen::default(),
            nudge_step: DEFAULT_NUDGE_STEP,
            initial_offset: Pos2::new(100.0, 100.0),
            page: PageSetup::default(),
            print_command: "lp".to_owned(),
            export_path: PathBuf::from("printout.png"),
            preview_on_clear: true,
        }
    }
}

impl Settings {
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value::<Self>(storage, SETTINGS_KEY))
            .unwrap_or_default()
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "nudge_step": 25.0 }"#).unwrap();
        assert_eq!(settings.nudge_step, 25.0);
        assert_eq!(settings.print_command, "lp");
        assert!(settings.preview_on_clear);
        assert_eq!(settings.page, PageSetup::default());
    }

    #[test]
    fn test_round_trip() {
        let settings = Settings {
            print_command: "lpr".to_owned(),
            preview_on_clear: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let restored: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_load_without_storage_is_default() {
        assert_eq!(Settings::load(None), Settings::default());
    }
}
