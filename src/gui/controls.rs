// Control rows: each owns the state of one hardware setting

use crate::gui::components::row_header;
use crate::hardware::{AttributeBackend, Catalog, HardwareAttributeStore, read_kbd_max_brightness};
use crate::models::{AttributeSpec, PERMISSION_HINT, WriteResult};
use eframe::egui;
use tracing::{info, warn};

/// Threshold shown before the current value has been read
const DEFAULT_THRESHOLD: i64 = 80;

/// Inline message under a control after a write.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum WriteFeedback {
    #[default]
    Clear,
    /// The last write was refused for lack of privileges
    PermissionDenied,
}

impl WriteFeedback {
    /// Only permission failures are surfaced; anything else clears the message.
    fn after(result: &WriteResult) -> Self {
        match result {
            WriteResult::PermissionDenied => WriteFeedback::PermissionDenied,
            _ => WriteFeedback::Clear,
        }
    }

    fn show(&self, ui: &mut egui::Ui) {
        if *self == WriteFeedback::PermissionDenied {
            ui.colored_label(egui::Color32::from_rgb(239, 68, 68), PERMISSION_HINT);
        }
    }
}

/// On/off switch backed by a "1"/"0" attribute.
#[derive(Debug)]
pub struct SwitchControl {
    spec: AttributeSpec,
    title: &'static str,
    subtitle: &'static str,
    pub active: bool,
    pub feedback: WriteFeedback,
}

impl SwitchControl {
    pub fn new<B: AttributeBackend>(
        store: &HardwareAttributeStore<B>,
        spec: &AttributeSpec,
        title: &'static str,
        subtitle: &'static str,
    ) -> Self {
        let active = store.read(spec).value() == Some("1");
        Self {
            spec: spec.clone(),
            title,
            subtitle,
            active,
            feedback: WriteFeedback::Clear,
        }
    }

    /// Writes the new state; the switch stays at its previous position if the
    /// write does not go through.
    pub fn set_active<B: AttributeBackend>(&mut self, store: &HardwareAttributeStore<B>, active: bool) -> WriteResult {
        let result = store.write(&self.spec, if active { "1" } else { "0" });
        if result.is_ok() {
            self.active = active;
        }
        self.feedback = WriteFeedback::after(&result);
        result
    }

    pub fn show<B: AttributeBackend>(&mut self, ui: &mut egui::Ui, store: &HardwareAttributeStore<B>) {
        ui.horizontal(|ui| {
            row_header(ui, self.title, self.subtitle);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut active = self.active;
                if ui.checkbox(&mut active, "").changed() {
                    self.set_active(store, active);
                }
            });
        });
        self.feedback.show(ui);
    }
}

/// Keyboard backlight slider with external-change detection.
///
/// `last_known` is the level most recently confirmed by the hardware. A poll
/// that reads something else (e.g. after Fn+F9) moves the slider; a rejected
/// write moves it back.
#[derive(Debug)]
pub struct BacklightControl {
    spec: AttributeSpec,
    pub max: i64,
    pub level: i64,
    pub last_known: i64,
    pub feedback: WriteFeedback,
}

impl BacklightControl {
    pub fn new<B: AttributeBackend>(store: &HardwareAttributeStore<B>, catalog: &Catalog) -> Self {
        let max = read_kbd_max_brightness(store, catalog);
        let spec = &catalog.kbd_backlight_brightness;
        let level = store
            .read_bounded(spec, 0, max)
            .parsed::<i64>(spec.name)
            .ok()
            .flatten()
            .unwrap_or(0);

        Self {
            spec: spec.clone(),
            max,
            level,
            last_known: level,
            feedback: WriteFeedback::Clear,
        }
    }

    /// Follows the hardware if it changed behind our back.
    /// Returns true when the slider moved.
    pub fn poll<B: AttributeBackend>(&mut self, store: &HardwareAttributeStore<B>) -> bool {
        match store.read_bounded(&self.spec, 0, self.max).parsed::<i64>(self.spec.name) {
            Ok(Some(current)) if current != self.last_known => {
                info!(level = current, "keyboard backlight changed externally");
                self.last_known = current;
                self.level = current;
                true
            }
            _ => false,
        }
    }

    pub fn apply<B: AttributeBackend>(&mut self, store: &HardwareAttributeStore<B>, level: i64) -> WriteResult {
        let result = store.write(&self.spec, &level.to_string());
        if result.is_ok() {
            self.last_known = level;
            self.level = level;
        } else {
            self.level = self.last_known;
        }
        self.feedback = WriteFeedback::after(&result);
        result
    }

    pub fn show<B: AttributeBackend>(&mut self, ui: &mut egui::Ui, store: &HardwareAttributeStore<B>) {
        row_header(
            ui,
            "Keyboard Backlight",
            "Adjust keyboard backlight brightness (can also use Fn+F9)",
        );
        let mut level = self.level;
        if ui.add(egui::Slider::new(&mut level, 0..=self.max)).changed() {
            self.apply(store, level);
        }
        self.feedback.show(ui);
    }
}

/// Battery charge end threshold, 0 to 100 (0 disables it).
#[derive(Debug)]
pub struct ThresholdControl {
    spec: AttributeSpec,
    pub value: i64,
    /// False when the driver does not expose the threshold; the row is hidden
    pub present: bool,
    pub feedback: WriteFeedback,
}

impl ThresholdControl {
    pub fn new<B: AttributeBackend>(store: &HardwareAttributeStore<B>, catalog: &Catalog) -> Self {
        let spec = catalog.charge_control_end_threshold.clone();
        let present = store.exists(&spec);
        let mut value = DEFAULT_THRESHOLD;

        if !present {
            warn!(attribute = spec.name, "skipping control, attribute does not exist");
        } else {
            match store.read_bounded(&spec, 0, 100).parsed::<i64>(spec.name) {
                Ok(Some(v)) => value = v,
                Ok(None) => {}
                Err(err) => warn!(error = %err, "invalid battery threshold"),
            }
        }

        Self {
            spec,
            value,
            present,
            feedback: WriteFeedback::Clear,
        }
    }

    /// Writes the threshold; the field keeps its previous value if the write
    /// does not go through.
    pub fn apply<B: AttributeBackend>(&mut self, store: &HardwareAttributeStore<B>, value: i64) -> WriteResult {
        let result = store.write(&self.spec, &value.to_string());
        if result.is_ok() {
            self.value = value;
        }
        self.feedback = WriteFeedback::after(&result);
        result
    }

    pub fn show<B: AttributeBackend>(&mut self, ui: &mut egui::Ui, store: &HardwareAttributeStore<B>) {
        if !self.present {
            return;
        }
        row_header(ui, "Battery Threshold", "Set battery charge threshold (0 = disabled)");
        let mut value = self.value;
        if ui.add(egui::DragValue::new(&mut value).range(0..=100).suffix("%")).changed() {
            self.apply(store, value);
        }
        self.feedback.show(ui);
    }
}

/// Platform profile dropdown fed by platform_profile_choices.
#[derive(Debug)]
pub struct ProfileControl {
    spec: AttributeSpec,
    pub choices: Vec<String>,
    pub selected: Option<usize>,
    pub feedback: WriteFeedback,
}

impl ProfileControl {
    pub fn new<B: AttributeBackend>(store: &HardwareAttributeStore<B>, catalog: &Catalog) -> Self {
        let spec = catalog.platform_profile.clone();
        let choices = store.list_choices(&catalog.platform_profile_choices);
        let current = store.read(&spec);
        let selected = current
            .value()
            .and_then(|v| choices.iter().position(|c| c == v));

        Self {
            spec,
            choices,
            selected,
            feedback: WriteFeedback::Clear,
        }
    }

    /// Writes the profile at `index`; out-of-range indexes are ignored.
    pub fn select<B: AttributeBackend>(&mut self, store: &HardwareAttributeStore<B>, index: usize) -> Option<WriteResult> {
        let profile = self.choices.get(index)?;
        let result = store.write(&self.spec, profile);
        if result.is_ok() {
            self.selected = Some(index);
        }
        self.feedback = WriteFeedback::after(&result);
        Some(result)
    }

    pub fn show<B: AttributeBackend>(&mut self, ui: &mut egui::Ui, store: &HardwareAttributeStore<B>) {
        row_header(ui, "Performance Mode", "Select system performance profile");

        if self.choices.is_empty() {
            ui.add_enabled(false, egui::Label::new("Not available"));
            return;
        }

        let mut picked = self.selected;
        let current_text = picked
            .and_then(|i| self.choices.get(i))
            .map(String::as_str)
            .unwrap_or("--");

        egui::ComboBox::new("platform_profile", "")
            .selected_text(current_text)
            .show_ui(ui, |ui| {
                for (i, choice) in self.choices.iter().enumerate() {
                    ui.selectable_value(&mut picked, Some(i), choice.as_str());
                }
            });

        if let Some(index) = picked {
            if picked != self.selected {
                self.select(store, index);
            }
        }
        self.feedback.show(ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(root: &Path, rel: &str) -> String {
        fs::read_to_string(root.join(rel)).unwrap()
    }

    const LED: &str = "sys/class/leds/samsung-galaxybook::kbd_backlight";

    #[test]
    fn backlight_reads_max_and_level() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), &format!("{LED}/max_brightness"), "5\n");
        write(dir.path(), &format!("{LED}/brightness"), "2\n");

        let catalog = Catalog::new(dir.path(), "BAT1");
        let control = BacklightControl::new(&HardwareAttributeStore::new(), &catalog);

        assert_eq!(control.max, 5);
        assert_eq!(control.level, 2);
        assert_eq!(control.last_known, 2);
    }

    #[test]
    fn backlight_defaults_without_driver() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::new(dir.path(), "BAT1");
        let control = BacklightControl::new(&HardwareAttributeStore::new(), &catalog);

        assert_eq!(control.max, 3);
        assert_eq!(control.level, 0);
    }

    #[test]
    fn backlight_follows_external_change() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "dev/samsung-galaxybook/kbd_backlight/brightness", "1");

        let catalog = Catalog::new(dir.path(), "BAT1");
        let store = HardwareAttributeStore::new();
        let mut control = BacklightControl::new(&store, &catalog);
        assert_eq!(control.level, 1);
        assert!(!control.poll(&store));

        // Fn+F9
        write(dir.path(), "dev/samsung-galaxybook/kbd_backlight/brightness", "3");
        assert!(control.poll(&store));
        assert_eq!(control.level, 3);
        assert_eq!(control.last_known, 3);
        assert!(!control.poll(&store));
    }

    #[test]
    fn backlight_write_updates_last_known() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), &format!("{LED}/brightness"), "0");

        let catalog = Catalog::new(dir.path(), "BAT1");
        let store = HardwareAttributeStore::new();
        let mut control = BacklightControl::new(&store, &catalog);

        assert_eq!(control.apply(&store, 2), WriteResult::Ok);
        assert_eq!(control.last_known, 2);
        assert_eq!(read(dir.path(), &format!("{LED}/brightness")), "2");
        assert!(!control.poll(&store));
    }

    #[test]
    fn backlight_failed_write_reverts_slider() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::new(dir.path(), "BAT1");
        let store = HardwareAttributeStore::new();
        let mut control = BacklightControl::new(&store, &catalog);

        assert!(matches!(control.apply(&store, 3), WriteResult::Failed(_)));
        assert_eq!(control.level, 0);
        assert_eq!(control.feedback, WriteFeedback::Clear);
    }

    #[test]
    fn switch_reflects_and_writes_state() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "dev/samsung-galaxybook/usb_charge", "1\n");

        let catalog = Catalog::new(dir.path(), "BAT1");
        let store = HardwareAttributeStore::new();
        let mut control = SwitchControl::new(&store, &catalog.usb_charge, "USB Charging", "");
        assert!(control.active);

        assert_eq!(control.set_active(&store, false), WriteResult::Ok);
        assert!(!control.active);
        assert_eq!(read(dir.path(), "dev/samsung-galaxybook/usb_charge"), "0");
    }

    #[test]
    fn switch_stays_put_when_write_fails() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::new(dir.path(), "BAT1");
        let store = HardwareAttributeStore::new();
        let mut control = SwitchControl::new(&store, &catalog.allow_recording, "Allow Recording", "");
        assert!(!control.active);

        assert!(!control.set_active(&store, true).is_ok());
        assert!(!control.active);
    }

    #[test]
    fn threshold_hidden_when_absent() {
        let dir = TempDir::new().unwrap();
        let catalog = Catalog::new(dir.path(), "BAT1");
        let control = ThresholdControl::new(&HardwareAttributeStore::new(), &catalog);

        assert!(!control.present);
        assert_eq!(control.value, DEFAULT_THRESHOLD);
    }

    #[test]
    fn threshold_reads_and_writes() {
        let dir = TempDir::new().unwrap();
        let rel = "sys/class/power_supply/BAT1/charge_control_end_threshold";
        write(dir.path(), rel, "60\n");

        let catalog = Catalog::new(dir.path(), "BAT1");
        let store = HardwareAttributeStore::new();
        let mut control = ThresholdControl::new(&store, &catalog);
        assert!(control.present);
        assert_eq!(control.value, 60);

        assert_eq!(control.apply(&store, 85), WriteResult::Ok);
        assert_eq!(read(dir.path(), rel), "85");
    }

    #[test]
    fn threshold_stays_put_when_write_fails() {
        let dir = TempDir::new().unwrap();
        let rel = "sys/class/power_supply/BAT1/charge_control_end_threshold";
        write(dir.path(), rel, "60\n");

        let catalog = Catalog::new(dir.path(), "BAT1");
        let store = HardwareAttributeStore::new();
        let mut control = ThresholdControl::new(&store, &catalog);
        assert_eq!(control.value, 60);

        // driver unloaded after startup
        fs::remove_file(dir.path().join(rel)).unwrap();
        assert!(matches!(control.apply(&store, 90), WriteResult::Failed(_)));
        assert_eq!(control.value, 60);
        assert_eq!(control.feedback, WriteFeedback::Clear);
    }

    #[test]
    fn threshold_keeps_default_on_garbage() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "sys/class/power_supply/BAT1/charge_control_end_threshold",
            "unknown",
        );

        let catalog = Catalog::new(dir.path(), "BAT1");
        let control = ThresholdControl::new(&HardwareAttributeStore::new(), &catalog);
        assert_eq!(control.value, DEFAULT_THRESHOLD);
    }

    #[test]
    fn profile_selects_current_and_writes_choice() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "sys/firmware/acpi/platform_profile_choices", "quiet balanced performance\n");
        write(dir.path(), "sys/firmware/acpi/platform_profile", "balanced\n");

        let catalog = Catalog::new(dir.path(), "BAT1");
        let store = HardwareAttributeStore::new();
        let mut control = ProfileControl::new(&store, &catalog);
        assert_eq!(control.selected, Some(1));

        assert_eq!(control.select(&store, 2), Some(WriteResult::Ok));
        assert_eq!(control.selected, Some(2));
        assert_eq!(read(dir.path(), "sys/firmware/acpi/platform_profile"), "performance");

        assert_eq!(control.select(&store, 7), None);
        assert_eq!(control.selected, Some(2));
    }

    #[test]
    fn profile_without_choices() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "sys/firmware/acpi/platform_profile", "balanced\n");

        let catalog = Catalog::new(dir.path(), "BAT1");
        let control = ProfileControl::new(&HardwareAttributeStore::new(), &catalog);
        assert!(control.choices.is_empty());
        assert_eq!(control.selected, None);
    }

    #[test]
    fn permission_feedback_only_for_permission_errors() {
        assert_eq!(
            WriteFeedback::after(&WriteResult::PermissionDenied),
            WriteFeedback::PermissionDenied
        );
        assert_eq!(WriteFeedback::after(&WriteResult::Failed("x".into())), WriteFeedback::Clear);
        assert_eq!(WriteFeedback::after(&WriteResult::Ok), WriteFeedback::Clear);
    }
}
