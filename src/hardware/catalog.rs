// Fixed table of Galaxy Book attribute locations

use crate::models::{AttributeSpec, ValueDomain};
use std::path::{Path, PathBuf};

/// Device directory exposed by the samsung-galaxybook driver
const DEVICE_DIR: &str = "dev/samsung-galaxybook";
/// LED class directory for the keyboard backlight
const KBD_LED_DIR: &str = "sys/class/leds/samsung-galaxybook::kbd_backlight";
const POWER_SUPPLY_DIR: &str = "sys/class/power_supply";
const ACPI_DIR: &str = "sys/firmware/acpi";
/// hwmon0 through hwmon9 are probed for a fan
const HWMON_SLOTS: usize = 10;

/// Brightness ceiling assumed when max_brightness cannot be read
pub const DEFAULT_KBD_MAX_BRIGHTNESS: i64 = 3;

/// Every attribute the control panel touches, with candidate paths resolved
/// under a root directory (`/` on real hardware).
#[derive(Clone, Debug)]
pub struct Catalog {
    pub usb_charge: AttributeSpec,
    pub start_on_lid_open: AttributeSpec,
    pub allow_recording: AttributeSpec,
    pub charge_control_end_threshold: AttributeSpec,
    pub kbd_backlight_brightness: AttributeSpec,
    pub kbd_backlight_max_brightness: AttributeSpec,
    pub platform_profile: AttributeSpec,
    pub platform_profile_choices: PathBuf,
    pub fan_speed: AttributeSpec,
    pub battery_capacity: AttributeSpec,
    pub battery_status: AttributeSpec,
    pub cpu_stat: AttributeSpec,
}

impl Catalog {
    /// Builds the table rooted at `root` for the named battery (e.g. BAT1).
    pub fn new(root: &Path, battery: &str) -> Self {
        let at = |rel: &str| root.join(rel);
        let device = |name: &str| at(DEVICE_DIR).join(name);
        let battery_dir = at(POWER_SUPPLY_DIR).join(battery);
        let choices = at(ACPI_DIR).join("platform_profile_choices");

        let kbd_bases = [at(KBD_LED_DIR), device("kbd_backlight")];

        Self {
            usb_charge: AttributeSpec::single("usb_charge", device("usb_charge"), ValueDomain::Boolean),
            start_on_lid_open: AttributeSpec::single(
                "start_on_lid_open",
                device("start_on_lid_open"),
                ValueDomain::Boolean,
            ),
            allow_recording: AttributeSpec::single(
                "allow_recording",
                device("allow_recording"),
                ValueDomain::Boolean,
            ),
            charge_control_end_threshold: AttributeSpec::single(
                "charge_control_end_threshold",
                battery_dir.join("charge_control_end_threshold"),
                ValueDomain::IntRange { min: 0, max: 100 },
            ),
            kbd_backlight_brightness: AttributeSpec::new(
                "kbd_backlight_brightness",
                kbd_bases.iter().map(|b| b.join("brightness")).collect(),
                // Writers replace the ceiling with max_brightness when it can be read
                ValueDomain::IntRange {
                    min: 0,
                    max: DEFAULT_KBD_MAX_BRIGHTNESS,
                },
            ),
            kbd_backlight_max_brightness: AttributeSpec::new(
                "kbd_backlight_max_brightness",
                kbd_bases.iter().map(|b| b.join("max_brightness")).collect(),
                ValueDomain::ReadOnly,
            ),
            platform_profile: AttributeSpec::single(
                "platform_profile",
                at(ACPI_DIR).join("platform_profile"),
                ValueDomain::Choices {
                    path: choices.clone(),
                },
            ),
            platform_profile_choices: choices,
            fan_speed: AttributeSpec::new(
                "fan1_input",
                (0..HWMON_SLOTS)
                    .map(|i| at("sys/class/hwmon").join(format!("hwmon{}", i)).join("fan1_input"))
                    .collect(),
                ValueDomain::ReadOnly,
            ),
            battery_capacity: AttributeSpec::single(
                "battery_capacity",
                battery_dir.join("capacity"),
                ValueDomain::ReadOnly,
            ),
            battery_status: AttributeSpec::single(
                "battery_status",
                battery_dir.join("status"),
                ValueDomain::ReadOnly,
            ),
            cpu_stat: AttributeSpec::single("cpu_stat", at("proc/stat"), ValueDomain::ReadOnly),
        }
    }

    /// The three on/off switches with their panel titles and subtitles.
    pub fn switches(&self) -> [(&AttributeSpec, &'static str, &'static str); 3] {
        [
            (
                &self.usb_charge,
                "USB Charging",
                "Allow USB ports to provide power when laptop is off",
            ),
            (
                &self.start_on_lid_open,
                "Start on Lid Open",
                "Automatically start laptop when opening lid",
            ),
            (
                &self.allow_recording,
                "Allow Recording",
                "Allow access to camera and microphone",
            ),
        ]
    }

    /// Attributes addressable by name from the command line, in display order.
    pub fn attributes(&self) -> Vec<&AttributeSpec> {
        vec![
            &self.usb_charge,
            &self.start_on_lid_open,
            &self.allow_recording,
            &self.charge_control_end_threshold,
            &self.kbd_backlight_brightness,
            &self.kbd_backlight_max_brightness,
            &self.platform_profile,
            &self.fan_speed,
            &self.battery_capacity,
            &self.battery_status,
        ]
    }

    pub fn find(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes().into_iter().find(|spec| spec.name == name)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Path::new("/"), "BAT1")
    }
}
