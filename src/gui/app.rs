// Main application state and UI rendering logic for the control panel

// Fan history chart
use crate::gui::fan_graph::{FanHistory, fan_graph};
// Control rows and shared widgets
use crate::gui::controls::{BacklightControl, ProfileControl, SwitchControl, ThresholdControl};
use crate::gui::components::{ACCENT, battery_color, battery_text, card, stat_card};
use crate::gui::poll::PollTimer;
// Configuration for poll intervals
use crate::config::IntervalConfig;
// Hardware access
use crate::hardware::{Catalog, CpuSampler, HardwareAttributeStore, read_battery, read_fan_speed};
use crate::models::{BatteryInfo, CpuUsage};
// Import egui for UI rendering
use eframe::egui;
// Host name and kernel version for the header
use sysinfo::System;
// Duration and Instant for time-based polling
use std::time::{Duration, Instant};

/// Upper bound between repaints so polls are never starved
const MAX_REPAINT_DELAY: Duration = Duration::from_secs(1);

/// What the fan card currently shows.
#[derive(Debug, Clone, PartialEq)]
enum FanDisplay {
    Updating,
    Rpm(u32),
    NotAvailable,
    Error,
}

impl FanDisplay {
    fn text(&self) -> String {
        match self {
            FanDisplay::Updating => "Updating...".to_string(),
            FanDisplay::Rpm(rpm) => format!("{} RPM", rpm),
            FanDisplay::NotAvailable => "Not available".to_string(),
            FanDisplay::Error => "Error reading fan speed".to_string(),
        }
    }
}

/// Main application state for the eframe app.
/// Owns the attribute store, every control's state and the poll timers.
pub struct AppState {
    /// Read/write access to the hardware attributes
    store: HardwareAttributeStore,

    /// Resolved attribute locations
    catalog: Catalog,

    /// "host · kernel" shown under the title
    system_label: String,

    /// Writes need root; shown as a banner when false
    is_root: bool,

    fan: FanDisplay,
    fan_history: FanHistory,
    cpu_sampler: CpuSampler,
    cpu_usage: CpuUsage,
    battery: Option<BatteryInfo>,

    backlight: BacklightControl,
    threshold: ThresholdControl,
    switches: Vec<SwitchControl>,
    profile: ProfileControl,

    fan_timer: PollTimer,
    cpu_timer: PollTimer,
    battery_timer: PollTimer,
    backlight_timer: PollTimer,
}

impl AppState {
    /// Creates a new application state instance.
    /// Sets the dark theme and reads the initial value of every control.
    ///
    /// # Arguments
    /// * `cc` - eframe creation context containing egui context
    /// * `catalog` - attribute locations to operate on
    /// * `intervals` - poll intervals for the sensors
    pub fn new(cc: &eframe::CreationContext<'_>, catalog: Catalog, intervals: &IntervalConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let store = HardwareAttributeStore::new();

        let switches = catalog
            .switches()
            .into_iter()
            .map(|(spec, title, subtitle)| SwitchControl::new(&store, spec, title, subtitle))
            .collect();

        Self {
            backlight: BacklightControl::new(&store, &catalog),
            threshold: ThresholdControl::new(&store, &catalog),
            profile: ProfileControl::new(&store, &catalog),
            switches,
            system_label: system_label(),
            is_root: nix::unistd::Uid::effective().is_root(),
            fan: FanDisplay::Updating,
            fan_history: FanHistory::default(),
            cpu_sampler: CpuSampler::new(),
            cpu_usage: CpuUsage::Sampling,
            battery: None,
            fan_timer: PollTimer::new(intervals.fan()),
            cpu_timer: PollTimer::new(intervals.cpu()),
            battery_timer: PollTimer::new(intervals.battery()),
            backlight_timer: PollTimer::new(intervals.kbd_backlight()),
            store,
            catalog,
        }
    }

    /// Runs whichever polls are due at `now`.
    fn poll(&mut self, now: Instant) {
        if self.fan_timer.due(now) {
            self.fan = match read_fan_speed(&self.store, &self.catalog) {
                Ok(Some(rpm)) => {
                    self.fan_history.push(now, rpm);
                    FanDisplay::Rpm(rpm)
                }
                Ok(None) => FanDisplay::NotAvailable,
                Err(err) => {
                    tracing::error!(error = %err, "error reading fan speed");
                    FanDisplay::Error
                }
            };
        }

        if self.cpu_timer.due(now) {
            self.cpu_usage = self.cpu_sampler.sample(&self.store, &self.catalog);
        }

        if self.battery_timer.due(now) {
            self.battery = read_battery(&self.store, &self.catalog);
        }

        if self.backlight_timer.due(now) {
            self.backlight.poll(&self.store);
        }
    }

    /// Time until the earliest poll, capped so the UI keeps ticking.
    fn next_repaint(&self, now: Instant) -> Duration {
        [
            &self.fan_timer,
            &self.cpu_timer,
            &self.battery_timer,
            &self.backlight_timer,
        ]
        .iter()
        .map(|t| t.remaining(now))
        .min()
        .unwrap_or(MAX_REPAINT_DELAY)
        .min(MAX_REPAINT_DELAY)
    }

    /// Fan, CPU and battery cards next to the RPM history chart.
    fn dashboard(&self, ui: &mut egui::Ui, now: Instant) {
        let card_width = 220.0;
        let card_height = 60.0;

        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    stat_card(ui, card_width, card_height, "Fan Speed", &self.fan.text(), ACCENT);
                    ui.add_space(10.0);
                    stat_card(
                        ui,
                        card_width,
                        card_height,
                        "CPU Usage",
                        &self.cpu_usage.to_string(),
                        ACCENT,
                    );
                    ui.add_space(10.0);
                    stat_card(
                        ui,
                        card_width,
                        card_height,
                        "Battery",
                        &battery_text(self.battery),
                        battery_color(self.battery),
                    );
                });

                ui.add_space(24.0);

                ui.vertical(|ui| {
                    ui.label(egui::RichText::new("RPM History").size(16.0).strong());
                    ui.add_space(8.0);
                    let size = egui::vec2(ui.available_width(), 220.0);
                    fan_graph(ui, &self.fan_history, now, size);
                });
            });
        });
    }

    /// Every writable setting, one row each.
    fn controls(&mut self, ui: &mut egui::Ui) {
        let store = &self.store;
        let backlight = &mut self.backlight;
        let threshold = &mut self.threshold;
        let switches = &mut self.switches;
        let profile = &mut self.profile;

        card(ui, |ui| {
            backlight.show(ui, store);
            ui.separator();

            if threshold.present {
                threshold.show(ui, store);
                ui.separator();
            }

            for switch in switches.iter_mut() {
                switch.show(ui, store);
                ui.separator();
            }

            profile.show(ui, store);
        });
    }
}

/// Builds the header subtitle from the host name and kernel version.
fn system_label() -> String {
    let host = System::host_name().unwrap_or_else(|| "unknown host".to_string());
    match System::kernel_version() {
        Some(kernel) => format!("System Controls · {} · Linux {}", host, kernel),
        None => format!("System Controls · {}", host),
    }
}

impl eframe::App for AppState {
    /// Main UI update function called every frame.
    /// Runs due polls, then renders the header, dashboard and controls.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.poll(now);
        ctx.request_repaint_after(self.next_repaint(now));

        // HEADER: title, host details and root warning
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading(egui::RichText::new("Samsung Galaxy Book Control").size(20.0).color(ACCENT).strong());
            ui.label(
                egui::RichText::new(&self.system_label)
                    .size(13.0)
                    .color(egui::Color32::from_gray(160)),
            );
            if !self.is_root {
                ui.colored_label(
                    egui::Color32::from_rgb(245, 158, 11),
                    "Not running as root: hardware settings may refuse changes.",
                );
            }
            ui.add_space(8.0);
        });

        // CENTRAL PANEL: dashboard and controls
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(8.0);
                self.dashboard(ui, now);
                ui.add_space(16.0);
                self.controls(ui);
                ui.add_space(16.0);
            });
        });
    }
}
