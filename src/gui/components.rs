use crate::models::BatteryInfo;
use eframe::egui;

/// Accent used for headline values
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(53, 132, 228);

/// Compact card with a small caption above a large coloured value.
pub fn stat_card(ui: &mut egui::Ui, width: f32, height: f32, label: &str, value: &str, color: egui::Color32) {
    egui::Frame::none()
        .fill(egui::Color32::from_gray(38))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(60)))
        .rounding(10.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(width);
            ui.set_height(height);
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(label)
                        .size(11.0)
                        .color(egui::Color32::from_gray(170)),
                );
                ui.add_space(8.0);
                ui.label(egui::RichText::new(value).size(22.0).color(color).strong());
            });
        });
}

/// Rounded section wrapping a group of rows.
pub fn card<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::none()
        .fill(egui::Color32::from_gray(30))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_gray(55)))
        .rounding(12.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

/// Bold title with a dimmed subtitle underneath.
pub fn row_header(ui: &mut egui::Ui, title: &str, subtitle: &str) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(title).size(16.0).strong());
        ui.label(
            egui::RichText::new(subtitle)
                .size(13.0)
                .color(egui::Color32::from_gray(160)),
        );
    });
}

/// Red / yellow / green by charge level; gray when unknown.
pub fn battery_color(info: Option<BatteryInfo>) -> egui::Color32 {
    match info {
        Some(b) if b.percentage <= 20 => egui::Color32::from_rgb(204, 51, 51),
        Some(b) if b.percentage <= 50 => egui::Color32::from_rgb(204, 204, 51),
        Some(_) => egui::Color32::from_rgb(51, 204, 51),
        None => egui::Color32::GRAY,
    }
}

pub fn battery_text(info: Option<BatteryInfo>) -> String {
    match info {
        Some(b) if b.charging => format!("⚡ Charging: {}%", b.percentage),
        Some(b) => format!("Battery: {}%", b.percentage),
        None => "N/A".to_string(),
    }
}
