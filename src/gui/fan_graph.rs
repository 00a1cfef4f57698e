// Fan speed history buffer and its RPM chart

use eframe::egui;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Samples kept in the history
pub const HISTORY_CAPACITY: usize = 60;
/// Time span covered by the chart's x axis
pub const HISTORY_WINDOW: Duration = Duration::from_secs(60);
/// Chart ceiling before any faster sample is seen
pub const INITIAL_CEILING_RPM: f64 = 3000.0;

/// Height reserved below the plot for time labels
const LABEL_STRIP: f32 = 30.0;
/// Samsung blue
const LINE_COLOR: egui::Color32 = egui::Color32::from_rgb(51, 102, 255);

/// Bounded history of fan readings.
/// The ceiling only grows: a sample above it raises it to 110% of that sample.
#[derive(Debug, Clone)]
pub struct FanHistory {
    samples: VecDeque<(Instant, u32)>,
    ceiling: f64,
}

impl Default for FanHistory {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY),
            ceiling: INITIAL_CEILING_RPM,
        }
    }
}

impl FanHistory {
    pub fn push(&mut self, at: Instant, rpm: u32) {
        if self.samples.len() == HISTORY_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back((at, rpm));

        if f64::from(rpm) > self.ceiling {
            self.ceiling = f64::from(rpm) * 1.1;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    /// Samples as fractions of the chart: x runs from 0 (60 s ago) to 1
    /// (`now`), y from 0 (idle) to 1 (ceiling). Older samples go negative
    /// and are clipped by the painter.
    pub fn normalized(&self, now: Instant) -> Vec<(f32, f32)> {
        let window = HISTORY_WINDOW.as_secs_f64();
        self.samples
            .iter()
            .map(|&(at, rpm)| {
                let age = now.saturating_duration_since(at).as_secs_f64();
                let x = 1.0 - age / window;
                let y = f64::from(rpm) / self.ceiling;
                (x as f32, y as f32)
            })
            .collect()
    }
}

/// Draws the RPM history with a time grid (10 s steps) and RPM gridlines.
pub fn fan_graph(ui: &mut egui::Ui, history: &FanHistory, now: Instant, size: egui::Vec2) {
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;
    let plot_height = rect.height() - LABEL_STRIP;

    painter.rect_filled(rect, 6.0, egui::Color32::from_black_alpha(50));

    let grid = egui::Stroke::new(0.5, egui::Color32::from_gray(77));
    let label_color = egui::Color32::from_gray(178);
    let font = egui::FontId::proportional(10.0);

    // Time gridlines, labelled -60s .. -10s
    for i in 0..=6 {
        let x = rect.left() + rect.width() * i as f32 / 6.0;
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.top() + plot_height)],
            grid,
        );
        if i < 6 {
            painter.text(
                egui::pos2(x + 5.0, rect.bottom() - 10.0),
                egui::Align2::LEFT_BOTTOM,
                format!("{}s", -60 + i * 10),
                font.clone(),
                label_color,
            );
        }
    }

    // RPM gridlines
    let steps = 5;
    for i in 0..=steps {
        let y = rect.top() + plot_height * i as f32 / steps as f32;
        painter.line_segment([egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)], grid);
        let rpm = (history.ceiling() * f64::from(steps - i) / f64::from(steps)) as u64;
        painter.text(
            egui::pos2(rect.left() + 5.0, y + 2.0),
            egui::Align2::LEFT_TOP,
            format!("{} RPM", rpm),
            font.clone(),
            label_color,
        );
    }

    if history.is_empty() {
        return;
    }

    let points: Vec<egui::Pos2> = history
        .normalized(now)
        .into_iter()
        .map(|(x, y)| {
            egui::pos2(
                rect.left() + x * rect.width(),
                rect.top() + plot_height * (1.0 - y),
            )
        })
        .collect();

    if points.len() > 1 {
        painter.add(egui::Shape::line(points, egui::Stroke::new(2.0, LINE_COLOR)));
    }
}
