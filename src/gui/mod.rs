// GUI module organization and public exports

// Main application state and UI logic
mod app;
// Reusable UI components (stat cards, section cards, row headers)
mod components;
// Control rows for each writable setting
mod controls;
// Fan speed history and chart
mod fan_graph;
// Interval timers checked from the frame loop
mod poll;

// Export AppState for use in main.rs
pub use app::AppState;
