// UI module - control panel and training progress

mod stats;
mod ui;

pub use ui::{UIState, draw_ui, process_egui};
