use drive_evo::simulation::population::Population;
use egui_macroquad::egui;

#[allow(clippy::struct_excessive_bools)]
pub struct UIState {
    pub running: bool,
    pub next_generation_requested: bool,
    pub discard_requested: bool,
    pub show_sensor: bool,
    pub ticks_per_frame: u32,
    pub status_message: Option<String>,
    pub stats_panel_width: f32,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            running: true,
            next_generation_requested: false,
            discard_requested: false,
            show_sensor: true,
            ticks_per_frame: 1,
            status_message: None,
            stats_panel_width: 280.0,
        }
    }

    /// Returns and clears the pending "next generation" request.
    pub fn take_next_generation(&mut self) -> bool {
        std::mem::take(&mut self.next_generation_requested)
    }

    /// Returns and clears the pending "discard" request.
    pub fn take_discard(&mut self) -> bool {
        std::mem::take(&mut self.discard_requested)
    }
}

pub fn draw_ui(state: &mut UIState, population: &Population) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        egui_ctx.set_visuals(visuals);

        super::stats::draw_stats_panel(egui_ctx, state, population);
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
