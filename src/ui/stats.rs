use drive_evo::simulation::population::Population;
use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};

use super::ui::UIState;

pub(super) fn draw_stats_panel(
    egui_ctx: &egui::Context,
    state: &mut UIState,
    population: &Population,
) {
    egui::SidePanel::right("stats_panel")
        .default_width(state.stats_panel_width)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.heading("Training");
            ui.separator();

            ui.horizontal(|ui| {
                let label = if state.running { "⏸ Stop" } else { "▶ Start" };
                if ui.button(label).clicked() {
                    state.running = !state.running;
                }
                if ui.button("⏭ Next Generation").clicked() {
                    state.next_generation_requested = true;
                }
            });
            ui.horizontal(|ui| {
                if ui.button("🗑 Discard Brain").clicked() {
                    state.discard_requested = true;
                }
                ui.checkbox(&mut state.show_sensor, "Sensor rays");
            });
            ui.add(egui::Slider::new(&mut state.ticks_per_frame, 1..=20).text("Ticks per frame"));

            if let Some(ref msg) = state.status_message {
                ui.label(egui::RichText::new(msg).color(egui::Color32::from_rgb(255, 200, 100)));
            }

            ui.separator();
            ui.label(format!("Generation: {}", population.generation()));
            ui.label(format!("Ticks: {}", population.ticks()));
            ui.label(format!("Best distance: {:.1}", population.best_distance()));
            ui.label(format!(
                "Damaged: {} / {}",
                population.damaged_count(),
                population.vehicles().len()
            ));
            ui.label(format!("Overtaking: {}", population.overtaking_count()));
            if let Some(best) = population.history().best_distance() {
                ui.label(format!("Best distance so far: {best:.1}"));
            }

            ui.separator();
            ui.label("Best distance per generation");
            draw_distance_plot(ui, population);
        });
}

fn draw_distance_plot(ui: &mut egui::Ui, population: &Population) {
    let points = population.history().distance_points();
    if points.is_empty() {
        ui.label("No finished generations yet...");
        return;
    }

    let line = Line::new(PlotPoints::from(points)).name("Best distance");

    Plot::new("distance_plot")
        .height(150.0)
        .show_axes([true, true])
        .label_formatter(|_name, value| {
            format!("Generation: {:.0}\nDistance: {:.1}", value.x, value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}
