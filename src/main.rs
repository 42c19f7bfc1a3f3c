use std::path::PathBuf;

use clap::Parser;
use drive_evo::simulation::params::Params;
use drive_evo::simulation::persistence::JsonFileStore;
use drive_evo::simulation::population::Population;
use macroquad::prelude::*;

mod graphics;
mod ui;

/// Watch a population of self-driving vehicles learn to drive through traffic.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON parameter file. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// File holding the best network between generations.
    #[arg(long, default_value = "best_brain.json")]
    brain: PathBuf,

    /// Add a vehicle driven with the arrow keys.
    #[arg(long)]
    manual: bool,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Drive Evo".to_owned(),
        window_width: 900,
        window_height: 800,
        ..Default::default()
    }
}

fn read_manual_controls(population: &mut Population) {
    if let Some(vehicle) = population.manual_mut() {
        let controls = vehicle.controls_mut();
        controls.forward = is_key_down(KeyCode::Up);
        controls.reverse = is_key_down(KeyCode::Down);
        controls.left = is_key_down(KeyCode::Left);
        controls.right = is_key_down(KeyCode::Right);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut params = match &args.config {
        Some(path) => match Params::load_from_file(path) {
            Ok(params) => params,
            Err(e) => {
                tracing::error!("failed to load {}: {e}", path.display());
                return;
            }
        },
        None => Params::default(),
    };
    params.manual_vehicle |= args.manual;

    let mut store = JsonFileStore::new(&args.brain);
    let mut population = match Population::resume(params, &store) {
        Ok(population) => population,
        Err(e) => {
            tracing::error!("failed to start simulation: {e}");
            return;
        }
    };

    let mut ui_state = ui::UIState::new();

    loop {
        read_manual_controls(&mut population);

        if ui_state.running {
            for _ in 0..ui_state.ticks_per_frame {
                population.tick();
            }
        }

        if ui_state.take_next_generation() {
            ui_state.status_message = population
                .advance_generation(&mut store)
                .err()
                .map(|e| format!("Next generation failed: {e}"));
        }

        if ui_state.take_discard() {
            ui_state.status_message = Some(match population.discard_best(&mut store) {
                Ok(()) => "Stored brain discarded".to_owned(),
                Err(e) => format!("Discard failed: {e}"),
            });
        }

        clear_background(LIGHTGRAY);
        graphics::draw_population(&population, ui_state.show_sensor);

        ui::draw_ui(&mut ui_state, &population);
        ui::process_egui();

        next_frame().await;
    }
}
