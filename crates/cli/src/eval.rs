use rayon::prelude::*;

use tankbot_agent::run_session;
use tankbot_shared::{SessionConfig, SessionOutcome};

/// Run many seeded sessions in parallel and print aggregate statistics.
///
/// Each worker builds its own controller so model state (and any ONNX
/// session) stays thread-local.
pub fn cmd_eval(models: &str, sessions: u32, ticks: u32, rivals: usize) {
    if sessions == 0 {
        eprintln!("Eval requires at least one session.");
        std::process::exit(1);
    }

    println!(
        "Eval: {} sessions, {} rivals, {} tick budget (models={})",
        sessions, rivals, ticks, models
    );

    let outcomes: Vec<SessionOutcome> = (0..sessions)
        .into_par_iter()
        .map(|seed| {
            let mut controller = crate::resolve_controller(models);
            let config = SessionConfig {
                seed: seed as u64,
                max_ticks: ticks,
                rival_count: rivals,
                aim_model: controller.aim_model_name().to_string(),
                chase_model: controller.chase_model_name().to_string(),
                randomize_spawns: true,
            };
            run_session(&config, &mut controller).outcome
        })
        .collect();

    let n = outcomes.len() as f64;
    let cleared = outcomes
        .iter()
        .filter(|o| o.rivals_destroyed as usize == rivals)
        .count();
    let total_shots: u64 = outcomes.iter().map(|o| o.shots as u64).sum();
    let total_hits: u64 = outcomes.iter().map(|o| o.hits as u64).sum();
    let mean_ticks: f64 = outcomes.iter().map(|o| o.final_tick as f64).sum::<f64>() / n;
    let mean_destroyed: f64 = outcomes
        .iter()
        .map(|o| o.rivals_destroyed as f64)
        .sum::<f64>()
        / n;
    let hit_rate = if total_shots > 0 {
        total_hits as f64 / total_shots as f64
    } else {
        0.0
    };

    println!();
    println!("=== Eval Summary ===");
    println!("{:<22} {:>10}", "Sessions", outcomes.len());
    println!("{:<22} {:>9.1}%", "Cleared", 100.0 * cleared as f64 / n);
    println!("{:<22} {:>10.2}", "Mean rivals destroyed", mean_destroyed);
    println!("{:<22} {:>9.1}%", "Hit rate", 100.0 * hit_rate);
    println!("{:<22} {:>10.1}", "Mean ticks", mean_ticks);
}
