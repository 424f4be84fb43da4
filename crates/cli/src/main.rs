mod eval;

use std::io::BufRead;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tankbot_agent::{
    run_session, DoNothingModel, GreedyAimModel, GreedyChaseModel, TankController,
};
use tankbot_models::{validate_model_file, ModelBundle, ModelKind};
use tankbot_shared::*;

#[derive(Parser)]
#[command(name = "tankbot", about = "Tank-battle decision agent CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSONL scene log through the controller, one command per tick
    Replay {
        /// Path to a JSONL file of scene snapshots
        input: PathBuf,

        /// Models: greedy, do_nothing, or a directory with aim.onnx/chase.onnx
        #[arg(long, default_value = "greedy")]
        models: String,

        /// Write the command trace as JSONL instead of printing it
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run one harness session against scripted rivals
    Scrimmage {
        /// Models: greedy, do_nothing, or a directory with aim.onnx/chase.onnx
        #[arg(long, default_value = "greedy")]
        models: String,

        /// Random seed for spawn placement
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Tick budget for the session
        #[arg(long, default_value_t = 600)]
        ticks: u32,

        /// Number of scripted rivals
        #[arg(long, default_value_t = 1)]
        rivals: usize,

        /// Randomize rival spawn cells
        #[arg(long)]
        randomize: bool,

        /// Output path for the session log JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate an ONNX model file
    Validate {
        /// Path to the .onnx model file
        model_path: PathBuf,

        /// Which slot the model is for (aim or chase)
        #[arg(long, default_value = "aim")]
        kind: String,
    },

    /// Evaluate the controller over many seeded sessions in parallel
    Eval {
        /// Models: greedy, do_nothing, or a directory with aim.onnx/chase.onnx
        #[arg(long, default_value = "greedy")]
        models: String,

        /// Number of sessions to run
        #[arg(long, default_value_t = 100)]
        sessions: u32,

        /// Tick budget per session
        #[arg(long, default_value_t = 600)]
        ticks: u32,

        /// Number of scripted rivals per session
        #[arg(long, default_value_t = 1)]
        rivals: usize,
    },
}

/// Resolve a models argument to a controller.
///
/// Supported values:
/// - "greedy" -> scripted greedy aim + chase models
/// - "do_nothing" -> inert models in both slots
/// - a directory path -> ONNX bundle (aim.onnx + chase.onnx)
fn resolve_controller(models: &str) -> TankController {
    match models {
        "greedy" => TankController::new(Box::new(GreedyAimModel), Box::new(GreedyChaseModel)),
        "do_nothing" => TankController::new(Box::new(DoNothingModel), Box::new(DoNothingModel)),
        dir => match ModelBundle::load(Path::new(dir)) {
            Ok(bundle) => TankController::new(Box::new(bundle.aim), Box::new(bundle.chase)),
            Err(e) => {
                eprintln!("Failed to load models from '{}': {}", dir, e);
                std::process::exit(1);
            }
        },
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            input,
            models,
            output,
        } => cmd_replay(&input, &models, output),

        Commands::Scrimmage {
            models,
            seed,
            ticks,
            rivals,
            randomize,
            output,
        } => cmd_scrimmage(&models, seed, ticks, rivals, randomize, output),

        Commands::Validate { model_path, kind } => cmd_validate(&model_path, &kind),

        Commands::Eval {
            models,
            sessions,
            ticks,
            rivals,
        } => eval::cmd_eval(&models, sessions, ticks, rivals),
    }
}

fn cmd_replay(input: &Path, models: &str, output: Option<PathBuf>) {
    let file = match std::fs::File::open(input) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to open '{}': {}", input.display(), e);
            std::process::exit(1);
        }
    };

    let mut controller = resolve_controller(models);
    let mut trace = Vec::new();

    for (line_no, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Read error at line {}: {}", line_no + 1, e);
                std::process::exit(1);
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let scene: SceneInfo = match serde_json::from_str(&line) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Bad scene at line {}: {}", line_no + 1, e);
                std::process::exit(1);
            }
        };

        let command = controller.update(&scene);
        trace.push(TickRecord {
            tick: line_no as u32,
            command,
            x: scene.x,
            y: scene.y,
            target_id: controller.target_id().map(str::to_owned),
        });
        println!("{:>5}  {}", line_no, command);

        // A RESET command means the round ended; start the next one clean.
        if command == Command::Reset {
            controller.reset();
        }
    }

    if let Some(path) = output {
        write_jsonl(&path, &trace);
    }
}

fn cmd_scrimmage(
    models: &str,
    seed: u64,
    ticks: u32,
    rivals: usize,
    randomize: bool,
    output: Option<PathBuf>,
) {
    let mut controller = resolve_controller(models);
    let config = SessionConfig {
        seed,
        max_ticks: ticks,
        rival_count: rivals,
        aim_model: controller.aim_model_name().to_string(),
        chase_model: controller.chase_model_name().to_string(),
        randomize_spawns: randomize,
    };

    println!(
        "Scrimmage: aim={} chase={} rivals={} (seed={})",
        config.aim_model, config.chase_model, rivals, seed
    );

    let log = run_session(&config, &mut controller);
    let outcome = &log.outcome;

    println!();
    println!("=== Session Result ===");
    println!("Rivals destroyed: {}/{}", outcome.rivals_destroyed, rivals);
    println!("Shots/hits:       {}/{}", outcome.shots, outcome.hits);
    println!("Resets:           {}", outcome.resets);
    println!("Final tick:       {}", outcome.final_tick);

    if let Some(path) = output {
        match serde_json::to_string_pretty(&log) {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => println!("\nSession log written to {}", path.display()),
                Err(e) => eprintln!("\nFailed to write session log: {}", e),
            },
            Err(e) => eprintln!("\nFailed to serialize session log: {}", e),
        }
    }
}

fn cmd_validate(model_path: &Path, kind: &str) {
    let kind = match kind {
        "aim" => ModelKind::Aim,
        "chase" => ModelKind::Chase,
        other => {
            eprintln!("Unknown model kind '{}'. Valid options: aim, chase.", other);
            std::process::exit(1);
        }
    };

    match validate_model_file(model_path, kind) {
        Ok(report) => {
            println!("Model OK: {}", model_path.display());
            println!("  kind:        {}", report.kind.as_str());
            println!("  file size:   {} bytes", report.file_size_bytes);
            println!("  input shape: {:?}", report.input_shape);
            println!("  output shape:{:?}", report.output_shape);
            println!("  ~parameters: {}", report.parameter_count);
        }
        Err(e) => {
            eprintln!("Validation failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn write_jsonl(path: &Path, trace: &[TickRecord]) {
    use std::io::Write;

    let mut out = match std::fs::File::create(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to create '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };
    for record in trace {
        match serde_json::to_string(record) {
            Ok(json) => {
                if let Err(e) = writeln!(out, "{}", json) {
                    eprintln!("Failed to write '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Failed to serialize record: {}", e);
                std::process::exit(1);
            }
        }
    }
    println!("Command trace written to {}", path.display());
}
