mod history;
mod play_app;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use platstep_core::{run_level, InputScript, Level};
use std::path::{Path, PathBuf};

/// Steps run when neither `--steps` nor a script says otherwise
const DEFAULT_STEPS: u64 = 600;

#[derive(Parser)]
#[command(name = "platstep")]
#[command(about = "Platformer physics step runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a level headlessly and print the final state
    Run {
        /// Level JSON file; the built-in demo level when omitted
        level: Option<PathBuf>,
        /// Input script JSON file; idle input when omitted
        #[arg(long)]
        script: Option<PathBuf>,
        /// Seconds per step
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,
        /// Number of steps; defaults to the script length
        #[arg(long)]
        steps: Option<u64>,
    },
    /// Print the built-in demo level as JSON
    DumpDemo,
    /// Play a level in a window (arrow keys / space)
    Play {
        /// Level JSON file, reloaded whenever it changes
        level: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            level,
            script,
            dt,
            steps,
        } => run(level.as_deref(), script.as_deref(), dt, steps),
        Commands::DumpDemo => {
            println!("{}", Level::demo().to_json()?);
            Ok(())
        }
        Commands::Play { level } => play_app::run(level),
    }
}

fn run(level_path: Option<&Path>, script: Option<&Path>, dt: f64, steps: Option<u64>) -> Result<()> {
    let level = Level::from_file_or_demo(level_path).with_context(|| match level_path {
        Some(path) => format!("loading level {}", path.display()),
        None => "loading demo level".to_string(),
    })?;
    let script = match script {
        Some(path) => InputScript::from_file(path)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => InputScript::default(),
    };
    let steps = steps.unwrap_or(match script.total_frames() {
        0 => DEFAULT_STEPS,
        frames => frames,
    });

    tracing::info!(level = %level.name, steps, dt, "running level");
    let result = run_level(level, &script, dt, steps)?;

    let state = result.final_state;
    println!("steps = {}", result.steps);
    println!(
        "position = ({}, {})",
        state.body.position.x, state.body.position.y
    );
    println!(
        "velocity = ({}, {})",
        state.body.velocity.x, state.body.velocity.y
    );
    println!(
        "contacts = up:{} down:{} left:{} right:{}",
        state.contacts.up, state.contacts.down, state.contacts.left, state.contacts.right
    );
    println!("grounded_steps = {}", result.grounded_steps);
    println!("peak_height = {}", result.peak_height);

    Ok(())
}
