use std::path::PathBuf;

use bomb_drop_simulation::*;
use clap::Parser;

/// Headless bomb drop run: ticks the simulation to completion and prints
/// the event summary and final legend.
#[derive(Parser, Debug)]
#[command(name = "bomb_drop_sim", version, about)]
struct Cli {
    /// JSON configuration file; defaults are used when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Height taken by the controls panel
    #[arg(long, default_value_t = 0.0)]
    reserved_height: f64,

    /// Give up after this many frames
    #[arg(long, default_value_t = 100_000)]
    max_frames: usize,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Log bomb releases and landings
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &cli.config {
        Some(path) => SimulationConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => SimulationConfig::default(),
    };

    if cli.dump_config {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    let viewport = Viewport::new(cli.width, cli.height).with_reserved_height(cli.reserved_height);
    let mut driver = LoopDriver::new(ManualScheduler::new(), FrameRecorder::default());
    driver.start(&config, &viewport)?;

    let state = driver.run_to_completion(cli.max_frames);
    if state != LoopState::Stopped {
        log::warn!(
            "Frame budget of {} exhausted before the simulation stopped",
            cli.max_frames
        );
    }

    driver.telemetry().display_data();

    if let Some(frame) = &driver.sink().last_frame {
        println!("\n--- Final Frame ---");
        for line in frame.texts() {
            println!("{}", line);
        }
        println!(
            "({} draw commands, drop interval unit: {})",
            frame.len(),
            driver.unit_label().unwrap_or("-")
        );
    }

    Ok(())
}
