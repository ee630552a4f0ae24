// Hide console window on Windows for release builds (GUI app).
// CLI mode re-attaches to the parent console.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use bevy::prelude::*;
use bevy::window::WindowResolution;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use shakeroll::dice3d::{
    run_replay, MotionSource, ReplayOptions, ReplayReport, RollSettings, ShakeRollPlugin,
    ShakeRollScenePlugin, DEFAULT_SHAKE_SPACING,
};

/// Shake Roll - shake to roll a 3D die
#[derive(Parser)]
#[command(name = "shakeroll")]
#[command(
    author,
    version,
    about = "Shake Roll - shake-to-roll 3D die with a headless replay mode"
)]
struct Cli {
    /// Run headless and print each roll instead of opening a window
    #[arg(long)]
    cli: bool,

    /// Roll settings (RON). Missing fields use defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed the die for reproducible rolls
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON-lines motion samples to replay, or `-` for stdin (CLI mode)
    #[arg(short, long)]
    motion: Option<String>,

    /// Number of synthesized shakes when no motion file is given (CLI mode)
    #[arg(long, default_value = "3")]
    shakes: u32,

    /// Simulated frame rate (CLI mode)
    #[arg(long, default_value = "60")]
    fps: f64,

    /// Print the effective settings as RON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.cli || cli.print_config {
        #[cfg(windows)]
        attach_parent_console();
    }

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    if cli.print_config {
        match settings.to_ron() {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    if cli.cli {
        run_cli_mode(&cli, settings);
    } else {
        run_3d_mode(&cli, settings);
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<RollSettings, String> {
    match path {
        Some(path) => RollSettings::load_from_file(path),
        None => Ok(RollSettings::default()),
    }
}

/// Attach to the parent process's console on Windows so CLI output is visible.
#[cfg(windows)]
fn attach_parent_console() {
    #[link(name = "kernel32")]
    extern "system" {
        fn AttachConsole(dwProcessId: u32) -> i32;
        fn AllocConsole() -> i32;
    }

    const ATTACH_PARENT_PROCESS: u32 = 0xFFFFFFFF;

    unsafe {
        if AttachConsole(ATTACH_PARENT_PROCESS) == 0 {
            AllocConsole();
        }
    }
}

fn run_cli_mode(cli: &Cli, settings: RollSettings) {
    let source = match cli.motion.as_deref() {
        Some("-") => MotionSource::Stdin,
        Some(path) => MotionSource::File(PathBuf::from(path)),
        None => MotionSource::Synthesized {
            shakes: cli.shakes,
            spacing: DEFAULT_SHAKE_SPACING,
        },
    };
    let options = ReplayOptions {
        source,
        fps: cli.fps,
        seed: cli.seed,
        log: true,
    };

    match run_replay(settings, options) {
        Ok(report) => print_report(&report),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn print_report(report: &ReplayReport) {
    println!("\n{}", "═══════════════════════════════════════".cyan());
    for (index, roll) in report.rolls.iter().enumerate() {
        println!(
            "{} {} {} ({:.2}s)",
            format!("Roll #{}:", index + 1).bold().white(),
            roll.face.glyph(),
            roll.face.to_string().bright_green().bold(),
            roll.duration()
        );
    }
    if report.rolls.is_empty() {
        println!("{}", "No rolls: no sample was strong enough to count as a shake.".yellow());
    }
    println!("{}", "═══════════════════════════════════════".cyan());

    let total: u32 = report.rolls.iter().map(|roll| u32::from(roll.face)).sum();
    println!(
        "{} {} rolls, total {}, {} shakes from {} samples over {:.2}s ({} frames)",
        "Summary:".bold().white(),
        report.rolls.len(),
        total.to_string().bright_green().bold(),
        report.shakes_accepted,
        report.samples_delivered,
        report.elapsed,
        report.frames
    );
}

fn run_3d_mode(cli: &Cli, settings: RollSettings) {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Shake Roll".to_string(),
                resolution: WindowResolution::new(720, 720),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ShakeRollPlugin::new(settings).with_seed(cli.seed))
        .add_plugins(ShakeRollScenePlugin)
        .run();
}
