// Copyright 2025 sway-scenes contributors
// SPDX-License-Identifier: MPL-2.0

use clap::Parser;
use nu_ansi_term::{Color, Style};
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::path::{Path, PathBuf};
use sway_scenes::{detect, flatten, select, shell, Matched, ModeSpec, MonitorRule};

mod scenarios;

/// Match the connected monitors against known desk setups and apply the
/// layout of the first setup that fits.
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print the chosen configuration instead of applying it.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Flatten a block-style output config file and apply it in one batch.
    Apply {
        /// File of `output` blocks, as written by nwg-displays.
        path: PathBuf,
    },

    /// List connected outputs and their modes.
    List {
        /// Display the parsed output list as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Apply { path }) => apply_file(&path, cli.dry_run).await,
        Some(Commands::List { json }) => list(json).await,
        None => run(cli.dry_run).await,
    }
}

/// The one-shot flow: query, detect, select, render, apply.
async fn run(dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let outputs = shell::get_outputs().await?;
    let rules = scenarios::monitor_rules()?;
    let matched = detect(&rules, &outputs);

    print_detection(&rules, &matched);

    let scenario = select(scenarios::SCENARIOS, &matched).ok_or(sway_scenes::Error::NoScenario)?;

    println!(
        "{}{}",
        Style::new().bold().paint("Choosing to use the following setup: "),
        Color::Cyan.bold().paint(scenario.name)
    );

    let layout = scenario.render(&matched, &outputs)?;

    if dry_run {
        print!("{layout}");
        return Ok(());
    }

    shell::apply(&layout.command()).await?;

    println!("Monitor configuration successfully applied!");

    Ok(())
}

async fn apply_file(path: &Path, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = tokio::fs::read_to_string(path).await?;
    let command = flatten(&config);

    if dry_run {
        println!("{command}");
        return Ok(());
    }

    shell::apply(&command).await?;

    println!("Monitor configuration successfully applied!");

    Ok(())
}

fn print_detection(rules: &[MonitorRule], matched: &Matched<'_>) {
    let mut out = String::new();

    #[allow(clippy::ignored_unit_patterns)]
    let _res = fomat_macros::witeln!(
        &mut out,
        (Style::new().bold().paint("Detected Monitors:"))
    );

    for rule in rules {
        #[allow(clippy::ignored_unit_patterns)]
        let _res = fomat_macros::witeln!(
            &mut out,
            "  " (rule.label()) ": "
            if let Some(output) = matched.get(rule.label()) {
                (Color::Green.bold().paint(&output.name))
            } else {
                (Color::Red.paint("not found"))
            }
        );
    }

    let mut stdout = std::io::stdout().lock();
    let _res = stdout.write_all(out.as_bytes());
    let _res = stdout.flush();
}

async fn list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let outputs = shell::get_outputs().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
        return Ok(());
    }

    let mut out = String::new();
    let mut resolution = String::new();

    for output in &outputs {
        #[allow(clippy::ignored_unit_patterns)]
        let _res = fomat_macros::witeln!(
            &mut out,
            (Style::new().bold().paint(&output.name)) " "
            if output.active {
                (Color::Green.bold().paint("(active)"))
            } else {
                (Color::Red.bold().paint("(inactive)"))
            }
            if !output.make.is_empty() {
                (Color::Yellow.bold().paint("\n  Make: ")) (output.make)
            }
            if !output.model.is_empty() {
                (Color::Yellow.bold().paint("\n  Model: ")) (output.model)
            }
            if !output.serial.is_empty() {
                (Color::Yellow.bold().paint("\n  Serial: ")) (output.serial)
            }
            if let Some(rect) = &output.rect {
                (Color::Yellow.bold().paint("\n  Position: ")) (rect.x) "," (rect.y)
            }
            (Color::Yellow.bold().paint("\n  Modes:"))
        );

        for mode in &output.modes {
            let spec = ModeSpec::from(mode);

            resolution.clear();
            let _res = write!(&mut resolution, "{}x{}", spec.width, spec.height);

            let _res = writeln!(
                &mut out,
                "    {} @ {}{}",
                Color::Magenta.paint(format!("{resolution:>9}")),
                Color::Cyan.paint(format!("{} Hz", spec.refresh_hz())),
                if output.current_mode.as_ref() == Some(mode) {
                    Color::Purple.bold().paint(" (current)")
                } else {
                    Color::default().paint("")
                }
            );
        }
    }

    let mut stdout = std::io::stdout().lock();
    let _res = stdout.write_all(out.as_bytes());
    let _res = stdout.flush();

    Ok(())
}
