// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Replay recorded blob detector output through the steering pipeline and
//! stream the messages to the motion controller

use anyhow::{Context, Error};
use argh::FromArgs;
use log::{info, LevelFilter};
use slalom::prelude::*;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(FromArgs)]
#[argh(help_triggers("-h", "--help", "help"))]
/// Pilot arguments
struct Args {
    #[argh(description = "configuration file (JSON)")]
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    #[argh(description = "recorded detector output, one JSON frame per line")]
    #[argh(option, short = 'r')]
    replay: PathBuf,

    #[argh(description = "restart the recording when it ends")]
    #[argh(switch)]
    looping: bool,

    #[argh(description = "serial device, messages go to stdout if none is configured")]
    #[argh(option, short = 'p')]
    port: Option<String>,

    #[argh(description = "serial baud rate")]
    #[argh(option)]
    baud: Option<u32>,

    #[argh(description = "cycle time in milliseconds")]
    #[argh(option)]
    cycle_ms: Option<u64>,

    #[argh(description = "log level")]
    #[argh(option, short = 'l')]
    log_level: Option<LevelFilter>,
}

/// Pilot main entry point
fn main() -> Result<(), Error> {
    let args: Args = argh::from_env();

    // A valid `RUST_LOG` overrides the level given on the command line
    env_logger::Builder::new()
        .filter_level(args.log_level.unwrap_or(LevelFilter::Info))
        .parse_default_env()
        .init();

    let config = configuration(&args)?;

    let source = ReplaySource::open(&args.replay)
        .with_context(|| format!("failed to load {}", args.replay.display()))?
        .looping(args.looping);

    let cancel = Arc::new(AtomicBool::new(false));
    ctrlc::set_handler({
        let cancel = cancel.clone();
        move || cancel.store(true, Ordering::SeqCst)
    })
    .context("failed to install Ctrl+C handler")?;

    info!("Starting pilot");

    if config.serial.port.is_some() {
        let transport =
            SerialTransport::open(&config.serial).context("failed to open serial port")?;
        drive(Pilot::new(config, source, transport), &cancel)
    } else {
        let transport = WriterTransport::new(io::stdout());
        drive(Pilot::new(config, source, transport), &cancel)
    }
}

/// Load the configuration file and apply command line overrides
fn configuration(args: &Args) -> Result<Config, Error> {
    let mut config = match &args.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(port) = &args.port {
        config.serial.port = Some(port.clone());
    }
    if let Some(baud) = args.baud {
        config.serial.baud_rate = baud;
    }
    if let Some(cycle_ms) = args.cycle_ms {
        config.cycle_time_ms = Some(cycle_ms);
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn drive<S: FrameSource, T: Transport>(
    mut pilot: Pilot<S, T>,
    cancel: &AtomicBool,
) -> Result<(), Error> {
    pilot::run(&mut pilot, cancel).context("pilot stopped")?;
    info!("Pilot stopped");
    Ok(())
}
