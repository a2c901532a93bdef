#![forbid(unsafe_code)]
// #![deny(missing_docs)]
// #![deny(warnings)]

#[macro_use]
extern crate log;

mod app;
mod configuration;
mod model;
mod render;
mod server;
mod storage;
mod time;

use futures::channel::oneshot;
use log::LevelFilter;
use signal_hook::{iterator::Signals, SIGINT, SIGTERM};
use std::{path::PathBuf, process::exit, thread};
use structopt::StructOpt;

use self::app::App;
use self::{
    configuration::command_line::Opt,
    configuration::settings::Settings,
};

#[tokio::main]
async fn main() {
    let mut options = Opt::from_args();
    let level = options
        .logging
        .take()
        .map(LevelFilter::from)
        .unwrap_or(LevelFilter::Info);

    if let Err(e) = init_logging(level, &options.log_output_file) {
        eprintln!("Failed to initialize logging: {}", e);
        exit(1);
    }

    let settings = match Settings::load(&options) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration {}", e);
            exit(1);
        }
    };
    debug!("Initiated configuration {:#?}", settings);

    let app = match App::new(&settings) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start: {}", e);
            exit(1);
        }
    };

    let (stop, stopped) = oneshot::channel::<()>();
    match Signals::new(&[SIGINT, SIGTERM]) {
        Ok(signals) => {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    info!("Received signal {:?}, stopping", sig);
                    let _ = stop.send(());
                }
            });
        }
        Err(e) => warn!("Cannot listen for shutdown signals: {}", e),
    }

    // a dropped sender means no signal handling, keep serving
    let shutdown = async {
        if stopped.await.is_err() {
            futures::future::pending::<()>().await;
        }
    };
    if let Err(e) = app.run(shutdown).await {
        error!("{}", e);
        exit(1);
    }
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) -> Result<(), fern::InitError> {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        // hyper is noisy below info
        .level_for("hyper", LevelFilter::Info.min(level))
        .chain(std::io::stdout());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file)?)
    }
    dispatcher.apply()?;
    info!("Logging level {} enabled", level);
    Ok(())
}
