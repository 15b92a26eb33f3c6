use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Instant;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod columns;
mod controller;
mod domain;
mod filter;
mod inputter;
mod loader;
mod model;
mod navigation;
mod record;
mod relative_time;
mod table_state;
mod timer;
mod ui;

use controller::Controller;
use domain::{DashConfig, DashError};
use model::{Model, Route, Status};
use ui::AppUI;

#[derive(Parser, Debug)]
#[command(name = "adash", version, about = "Article management dashboard for the terminal")]
struct Args {
    /// Article file (json, csv, parquet or arrow), the bundled articles are used if omitted
    #[arg(long)]
    data: Option<String>,
    #[arg(long, default_value_t = 10)]
    page_size: usize,
    /// Duration of the loading placeholder after opening the dashboard
    #[arg(long, default_value_t = 1500)]
    loading_delay_ms: u64,
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,
    #[arg(long, default_value = "adash.log")]
    log_file: String,
    /// Skip the home page
    #[arg(long, action = clap::ArgAction::SetTrue)]
    dashboard: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Err(e) => {
            error!("Exiting with error: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn expand(path: &str) -> Result<PathBuf, DashError> {
    let expanded = shellexpand::full(path).map_err(|e| DashError::LoadingFailed(e.to_string()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

fn init_tracing(log_file: &str) -> Result<(), DashError> {
    let file = File::create(expand(log_file)?)?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("ADASH_LOG").unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

fn run(args: Args) -> Result<(), DashError> {
    init_tracing(&args.log_file)?;
    info!("Starting adash {:?}", args);

    let cfg = DashConfig::default()
        .event_poll_time(args.poll_ms)
        .page_size(args.page_size.max(1))
        .loading_delay_ms(args.loading_delay_ms);

    let load_start = Instant::now();
    let records = match &args.data {
        Some(path) => loader::load_data_file(expand(path)?)?,
        None => loader::bundled()?,
    };
    info!(
        "Loading {} articles took {}ms ...",
        records.len(),
        load_start.elapsed().as_millis()
    );

    let route = if args.dashboard {
        Route::Dashboard
    } else {
        Route::Home
    };
    let mut model = Model::init(&cfg, records, route);
    let ui = AppUI::new();
    let controller = Controller::new(&cfg);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut model, &ui, &controller);
    ratatui::restore();
    info!("Stopped");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    model: &mut Model,
    ui: &AppUI,
    controller: &Controller,
) -> Result<(), DashError> {
    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(model, f))?;

        // Handle events and map to a Message
        let message = controller.handle_event(model)?;
        model.update(message)?;
        model.tick(Instant::now());
    }
    Ok(())
}
