// src/main.rs
use clap::Parser;
use crossterm::style::Stylize;
use linklocker::cli::args::{Cli, Commands};
use linklocker::cli::{execute_command, handle_completion, CommandContext};
use linklocker::config::{generate_default_config, load_settings};
use linklocker::exitcode;
use linklocker::infrastructure::di::ServiceContainer;
use linklocker::util::helper::is_stderr_piped;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[instrument]
fn main() {
    let cli = Cli::parse();

    // human output goes to stderr so that stdout stays usable for pipes
    let color = !cli.no_color && !is_stderr_piped();
    setup_logging(cli.debug, !color);

    if cli.generate_config {
        println!("{}", generate_default_config());
        return;
    }

    if let Some(Commands::Completion { shell }) = &cli.command {
        if let Err(e) = handle_completion(shell) {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(e.exit_code());
        }
        return;
    }

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}: {}", "Failed to load configuration".red(), e);
            std::process::exit(exitcode::USAGE);
        }
    };

    let services = match ServiceContainer::new(&settings, color) {
        Ok(container) => container,
        Err(e) => {
            eprintln!("{}: {}", "Failed to create service container".red(), e);
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}: {}", "Failed to create async runtime".red(), e);
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    let ctx = CommandContext {
        services: &services,
        settings: &settings,
        color,
    };
    if let Err(e) = runtime.block_on(execute_command(cli, &ctx)) {
        if e.is_reported() {
            debug!("Already reported: {}", e);
        } else if color {
            eprintln!("{}", format!("Error: {}", e).red());
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8, no_color: bool) {
    debug!("INIT: Attempting logger init from main.rs");

    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    let noisy_modules = ["diesel", "r2d2", "mio", "tokio", "rustyline"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}
