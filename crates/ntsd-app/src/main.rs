use clap::Parser;
use ntsd_app::cli::Cli;
use ntsd_app::run::run;
use ntsd_core::config::load_config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;
    let options = cli.resolve(&config)?;

    if let Ok(filter) = EnvFilter::try_new(options.log_level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %options.log_level, "Invalid log level, keeping warn");
    }

    tracing::debug!(options = ?options, "Options resolved");

    let output = run(&options)?;
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}
