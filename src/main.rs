use clap::Parser;
use results_lookup::{cli, config, coordinator, dataset, interactive, render, verifier};
use cli::{Cli, Commands};
use config::Config;
use coordinator::{Coordinator, FlowSettings};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verifier::DelayVerifier;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Lookup { exam_number } => {
            let dataset = dataset::load_dataset(config.resolve_dataset_path(cli.dataset).as_deref())?;
            let mut coordinator = Coordinator::new(
                DelayVerifier::new(config.verify_delay()),
                Arc::new(dataset),
                FlowSettings::from(&config),
            );

            let mut rx = coordinator.subscribe();
            let state = render::with_spinner(&mut rx, coordinator.submit(&exam_number)).await?;
            render::print_state(&state);
            return Ok(render::exit_code(&state));
        }

        Commands::Interactive => {
            let dataset = dataset::load_dataset(config.resolve_dataset_path(cli.dataset).as_deref())?;
            let mut coordinator = Coordinator::new(
                DelayVerifier::new(config.verify_delay()),
                Arc::new(dataset),
                FlowSettings::from(&config),
            );
            interactive::run_interactive(&mut coordinator).await?;
        }

        Commands::Config { set_dataset, show } => {
            let mut config = config;

            if let Some(path) = set_dataset {
                config.set_dataset_path(path)?;
                println!("✔ Dataset path saved");
            }

            if show {
                println!("Settings:");
                println!("  Config file:         {}", Config::config_path()?.display());
                println!(
                    "  Dataset:             {}",
                    config
                        .resolve_dataset_path(cli.dataset)
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "bundled sample".to_string())
                );
                println!("  Verification delay:  {}ms", config.verify_delay_ms);
                println!("  Verification limit:  {}s", config.verify_timeout_secs);
                println!("  Celebration window:  {}s", config.celebration_secs);
            }
        }

        Commands::Dataset { check } => {
            let dataset = dataset::load_dataset(config.resolve_dataset_path(cli.dataset).as_deref())?;
            println!("Dataset:");
            println!("  Records: {}", dataset.len());

            if check {
                let duplicates = dataset.duplicate_exam_numbers();
                if duplicates.is_empty() {
                    println!("✔ No duplicate exam numbers");
                } else {
                    println!("✖ Duplicate exam numbers: {}", duplicates.join(", "));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                format!("results_lookup={level},results_lookup_common={level}")
            }),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
