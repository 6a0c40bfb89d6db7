//! Resume scorer: rubric-based scoring for structured resume records

use clap::Parser;
use log::{error, info, warn};
use resume_scorer::cli::{self, Cli, Commands, ConfigAction};
use resume_scorer::config::Config;
use resume_scorer::input::InputManager;
use resume_scorer::output::{save_report_to_file, BatchSummary, ReportGenerator, ScoredCandidate};
use resume_scorer::scoring::Scorer;
use resume_scorer::{Result, ResumeScorerError};
use std::path::PathBuf;
use std::process;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config) {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Score {
            inputs,
            output,
            detailed,
            save,
            normalize_email,
            no_color,
            fail_below,
        } => {
            if let Some(format) = output {
                config.output.format =
                    cli::parse_output_format(&format).map_err(ResumeScorerError::InvalidInput)?;
            }
            config.output.detailed |= detailed;
            config.output.color_output &= !no_color;
            config.input.normalize_email |= normalize_email;

            info!("Scoring {} input(s)", inputs.len());
            let input_manager = InputManager::new().with_normalize_email(config.input.normalize_email);
            let loaded = input_manager.load_all(&inputs)?;

            let scorer = Scorer::new();
            let candidates: Vec<ScoredCandidate> = loaded
                .into_iter()
                .map(|record| ScoredCandidate::from_loaded(&scorer, record))
                .collect();

            for candidate in &candidates {
                info!(
                    "{}: {} ({})",
                    candidate.source,
                    candidate.report.display_score(),
                    candidate.report.recommendation
                );
            }

            let generator = ReportGenerator::from_config(&config.output);
            let rendered = generator.generate_report(&candidates, config.output.format)?;
            println!("{}", rendered);

            if let Some(path) = save {
                // Save plain report
                let plain = ReportGenerator::with_options(false, config.output.detailed, config.output.pretty_json)
                    .generate_report(&candidates, config.output.format)?;
                save_report_to_file(&plain, &path)?;
                info!("Report saved to {}", path.display());
            }

            if let Some(threshold) = fail_below {
                let count = BatchSummary::below(&candidates, threshold);
                if count > 0 {
                    warn!("{} candidate(s) below the required score of {}", count, threshold);
                    return Err(ResumeScorerError::BelowThreshold { count, threshold });
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("Output format: {:?}", config.output.format);
                    println!("Detailed: {}", config.output.detailed);
                    println!("Colors: {}", config.output.color_output);
                    println!("Pretty JSON: {}", config.output.pretty_json);
                    println!("Normalize email: {}", config.input.normalize_email);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}
