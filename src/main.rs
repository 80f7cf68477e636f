use anyhow::Result;
use clap::Parser;

use follow_graph_analyzer::cli::{self, Cli, Command};
use follow_graph_analyzer::config::Config;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::debug!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config::from_env();

    match &args.command {
        Command::Analyze(analyze) => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            cli::run_analyze(analyze, &config, &mut out)?;
        }
        Command::Draw(draw) => {
            cli::run_draw(draw, &config)?;
            log::info!("Drawing saved to {}", draw.output_dir.display());
        }
    }

    Ok(())
}
