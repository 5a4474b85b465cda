use clap::Parser;
use job_scout::{JobSearch, SearchConfig, report};
use std::process::ExitCode;

mod args;
use args::{Args, FormatArg};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match SearchConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => SearchConfig::default(),
    };
    let config = args.apply(config);

    ::log::info!("Starting job search for: {}", config.keyword);
    let start_time = std::time::Instant::now();

    let records = match JobSearch::new(&config.keyword).with_config(config).run().await {
        Ok(records) => records,
        Err(e) => {
            ::log::error!("Job search failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Processed {} job links in {:.2} seconds",
        records.len(),
        start_time.elapsed().as_secs_f64()
    );

    if records.is_empty() {
        println!("No job links found. Check search settings.");
        return ExitCode::SUCCESS;
    }

    match args.format {
        FormatArg::Table => {
            println!("{}", report::render_table(&records));
            let summary = report::summarize(&records);
            println!(
                "\n{} jobs: {} matched, {} filtered, {} failed",
                summary.total(),
                summary.success,
                summary.filtered,
                summary.failed
            );
        }
        FormatArg::Json => match report::to_json(&records) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                ::log::error!("Failed to serialize results: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
