use clap::Parser;
use scrape_page::config::USER_AGENT_ENV;
use scrape_page::display::{self, DisplayLimits};
use scrape_page::export::{self, ExportFormat};
use scrape_page::session::Session;
use scrape_page::utils;
use scrape_page::{ScrapeError, ScrapeResult, Scraper, ScraperConfig, SelectorMode};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(args).await {
        Ok(session) => {
            ::log::debug!(
                "Finished with {} selectors in the session",
                session.selectors().len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Scrape failed: {}", e);
            eprintln!("Error scraping website: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<Session, ScrapeError> {
    let config = build_config(&args, std::env::var(USER_AGENT_ENV).ok())?;
    let session = build_session(&config, &args)?;

    let scraper = Scraper::new()
        .with_config(config)
        .with_selectors(session.selectors().clone());

    ::log::info!(
        "Starting scrape of {} with {} custom selectors",
        args.url,
        session.selectors().len()
    );

    let result = scraper.scrape(&args.url).await?;
    report(&args, &result)?;
    Ok(session.record(result))
}

/// Prints the report and writes the requested exports
fn report(args: &Args, result: &ScrapeResult) -> Result<(), ScrapeError> {
    println!("Website scraped successfully!\n");
    let limits = if args.full {
        DisplayLimits::unlimited()
    } else {
        DisplayLimits::default()
    };
    print!("{}", display::render(result, &limits));

    let timestamp = utils::unix_timestamp();
    let formats = [
        (args.json, ExportFormat::Json),
        (args.csv, ExportFormat::Csv),
    ];
    for (_, format) in formats.iter().filter(|(wanted, _)| *wanted) {
        let path = export::write_export(&args.out_dir, *format, result, timestamp)?;
        println!("Saved {}", path.display());
    }

    Ok(())
}

/// Config file, then environment, then command-line overrides
fn build_config(args: &Args, env_user_agent: Option<String>) -> Result<ScraperConfig, ScrapeError> {
    let mut config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    };
    config.apply_user_agent_override(env_user_agent);

    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(user_agent) = &args.user_agent {
        config.user_agent = user_agent.clone();
    }
    if args.strict_selectors {
        config.selector_mode = SelectorMode::Strict;
    }
    if args.allow_error_status {
        config.allow_error_status = true;
    }
    if args.collapse_whitespace {
        config.collapse_whitespace = true;
    }

    config.validate()?;
    Ok(config)
}

/// Config selectors first; `--selector` flags add to them or replace by name
fn build_session(config: &ScraperConfig, args: &Args) -> Result<Session, ScrapeError> {
    let mut session = Session::with_selectors(config.selectors.clone());
    for (name, css) in &args.selectors {
        session = session.add_selector(name, css)?;
    }
    Ok(session)
}
