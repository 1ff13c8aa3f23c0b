use clap::Parser;
use scrape_page::SelectorSpec;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scrape-page")]
#[command(about = "Scrape one web page and extract its headings, paragraphs, links and images")]
#[command(version)]
pub struct Args {
    /// URL to scrape (must start with http:// or https://)
    pub url: String,

    /// Named CSS selector as NAME=CSS; repeat to add more
    #[arg(short, long = "selector", value_name = "NAME=CSS", value_parser = parse_selector)]
    pub selectors: Vec<(String, String)>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// User-Agent header to send
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Abort the whole scrape when a selector is malformed
    #[arg(long)]
    pub strict_selectors: bool,

    /// Keep pages answered with a non-2xx status
    #[arg(long)]
    pub allow_error_status: bool,

    /// Collapse whitespace runs inside extracted text
    #[arg(long)]
    pub collapse_whitespace: bool,

    /// Write the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Write a one-row CSV summary
    #[arg(long)]
    pub csv: bool,

    /// Directory for export files
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Show every entry instead of truncating long lists
    #[arg(long)]
    pub full: bool,
}

fn parse_selector(pair: &str) -> Result<(String, String), String> {
    SelectorSpec::parse_pair(pair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["scrape-page", "https://example.com"]).unwrap();
        assert_eq!(args.url, "https://example.com");
        assert!(args.selectors.is_empty());
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert!(!args.json && !args.csv && !args.full);
    }

    #[test]
    fn test_parse_selectors_in_order() {
        let args = Args::try_parse_from([
            "scrape-page",
            "https://example.com",
            "-s",
            "title=h1",
            "--selector",
            "items=ul > li",
            "--json",
            "--timeout",
            "5",
        ])
        .unwrap();
        assert_eq!(
            args.selectors,
            vec![
                ("title".to_string(), "h1".to_string()),
                ("items".to_string(), "ul > li".to_string())
            ]
        );
        assert!(args.json);
        assert_eq!(args.timeout, Some(5));
    }

    #[test]
    fn test_rejects_malformed_selector_flag() {
        assert!(Args::try_parse_from(["scrape-page", "https://example.com", "-s", "h1"]).is_err());
    }
}
