use crate::error::ScrapeError;
use crate::results::{Extraction, ScrapeResult, SelectorValue};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Prefix shared by all export file names
pub const FILE_PREFIX: &str = "scraped_data";

const PAGE_COLUMNS: [&str; 3] = ["url", "title", "status_code"];
const COUNT_COLUMNS: [&str; 4] = [
    "headings_count",
    "paragraphs_count",
    "links_count",
    "images_count",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// `scraped_data_<timestamp>.<ext>`
    pub fn file_name(&self, timestamp: u64) -> String {
        format!("{}_{}.{}", FILE_PREFIX, timestamp, self.extension())
    }

    /// Serializes the full result in this format
    pub fn render(&self, result: &ScrapeResult) -> Result<String, ScrapeError> {
        match self {
            ExportFormat::Json => to_json(result),
            ExportFormat::Csv => to_csv(result),
        }
    }
}

/// Pretty JSON with two-space indentation; non-ASCII text is written as is
pub fn to_json(result: &ScrapeResult) -> Result<String, ScrapeError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// One header row and one value row summarizing the result
///
/// The page columns come first. Default extractions add counts, selector
/// extractions add one column per selector with lists written as a JSON
/// array in a single cell.
pub fn to_csv(result: &ScrapeResult) -> Result<String, ScrapeError> {
    let (headers, row) = csv_table(result)?;

    let mut out = Vec::new();
    write_row(&mut out, &headers, ',')?;
    write_row(&mut out, &row, ',')?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn csv_table(result: &ScrapeResult) -> Result<(Vec<String>, Vec<String>), ScrapeError> {
    let mut headers: Vec<String> = PAGE_COLUMNS.iter().map(|h| h.to_string()).collect();
    let mut row = vec![
        result.page.url.clone(),
        result.page.title.clone(),
        result.page.status_code.to_string(),
    ];

    match &result.content {
        Extraction::Default(content) => {
            headers.extend(COUNT_COLUMNS.iter().map(|h| h.to_string()));
            row.extend([
                content.headings.len().to_string(),
                content.paragraphs.len().to_string(),
                content.links.len().to_string(),
                content.images.len().to_string(),
            ]);
        }
        Extraction::Selectors { selectors } => {
            headers.extend(selectors.names().map(str::to_string));
            for (_, value) in selectors.iter() {
                row.push(csv_cell(value)?);
            }
        }
    }

    Ok((headers, row))
}

fn csv_cell(value: &SelectorValue) -> Result<String, ScrapeError> {
    Ok(match value {
        SelectorValue::Single(text) => text.clone(),
        SelectorValue::Many(items) => serde_json::to_string(items)?,
        SelectorValue::NoMatch => String::new(),
        SelectorValue::Error { error } => format!("error: {}", error),
    })
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Writes one export file into `dir`, creating the directory if needed
///
/// Returns the path written to.
pub fn write_export(
    dir: &Path,
    format: ExportFormat,
    result: &ScrapeResult,
    timestamp: u64,
) -> Result<PathBuf, ScrapeError> {
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)?;
    }

    let path = dir.join(format.file_name(timestamp));
    let contents = format.render(result)?;
    std::fs::write(&path, contents)?;

    ::log::info!("Wrote {} export to {}", format.extension(), path.display());
    Ok(path)
}
