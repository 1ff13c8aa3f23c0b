//! Terminal report for a scrape.
//!
//! Long lists are cut for display only; exports always carry everything.

use crate::results::{DefaultExtraction, ScrapeResult, SelectorExtraction, SelectorValue};
use crate::utils::truncate_chars;
use std::fmt;

/// Characters of the title shown in the summary line
pub const TITLE_PREVIEW_CHARS: usize = 50;

/// How many entries of each list are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLimits {
    pub headings: usize,
    pub paragraphs: usize,
    pub links: usize,
    pub images: usize,
    pub selector_items: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            headings: 20,
            paragraphs: 10,
            links: 50,
            images: 20,
            selector_items: 10,
        }
    }
}

impl DisplayLimits {
    /// Shows every entry
    pub fn unlimited() -> Self {
        Self {
            headings: usize::MAX,
            paragraphs: usize::MAX,
            links: usize::MAX,
            images: usize::MAX,
            selector_items: usize::MAX,
        }
    }
}

/// Report for one result, written through [`fmt::Display`]
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub result: &'a ScrapeResult,
    pub limits: &'a DisplayLimits,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(f, self.result)?;

        if let Some(selectors) = self.result.selector_extraction() {
            write_selectors(f, selectors, self.limits)?;
        } else if let Some(content) = self.result.default_extraction() {
            write_default(f, content, self.limits)?;
        }
        Ok(())
    }
}

/// Renders the whole report
pub fn render(result: &ScrapeResult, limits: &DisplayLimits) -> String {
    Report { result, limits }.to_string()
}

fn write_summary(f: &mut fmt::Formatter<'_>, result: &ScrapeResult) -> fmt::Result {
    writeln!(f, "Scraping Results")?;
    writeln!(f, "  Status Code: {}", result.page.status_code)?;
    writeln!(
        f,
        "  Page Title:  {} ({} chars)",
        truncate_chars(&result.page.title, TITLE_PREVIEW_CHARS),
        result.page.title.chars().count()
    )?;
    writeln!(f, "  URL:         {}", result.page.url)
}

fn write_default(
    f: &mut fmt::Formatter<'_>,
    content: &DefaultExtraction,
    limits: &DisplayLimits,
) -> fmt::Result {
    section(f, "Page Headings")?;
    if content.headings.is_empty() {
        writeln!(f, "  No headings found")?;
    }
    for (i, heading) in content.headings.iter().take(limits.headings).enumerate() {
        writeln!(f, "  {}. {}", i + 1, heading)?;
    }
    overflow(f, content.headings.len(), limits.headings, "headings")?;

    section(f, "Paragraphs")?;
    if content.paragraphs.is_empty() {
        writeln!(f, "  No paragraphs found")?;
    }
    for (i, paragraph) in content.paragraphs.iter().take(limits.paragraphs).enumerate() {
        if paragraph.trim().is_empty() {
            continue;
        }
        writeln!(
            f,
            "  Paragraph {} ({} chars)\n    {}",
            i + 1,
            paragraph.chars().count(),
            paragraph
        )?;
    }
    overflow(f, content.paragraphs.len(), limits.paragraphs, "paragraphs")?;

    section(f, "Links")?;
    if content.links.is_empty() {
        writeln!(f, "  No links found")?;
    }
    for (i, link) in content.links.iter().take(limits.links).enumerate() {
        writeln!(f, "  {}. {} -> {}", i + 1, link.text, link.href)?;
    }
    overflow(f, content.links.len(), limits.links, "links")?;

    section(f, "Images")?;
    if content.images.is_empty() {
        writeln!(f, "  No images found")?;
    }
    for (i, image) in content.images.iter().take(limits.images).enumerate() {
        writeln!(
            f,
            "  Image {}:\n    Alt: {}\n    Source: {}",
            i + 1,
            image.alt,
            image.src
        )?;
    }
    overflow(f, content.images.len(), limits.images, "images")
}

fn write_selectors(
    f: &mut fmt::Formatter<'_>,
    selectors: &SelectorExtraction,
    limits: &DisplayLimits,
) -> fmt::Result {
    section(f, "Custom Selector Results")?;
    for (name, value) in selectors.iter() {
        writeln!(f, "{}:", name)?;
        match value {
            SelectorValue::Single(text) if !text.is_empty() => writeln!(f, "  {}", text)?,
            SelectorValue::Many(items) => {
                for (i, item) in items.iter().take(limits.selector_items).enumerate() {
                    writeln!(f, "  {}. {}", i + 1, item)?;
                }
                overflow(f, items.len(), limits.selector_items, "items")?;
            }
            SelectorValue::Error { error } => writeln!(f, "  Invalid selector: {}", error)?,
            SelectorValue::Single(_) | SelectorValue::NoMatch => {
                writeln!(f, "  No content found")?
            }
        }
        writeln!(f, "---")?;
    }
    Ok(())
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "\n{}", title)
}

fn overflow(f: &mut fmt::Formatter<'_>, total: usize, shown: usize, kind: &str) -> fmt::Result {
    if total > shown {
        writeln!(f, "  ... and {} more {}", total - shown, kind)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{Extraction, Image, Link, PageResult};

    fn page() -> PageResult {
        PageResult {
            url: "https://x.com/".to_string(),
            title: "A".repeat(60),
            status_code: 200,
        }
    }

    fn many(n: usize, prefix: &str) -> Vec<String> {
        (1..=n).map(|i| format!("{} {}", prefix, i)).collect()
    }

    fn big_result() -> ScrapeResult {
        ScrapeResult::new(
            page(),
            Extraction::Default(DefaultExtraction {
                headings: many(25, "heading"),
                paragraphs: many(12, "paragraph"),
                links: (1..=55)
                    .map(|i| Link {
                        text: format!("link {}", i),
                        href: format!("https://x.com/{}", i),
                    })
                    .collect(),
                images: (1..=21)
                    .map(|i| Image {
                        alt: format!("alt {}", i),
                        src: format!("https://x.com/{}.png", i),
                    })
                    .collect(),
            }),
        )
    }

    #[test]
    fn test_default_caps() {
        let report = render(&big_result(), &DisplayLimits::default());
        assert!(report.contains("  20. heading 20"));
        assert!(!report.contains("heading 21"));
        assert!(report.contains("... and 5 more headings"));
        assert!(report.contains("... and 2 more paragraphs"));
        assert!(report.contains("... and 5 more links"));
        assert!(report.contains("... and 1 more images"));
        assert!(report.contains(&format!("{}... (60 chars)", "A".repeat(50))));
    }

    #[test]
    fn test_unlimited_shows_everything() {
        let report = render(&big_result(), &DisplayLimits::unlimited());
        assert!(report.contains("  25. heading 25"));
        assert!(report.contains("Image 21:"));
        assert!(!report.contains("more"));
    }

    #[test]
    fn test_empty_sections() {
        let result = ScrapeResult::new(page(), Extraction::Default(DefaultExtraction::default()));
        let report = render(&result, &DisplayLimits::default());
        for kind in ["headings", "paragraphs", "links", "images"] {
            assert!(report.contains(&format!("No {} found", kind)));
        }
    }

    #[test]
    fn test_blank_paragraphs_are_skipped_but_numbered() {
        let content = DefaultExtraction {
            paragraphs: vec!["first".into(), "  ".into(), "third".into()],
            ..DefaultExtraction::default()
        };
        let report = render(
            &ScrapeResult::new(page(), Extraction::Default(content)),
            &DisplayLimits::default(),
        );
        assert!(report.contains("Paragraph 1 (5 chars)"));
        assert!(!report.contains("Paragraph 2"));
        assert!(report.contains("Paragraph 3 (5 chars)"));
    }

    #[test]
    fn test_selector_report() {
        let mut selectors = SelectorExtraction::new();
        selectors.insert("title", SelectorValue::Single("Hello".into()));
        selectors.insert("items", SelectorValue::Many(many(12, "item")));
        selectors.insert("missing", SelectorValue::NoMatch);
        selectors.insert(
            "broken",
            SelectorValue::Error {
                error: "unexpected token".into(),
            },
        );
        let result = ScrapeResult::new(page(), Extraction::Selectors { selectors });

        let report = render(&result, &DisplayLimits::default());
        assert!(report.contains("title:\n  Hello\n---"));
        assert!(report.contains("  10. item 10"));
        assert!(report.contains("... and 2 more items"));
        assert!(report.contains("missing:\n  No content found\n---"));
        assert!(report.contains("Invalid selector: unexpected token"));
        assert!(!report.contains("Page Headings"));
    }

    #[test]
    fn test_report_formats_like_render() {
        let result = big_result();
        let limits = DisplayLimits::default();
        let report = Report {
            result: &result,
            limits: &limits,
        };
        assert_eq!(format!("{}", report), render(&result, &limits));
        assert!(report.to_string().starts_with("Scraping Results\n  Status Code: 200\n"));
    }
}
