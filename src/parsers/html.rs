use crate::error::ScrapeError;
use crate::parsers::text::{self, TextOptions};
use crate::results::{
    DefaultExtraction, Extraction, Image, Link, NO_TITLE, PageResult, ScrapeResult,
    SelectorExtraction, SelectorValue,
};
use crate::selectors::{SelectorMode, SelectorSpec};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

fn builtin(css: &str) -> Selector {
    Selector::parse(css).expect("built-in selector is valid")
}

static TITLE: LazyLock<Selector> = LazyLock::new(|| builtin("title"));
static HEADINGS: LazyLock<Selector> = LazyLock::new(|| builtin("h1, h2, h3"));
static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| builtin("p"));
static LINKS: LazyLock<Selector> = LazyLock::new(|| builtin("a[href]"));
static IMAGES: LazyLock<Selector> = LazyLock::new(|| builtin("img[src]"));

/// Options controlling a single extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub selector_mode: SelectorMode,
    pub text: TextOptions,
}

/// Parses an HTML document
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Extracts the page result and content from a parsed document
///
/// With an empty `selectors` the default bundle is produced, otherwise each
/// named selector is evaluated in insertion order.
pub fn extract(
    document: &Html,
    page_url: &Url,
    status_code: u16,
    selectors: &SelectorSpec,
    options: &ExtractOptions,
) -> Result<ScrapeResult, ScrapeError> {
    let page = PageResult {
        url: page_url.to_string(),
        title: extract_title(document, &options.text),
        status_code,
    };

    let content = if selectors.is_empty() {
        Extraction::Default(extract_default(document, page_url, &options.text))
    } else {
        Extraction::Selectors {
            selectors: extract_selectors(document, selectors, options)?,
        }
    };

    Ok(ScrapeResult::new(page, content))
}

/// Returns the trimmed text of the first `<title>`, or the placeholder
pub fn extract_title(document: &Html, options: &TextOptions) -> String {
    document
        .select(&TITLE)
        .next()
        .map(|title| text::element_text(title, options))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Collects headings, paragraphs, links and images in document order
pub fn extract_default(document: &Html, base: &Url, options: &TextOptions) -> DefaultExtraction {
    let headings: Vec<String> = document
        .select(&HEADINGS)
        .map(|h| text::element_text(h, options))
        .collect();

    let paragraphs: Vec<String> = document
        .select(&PARAGRAPHS)
        .map(|p| text::element_text(p, options))
        .collect();

    let links: Vec<Link> = document
        .select(&LINKS)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            Some(Link {
                text: text::element_text(a, options),
                href: resolve_url(base, href),
            })
        })
        .collect();

    let images: Vec<Image> = document
        .select(&IMAGES)
        .filter_map(|img| {
            let src = img.value().attr("src")?;
            Some(Image {
                alt: img.value().attr("alt").unwrap_or_default().to_string(),
                src: resolve_url(base, src),
            })
        })
        .collect();

    ::log::debug!(
        "Default extraction found {} headings, {} paragraphs, {} links, {} images",
        headings.len(),
        paragraphs.len(),
        links.len(),
        images.len()
    );

    DefaultExtraction {
        headings,
        paragraphs,
        links,
        images,
    }
}

/// Evaluates every named selector against the document
pub fn extract_selectors(
    document: &Html,
    selectors: &SelectorSpec,
    options: &ExtractOptions,
) -> Result<SelectorExtraction, ScrapeError> {
    let mut extraction = SelectorExtraction::new();

    for (name, css) in selectors.iter() {
        let value = match Selector::parse(css) {
            Ok(selector) => {
                let texts = document
                    .select(&selector)
                    .map(|el| text::element_text(el, &options.text))
                    .collect::<Vec<_>>();
                let value = SelectorValue::from_matches(texts);
                ::log::debug!(
                    "Selector {} ({}) matched {} elements",
                    name,
                    css,
                    value.match_count()
                );
                value
            }
            Err(e) => {
                let reason = e.to_string();
                if options.selector_mode == SelectorMode::Strict {
                    return Err(ScrapeError::InvalidSelector {
                        name: name.to_string(),
                        selector: css.to_string(),
                        reason,
                    });
                }
                ::log::warn!("Selector {} ({}) is invalid: {}", name, css, reason);
                SelectorValue::Error { error: reason }
            }
        };
        extraction.insert(name, value);
    }

    Ok(extraction)
}

/// Resolves a reference against the page URL
///
/// References the URL parser rejects are returned unchanged.
pub fn resolve_url(base: &Url, reference: &str) -> String {
    match base.join(reference.trim()) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            ::log::debug!("Keeping unresolvable reference {:?}: {}", reference, e);
            reference.to_string()
        }
    }
}
