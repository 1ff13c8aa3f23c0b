use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder used when a document has no usable `<title>`
pub const NO_TITLE: &str = "No title";

/// Page-level facts gathered once per scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// URL the scrape was requested for
    pub url: String,

    /// Trimmed document title, or [`NO_TITLE`]
    pub title: String,

    /// HTTP status code of the response
    pub status_code: u16,
}

/// An anchor with its resolved target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// An image with its resolved source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub alt: String,
    pub src: String,
}

/// Content collected when no selectors are supplied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultExtraction {
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
}

/// Outcome of evaluating one named selector
///
/// Serializes as a string, an array of strings, `{"error": ...}` or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorValue {
    /// Exactly one element matched
    Single(String),
    /// More than one element matched, in document order
    Many(Vec<String>),
    /// The selector could not be parsed
    Error { error: String },
    /// Nothing matched
    NoMatch,
}

impl SelectorValue {
    /// Builds a value from the texts of all matched elements
    pub fn from_matches(mut texts: Vec<String>) -> Self {
        match texts.len() {
            0 => SelectorValue::NoMatch,
            1 => SelectorValue::Single(texts.remove(0)),
            _ => SelectorValue::Many(texts),
        }
    }

    /// Number of matched elements
    pub fn match_count(&self) -> usize {
        match self {
            SelectorValue::Single(_) => 1,
            SelectorValue::Many(items) => items.len(),
            SelectorValue::Error { .. } | SelectorValue::NoMatch => 0,
        }
    }
}

/// Selector results keyed by name, in the order the selectors were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorExtraction {
    entries: Vec<(String, SelectorValue)>,
}

impl SelectorExtraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value, replacing any previous value for the same name
    pub fn insert(&mut self, name: impl Into<String>, value: SelectorValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SelectorValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SelectorValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SelectorExtraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SelectorExtraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SelectorExtraction;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of selector names to results")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut extraction = SelectorExtraction::new();
                while let Some((name, value)) = access.next_entry::<String, SelectorValue>()? {
                    extraction.insert(name, value);
                }
                Ok(extraction)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// The content half of a scrape: exactly one of the two shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extraction {
    /// Headings, paragraphs, links and images
    Default(DefaultExtraction),
    /// Results of user-supplied selectors, nested so names never shadow page fields
    Selectors { selectors: SelectorExtraction },
}

/// Everything produced by one scrape
///
/// Serialized as a single flat object: the page fields followed by the
/// content fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    #[serde(flatten)]
    pub page: PageResult,

    #[serde(flatten)]
    pub content: Extraction,
}

impl ScrapeResult {
    pub fn new(page: PageResult, content: Extraction) -> Self {
        Self { page, content }
    }

    /// The default bundle, if this scrape ran without selectors
    pub fn default_extraction(&self) -> Option<&DefaultExtraction> {
        match &self.content {
            Extraction::Default(extraction) => Some(extraction),
            Extraction::Selectors { .. } => None,
        }
    }

    /// The selector results, if this scrape ran with selectors
    pub fn selector_extraction(&self) -> Option<&SelectorExtraction> {
        match &self.content {
            Extraction::Default(_) => None,
            Extraction::Selectors { selectors } => Some(selectors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_default() -> ScrapeResult {
        ScrapeResult::new(
            PageResult {
                url: "https://example.com/".to_string(),
                title: "Café – Überblick".to_string(),
                status_code: 200,
            },
            Extraction::Default(DefaultExtraction {
                headings: vec!["Grüße".to_string(), "日本語".to_string()],
                paragraphs: vec!["naïve résumé".to_string()],
                links: vec![Link {
                    text: "About".to_string(),
                    href: "https://example.com/about".to_string(),
                }],
                images: vec![Image {
                    alt: String::new(),
                    src: "https://example.com/logo.png".to_string(),
                }],
            }),
        )
    }

    #[test]
    fn test_selector_value_from_matches() {
        assert_eq!(SelectorValue::from_matches(vec![]), SelectorValue::NoMatch);
        assert_eq!(
            SelectorValue::from_matches(vec!["Hello".to_string()]),
            SelectorValue::Single("Hello".to_string())
        );
        assert_eq!(
            SelectorValue::from_matches(vec!["A".to_string(), "B".to_string()]),
            SelectorValue::Many(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn test_selector_value_json_shapes() {
        assert_eq!(
            serde_json::to_string(&SelectorValue::Single("x".to_string())).unwrap(),
            r#""x""#
        );
        assert_eq!(
            serde_json::to_string(&SelectorValue::Many(vec!["a".into(), "b".into()])).unwrap(),
            r#"["a","b"]"#
        );
        assert_eq!(serde_json::to_string(&SelectorValue::NoMatch).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&SelectorValue::Error {
                error: "bad".to_string()
            })
            .unwrap(),
            r#"{"error":"bad"}"#
        );
    }

    #[test]
    fn test_selector_extraction_keeps_insertion_order() {
        let mut extraction = SelectorExtraction::new();
        extraction.insert("zeta", SelectorValue::NoMatch);
        extraction.insert("alpha", SelectorValue::Single("a".to_string()));
        extraction.insert("zeta", SelectorValue::Single("z".to_string()));

        let json = serde_json::to_string(&extraction).unwrap();
        assert_eq!(json, r#"{"zeta":"z","alpha":"a"}"#);

        let back: SelectorExtraction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.names().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_default_result_is_flat_and_round_trips() {
        let result = sample_default();
        let json = serde_json::to_string_pretty(&result).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        for key in [
            "url",
            "title",
            "status_code",
            "headings",
            "paragraphs",
            "links",
            "images",
        ] {
            assert!(keys.contains(&key.to_string()), "missing key {}", key);
        }
        assert!(json.contains("日本語"));

        let back: ScrapeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_selector_result_round_trips() {
        let mut selectors = SelectorExtraction::new();
        selectors.insert("title", SelectorValue::Single("Hello".to_string()));
        selectors.insert("missing", SelectorValue::NoMatch);
        selectors.insert(
            "items",
            SelectorValue::Many(vec!["A".into(), "B".into(), "C".into()]),
        );
        let result = ScrapeResult::new(
            PageResult {
                url: "https://example.com/".to_string(),
                title: NO_TITLE.to_string(),
                status_code: 200,
            },
            Extraction::Selectors { selectors },
        );

        let json = serde_json::to_string(&result).unwrap();
        let back: ScrapeResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert!(back.default_extraction().is_none());
        assert_eq!(
            back.selector_extraction().unwrap().get("title"),
            Some(&SelectorValue::Single("Hello".to_string()))
        );
    }
}
