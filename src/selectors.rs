use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// How a selector that fails to parse is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorMode {
    /// Record an error for that name and keep evaluating the others
    #[default]
    Isolated,
    /// Abort the whole extraction
    Strict,
}

/// Named CSS selectors, evaluated in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorSpec {
    entries: Vec<(String, String)>,
}

impl SelectorSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a selector, replacing the selector of an existing name in place
    pub fn insert(&mut self, name: impl Into<String>, css: impl Into<String>) {
        let name = name.into();
        let css = css.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = css,
            None => self.entries.push((name, css)),
        }
    }

    /// Builder-style variant of [`SelectorSpec::insert`]
    pub fn with(mut self, name: impl Into<String>, css: impl Into<String>) -> Self {
        self.insert(name, css);
        self
    }

    /// Removes a selector by name, returning its CSS if it was present
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, css)| css.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a `NAME=CSS` pair as given on the command line
    pub fn parse_pair(pair: &str) -> Result<(String, String), String> {
        let (name, css) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=CSS, got {:?}", pair))?;
        let (name, css) = (name.trim(), css.trim());
        if name.is_empty() || css.is_empty() {
            return Err(format!("selector name and CSS must be non-empty in {:?}", pair));
        }
        Ok((name.to_string(), css.to_string()))
    }
}

impl Serialize for SelectorSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, css) in &self.entries {
            map.serialize_entry(name, css)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SelectorSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SpecVisitor;

        impl<'de> Visitor<'de> for SpecVisitor {
            type Value = SelectorSpec;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of selector names to CSS selectors")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut spec = SelectorSpec::new();
                while let Some((name, css)) = access.next_entry::<String, String>()? {
                    spec.insert(name, css);
                }
                Ok(spec)
            }
        }

        deserializer.deserialize_map(SpecVisitor)
    }
}
