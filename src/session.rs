use crate::error::ScrapeError;
use crate::results::ScrapeResult;
use crate::selectors::SelectorSpec;

/// State the shell keeps between scrapes
///
/// Every operation takes the session by value and returns the next one, so
/// the caller always owns the single current state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    selectors: SelectorSpec,
    last_result: Option<ScrapeResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing selector list
    pub fn with_selectors(selectors: SelectorSpec) -> Self {
        Self {
            selectors,
            last_result: None,
        }
    }

    /// Adds or replaces a named selector
    pub fn add_selector(mut self, name: &str, css: &str) -> Result<Self, ScrapeError> {
        let (name, css) = (name.trim(), css.trim());
        if name.is_empty() || css.is_empty() {
            return Err(ScrapeError::InvalidInput(
                "Selector name and CSS selector are both required".to_string(),
            ));
        }
        if self.selectors.get(name).is_some() {
            ::log::debug!("Replacing selector {}", name);
        }
        self.selectors.insert(name, css);
        Ok(self)
    }

    /// Removes a named selector; unknown names leave the session unchanged
    pub fn remove_selector(mut self, name: &str) -> Self {
        if self.selectors.remove(name).is_none() {
            ::log::debug!("No selector named {} to remove", name);
        }
        self
    }

    pub fn selectors(&self) -> &SelectorSpec {
        &self.selectors
    }

    /// Whether the next scrape will use custom selectors
    pub fn uses_custom_selectors(&self) -> bool {
        !self.selectors.is_empty()
    }

    /// Stores the result of a scrape, replacing the previous one
    pub fn record(mut self, result: ScrapeResult) -> Self {
        self.last_result = Some(result);
        self
    }

    pub fn last_result(&self) -> Option<&ScrapeResult> {
        self.last_result.as_ref()
    }
}
