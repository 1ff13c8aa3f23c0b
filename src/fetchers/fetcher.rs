use crate::error::FetchError;
use url::Url;

/// Raw response of a single GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL the response came from, after redirects
    pub url: Url,

    /// HTTP status code
    pub status: u16,

    /// Response body, decoded with the charset the server declared
    pub body: String,
}

impl FetchedPage {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves one page per call
///
/// Non-2xx responses are successful fetches; deciding whether they are
/// acceptable is up to the caller.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}
