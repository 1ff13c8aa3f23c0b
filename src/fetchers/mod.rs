pub mod fetcher;
pub mod http;

pub use fetcher::{FetchedPage, Fetcher};
pub use http::HttpFetcher;
