use crate::extract::ArticleLink;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of fetching a single article during a crawl.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub url: String,
    pub depth: usize,
    pub status_code: u16,
    pub title: String,
    pub links: Vec<ArticleLink>,
    pub response_time: Duration,
    pub error: Option<String>,
}

impl PageResult {
    pub fn new(url: String, depth: usize) -> Self {
        Self {
            url,
            depth,
            status_code: 0,
            title: String::new(),
            links: Vec::new(),
            response_time: Duration::from_secs(0),
            error: None,
        }
    }

    pub fn with_error(url: String, depth: usize, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(url, depth)
        }
    }

    /// True when the page was fetched and parsed.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
