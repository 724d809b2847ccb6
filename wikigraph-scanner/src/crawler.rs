use crate::error::{Result, ScanError};
use crate::extract::{extract_links, title_from_url};
use crate::result::PageResult;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Called with `(depth, url)` right before a page is fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;
pub type ResultCallback = Arc<dyn Fn(PageResult) + Send + Sync>;

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_MAX_LINKS: usize = 5;
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

const CONNECTION_ERROR_HINT: &str = "Connection error! [Too many HTTP requests? -> Add sleep]";

/// Sequential breadth-first crawler over article links.
pub struct Crawler {
    client: Client,
    base_url: Url,
    max_depth: usize,
    max_links: usize,
    delay: Duration,
    max_pages: Option<usize>,
    progress_callback: Option<ProgressCallback>,
    result_callback: Option<ResultCallback>,
}

impl Crawler {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                "wikigraph/",
                env!("CARGO_PKG_VERSION"),
                " (link graph crawler)"
            ))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", DEFAULT_BASE_URL, e)))?;

        Ok(Self {
            client,
            base_url,
            max_depth: DEFAULT_MAX_DEPTH,
            max_links: DEFAULT_MAX_LINKS,
            delay: DEFAULT_DELAY,
            max_pages: None,
            progress_callback: None,
            result_callback: None,
        })
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_links(mut self, links: usize) -> Self {
        self.max_links = links;
        self
    }

    /// Pause inserted before every request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Host that relative `/wiki/...` links are resolved against.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<usize>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_result_callback(mut self, callback: ResultCallback) -> Self {
        self.result_callback = Some(callback);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Crawl outward from `seed_url`, returning one result per fetched page in
    /// breadth-first order. Pages at `max_depth` or deeper are never fetched.
    pub async fn crawl(&self, seed_url: &str) -> Result<Vec<PageResult>> {
        let mut seed = Url::parse(seed_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", seed_url, e)))?;
        // Same key as links resolved later, so the seed is not fetched again.
        seed.set_fragment(None);

        info!(
            "Starting crawl of {} (max depth {}, {} links per page)",
            seed, self.max_depth, self.max_links
        );

        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<(String, usize)> = VecDeque::new();
        let mut results = Vec::new();

        visited.insert(seed.to_string());
        queue.push_back((seed.to_string(), 0));

        while let Some((url, depth)) = queue.pop_front() {
            if depth >= self.max_depth {
                continue;
            }
            if let Some(limit) = self.max_pages
                && results.len() >= limit
            {
                debug!("Page limit of {} reached, {} queued pages dropped", limit, queue.len() + 1);
                break;
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            debug!("[Depth: {}/{}] Current page - {}", depth, self.max_depth, url);
            if let Some(ref callback) = self.progress_callback {
                callback(depth, url.clone());
            }

            let result = match self.fetch_page(&url, depth).await {
                Ok(result) => {
                    if depth + 1 < self.max_depth {
                        for link in &result.links {
                            if let Some(next) = resolve_article_url(&self.base_url, &link.href)
                                && visited.insert(next.clone())
                            {
                                queue.push_back((next, depth + 1));
                            }
                        }
                    }
                    result
                }
                Err(e) => {
                    warn!("{}", failure_message(&url, &e));
                    PageResult::with_error(url.clone(), depth, e.to_string())
                }
            };

            if let Some(ref callback) = self.result_callback {
                callback(result.clone());
            }
            results.push(result);
        }

        info!("Crawl complete. Fetched {} pages", results.len());
        Ok(results)
    }

    async fn fetch_page(&self, url: &str, depth: usize) -> Result<PageResult> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.text().await?;

        let mut result = PageResult::new(url.to_string(), depth);
        result.status_code = status.as_u16();
        result.response_time = start.elapsed();

        if !status.is_success() {
            debug!("{} returned {}", url, status);
            result.error = Some(format!("HTTP {}", status));
            return Ok(result);
        }

        // Missing content type is treated as HTML.
        if let Some(ref ct) = content_type
            && !ct.contains("html")
        {
            result.error = Some(format!("Unsupported content type: {}", ct));
            return Ok(result);
        }

        let page = extract_links(&body, self.max_links)?;
        result.title = if page.title.is_empty() {
            title_from_url(url).unwrap_or_else(|| url.to_string())
        } else {
            page.title
        };
        result.links = page.links;

        Ok(result)
    }
}

/// Log line for a page that could not be fetched or parsed. Only transport
/// errors carry the rate-limit hint.
fn failure_message(url: &str, error: &ScanError) -> String {
    match error {
        ScanError::HttpError(_) => format!("{} {}: {}", CONNECTION_ERROR_HINT, url, error),
        _ => format!("Failed to process {}: {}", url, error),
    }
}

/// Join an article href onto `base`, dropping any fragment.
pub fn resolve_article_url(base: &Url, href: &str) -> Option<String> {
    let mut resolved = base.join(href).ok()?;
    resolved.set_fragment(None);
    Some(resolved.to_string())
}
