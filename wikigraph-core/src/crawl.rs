use crate::graph::ArticleGraph;
use crate::report::{CrawlSummary, FailedPage};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::info;
use url::Url;
use wikigraph_scanner::crawler::{DEFAULT_DELAY, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LINKS};
use wikigraph_scanner::{Crawler, PageResult};

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub seeds: Vec<String>,
    pub max_depth: usize,
    pub max_links: usize,
    pub delay: Duration,
    pub timeout_secs: u64,
    pub max_pages: Option<usize>,
    /// Host relative article links resolve against; Wikipedia when unset.
    pub base_url: Option<Url>,
    pub show_progress: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_links: DEFAULT_MAX_LINKS,
            delay: DEFAULT_DELAY,
            timeout_secs: 10,
            max_pages: None,
            base_url: None,
            show_progress: false,
        }
    }
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Everything a finished crawl produced.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub seeds: Vec<String>,
    pub max_depth: usize,
    pub results: Vec<PageResult>,
    pub graph: ArticleGraph,
    pub elapsed: Duration,
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Crawl every seed in turn and merge the pages into one graph.
///
/// A seed that cannot be crawled is reported through `progress_callback` and
/// skipped; the call only fails when no seed could be crawled at all.
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlOutcome, String> {
    let CrawlOptions {
        seeds,
        max_depth,
        max_links,
        delay,
        timeout_secs,
        max_pages,
        base_url,
        show_progress,
    } = options;

    if seeds.is_empty() {
        return Err("No seed articles to crawl".to_string());
    }

    let progress_bar = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .map_err(|e| e.to_string())?,
        );
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let processed_count = Arc::new(AtomicUsize::new(0));

    let count_clone = processed_count.clone();
    let pb_clone = progress_bar.clone();
    let internal_progress_callback: wikigraph_scanner::ProgressCallback =
        Arc::new(move |depth: usize, url: String| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb_clone {
                pb.set_message(format!(
                    "[Depth: {}/{}] {} ({} pages)",
                    depth,
                    max_depth,
                    extract_url_path(&url),
                    count
                ));
                pb.tick();
            }
        });

    let mut crawler = Crawler::with_timeout(timeout_secs)
        .map_err(|e| format!("Failed to create HTTP client: {}", e))?
        .with_max_depth(max_depth)
        .with_max_links(max_links)
        .with_delay(delay)
        .with_max_pages(max_pages)
        .with_progress_callback(internal_progress_callback);
    if let Some(base_url) = base_url {
        crawler = crawler.with_base_url(base_url);
    }

    let start = Instant::now();
    let mut all_results = Vec::new();
    let mut crawled_seeds = 0;

    for (idx, seed) in seeds.iter().enumerate() {
        if let Some(ref callback) = progress_callback
            && seeds.len() > 1
        {
            callback(format!("Crawling seed {}/{}: {}", idx + 1, seeds.len(), seed));
        }

        match crawler.crawl(seed).await {
            Ok(results) => {
                crawled_seeds += 1;
                all_results.extend(results);
            }
            Err(e) => {
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!]  Failed to crawl {}: {}", seed, e));
                }
            }
        }
    }

    let elapsed = start.elapsed();

    if let Some(ref pb) = progress_bar {
        let total = processed_count.load(Ordering::Relaxed);
        pb.finish_with_message(format!("Crawl complete! {} pages fetched", total));
    }

    if crawled_seeds == 0 {
        return Err("None of the seed articles could be crawled".to_string());
    }

    let graph = ArticleGraph::from_results(&all_results);
    info!(
        "Built graph with {} articles and {} links in {:.2}s",
        graph.node_count(),
        graph.edge_count(),
        elapsed.as_secs_f64()
    );

    Ok(CrawlOutcome {
        seeds,
        max_depth,
        results: all_results,
        graph,
        elapsed,
    })
}

pub fn summarize(outcome: &CrawlOutcome) -> CrawlSummary {
    let mut pages_per_depth = vec![0; outcome.max_depth];
    let mut failures = Vec::new();
    let mut links_found = 0;

    for page in &outcome.results {
        if page.depth >= pages_per_depth.len() {
            pages_per_depth.resize(page.depth + 1, 0);
        }
        pages_per_depth[page.depth] += 1;
        links_found += page.links.len();

        if let Some(ref error) = page.error {
            failures.push(FailedPage {
                url: page.url.clone(),
                depth: page.depth,
                error: error.clone(),
            });
        }
    }

    // Depths the crawl never reached are not worth listing.
    while pages_per_depth.last() == Some(&0) {
        pages_per_depth.pop();
    }

    CrawlSummary {
        seeds: outcome.seeds.clone(),
        max_depth: outcome.max_depth,
        pages_fetched: outcome.results.len(),
        pages_failed: failures.len(),
        links_found,
        pages_per_depth,
        failures,
        elapsed_secs: outcome.elapsed.as_secs_f64(),
        stats: outcome.graph.stats(),
    }
}
