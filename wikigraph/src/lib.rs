pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    article_url, crawl_options_from_matches, load_seeds_from_file, load_seeds_from_source,
    parse_seed_line,
};

// Re-export crawl functionality from wikigraph-core
pub use wikigraph_core::crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl, extract_url_path};
