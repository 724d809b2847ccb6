use colored::Colorize;

pub mod crawl;
pub mod graph;
pub mod layout;
pub mod plot;
pub mod report;

pub use crawl::{CrawlOptions, CrawlOutcome, execute_crawl, summarize};
pub use graph::{ArticleGraph, GraphStats};

const BANNER: &str = r#"
          _ _    _                       _
__      _(_) | _(_) __ _ _ __ __ _ _ __ | |__
\ \ /\ / / | |/ / |/ _` | '__/ _` | '_ \| '_ \
 \ V  V /| |   <| | (_| | | | (_| | |_) | | | |
  \_/\_/ |_|_|\_\_|\__, |_|  \__,_| .__/|_| |_|
                   |___/          |_|
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_cyan());
    println!(
        "  {} {}\n",
        "Wikipedia link graph crawler".bright_white().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
