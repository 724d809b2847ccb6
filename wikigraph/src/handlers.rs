use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;
use wikigraph_core::crawl::{CrawlOptions, execute_crawl, summarize};
use wikigraph_core::graph::ArticleGraph;
use wikigraph_core::layout::{LayoutOptions, spring_layout};
use wikigraph_core::plot::{DEFAULT_TITLE, build_figure, render_html, save_html, star_graph};
use wikigraph_core::report::{
    ReportFormat, generate_json_report, generate_text_report, save_report,
};

/// Install the log subscriber. `RUST_LOG` wins over the `-v` count.
pub fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

// Helper functions for crawl handler

/// Characters escaped in an article title path. `/` stays literal, as in `AC/DC`.
const TITLE_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// URL of the article called `title` on the wiki at `base`.
pub fn article_url(base: &Url, title: &str) -> Option<String> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    let slug = title.replace(' ', "_");
    base.join(&format!("/wiki/{}", utf8_percent_encode(&slug, TITLE_SEGMENT)))
        .ok()
        .map(|u| u.to_string())
}

/// Parse one seed line: a full http(s) URL, a scheme-less wiki URL, or an
/// article title. Blank lines and `#` comments yield nothing.
pub fn parse_seed_line(line: &str, base: &Url) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if let Ok(url) = Url::parse(line)
        && matches!(url.scheme(), "http" | "https")
    {
        return Some(line.to_string());
    }

    if line.contains("/wiki/") {
        let with_scheme = format!("https://{}", line);
        if Url::parse(&with_scheme).is_ok() {
            return Some(with_scheme);
        }
    }

    article_url(base, line)
}

/// Load and parse seeds from a file
pub fn load_seeds_from_file(path: &Path, base: &Url) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read seeds file {}: {}", path.display(), e))?;

    let seeds: Vec<String> = content
        .lines()
        .filter_map(|line| parse_seed_line(line, base))
        .collect();

    if seeds.is_empty() {
        return Err(format!("No valid seeds found in {}", path.display()));
    }

    Ok(seeds)
}

/// Pick the seeds from whichever source was given: a seeds file, an article
/// title, or a URL, in that order of preference.
pub fn load_seeds_from_source(
    url: Option<&Url>,
    article: Option<&String>,
    seeds_file: Option<&PathBuf>,
    base: &Url,
) -> Result<Vec<String>, String> {
    if let Some(path) = seeds_file {
        load_seeds_from_file(path, base)
    } else if let Some(title) = article {
        article_url(base, title)
            .map(|u| vec![u])
            .ok_or_else(|| format!("Invalid article title '{}'", title))
    } else if let Some(url) = url {
        Ok(vec![url.as_str().to_string()])
    } else {
        Err("Either --url, --article or --seeds-file must be provided".to_string())
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())
}

/// Translate `crawl` arguments into crawl options for the given seeds.
pub fn crawl_options_from_matches(sub_matches: &ArgMatches, seeds: Vec<String>) -> CrawlOptions {
    let defaults = CrawlOptions::default();
    CrawlOptions {
        seeds,
        max_depth: sub_matches
            .get_one::<usize>("depth")
            .copied()
            .unwrap_or(defaults.max_depth),
        max_links: sub_matches
            .get_one::<usize>("max-links")
            .copied()
            .unwrap_or(defaults.max_links),
        delay: sub_matches
            .get_one::<u64>("sleep")
            .map(|ms| Duration::from_millis(*ms))
            .unwrap_or(defaults.delay),
        timeout_secs: sub_matches
            .get_one::<u64>("timeout")
            .copied()
            .unwrap_or(defaults.timeout_secs),
        max_pages: sub_matches.get_one::<usize>("max-pages").copied(),
        base_url: sub_matches.get_one::<Url>("base-url").cloned(),
        show_progress: true,
    }
}

/// Lay out `graph`, render it and write the page to `output`.
pub fn write_graph_page(graph: &ArticleGraph, output: &Path, seed: u64) -> Result<()> {
    let options = LayoutOptions {
        seed,
        ..LayoutOptions::default()
    };
    let positions = spring_layout(graph, &options);
    let figure = build_figure(graph, &positions, DEFAULT_TITLE);
    let html = render_html(&figure).context("Failed to serialize graph figure")?;
    save_html(&html, output)
        .with_context(|| format!("Failed to write graph page {}", output.display()))?;
    Ok(())
}

pub async fn handle_crawl(sub_matches: &ArgMatches) {
    if let Err(e) = run_crawl(sub_matches).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_crawl(sub_matches: &ArgMatches) -> Result<()> {
    let base_url = sub_matches
        .get_one::<Url>("base-url")
        .cloned()
        .context("--base-url has no value")?;
    let seeds = load_seeds_from_source(
        sub_matches.get_one::<Url>("url"),
        sub_matches.get_one::<String>("article"),
        sub_matches.get_one::<PathBuf>("seeds-file"),
        &base_url,
    )
    .map_err(anyhow::Error::msg)?;

    let options = crawl_options_from_matches(sub_matches, seeds);
    debug!("Crawl options: {:?}", options);

    println!("\n🕸️  Crawling {} seed(s)", options.seeds.len());
    println!("Max depth: {}", options.max_depth);
    println!("Links per page: {}", options.max_links);
    println!("Delay: {} ms\n", options.delay.as_millis());

    let progress_callback = Arc::new(|msg: String| {
        println!("{}", msg);
    });

    let outcome = execute_crawl(options, Some(progress_callback))
        .await
        .map_err(|e| anyhow::anyhow!("Crawl failed: {}", e))?;

    println!("\n{} Crawl complete!\n", "✓".green().bold());

    let summary = summarize(&outcome);
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);
    let report = match format {
        ReportFormat::Text => generate_text_report(&summary),
        ReportFormat::Json => {
            generate_json_report(&summary).context("Failed to serialize JSON report")?
        }
    };

    if let Some(path) = sub_matches.get_one::<PathBuf>("report") {
        let path = expand_path(path);
        save_report(&report, &path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        println!("{} Report saved to {}", "✓".green().bold(), path.display());
    } else {
        print!("{}", report);
    }

    if let Some(path) = sub_matches.get_one::<PathBuf>("graph-json") {
        let path = expand_path(path);
        let json = serde_json::to_string_pretty(&outcome.graph.to_graph_data())
            .context("Failed to serialize graph")?;
        save_report(&json, &path)
            .with_context(|| format!("Failed to write graph export {}", path.display()))?;
        println!("{} Graph exported to {}", "✓".green().bold(), path.display());
    }

    let output = sub_matches
        .get_one::<PathBuf>("output")
        .map(|p| expand_path(p))
        .context("--output has no value")?;
    let seed = sub_matches.get_one::<u64>("seed").copied().unwrap_or(42);
    write_graph_page(&outcome.graph, &output, seed)?;
    println!("{} Graph written to {}", "✓".green().bold(), output.display());
    println!("DONE!");

    Ok(())
}

pub fn handle_demo(sub_matches: &ArgMatches) {
    let leaves = sub_matches.get_one::<usize>("nodes").copied().unwrap_or(9);
    let seed = sub_matches.get_one::<u64>("seed").copied().unwrap_or(42);
    let output = sub_matches
        .get_one::<PathBuf>("output")
        .map(|p| expand_path(p))
        .unwrap_or_else(|| PathBuf::from(crate::commands::DEFAULT_OUTPUT));

    let graph = star_graph(leaves);
    match write_graph_page(&graph, &output, seed) {
        Ok(()) => {
            println!("{} Demo graph written to {}", "✓".green().bold(), output.display());
            println!("DONE!");
        }
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}
