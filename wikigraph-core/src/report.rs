// Crawl and graph report generation

use crate::graph::GraphStats;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedPage {
    pub url: String,
    pub depth: usize,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub seeds: Vec<String>,
    pub max_depth: usize,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub links_found: usize,
    /// Fetched page count indexed by depth.
    pub pages_per_depth: Vec<usize>,
    pub failures: Vec<FailedPage>,
    pub elapsed_secs: f64,
    pub stats: GraphStats,
}

/// The four graph metrics as aligned `label value` rows.
pub fn format_stats(stats: &GraphStats) -> String {
    [
        ("Nodes", stats.nodes),
        ("Edges", stats.edges),
        ("Max degree", stats.max_degree),
        ("Max path", stats.max_path),
    ]
    .iter()
    .map(|(label, value)| format!("{:<10} {:>5}\n", label, value))
    .collect()
}

pub fn generate_text_report(summary: &CrawlSummary) -> String {
    let mut report = String::new();
    report.push_str(DIVIDER);
    report.push_str("\n# Summary:\n");
    report.push_str(&format!("  Seeds: {}\n", summary.seeds.join(", ")));
    report.push_str(&format!("  Max depth: {}\n", summary.max_depth));
    report.push_str(&format!("  Pages crawled: {}\n", summary.pages_fetched));
    report.push_str(&format!("  Failed pages: {}\n", summary.pages_failed));
    report.push_str(&format!("  Links found: {}\n", summary.links_found));

    if !summary.pages_per_depth.is_empty() {
        let per_depth: Vec<String> = summary
            .pages_per_depth
            .iter()
            .enumerate()
            .map(|(depth, count)| format!("{}: {}", depth, count))
            .collect();
        report.push_str(&format!("  Pages per depth: {}\n", per_depth.join(", ")));
    }

    report.push('\n');
    report.push_str(DIVIDER);
    report.push_str("\n# Graph:\n");
    report.push_str(&format_stats(&summary.stats));

    if !summary.failures.is_empty() {
        report.push('\n');
        report.push_str(DIVIDER);
        report.push_str("\n# Failed pages:\n");
        for failure in &summary.failures {
            report.push_str(&format!(
                "  [depth {}] {} ({})\n",
                failure.depth, failure.url, failure.error
            ));
        }
    }

    report.push('\n');
    report.push_str(DIVIDER);
    report.push_str(&format!("\nTime taken: {:.2} seconds\n", summary.elapsed_secs));
    report.push_str(&format!(
        "Generated: {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    report
}

pub fn generate_json_report(summary: &CrawlSummary) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "wikigraph",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "crawl": {
                "seeds": summary.seeds,
                "max_depth": summary.max_depth,
                "pages_fetched": summary.pages_fetched,
                "pages_failed": summary.pages_failed,
                "links_found": summary.links_found,
                "pages_per_depth": summary.pages_per_depth,
                "duration_seconds": summary.elapsed_secs
            },
            "graph": summary.stats,
            "failures": summary.failures
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
