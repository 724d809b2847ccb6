// Tests for report generation functionality

use tempfile::NamedTempFile;
use wikigraph_core::graph::GraphStats;
use wikigraph_core::report::{
    CrawlSummary, FailedPage, ReportFormat, format_stats, generate_json_report,
    generate_text_report, save_report,
};

fn sample_summary() -> CrawlSummary {
    CrawlSummary {
        seeds: vec!["https://en.wikipedia.org/wiki/Finland".to_string()],
        max_depth: 3,
        pages_fetched: 7,
        pages_failed: 1,
        links_found: 30,
        pages_per_depth: vec![1, 2, 4],
        failures: vec![FailedPage {
            url: "https://en.wikipedia.org/wiki/Lost".to_string(),
            depth: 2,
            error: "HTTP 404 Not Found".to_string(),
        }],
        elapsed_secs: 1.5,
        stats: GraphStats {
            nodes: 31,
            edges: 30,
            max_degree: 5,
            max_path: 4,
        },
    }
}

// ============================================================================
// Report Format Tests
// ============================================================================

#[test]
fn test_report_format_from_str() {
    assert_eq!(ReportFormat::from_str("text"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("txt"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("json"), Some(ReportFormat::Json));
}

#[test]
fn test_report_format_from_str_case_insensitive() {
    assert_eq!(ReportFormat::from_str("TEXT"), Some(ReportFormat::Text));
    assert_eq!(ReportFormat::from_str("Json"), Some(ReportFormat::Json));
}

#[test]
fn test_report_format_from_str_unknown() {
    assert_eq!(ReportFormat::from_str("html"), None);
    assert_eq!(ReportFormat::from_str(""), None);
}

// ============================================================================
// Stats Formatting Tests
// ============================================================================

#[test]
fn test_format_stats_alignment() {
    let stats = GraphStats {
        nodes: 31,
        edges: 30,
        max_degree: 5,
        max_path: 4,
    };

    let text = format_stats(&stats);

    assert_eq!(
        text,
        "Nodes         31\nEdges         30\nMax degree     5\nMax path       4\n"
    );
}

#[test]
fn test_format_stats_wide_values() {
    let stats = GraphStats {
        nodes: 123456,
        ..GraphStats::default()
    };
    assert!(format_stats(&stats).starts_with("Nodes      123456\n"));
}

// ============================================================================
// Text Report Tests
// ============================================================================

#[test]
fn test_text_report_contents() {
    let report = generate_text_report(&sample_summary());

    assert!(report.contains("Seeds: https://en.wikipedia.org/wiki/Finland"));
    assert!(report.contains("Pages crawled: 7"));
    assert!(report.contains("Failed pages: 1"));
    assert!(report.contains("Links found: 30"));
    assert!(report.contains("Pages per depth: 0: 1, 1: 2, 2: 4"));
    assert!(report.contains("Max degree     5"));
    assert!(report.contains("[depth 2] https://en.wikipedia.org/wiki/Lost (HTTP 404 Not Found)"));
    assert!(report.contains("Time taken: 1.50 seconds"));
    assert!(report.contains("Generated: "));
}

#[test]
fn test_text_report_without_failures_has_no_failure_section() {
    let mut summary = sample_summary();
    summary.failures.clear();
    summary.pages_failed = 0;

    let report = generate_text_report(&summary);

    assert!(!report.contains("# Failed pages:"));
}

// ============================================================================
// JSON Report Tests
// ============================================================================

#[test]
fn test_json_report_structure() {
    let json = generate_json_report(&sample_summary()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let report = &value["report"];
    assert_eq!(report["metadata"]["generator"], "wikigraph");
    assert_eq!(report["metadata"]["format"], "json");
    assert!(report["metadata"]["generated_at"].is_string());
    assert_eq!(report["crawl"]["pages_fetched"], 7);
    assert_eq!(report["crawl"]["pages_per_depth"][2], 4);
    assert_eq!(report["graph"]["max_path"], 4);
    assert_eq!(report["failures"][0]["error"], "HTTP 404 Not Found");
}

#[test]
fn test_summary_round_trips_through_serde() {
    let summary = sample_summary();
    let json = serde_json::to_string(&summary).unwrap();
    let back: CrawlSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back, summary);
}

// ============================================================================
// Save Tests
// ============================================================================

#[test]
fn test_save_report() {
    let file = NamedTempFile::new().unwrap();

    save_report("Nodes 3\n", file.path()).unwrap();

    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "Nodes 3\n");
}
