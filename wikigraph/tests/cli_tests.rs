use std::path::PathBuf;
use url::Url;
use wikigraph::commands::{DEFAULT_OUTPUT, DEFAULT_SEED_URL, command_argument_builder};

#[test]
fn test_command_definition_is_valid() {
    command_argument_builder().debug_assert();
}

#[test]
fn test_no_subcommand_is_allowed() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wikigraph", "-q"])
        .unwrap();
    assert!(matches.get_flag("quiet"));
    assert!(matches.subcommand().is_none());
}

#[test]
fn test_verbose_counts() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wikigraph", "crawl", "-vv"])
        .unwrap();
    assert_eq!(matches.get_count("verbose"), 2);
}

#[test]
fn test_quiet_is_accepted_after_subcommand() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wikigraph", "crawl", "-q"])
        .unwrap();
    assert!(matches.get_flag("quiet"));

    let matches = command_argument_builder()
        .try_get_matches_from(["wikigraph", "demo", "--quiet"])
        .unwrap();
    assert!(matches.get_flag("quiet"));
}

#[test]
fn test_crawl_defaults() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wikigraph", "crawl"])
        .unwrap();
    let (name, sub) = matches.subcommand().unwrap();

    assert_eq!(name, "crawl");
    assert_eq!(
        sub.get_one::<Url>("url").unwrap().as_str(),
        DEFAULT_SEED_URL
    );
    assert_eq!(
        sub.get_one::<PathBuf>("output").unwrap(),
        &PathBuf::from(DEFAULT_OUTPUT)
    );
    assert_eq!(sub.get_one::<String>("format").unwrap(), "text");
    assert_eq!(*sub.get_one::<u64>("seed").unwrap(), 42);
    assert!(sub.get_one::<String>("article").is_none());
}

#[test]
fn test_article_conflicts_with_explicit_url() {
    let result = command_argument_builder().try_get_matches_from([
        "wikigraph",
        "crawl",
        "--url",
        "https://en.wikipedia.org/wiki/Finland",
        "--article",
        "Sweden",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_article_alone_is_accepted() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wikigraph", "crawl", "-a", "Gulf of Bothnia"])
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    assert_eq!(sub.get_one::<String>("article").unwrap(), "Gulf of Bothnia");
}

#[test]
fn test_invalid_format_is_rejected() {
    let result = command_argument_builder()
        .try_get_matches_from(["wikigraph", "crawl", "--format", "csv"]);
    assert!(result.is_err());
}

#[test]
fn test_invalid_url_is_rejected() {
    let result = command_argument_builder()
        .try_get_matches_from(["wikigraph", "crawl", "--url", "not a url"]);
    assert!(result.is_err());
}

#[test]
fn test_demo_defaults() {
    let matches = command_argument_builder()
        .try_get_matches_from(["wikigraph", "demo"])
        .unwrap();
    let (name, sub) = matches.subcommand().unwrap();

    assert_eq!(name, "demo");
    assert_eq!(*sub.get_one::<usize>("nodes").unwrap(), 9);
}
