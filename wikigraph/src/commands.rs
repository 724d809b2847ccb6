use clap::{arg, command};
use url::Url;

pub const DEFAULT_SEED_URL: &str = "https://en.wikipedia.org/wiki/Finland";
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
pub const DEFAULT_OUTPUT: &str = "wikipedia.html";

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("wikigraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wikigraph")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .required(false)
                .action(clap::ArgAction::Count)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl Wikipedia outward from a seed article and plot the link graph as an \
                interactive HTML page.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("URL of the seed article")
                        .value_parser(clap::value_parser!(Url))
                        .default_value(DEFAULT_SEED_URL),
                )
                .arg(
                    arg!(-a --"article" <TITLE>)
                        .required(false)
                        .help("Title of the seed article, e.g. \"Gulf of Bothnia\"")
                        .conflicts_with_all(["url", "seeds-file"]),
                )
                .arg(
                    arg!(-S --"seeds-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of seed URLs or article titles")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Maximum link depth; pages at this depth are not fetched")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(-l --"max-links" <NUM_LINKS>)
                        .required(false)
                        .help("Maximum number of article links followed per page")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("5"),
                )
                .arg(
                    arg!(-s --"sleep" <MILLIS>)
                        .required(false)
                        .help("Pause before every request, in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("100"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"max-pages" <NUM_PAGES>)
                        .required(false)
                        .help("Stop after fetching this many pages per seed")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"base-url" <URL>)
                        .required(false)
                        .help("Wiki host that article links and titles resolve against")
                        .value_parser(clap::value_parser!(Url))
                        .default_value(DEFAULT_BASE_URL),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the interactive graph page")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value(DEFAULT_OUTPUT),
                )
                .arg(
                    arg!(--"graph-json" <PATH>)
                        .required(false)
                        .help("Also export the graph as JSON nodes and links")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(--"report" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"seed" <SEED>)
                        .required(false)
                        .help("Random seed for the graph layout")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("42"),
                ),
        )
        .subcommand(
            command!("demo")
                .about("Plot a small star graph to check that rendering works")
                .arg(
                    arg!(-n --"nodes" <NUM_LEAVES>)
                        .required(false)
                        .help("Number of leaves around the centre node")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("9"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Where to write the demo page")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value(DEFAULT_OUTPUT),
                )
                .arg(
                    arg!(--"seed" <SEED>)
                        .required(false)
                        .help("Random seed for the graph layout")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("42"),
                ),
        )
}
