use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;
use wikigraph_fetch::config::DEFAULT_API_URL;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("wikigraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wikigraph")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .arg(
            arg!(-v --"verbose" "Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .required(false)
                .action(clap::ArgAction::Count),
        )
        .arg(
            arg!(--"api-url" <URL>)
                .required(false)
                .help("MediaWiki api.php endpoint to query")
                .value_parser(clap::value_parser!(Url))
                .default_value(DEFAULT_API_URL),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .subcommand_required(true)
        .subcommand(
            command!("links")
                .about(
                    "Build a graph of the article and the articles it links to, weighted by \
                how often each link target is mentioned.",
                )
                .arg(
                    arg!(<KEYWORD>)
                        .required(true)
                        .help("Title of the Wikipedia article"),
                )
                .arg(
                    arg!(-n --"max-nodes" <COUNT>)
                        .required(false)
                        .help("Maximum number of linked articles to show")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("20"),
                )
                .arg(
                    arg!(--"metric" <METRIC>)
                        .required(false)
                        .help("Edge metric: weight, or distance (1 - weight)")
                        .value_parser(["weight", "distance"])
                        .default_value("weight"),
                )
                .arg(
                    arg!(--"chart" <CHART>)
                        .required(false)
                        .help("Node value: link (article size) or search (weight)")
                        .value_parser(["link", "search"])
                        .default_value("link"),
                )
                .arg(
                    arg!(--"weight-by" <SOURCE>)
                        .required(false)
                        .help("Raw weight: occurrences in the article text, or target article size")
                        .value_parser(["occurrences", "size"])
                        .default_value("occurrences"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: json, text")
                        .value_parser(["json", "text"])
                        .default_value("json"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save output to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            command!("categories")
                .about(
                    "Build a tree of the article's categories and the articles in each \
                category, skipping maintenance categories.",
                )
                .arg(
                    arg!(<KEYWORD>)
                        .required(true)
                        .help("Title of the Wikipedia article"),
                )
                .arg(
                    arg!(--"member-limit" <COUNT>)
                        .required(false)
                        .help("Maximum number of members requested per category")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("50"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: json, text")
                        .value_parser(["json", "text"])
                        .default_value("json"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save output to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
