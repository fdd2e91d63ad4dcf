use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;
use wikigraph_core::graph::{EdgeMetric, NodeValue};
use wikigraph_core::pipeline::{category_tree, link_graph};
use wikigraph_core::{
    CategoryOptions, CategoryTree, ChartKind, GraphError, LinkGraph, LinkGraphOptions,
    MetricKind, ProgressCallback, WeightBy,
};
use wikigraph_fetch::{ClientConfig, WikiClient};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        }
    }
}

pub fn print_banner() {
    eprintln!(
        "{} {}",
        "wikigraph".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
}

/// Build the immutable fetcher configuration from the top-level arguments.
pub fn client_config_from_args(args: &ArgMatches) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(api_url) = args.get_one::<Url>("api-url") {
        config = config.with_api_url(api_url.clone());
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        config = config.with_timeout(*timeout);
    }
    config
}

pub fn link_options_from_args(args: &ArgMatches) -> LinkGraphOptions {
    let defaults = LinkGraphOptions::default();
    LinkGraphOptions {
        max_nodes: args
            .get_one::<usize>("max-nodes")
            .copied()
            .unwrap_or(defaults.max_nodes),
        metric: match args.get_one::<String>("metric").map(String::as_str) {
            Some("distance") => MetricKind::Distance,
            _ => MetricKind::Weight,
        },
        chart: match args.get_one::<String>("chart").map(String::as_str) {
            Some("search") => ChartKind::Search,
            _ => ChartKind::Link,
        },
        weight_by: match args.get_one::<String>("weight-by").map(String::as_str) {
            Some("size") => WeightBy::ArticleSize,
            _ => WeightBy::Occurrences,
        },
    }
}

pub fn category_options_from_args(args: &ArgMatches) -> CategoryOptions {
    let defaults = CategoryOptions::default();
    CategoryOptions {
        member_limit: args
            .get_one::<usize>("member-limit")
            .copied()
            .unwrap_or(defaults.member_limit),
    }
}

fn format_from_args(args: &ArgMatches) -> OutputFormat {
    args.get_one::<String>("format")
        .and_then(|f| OutputFormat::from_str(f))
        .unwrap_or(OutputFormat::Json)
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Failed to encode JSON")
}

pub fn render_link_graph(graph: &LinkGraph, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return to_json(graph);
    }

    let root = graph.root().map(|n| n.id.as_str()).unwrap_or("?");
    let mut report = String::new();
    report.push_str(RULE);
    report.push_str("\n\n");
    report.push_str(&format!("# Link graph: {}\n", root.bright_white().bold()));
    report.push_str(&format!("  Linked articles: {}\n\n", graph.links.len()));

    for (rank, (node, edge)) in graph.targets().zip(graph.links.iter()).enumerate() {
        let metric = match edge.metric {
            EdgeMetric::Weight(w) => format!("weight {:.3}", w),
            EdgeMetric::Distance(d) => format!("distance {:.3}", d),
        };
        let value = match node.value {
            NodeValue::Size(s) => format!("size {}", s),
            NodeValue::Weight(w) => format!("weight {:.3}", w),
        };
        report.push_str(&format!(
            "  {:>3}. {}  {}  {}\n",
            rank + 1,
            node.id.bright_white(),
            metric.cyan(),
            value.bright_black()
        ));
    }
    report.push('\n');

    Ok(report)
}

pub fn render_category_tree(tree: &CategoryTree, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return to_json(tree);
    }

    let mut report = String::new();
    report.push_str(RULE);
    report.push_str("\n\n");
    report.push_str(&format!("# Categories: {}\n", tree.name.bright_white().bold()));
    report.push_str(&format!(
        "  {} categories, {} articles\n\n",
        tree.children.len(),
        tree.article_count()
    ));

    for category in &tree.children {
        report.push_str(&format!("## {}\n", category.name.bright_blue().bold()));
        if category.children.is_empty() {
            report.push_str(&format!("  {}\n", "(no articles)".bright_black()));
        }
        for article in &category.children {
            report.push_str(&format!("  • {}\n", article.name));
        }
        report.push('\n');
    }

    Ok(report)
}

/// Structured error body (JSON) or a one-line message (text).
pub fn render_error(err: &GraphError, format: OutputFormat) -> String {
    let payload = err.to_payload();
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&payload)
            .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", payload.error.as_str())),
        OutputFormat::Text => format!(
            "{} {} ({})",
            "✗".red().bold(),
            payload.message,
            payload.error.as_str()
        ),
    }
}

/// Write `report` to `output`, or to stdout when no path is given.
pub fn write_output(report: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Wrote output to {}", path.display());
        }
        None => {
            print!("{}", report);
            if !report.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

fn spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn new_client(config: ClientConfig) -> WikiClient {
    match WikiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("✗ Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    }
}

fn finish(result: anyhow::Result<String>, output: Option<&PathBuf>) {
    if let Err(e) = result.and_then(|report| write_output(&report, output)) {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn fail(err: &GraphError, format: OutputFormat) -> ! {
    match format {
        OutputFormat::Json => println!("{}", render_error(err, format)),
        OutputFormat::Text => eprintln!("{}", render_error(err, format)),
    }
    std::process::exit(1);
}

pub async fn handle_links(sub_matches: &ArgMatches, config: ClientConfig, quiet: bool) {
    let keyword = sub_matches
        .get_one::<String>("KEYWORD")
        .map(String::as_str)
        .unwrap_or_default();
    let options = link_options_from_args(sub_matches);
    let format = format_from_args(sub_matches);
    let output = sub_matches.get_one::<PathBuf>("output");

    let client = new_client(config);

    let pb = spinner(quiet);
    pb.set_message(format!("Building link graph for {}...", keyword));
    let result = link_graph(&client, keyword, &options).await;
    pb.finish_and_clear();

    match result {
        Ok(graph) => finish(render_link_graph(&graph, format), output),
        Err(e) => fail(&e, format),
    }
}

pub async fn handle_categories(sub_matches: &ArgMatches, config: ClientConfig, quiet: bool) {
    let keyword = sub_matches
        .get_one::<String>("KEYWORD")
        .map(String::as_str)
        .unwrap_or_default();
    let options = category_options_from_args(sub_matches);
    let format = format_from_args(sub_matches);
    let output = sub_matches.get_one::<PathBuf>("output");

    let client = new_client(config);

    let pb = Arc::new(spinner(quiet));
    pb.set_message(format!("Fetching categories of {}...", keyword));
    let pb_clone = pb.clone();
    let progress_callback: ProgressCallback = Arc::new(move |msg: String| {
        pb_clone.set_message(msg);
    });

    let result = category_tree(&client, keyword, &options, Some(progress_callback)).await;
    pb.finish_and_clear();

    match result {
        Ok(tree) => finish(render_category_tree(&tree, format), output),
        Err(e) => fail(&e, format),
    }
}
