use commands::command_argument_builder;
use tracing::Level;
use wikigraph::handlers::{
    client_config_from_args, handle_categories, handle_links, print_banner,
};

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    init_tracing(chosen_command.get_count("verbose"));

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let config = client_config_from_args(&chosen_command);

    match chosen_command.subcommand() {
        Some(("links", primary_command)) => handle_links(primary_command, config, quiet).await,
        Some(("categories", primary_command)) => {
            handle_categories(primary_command, config, quiet).await
        }
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
