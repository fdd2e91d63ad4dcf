// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    OutputFormat, client_config_from_args, render_category_tree, render_error, render_link_graph,
    write_output,
};

// Re-export pipeline entry points from wikigraph-core
pub use wikigraph_core::pipeline::{category_tree, link_graph};
