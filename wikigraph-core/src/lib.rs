pub mod category;
pub mod error;
pub mod extract;
pub mod graph;
pub mod pipeline;
pub mod response;
pub mod tree;
pub mod weight;

pub use error::{ErrorKind, ErrorPayload, GraphError};
pub use graph::{ChartKind, GraphEdge, GraphNode, LinkGraph, MetricKind};
pub use pipeline::{CategoryOptions, LinkGraphOptions, ProgressCallback, WeightBy};
pub use tree::{CategoryMemberMap, CategoryTree};
pub use weight::WeightedWordMap;
