// Link graph payload: one root node plus one node and edge per weighted title

use crate::weight::{SizeMap, WeightedWordMap};
use serde::{Deserialize, Serialize};

/// Tier of the root keyword node.
pub const ROOT_ORDER: u8 = 0;
/// Tier of every discovered link target.
pub const TARGET_ORDER: u8 = 1;

/// How each edge's metric is derived from the normalized weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// metric = weight
    #[default]
    Weight,
    /// metric = 1 - weight, so frequent links sit closer to the root
    Distance,
}

/// Which value a target node carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Node carries the target article's byte size.
    #[default]
    Link,
    /// Node carries the normalized weight.
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeValue {
    Size(f64),
    Weight(f64),
}

impl NodeValue {
    pub fn value(&self) -> f64 {
        match self {
            NodeValue::Size(v) | NodeValue::Weight(v) => *v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMetric {
    Weight(f64),
    Distance(f64),
}

impl EdgeMetric {
    pub fn value(&self) -> f64 {
        match self {
            EdgeMetric::Weight(v) | EdgeMetric::Distance(v) => *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub order: u8,
    #[serde(flatten)]
    pub value: NodeValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub metric: EdgeMetric,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LinkGraph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
}

impl LinkGraph {
    pub fn root(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.order == ROOT_ORDER)
    }

    pub fn targets(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.order == TARGET_ORDER)
    }
}

/// Assemble the graph for `keyword`. Node and edge order follows `weights`.
///
/// For [`ChartKind::Link`] a title missing from `sizes` gets size `0`.
pub fn build_link_graph(
    keyword: &str,
    weights: &WeightedWordMap,
    sizes: &SizeMap,
    metric: MetricKind,
    chart: ChartKind,
) -> LinkGraph {
    let root_value = match chart {
        ChartKind::Link => NodeValue::Size(1.0),
        ChartKind::Search => NodeValue::Weight(1.0),
    };

    let mut nodes = Vec::with_capacity(weights.len() + 1);
    nodes.push(GraphNode {
        id: keyword.to_string(),
        order: ROOT_ORDER,
        value: root_value,
    });

    let mut links = Vec::with_capacity(weights.len());

    for (title, weight) in weights.iter() {
        let value = match chart {
            ChartKind::Link => {
                NodeValue::Size(sizes.get(title).copied().unwrap_or_default() as f64)
            }
            ChartKind::Search => NodeValue::Weight(weight),
        };
        nodes.push(GraphNode {
            id: title.to_string(),
            order: TARGET_ORDER,
            value,
        });

        let metric = match metric {
            MetricKind::Weight => EdgeMetric::Weight(weight),
            MetricKind::Distance => EdgeMetric::Distance(1.0 - weight),
        };
        links.push(GraphEdge {
            source: keyword.to_string(),
            target: title.to_string(),
            metric,
        });
    }

    LinkGraph { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weights() -> WeightedWordMap {
        [("X", 0.8), ("Y", 0.2)].into_iter().collect()
    }

    fn sizes() -> SizeMap {
        let mut sizes = SizeMap::new();
        sizes.insert("X".to_string(), 100);
        sizes
    }

    #[test]
    fn test_link_chart_uses_sizes_and_defaults_missing_to_zero() {
        let graph = build_link_graph(
            "Root",
            &weights(),
            &sizes(),
            MetricKind::Weight,
            ChartKind::Link,
        );

        let value = serde_json::to_value(&graph).unwrap();
        assert_eq!(
            value,
            json!({
                "nodes": [
                    {"id": "Root", "order": 0, "size": 1.0},
                    {"id": "X", "order": 1, "size": 100.0},
                    {"id": "Y", "order": 1, "size": 0.0},
                ],
                "links": [
                    {"source": "Root", "target": "X", "weight": 0.8},
                    {"source": "Root", "target": "Y", "weight": 0.2},
                ]
            })
        );
    }

    #[test]
    fn test_distance_metric_inverts_weight() {
        let graph = build_link_graph(
            "Root",
            &weights(),
            &sizes(),
            MetricKind::Distance,
            ChartKind::Link,
        );

        let distances: Vec<f64> = graph.links.iter().map(|l| l.metric.value()).collect();
        assert!((distances[0] - 0.2).abs() < 1e-9);
        assert!((distances[1] - 0.8).abs() < 1e-9);
        assert!(matches!(graph.links[0].metric, EdgeMetric::Distance(_)));
    }

    #[test]
    fn test_search_chart_uses_weights() {
        let graph = build_link_graph(
            "Root",
            &weights(),
            &SizeMap::new(),
            MetricKind::Weight,
            ChartKind::Search,
        );

        assert_eq!(graph.nodes[0].value, NodeValue::Weight(1.0));
        assert_eq!(graph.nodes[1].value, NodeValue::Weight(0.8));
        assert_eq!(graph.nodes[2].value, NodeValue::Weight(0.2));
    }

    #[test]
    fn test_empty_weights_gives_lone_root() {
        let graph = build_link_graph(
            "Root",
            &WeightedWordMap::new(),
            &SizeMap::new(),
            MetricKind::Weight,
            ChartKind::Link,
        );

        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.links.is_empty());
        assert_eq!(graph.root().map(|n| n.id.as_str()), Some("Root"));
        assert_eq!(graph.targets().count(), 0);
    }

    #[test]
    fn test_every_edge_starts_at_root() {
        let graph = build_link_graph(
            "Root",
            &weights(),
            &sizes(),
            MetricKind::Weight,
            ChartKind::Link,
        );
        assert!(graph.links.iter().all(|l| l.source == "Root"));
    }
}
