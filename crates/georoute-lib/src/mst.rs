use tracing::{debug, warn};

use crate::graph::{Graph, NodeIndex};
use crate::path::queue::MinQueue;

/// Edge selected for a spanning tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEdge {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub weight: f64,
}

/// Output of [`prim`]. When the graph is disconnected under the active
/// threshold this only spans the component containing the root.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanningTree {
    pub root: Option<NodeIndex>,
    pub edges: Vec<TreeEdge>,
    pub total_weight: f64,
    pub node_count: usize,
}

impl SpanningTree {
    /// Whether the tree connects every node of the graph.
    pub fn is_complete(&self) -> bool {
        self.edges.len() == self.node_count.saturating_sub(1)
    }
}

/// Build a minimum spanning tree with Prim's algorithm starting at `root`.
///
/// Edges are expected to be symmetric, as produced by
/// [`crate::build_graph`]. Nodes that never receive a finite key are left
/// out and the result reports itself incomplete.
pub fn prim(graph: &Graph, root: NodeIndex) -> SpanningTree {
    let node_count = graph.len();
    if root >= node_count {
        return SpanningTree {
            root: None,
            edges: Vec::new(),
            total_weight: 0.0,
            node_count,
        };
    }

    let mut key = vec![f64::INFINITY; node_count];
    let mut parent: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut in_tree = vec![false; node_count];
    let mut queue = MinQueue::new();
    let mut edges = Vec::with_capacity(node_count.saturating_sub(1));
    let mut total_weight = 0.0;

    key[root] = 0.0;
    queue.push(root, 0.0);

    while let Some((node, weight)) = queue.pop() {
        if in_tree[node] || weight > key[node] {
            continue;
        }
        in_tree[node] = true;

        if let Some(from) = parent[node] {
            edges.push(TreeEdge {
                from,
                to: node,
                weight,
            });
            total_weight += weight;
        }
        if edges.len() + 1 == node_count {
            break;
        }

        for edge in graph.neighbours(node) {
            let next = edge.target;
            if in_tree.get(next).copied().unwrap_or(true) {
                continue;
            }
            if edge.weight < key[next] {
                key[next] = edge.weight;
                parent[next] = Some(node);
                queue.push(next, edge.weight);
            }
        }
    }

    let tree = SpanningTree {
        root: Some(root),
        edges,
        total_weight,
        node_count,
    };

    if tree.is_complete() {
        debug!(root, nodes = node_count, total = tree.total_weight, "spanning tree complete");
    } else {
        warn!(
            root,
            nodes = node_count,
            spanned = tree.edges.len() + 1,
            "graph is disconnected; spanning tree is partial"
        );
    }

    tree
}
