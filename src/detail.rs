//! One-hop node detail resolution.
//!
//! Given a selected node, collects its incident edges partitioned by kind and
//! the deduplicated neighbor set. A pure re-query: re-centering on a neighbor
//! simply resolves again for the new id. No traversal history is kept here;
//! that is a UI-layer concern.

use std::collections::{HashMap, HashSet};

use crate::types::{EdgeType, GraphEdge, GraphNode};

/// Incident edges and neighbors of one node.
#[derive(Clone, Debug, Default)]
pub struct NodeDetail {
	pub node_id: String,
	/// Incident `supports` edges.
	pub supports: Vec<GraphEdge>,
	/// Incident `contradicts` edges.
	pub contradicts: Vec<GraphEdge>,
	/// Incident `depends_on` edges.
	pub depends_on: Vec<GraphEdge>,
	/// Neighbor nodes (the other endpoint of each incident edge),
	/// deduplicated in first-seen order.
	pub neighbors: Vec<GraphNode>,
}

impl NodeDetail {
	/// Total number of incident edges.
	pub fn edge_count(&self) -> usize {
		self.supports.len() + self.contradicts.len() + self.depends_on.len()
	}
}

/// Resolve detail for `node_id` against the full node/edge set.
///
/// Edges referencing unknown nodes and self-loops are skipped, matching the
/// layout engine's silent-drop policy. An unknown `node_id` yields an empty
/// detail rather than an error.
pub fn resolve(node_id: &str, nodes: &[GraphNode], edges: &[GraphEdge]) -> NodeDetail {
	let by_id: HashMap<&str, &GraphNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();

	let mut detail = NodeDetail {
		node_id: node_id.to_string(),
		..NodeDetail::default()
	};
	let mut seen: HashSet<&str> = HashSet::new();

	for edge in edges {
		if edge.source_node == edge.target_node {
			continue;
		}
		let other = if edge.source_node == node_id {
			edge.target_node.as_str()
		} else if edge.target_node == node_id {
			edge.source_node.as_str()
		} else {
			continue;
		};

		let Some(&neighbor) = by_id.get(other) else {
			continue;
		};

		match edge.edge_type {
			EdgeType::Supports => detail.supports.push(edge.clone()),
			EdgeType::Contradicts => detail.contradicts.push(edge.clone()),
			EdgeType::DependsOn => detail.depends_on.push(edge.clone()),
		}
		if seen.insert(other) {
			detail.neighbors.push(neighbor.clone());
		}
	}

	detail
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{NodeStatus, NodeType};

	fn node(id: &str, kind: NodeType) -> GraphNode {
		GraphNode {
			id: id.into(),
			node_type: kind,
			status: NodeStatus::Unverified,
			..GraphNode::default()
		}
	}

	fn edge(id: &str, kind: EdgeType, source: &str, target: &str) -> GraphEdge {
		GraphEdge {
			id: id.into(),
			edge_type: kind,
			source_node: source.into(),
			target_node: target.into(),
			strength: None,
			provenance: None,
		}
	}

	#[test]
	fn edges_are_partitioned_by_kind() {
		let nodes = [
			node("a", NodeType::Claim),
			node("b", NodeType::Evidence),
			node("c", NodeType::Tension),
			node("d", NodeType::Assumption),
		];
		let edges = [
			edge("e1", EdgeType::Supports, "b", "a"),
			edge("e2", EdgeType::Contradicts, "c", "a"),
			edge("e3", EdgeType::DependsOn, "a", "d"),
			edge("e4", EdgeType::Supports, "b", "c"),
		];

		let detail = resolve("a", &nodes, &edges);
		assert_eq!(detail.supports.len(), 1);
		assert_eq!(detail.contradicts.len(), 1);
		assert_eq!(detail.depends_on.len(), 1);
		assert_eq!(detail.edge_count(), 3);
		let ids: Vec<&str> = detail.neighbors.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["b", "c", "d"]);
	}

	#[test]
	fn resolution_is_symmetric() {
		let nodes = [node("a", NodeType::Claim), node("b", NodeType::Evidence)];
		let edges = [edge("e", EdgeType::Supports, "a", "b")];

		let from_a = resolve("a", &nodes, &edges);
		let from_b = resolve("b", &nodes, &edges);
		assert_eq!(from_a.supports[0].id, "e");
		assert_eq!(from_b.supports[0].id, "e");
		assert_eq!(from_a.neighbors[0].id, "b");
		assert_eq!(from_b.neighbors[0].id, "a");
	}

	#[test]
	fn neighbors_are_deduplicated() {
		let nodes = [node("a", NodeType::Claim), node("b", NodeType::Evidence)];
		let edges = [
			edge("e1", EdgeType::Supports, "b", "a"),
			edge("e2", EdgeType::Contradicts, "b", "a"),
		];

		let detail = resolve("a", &nodes, &edges);
		assert_eq!(detail.edge_count(), 2);
		assert_eq!(detail.neighbors.len(), 1);
	}

	#[test]
	fn dangling_edges_and_self_loops_are_skipped() {
		let nodes = [node("a", NodeType::Claim)];
		let edges = [
			edge("dangling", EdgeType::Supports, "ghost", "a"),
			edge("self", EdgeType::DependsOn, "a", "a"),
		];

		let detail = resolve("a", &nodes, &edges);
		assert_eq!(detail.edge_count(), 0);
		assert!(detail.neighbors.is_empty());
	}

	#[test]
	fn unknown_selection_yields_empty_detail() {
		let nodes = [node("a", NodeType::Claim)];
		let detail = resolve("nope", &nodes, &[]);
		assert_eq!(detail.edge_count(), 0);
		assert!(detail.neighbors.is_empty());
	}
}
