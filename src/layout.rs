//! Deterministic graph layout.
//!
//! Orchestrates the visibility filter, cluster grouping, collapse handling,
//! and node positioning. Two modes:
//!
//! - [`LayoutMode::Clustered`]: visible nodes are partitioned by backend
//!   cluster membership (unclustered nodes form singleton groups), groups are
//!   placed on a macro-grid, and collapsed clusters are replaced by one
//!   synthetic super-node.
//! - [`LayoutMode::Layered`]: nodes are ranked into layers by support and
//!   dependency direction; no clusters are computed or rendered.
//!
//! Re-invoking with identical inputs produces identical output. No position
//! may depend on hash-map iteration order; everything walks the input slices
//! in order and uses maps for lookup only.

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use crate::collapse::{ClusterKey, CollapseState};
use crate::geometry::{Point, Rect};
use crate::types::{BackendCluster, ClusterInfo, EdgeType, GraphEdge, GraphNode, NodeType, TypeFilter};

/// Which layout algorithm to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
	Clustered,
	Layered,
}

/// Layout tuning. All sizes are in layout-space units; the rendering layer
/// owns every viewport/zoom transform.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
	/// Width of a regular node box.
	pub node_width: f64,
	/// Height of a regular node box.
	pub node_height: f64,
	/// Horizontal gap between node boxes.
	pub h_gap: f64,
	/// Vertical gap between node boxes (and between layers).
	pub v_gap: f64,
	/// Gap between cluster groups on the macro-grid.
	pub cluster_gap: f64,
	/// Minimum super-node width.
	pub supernode_min_width: f64,
	/// Extra super-node width per member.
	pub supernode_width_per_member: f64,
	/// Maximum super-node width.
	pub supernode_max_width: f64,
	/// Super-node height.
	pub supernode_height: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			node_width: 180.0,
			node_height: 72.0,
			h_gap: 40.0,
			v_gap: 56.0,
			cluster_gap: 96.0,
			supernode_min_width: 160.0,
			supernode_width_per_member: 8.0,
			supernode_max_width: 340.0,
			supernode_height: 80.0,
		}
	}
}

/// A node with a resolved position: either a real graph node or a synthetic
/// super-node standing in for a collapsed cluster.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PositionedNode {
	/// The node id, or `cluster:<key>` for a super-node.
	pub id: String,
	pub rect: Rect,
	pub kind: PositionedKind,
}

/// What a positioned node stands for.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PositionedKind {
	/// A real graph node.
	Node(GraphNode),
	/// A collapsed cluster.
	SuperNode {
		cluster_id: String,
		node_count: usize,
		/// Member kind histogram, in [`NodeType::ALL`] order.
		type_counts: Vec<(NodeType, usize)>,
	},
}

impl PositionedNode {
	/// Whether this is a collapsed-cluster super-node. Click handling hinges
	/// on this: a super-node click expands, a node click opens detail.
	pub fn is_super_node(&self) -> bool {
		matches!(self.kind, PositionedKind::SuperNode { .. })
	}
}

/// An edge after visibility filtering and collapse redirection. Endpoints may
/// name a super-node id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayoutEdge {
	pub id: String,
	pub edge_type: EdgeType,
	pub source: String,
	pub target: String,
	pub strength: Option<f64>,
}

/// Everything the rendering layer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LayoutResult {
	pub nodes: Vec<PositionedNode>,
	pub edges: Vec<LayoutEdge>,
	/// Expanded backend clusters with visible members, for hull rendering.
	/// Empty in layered mode and for singleton groups.
	pub clusters: Vec<ClusterInfo>,
}

impl LayoutResult {
	/// Bounding box of a positioned node. `None` when the id is absent from
	/// the current layout, which makes an external focus request a no-op.
	pub fn rect_of(&self, id: &str) -> Option<Rect> {
		self.nodes.iter().find(|n| n.id == id).map(|n| n.rect)
	}

	/// Center point for viewport centering. `None` when the id is absent.
	pub fn center_of(&self, id: &str) -> Option<Point> {
		self.rect_of(id).map(|r| r.center())
	}

	/// Per-node bounding boxes, keyed by id. Input to the hull builder.
	pub fn boxes(&self) -> HashMap<String, Rect> {
		self.nodes
			.iter()
			.map(|n| (n.id.clone(), n.rect))
			.collect()
	}

	/// Per-node kinds for real nodes, keyed by id. Input to the hull builder
	/// for dominant-type coloring.
	pub fn node_types(&self) -> HashMap<String, NodeType> {
		self.nodes
			.iter()
			.filter_map(|n| match &n.kind {
				PositionedKind::Node(node) => Some((n.id.clone(), node.node_type)),
				PositionedKind::SuperNode { .. } => None,
			})
			.collect()
	}
}

/// Compute a layout.
///
/// `clusters` is the backend cluster assignment (ignored in layered mode);
/// `collapse` is the caller-owned collapse state, already synced to the same
/// assignment. Malformed edges (unknown endpoint, self-loop) are dropped
/// silently.
pub fn layout(
	nodes: &[GraphNode],
	edges: &[GraphEdge],
	clusters: Option<&[BackendCluster]>,
	mode: LayoutMode,
	filter: &TypeFilter,
	collapse: &CollapseState,
	config: &LayoutConfig,
) -> LayoutResult {
	let visible: Vec<&GraphNode> = nodes.iter().filter(|n| filter.allows(n.node_type)).collect();
	let index_of: HashMap<&str, usize> = visible
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.as_str(), i))
		.collect();

	let mut kept_edges: Vec<&GraphEdge> = Vec::with_capacity(edges.len());
	let mut dropped = 0usize;
	for edge in edges {
		let valid = edge.source_node != edge.target_node
			&& index_of.contains_key(edge.source_node.as_str())
			&& index_of.contains_key(edge.target_node.as_str());
		if valid {
			kept_edges.push(edge);
		} else {
			dropped += 1;
		}
	}
	if dropped > 0 {
		debug!("layout: dropped {} invalid or filtered edges", dropped);
	}

	match mode {
		LayoutMode::Layered => layered(&visible, &kept_edges, &index_of, config),
		LayoutMode::Clustered => clustered(
			&visible,
			&kept_edges,
			clusters.unwrap_or(&[]),
			collapse,
			config,
		),
	}
}

/// Ordering constraint contributed by one edge: `(before, after)` indices,
/// or `None` when the edge kind does not rank nodes.
fn layer_constraint(edge: &GraphEdge, index_of: &HashMap<&str, usize>) -> Option<(usize, usize)> {
	let s = index_of[edge.source_node.as_str()];
	let t = index_of[edge.target_node.as_str()];
	match edge.edge_type {
		// B supports A: B ranks before A.
		EdgeType::Supports => Some((s, t)),
		// X depends on Y: Y ranks before X.
		EdgeType::DependsOn => Some((t, s)),
		// Tension is symmetric; it never constrains rank.
		EdgeType::Contradicts => None,
	}
}

fn layered(
	visible: &[&GraphNode],
	kept_edges: &[&GraphEdge],
	index_of: &HashMap<&str, usize>,
	config: &LayoutConfig,
) -> LayoutResult {
	let n = visible.len();
	let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
	let mut indegree: Vec<usize> = vec![0; n];
	for edge in kept_edges {
		if let Some((before, after)) = layer_constraint(edge, index_of) {
			successors[before].push(after);
			indegree[after] += 1;
		}
	}

	// Longest-path layering via Kahn. Cycles are broken deterministically by
	// forcing the lowest-index unplaced node.
	let mut layer = vec![0usize; n];
	let mut placed = vec![false; n];
	let mut queue: Vec<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
	let mut placed_count = 0usize;

	while placed_count < n {
		if queue.is_empty() {
			let forced = (0..n).find(|&i| !placed[i]);
			if let Some(i) = forced {
				debug!("layout: breaking layering cycle at node {}", visible[i].id);
				queue.push(i);
			}
		}
		let mut head = 0;
		while head < queue.len() {
			let u = queue[head];
			head += 1;
			if placed[u] {
				continue;
			}
			placed[u] = true;
			placed_count += 1;
			for &v in &successors[u] {
				if layer[v] < layer[u] + 1 {
					layer[v] = layer[u] + 1;
				}
				indegree[v] = indegree[v].saturating_sub(1);
				if indegree[v] == 0 && !placed[v] {
					queue.push(v);
				}
			}
		}
		queue.clear();
	}

	// Gather layers; within a layer, keep input order.
	let max_layer = layer.iter().copied().max().unwrap_or(0);
	let mut by_layer: Vec<Vec<usize>> = vec![Vec::new(); max_layer + 1];
	for i in 0..n {
		by_layer[layer[i]].push(i);
	}

	let mut out = vec![None; n];
	for (rank, members) in by_layer.iter().enumerate() {
		for (slot, &i) in members.iter().enumerate() {
			let rect = Rect::new(
				slot as f64 * (config.node_width + config.h_gap),
				rank as f64 * (config.node_height + config.v_gap),
				config.node_width,
				config.node_height,
			);
			out[i] = Some(PositionedNode {
				id: visible[i].id.clone(),
				rect,
				kind: PositionedKind::Node(visible[i].clone()),
			});
		}
	}

	LayoutResult {
		nodes: out.into_iter().flatten().collect(),
		edges: kept_edges
			.iter()
			.map(|e| LayoutEdge {
				id: e.id.clone(),
				edge_type: e.edge_type,
				source: e.source_node.clone(),
				target: e.target_node.clone(),
				strength: e.strength,
			})
			.collect(),
		clusters: Vec::new(),
	}
}

/// One group on the clustered macro-grid: a backend cluster or a singleton.
struct Group {
	/// Collapse key for backend clusters; `None` for singletons.
	key: Option<ClusterKey>,
	/// Backend cluster index, for labels.
	backend_index: Option<usize>,
	/// Visible-node indices in input order.
	members: Vec<usize>,
}

fn clustered(
	visible: &[&GraphNode],
	kept_edges: &[&GraphEdge],
	clusters: &[BackendCluster],
	collapse: &CollapseState,
	config: &LayoutConfig,
) -> LayoutResult {
	// Membership: first assignment wins, so clusters partition the visible
	// set even on overlapping input.
	let mut member_of: HashMap<&str, usize> = HashMap::new();
	for (ci, cluster) in clusters.iter().enumerate() {
		for id in &cluster.node_ids {
			member_of.entry(id.as_str()).or_insert(ci);
		}
	}

	let mut groups: Vec<Group> = clusters
		.iter()
		.enumerate()
		.map(|(ci, c)| Group {
			key: Some(ClusterKey::of(c, ci)),
			backend_index: Some(ci),
			members: Vec::new(),
		})
		.collect();
	for (i, node) in visible.iter().enumerate() {
		match member_of.get(node.id.as_str()) {
			Some(&ci) => groups[ci].members.push(i),
			None => groups.push(Group {
				key: None,
				backend_index: None,
				members: vec![i],
			}),
		}
	}
	groups.retain(|g| !g.members.is_empty());

	// Sub-grid per group: members on a near-square grid, so expanded cluster
	// boxes stay contiguous for hulling.
	let cell_of = |count: usize| -> (usize, f64, f64) {
		let cols = (count as f64).sqrt().ceil().max(1.0) as usize;
		let rows = count.div_ceil(cols);
		(
			cols,
			cols as f64 * config.node_width + (cols - 1) as f64 * config.h_gap,
			rows as f64 * config.node_height + (rows - 1) as f64 * config.v_gap,
		)
	};

	// Macro-grid: groups row-major on a near-square grid, rows as tall as
	// their tallest group.
	let grid_cols = (groups.len() as f64).sqrt().ceil().max(1.0) as usize;
	let mut nodes_out: Vec<PositionedNode> = Vec::with_capacity(visible.len());
	let mut clusters_out: Vec<ClusterInfo> = Vec::new();
	// Visible node id -> super-node id, for edge redirection.
	let mut redirect: HashMap<String, String> = HashMap::new();

	let mut oy = 0.0;
	for band in groups.chunks(grid_cols) {
		let mut ox = 0.0;
		let mut band_height: f64 = 0.0;

		for group in band {
			let (cols, cell_w, cell_h) = cell_of(group.members.len());
			band_height = band_height.max(cell_h);

			let member_rect = |slot: usize| -> Rect {
				Rect::new(
					ox + (slot % cols) as f64 * (config.node_width + config.h_gap),
					oy + (slot / cols) as f64 * (config.node_height + config.v_gap),
					config.node_width,
					config.node_height,
				)
			};

			let collapsed = group
				.key
				.as_ref()
				.map(|k| collapse.is_collapsed(k))
				.unwrap_or(false);

			if collapsed {
				let key = group.key.as_ref().map(|k| k.id_string()).unwrap_or_default();
				let super_id = format!("cluster:{}", key);

				// Centroid of the members' would-be bounding boxes.
				let (mut cx, mut cy) = (0.0, 0.0);
				for (slot, _) in group.members.iter().enumerate() {
					let c = member_rect(slot).center();
					cx += c.x;
					cy += c.y;
				}
				let count = group.members.len() as f64;
				let (cx, cy) = (cx / count, cy / count);

				let width = (config.supernode_min_width
					+ config.supernode_width_per_member * group.members.len() as f64)
					.clamp(config.supernode_min_width, config.supernode_max_width);

				let mut type_counts_raw = [0usize; 4];
				for &i in &group.members {
					type_counts_raw[visible[i].node_type.index()] += 1;
				}
				let type_counts = NodeType::ALL
					.iter()
					.filter(|k| type_counts_raw[k.index()] > 0)
					.map(|&k| (k, type_counts_raw[k.index()]))
					.collect();

				for &i in &group.members {
					redirect.insert(visible[i].id.clone(), super_id.clone());
				}
				nodes_out.push(PositionedNode {
					id: super_id,
					rect: Rect::new(
						cx - width / 2.0,
						cy - config.supernode_height / 2.0,
						width,
						config.supernode_height,
					),
					kind: PositionedKind::SuperNode {
						cluster_id: key,
						node_count: group.members.len(),
						type_counts,
					},
				});
			} else {
				for (slot, &i) in group.members.iter().enumerate() {
					nodes_out.push(PositionedNode {
						id: visible[i].id.clone(),
						rect: member_rect(slot),
						kind: PositionedKind::Node(visible[i].clone()),
					});
				}

				if let (Some(key), Some(ci)) = (&group.key, group.backend_index) {
					clusters_out.push(ClusterInfo {
						id: key.id_string(),
						label: clusters[ci]
							.label
							.clone()
							.unwrap_or_else(|| format!("Cluster {}", ci + 1)),
						node_ids: group.members.iter().map(|&i| visible[i].id.clone()).collect(),
					});
				}
			}

			ox += cell_w + config.cluster_gap;
		}

		oy += band_height + config.cluster_gap;
	}

	// Redirect edges into super-nodes; elide edges fully inside one.
	let mut edges_out = Vec::with_capacity(kept_edges.len());
	for edge in kept_edges {
		let source = redirect
			.get(&edge.source_node)
			.cloned()
			.unwrap_or_else(|| edge.source_node.clone());
		let target = redirect
			.get(&edge.target_node)
			.cloned()
			.unwrap_or_else(|| edge.target_node.clone());
		if source == target {
			continue;
		}
		edges_out.push(LayoutEdge {
			id: edge.id.clone(),
			edge_type: edge.edge_type,
			source,
			target,
			strength: edge.strength,
		});
	}

	LayoutResult {
		nodes: nodes_out,
		edges: edges_out,
		clusters: clusters_out,
	}
}
