//! Graph data model: typed claim/evidence nodes, directed edges, and the
//! backend-computed cluster assignments the layout engine consumes.
//!
//! Everything here mirrors the snapshot the data-fetching layer hands over.
//! The engine never mutates these inputs; each layout invocation recomputes
//! its working set fresh from whatever snapshot it is given.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The four node kinds of an investigation graph.
///
/// A closed set: rendering color, hull tinting, and filtering all match on it
/// exhaustively, so adding a kind is a compile-time checked change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
	Claim,
	Evidence,
	Assumption,
	Tension,
}

impl NodeType {
	/// All kinds, in display order.
	pub const ALL: [NodeType; 4] = [
		NodeType::Claim,
		NodeType::Evidence,
		NodeType::Assumption,
		NodeType::Tension,
	];

	/// Stable index into per-kind tables.
	pub fn index(self) -> usize {
		match self {
			NodeType::Claim => 0,
			NodeType::Evidence => 1,
			NodeType::Assumption => 2,
			NodeType::Tension => 3,
		}
	}

	/// Human-readable label.
	pub fn label(self) -> &'static str {
		match self {
			NodeType::Claim => "Claim",
			NodeType::Evidence => "Evidence",
			NodeType::Assumption => "Assumption",
			NodeType::Tension => "Tension",
		}
	}
}

/// Node status. The meaningful subset depends on the node kind: claims are
/// supported/contested/unsubstantiated, evidence verified/disputed/unverified,
/// assumptions validated/unvalidated/challenged, tensions open/resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
	Supported,
	Contested,
	Unsubstantiated,
	Verified,
	Disputed,
	Unverified,
	Validated,
	Unvalidated,
	Challenged,
	Open,
	Resolved,
}

/// Whether a node applies to the whole project or a single case.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
	#[default]
	Project,
	Case,
}

/// A node in the investigation graph.
///
/// Created by backend extraction, mutated by user edits or agent analysis,
/// never deleted (only status-transitioned).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GraphNode {
	/// Stable identifier. Edges and clusters reference nodes by this.
	pub id: String,
	pub node_type: NodeType,
	pub status: NodeStatus,
	/// The node's text content.
	pub content: String,
	/// Open key-value bag: importance (1-3), load_bearing, severity, ...
	#[serde(default)]
	pub properties: HashMap<String, serde_json::Value>,
	/// Extraction confidence in 0.0..=1.0.
	#[serde(default)]
	pub confidence: f64,
	#[serde(default)]
	pub scope: Scope,
	/// Provenance: source document id, if extracted from one.
	#[serde(default)]
	pub source_document_id: Option<String>,
	#[serde(default)]
	pub source_document_title: Option<String>,
	#[serde(default)]
	pub source_kind: Option<String>,
}

impl GraphNode {
	/// Declared importance tier, 1 (low) to 3 (high), read from `properties`.
	/// Missing or malformed values count as medium (2).
	pub fn importance(&self) -> u8 {
		self.properties
			.get("importance")
			.and_then(|v| v.as_u64())
			.map(|v| v.clamp(1, 3) as u8)
			.unwrap_or(2)
	}
}

/// The three directed edge kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
	Supports,
	Contradicts,
	DependsOn,
}

/// A directed edge between two nodes. Multiple edges of different kinds may
/// connect the same pair; self-loops are invalid and dropped during layout.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GraphEdge {
	pub id: String,
	pub edge_type: EdgeType,
	/// Source node id. Must reference an existing node to survive layout.
	pub source_node: String,
	/// Target node id. Must reference an existing node to survive layout.
	pub target_node: String,
	/// Optional edge strength in 0.0..=1.0.
	#[serde(default)]
	pub strength: Option<f64>,
	/// Free-text provenance.
	#[serde(default)]
	pub provenance: Option<String>,
}

/// A community-detection cluster computed by the backend (Leiden). Consumed
/// as-is; the engine never recomputes membership.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BackendCluster {
	/// Member node ids. Non-empty.
	pub node_ids: Vec<String>,
	/// A member chosen by the backend as the cluster's representative.
	/// Used as the stable collapse-state key when present.
	#[serde(default)]
	pub centroid_node_id: Option<String>,
	/// Number of intra-cluster edges.
	#[serde(default)]
	pub edge_count: usize,
	/// Histogram of member kinds.
	#[serde(default)]
	pub node_types: HashMap<NodeType, usize>,
	#[serde(default)]
	pub label: Option<String>,
}

/// Cluster-quality summary produced alongside the clustering. Carried through
/// opaquely for the caller's health indicator; never consulted by layout.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClusteringQuality {
	pub modularity: f64,
	#[serde(default)]
	pub clusters: Vec<ClusterQualityEntry>,
}

/// Per-cluster quality figures.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClusterQualityEntry {
	pub conductance: f64,
	pub density: f64,
}

/// A complete graph snapshot as fetched from the backend.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GraphSnapshot {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
	/// Backend cluster assignments, when clustering has run.
	#[serde(default)]
	pub clusters: Option<Vec<BackendCluster>>,
	#[serde(default)]
	pub quality: Option<ClusteringQuality>,
}

impl Default for GraphNode {
	fn default() -> Self {
		Self {
			id: String::new(),
			node_type: NodeType::Claim,
			status: NodeStatus::Unsubstantiated,
			content: String::new(),
			properties: HashMap::new(),
			confidence: 0.0,
			scope: Scope::Project,
			source_document_id: None,
			source_document_title: None,
			source_kind: None,
		}
	}
}

/// Per-kind visibility filter applied before layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeFilter {
	visible: [bool; 4],
}

impl Default for TypeFilter {
	fn default() -> Self {
		Self { visible: [true; 4] }
	}
}

impl TypeFilter {
	/// A filter showing every kind.
	pub fn all() -> Self {
		Self::default()
	}

	/// Whether nodes of `kind` pass the filter.
	pub fn allows(&self, kind: NodeType) -> bool {
		self.visible[kind.index()]
	}

	/// Show or hide one kind.
	pub fn set(&mut self, kind: NodeType, visible: bool) {
		self.visible[kind.index()] = visible;
	}

	/// Builder-style convenience for hiding a kind.
	pub fn without(mut self, kind: NodeType) -> Self {
		self.set(kind, false);
		self
	}
}

/// A cluster as reported by the layout engine, ready for hull rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClusterInfo {
	/// Stable cluster id (centroid node id, or positional fallback).
	pub id: String,
	pub label: String,
	/// Visible member node ids, in input order.
	pub node_ids: Vec<String>,
}
