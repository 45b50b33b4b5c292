//! Projection: a node/edge view of a store for layout and rendering.
//!
//! Every triple becomes one edge labeled by its predicate. Identifier
//! objects are entity nodes; literal objects are leaf nodes with incoming
//! degree only. The projection is a pure derivation: disposable, recomputed
//! whenever the source store changes, never authoritative.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use super::Term;
use super::store::GraphStore;

/// What a projection node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// An entity identified by a canonical identifier.
    Entity,
    /// A literal leaf value.
    Literal,
}

/// One node of the projection, with degree annotations.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionNode {
    /// Display label: the rendered identifier, or the literal's lexical form.
    pub label: String,
    /// Entity or literal leaf.
    pub kind: NodeKind,
    /// Number of incoming edges.
    pub in_degree: usize,
    /// Number of outgoing edges. Always zero for literal leaves.
    pub out_degree: usize,
}

/// One directed edge of the projection.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionEdge {
    /// Label of the source node.
    pub from: String,
    /// Label of the target node.
    pub to: String,
    /// The predicate the edge was projected from.
    pub label: String,
}

/// A derived (nodes, edges) view of a store.
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    /// Every subject, identifier object, and literal leaf, in first-appearance order.
    pub nodes: Vec<ProjectionNode>,
    /// One edge per triple, in store order.
    pub edges: Vec<ProjectionEdge>,
}

/// Project a store into a node/edge view.
pub fn project(store: &GraphStore) -> Projection {
    let mut graph: DiGraph<(String, NodeKind), String> = DiGraph::new();
    let mut index: HashMap<(NodeKind, String), NodeIndex> = HashMap::new();

    let mut ensure = |graph: &mut DiGraph<(String, NodeKind), String>,
                      kind: NodeKind,
                      label: String| {
        *index
            .entry((kind, label.clone()))
            .or_insert_with(|| graph.add_node((label, kind)))
    };

    for triple in store.triples() {
        let from = ensure(&mut graph, NodeKind::Entity, triple.subject.to_string());
        let (kind, label) = match &triple.object {
            Term::Id(id) => (NodeKind::Entity, id.to_string()),
            Term::Lit(lit) => (NodeKind::Literal, lit.lexical().to_string()),
        };
        let to = ensure(&mut graph, kind, label);
        graph.add_edge(from, to, triple.predicate.to_string());
    }

    let nodes = graph
        .node_indices()
        .map(|ix| {
            let (label, kind) = &graph[ix];
            ProjectionNode {
                label: label.clone(),
                kind: *kind,
                in_degree: graph.edges_directed(ix, Direction::Incoming).count(),
                out_degree: graph.edges_directed(ix, Direction::Outgoing).count(),
            }
        })
        .collect();

    let edges = graph
        .edge_references()
        .map(|e| ProjectionEdge {
            from: graph[e.source()].0.clone(),
            to: graph[e.target()].0.clone(),
            label: e.weight().clone(),
        })
        .collect();

    Projection { nodes, edges }
}

impl Projection {
    /// Render the projection as Graphviz DOT text for an external layout
    /// sink. Literal leaves are drawn as boxes.
    pub fn to_dot(&self) -> String {
        let mut graph: DiGraph<&ProjectionNode, &str> = DiGraph::new();
        let mut index: HashMap<(NodeKind, &str), NodeIndex> = HashMap::new();
        for node in &self.nodes {
            index.insert((node.kind, node.label.as_str()), graph.add_node(node));
        }
        for edge in &self.edges {
            // Edge endpoints resolve to the entity node when both an entity
            // and a literal share a label; sources are entities by construction.
            let from = index
                .get(&(NodeKind::Entity, edge.from.as_str()))
                .or_else(|| index.get(&(NodeKind::Literal, edge.from.as_str())));
            let to = index
                .get(&(NodeKind::Literal, edge.to.as_str()))
                .filter(|_| !index.contains_key(&(NodeKind::Entity, edge.to.as_str())))
                .or_else(|| index.get(&(NodeKind::Entity, edge.to.as_str())));
            if let (Some(&from), Some(&to)) = (from, to) {
                graph.add_edge(from, to, edge.label.as_str());
            }
        }

        format!(
            "{}",
            Dot::with_attr_getters(
                &graph,
                &[Config::NodeNoLabel, Config::EdgeNoLabel],
                &|_, e| format!("label = {:?}", e.weight()),
                &|_, (_, node)| match node.kind {
                    NodeKind::Entity => format!("label = {:?}", node.label),
                    NodeKind::Literal => format!("label = {:?}, shape = box", node.label),
                },
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Literal, Triple};
    use crate::ident::{Namespace, canonicalize};

    fn ns(prefix: &str) -> Namespace {
        Namespace::new(prefix).unwrap()
    }

    fn sample_store() -> GraphStore {
        let fda = ns("fda");
        let chem = ns("chem");
        let mut store = GraphStore::new("sample", fda.clone());
        let widget = canonicalize(&fda, "Widget A").unwrap();
        let compound = canonicalize(&chem, "CHEMBL25").unwrap();
        store.insert(Triple::new(
            widget.clone(),
            canonicalize(&fda, "recallingFirm").unwrap(),
            Literal::text("Acme"),
        ));
        store.insert(Triple::new(
            widget.clone(),
            canonicalize(&fda, "eventDate").unwrap(),
            Literal::text("2024-05-01"),
        ));
        store.insert(Triple::new(
            widget,
            canonicalize(&fda, "relatedTo").unwrap(),
            compound.clone(),
        ));
        store.insert(Triple::new(
            compound,
            canonicalize(&chem, "alogp").unwrap(),
            Literal::number("1.31"),
        ));
        store
    }

    #[test]
    fn every_triple_becomes_one_edge() {
        let store = sample_store();
        let projection = project(&store);
        assert_eq!(projection.edges.len(), store.len());
    }

    #[test]
    fn nodes_cover_subjects_objects_and_literals() {
        let projection = project(&sample_store());
        let labels: Vec<&str> = projection.nodes.iter().map(|n| n.label.as_str()).collect();
        assert!(labels.contains(&"fda_Widget_A"));
        assert!(labels.contains(&"chem_CHEMBL25"));
        assert!(labels.contains(&"Acme"));
        assert!(labels.contains(&"1.31"));
        assert_eq!(projection.nodes.len(), 5);
    }

    #[test]
    fn literal_leaves_have_incoming_degree_only() {
        let projection = project(&sample_store());
        let acme = projection
            .nodes
            .iter()
            .find(|n| n.label == "Acme")
            .unwrap();
        assert_eq!(acme.kind, NodeKind::Literal);
        assert_eq!(acme.in_degree, 1);
        assert_eq!(acme.out_degree, 0);
    }

    #[test]
    fn identifier_objects_keep_their_outgoing_edges() {
        let projection = project(&sample_store());
        let compound = projection
            .nodes
            .iter()
            .find(|n| n.label == "chem_CHEMBL25")
            .unwrap();
        assert_eq!(compound.kind, NodeKind::Entity);
        assert_eq!(compound.in_degree, 1);
        assert_eq!(compound.out_degree, 1);
    }

    #[test]
    fn edges_carry_predicate_labels() {
        let projection = project(&sample_store());
        let bridge = projection
            .edges
            .iter()
            .find(|e| e.to == "chem_CHEMBL25")
            .unwrap();
        assert_eq!(bridge.from, "fda_Widget_A");
        assert_eq!(bridge.label, "fda_relatedTo");
    }

    #[test]
    fn projection_is_reproducible() {
        let store = sample_store();
        let a = project(&store);
        let b = project(&store);
        let labels = |p: &Projection| {
            p.nodes
                .iter()
                .map(|n| n.label.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(labels(&a), labels(&b));
        assert_eq!(a.edges.len(), b.edges.len());
    }

    #[test]
    fn empty_store_projects_to_nothing() {
        let store = GraphStore::new("empty", ns("fda"));
        let projection = project(&store);
        assert!(projection.nodes.is_empty());
        assert!(projection.edges.is_empty());
    }

    #[test]
    fn dot_output_contains_labels_and_shapes() {
        let projection = project(&sample_store());
        let dot = projection.to_dot();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("fda_Widget_A"));
        assert!(dot.contains("shape = box"));
    }

    #[test]
    fn repeated_literal_values_share_one_node() {
        let fda = ns("fda");
        let mut store = GraphStore::new("dup", fda.clone());
        store.insert(Triple::new(
            canonicalize(&fda, "Widget A").unwrap(),
            canonicalize(&fda, "recallingFirm").unwrap(),
            Literal::text("Acme"),
        ));
        store.insert(Triple::new(
            canonicalize(&fda, "Widget B").unwrap(),
            canonicalize(&fda, "recallingFirm").unwrap(),
            Literal::text("Acme"),
        ));

        let projection = project(&store);
        let acme_nodes: Vec<_> = projection
            .nodes
            .iter()
            .filter(|n| n.label == "Acme")
            .collect();
        assert_eq!(acme_nodes.len(), 1);
        assert_eq!(acme_nodes[0].in_degree, 2);
    }
}
