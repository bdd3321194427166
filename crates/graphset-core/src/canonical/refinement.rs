//! Color refinement with individualization.

use std::fmt::Write;

use graphset_common::types::VertexId;
use graphset_common::utils::hash::FxHashMap;

use super::CanonicalLabeler;
use super::encode;
use crate::graph::model::LogicalGraph;

/// The default [`CanonicalLabeler`].
///
/// Vertices start colored by their encoded label and properties. Colors are
/// refined by the multiset of (edge code, neighbor color) pairs on outgoing
/// and incoming edges until the partition is stable. While some color class
/// still holds more than one connected vertex, each of its members is tried
/// as the distinguished one and the search recurses. Every fully refined
/// partition orders the vertices; the label is the smallest encoding of the
/// graph over all those orders.
///
/// Isolated vertices that share a color are interchangeable and are never
/// branched on. Highly symmetric graphs still take exponential time.
#[derive(Debug, Clone, Copy)]
pub struct RefinementLabeler {
    include_head_label: bool,
}

impl RefinementLabeler {
    /// Creates a labeler that includes the graph head label.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_head_label: true,
        }
    }

    /// Leaves the graph head label out of the canonical label.
    #[must_use]
    pub fn without_head_label(mut self) -> Self {
        self.include_head_label = false;
        self
    }
}

impl Default for RefinementLabeler {
    fn default() -> Self {
        Self::new()
    }
}

impl CanonicalLabeler for RefinementLabeler {
    fn name(&self) -> &str {
        "refinement"
    }

    fn label(&self, graph: &LogicalGraph) -> String {
        let prepared = Prepared::new(graph);
        let mut best = None;
        prepared.search(prepared.initial_colors.clone(), &mut best);

        let mut out = String::new();
        if self.include_head_label {
            out.push('H');
            encode::push_str(&mut out, &graph.head().label);
        }
        out.push_str(&best.unwrap_or_default());
        out
    }
}

/// A graph reduced to dense indices and canonical element codes.
struct Prepared {
    vertex_codes: Vec<String>,
    /// Distinct edge codes in ascending order; edges refer to them by rank.
    edge_codes: Vec<String>,
    /// (source, target, edge code rank) per edge.
    edges: Vec<(usize, usize, usize)>,
    out_adj: Vec<Vec<(usize, usize)>>,
    in_adj: Vec<Vec<(usize, usize)>>,
    initial_colors: Vec<usize>,
}

impl Prepared {
    fn new(graph: &LogicalGraph) -> Self {
        let index: FxHashMap<VertexId, usize> = graph
            .vertices()
            .enumerate()
            .map(|(i, v)| (v.id, i))
            .collect();
        let vertex_codes: Vec<String> = graph
            .vertices()
            .map(|v| encode::element(&v.label, &v.properties))
            .collect();
        let initial_colors = rank(&vertex_codes);

        let raw_edge_codes: Vec<String> = graph
            .edges()
            .map(|e| encode::element(&e.label, &e.properties))
            .collect();
        let mut edge_codes = raw_edge_codes.clone();
        edge_codes.sort_unstable();
        edge_codes.dedup();

        let n = vertex_codes.len();
        let mut out_adj = vec![Vec::new(); n];
        let mut in_adj = vec![Vec::new(); n];
        let mut edges = Vec::with_capacity(raw_edge_codes.len());
        // Logical graphs guarantee both endpoints are present.
        for (edge, code) in graph.edges().zip(&raw_edge_codes) {
            let (Some(&s), Some(&t)) = (index.get(&edge.source_id), index.get(&edge.target_id))
            else {
                continue;
            };
            let r = edge_codes.binary_search(code).unwrap_or_default();
            out_adj[s].push((r, t));
            in_adj[t].push((r, s));
            edges.push((s, t, r));
        }

        Self {
            vertex_codes,
            edge_codes,
            edges,
            out_adj,
            in_adj,
            initial_colors,
        }
    }

    fn degree(&self, v: usize) -> usize {
        self.out_adj[v].len() + self.in_adj[v].len()
    }

    /// Refines a coloring until the number of classes stops growing.
    ///
    /// Each new color ranks (old color, out-signature, in-signature), so the
    /// relative order of existing classes is preserved.
    fn refine(&self, mut colors: Vec<usize>) -> Vec<usize> {
        let mut classes = class_count(&colors);
        loop {
            let signatures: Vec<_> = (0..colors.len())
                .map(|v| {
                    let mut out: Vec<_> = self.out_adj[v]
                        .iter()
                        .map(|&(r, t)| (r, colors[t]))
                        .collect();
                    out.sort_unstable();
                    let mut inc: Vec<_> = self.in_adj[v]
                        .iter()
                        .map(|&(r, s)| (r, colors[s]))
                        .collect();
                    inc.sort_unstable();
                    (colors[v], out, inc)
                })
                .collect();
            colors = rank(&signatures);
            let next = class_count(&colors);
            if next == classes {
                return colors;
            }
            classes = next;
        }
    }

    fn search(&self, colors: Vec<usize>, best: &mut Option<String>) {
        let colors = self.refine(colors);

        let mut cells: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
        for (v, &c) in colors.iter().enumerate() {
            cells.entry(c).or_default().push(v);
        }
        let target = cells
            .iter()
            .filter(|(_, members)| members.len() > 1 && self.degree(members[0]) > 0)
            .map(|(&c, _)| c)
            .min();

        let Some(cell) = target else {
            let leaf = self.encode_leaf(&colors);
            if best.as_ref().is_none_or(|b| leaf < *b) {
                *best = Some(leaf);
            }
            return;
        };

        for &chosen in &cells[&cell] {
            let individualized = colors
                .iter()
                .enumerate()
                .map(|(v, &c)| if v == chosen { 2 * c } else { 2 * c + 1 })
                .collect();
            self.search(individualized, best);
        }
    }

    fn encode_leaf(&self, colors: &[usize]) -> String {
        let mut order: Vec<usize> = (0..colors.len()).collect();
        order.sort_unstable_by_key(|&v| (colors[v], v));
        let mut position = vec![0; colors.len()];
        for (p, &v) in order.iter().enumerate() {
            position[v] = p;
        }

        let mut edges: Vec<(usize, usize, usize)> = self
            .edges
            .iter()
            .map(|&(s, t, r)| (position[s], position[t], r))
            .collect();
        edges.sort_unstable();

        let mut out = String::new();
        let _ = write!(out, "V{}[", order.len());
        for &v in &order {
            out.push_str(&self.vertex_codes[v]);
        }
        let _ = write!(out, "]E{}[", edges.len());
        for (s, t, r) in edges {
            let _ = write!(out, "{s}>{t}:");
            out.push_str(&self.edge_codes[r]);
        }
        out.push(']');
        out
    }
}

/// Replaces each key by its rank among the distinct keys.
fn rank<K: Ord>(keys: &[K]) -> Vec<usize> {
    let mut sorted: Vec<&K> = keys.iter().collect();
    sorted.sort_unstable();
    sorted.dedup();
    keys.iter()
        .map(|k| sorted.binary_search(&k).unwrap_or_default())
        .collect()
}

fn class_count(colors: &[usize]) -> usize {
    let mut distinct = colors.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    distinct.len()
}
