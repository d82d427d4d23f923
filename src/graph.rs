//! The proximity graph underlying a Vietoris-Rips complex.

use crate::{
  error::{ComplexError, ComplexResult},
  space::{Metric, PointCloud},
  VertexIdx,
};

use std::collections::BTreeSet;

pub type Edge = (VertexIdx, VertexIdx);

/// Undirected simple graph on the vertices `0..nvertices`.
///
/// Adjacency sets are ordered, so every traversal is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityGraph {
  adjacency: Vec<BTreeSet<VertexIdx>>,
  nedges: usize,
  epsilon: f64,
}

pub fn validate_epsilon(epsilon: f64) -> ComplexResult<()> {
  // also rejects NaN
  if !(epsilon > 0.0) {
    return Err(ComplexError::invalid_input(format!(
      "epsilon has to be greater than 0, got {epsilon}"
    )));
  }
  Ok(())
}

impl ProximityGraph {
  /// Connects every pair of distinct points closer than `epsilon`.
  ///
  /// The comparison is strict: points exactly `epsilon` apart stay unconnected.
  pub fn build(cloud: &PointCloud, epsilon: f64, metric: &impl Metric) -> ComplexResult<Self> {
    validate_epsilon(epsilon)?;
    let mut graph = Self {
      adjacency: vec![BTreeSet::new(); cloud.len()],
      nedges: 0,
      epsilon,
    };
    graph.add_proximity_edges(cloud, metric);
    Ok(graph)
  }

  /// Replaces all edges by the ones for `epsilon`, keeping the vertices.
  pub fn rebuild_edges(
    &mut self,
    cloud: &PointCloud,
    epsilon: f64,
    metric: &impl Metric,
  ) -> ComplexResult<()> {
    validate_epsilon(epsilon)?;
    if cloud.len() != self.nvertices() {
      return Err(ComplexError::invalid_argument(format!(
        "graph has {} vertices but the point cloud has {} points",
        self.nvertices(),
        cloud.len()
      )));
    }
    self.clear_edges();
    self.epsilon = epsilon;
    self.add_proximity_edges(cloud, metric);
    Ok(())
  }

  fn add_proximity_edges(&mut self, cloud: &PointCloud, metric: &impl Metric) {
    let points = cloud.points();
    for (i, p) in points.iter().enumerate() {
      for (j, q) in points.iter().enumerate().skip(i + 1) {
        if metric.distance(p, q) < self.epsilon {
          self.add_edge(i, j);
        }
      }
    }
    tracing::debug!(
      npoints = self.nvertices(),
      nedges = self.nedges,
      epsilon = self.epsilon,
      "built proximity graph"
    );
  }

  /// Returns `true` if the edge wasn't present before.
  ///
  /// # Panics
  /// On a self loop or an out of range vertex.
  pub fn add_edge(&mut self, u: VertexIdx, v: VertexIdx) -> bool {
    assert_ne!(u, v, "Proximity graphs have no self loops.");
    let inserted = self.adjacency[u].insert(v);
    self.adjacency[v].insert(u);
    if inserted {
      self.nedges += 1;
    }
    inserted
  }

  /// Returns `true` if the edge was present. Removing a missing edge is a no-op.
  pub fn remove_edge(&mut self, u: VertexIdx, v: VertexIdx) -> bool {
    if u >= self.nvertices() || v >= self.nvertices() {
      return false;
    }
    let removed = self.adjacency[u].remove(&v);
    self.adjacency[v].remove(&u);
    if removed {
      self.nedges -= 1;
    }
    removed
  }

  pub fn clear_edges(&mut self) {
    self.adjacency.iter_mut().for_each(BTreeSet::clear);
    self.nedges = 0;
  }

  pub fn epsilon(&self) -> f64 {
    self.epsilon
  }
  pub fn nvertices(&self) -> usize {
    self.adjacency.len()
  }
  pub fn nedges(&self) -> usize {
    self.nedges
  }
  pub fn vertices(&self) -> std::ops::Range<VertexIdx> {
    0..self.nvertices()
  }
  pub fn has_edge(&self, u: VertexIdx, v: VertexIdx) -> bool {
    self.adjacency.get(u).is_some_and(|adj| adj.contains(&v))
  }
  pub fn neighbors(&self, v: VertexIdx) -> &BTreeSet<VertexIdx> {
    &self.adjacency[v]
  }
  pub fn degree(&self, v: VertexIdx) -> usize {
    self.adjacency[v].len()
  }

  /// All edges `(u, v)` with `u < v`, in lexicographic order.
  pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
    self
      .adjacency
      .iter()
      .enumerate()
      .flat_map(|(u, adj)| adj.range(u + 1..).map(move |&v| (u, v)))
  }

  /// The connected components, each sorted, ordered by their smallest vertex.
  pub fn connected_components(&self) -> Vec<Vec<VertexIdx>> {
    let mut forest = UnionFind::new(self.nvertices());
    for (u, v) in self.edges() {
      forest.union(u, v);
    }

    let mut components: Vec<Vec<VertexIdx>> = Vec::new();
    let mut component_of_root: Vec<Option<usize>> = vec![None; self.nvertices()];
    for v in self.vertices() {
      let root = forest.find(v);
      match component_of_root[root] {
        Some(icomp) => components[icomp].push(v),
        None => {
          component_of_root[root] = Some(components.len());
          components.push(vec![v]);
        }
      }
    }
    components
  }

  pub fn ncomponents(&self) -> usize {
    let mut forest = UnionFind::new(self.nvertices());
    self.edges().for_each(|(u, v)| forest.union(u, v));
    self.vertices().filter(|&v| forest.find(v) == v).count()
  }
}

struct UnionFind {
  parent: Vec<usize>,
  rank: Vec<usize>,
}
impl UnionFind {
  fn new(n: usize) -> Self {
    Self {
      parent: (0..n).collect(),
      rank: vec![0; n],
    }
  }

  fn find(&mut self, mut i: usize) -> usize {
    while self.parent[i] != i {
      self.parent[i] = self.parent[self.parent[i]];
      i = self.parent[i];
    }
    i
  }

  fn union(&mut self, x: usize, y: usize) {
    let rx = self.find(x);
    let ry = self.find(y);
    if rx == ry {
      return;
    }
    match self.rank[rx].cmp(&self.rank[ry]) {
      std::cmp::Ordering::Less => self.parent[rx] = ry,
      std::cmp::Ordering::Greater => self.parent[ry] = rx,
      std::cmp::Ordering::Equal => {
        self.parent[ry] = rx;
        self.rank[rx] += 1;
      }
    }
  }
}
