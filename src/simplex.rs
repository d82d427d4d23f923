use crate::{
  space::{Point, PointCloud},
  Dim, VertexIdx,
};

use itertools::Itertools;

/// A nonempty set of vertices, stored in increasing order.
///
/// The sorted vertex list is the canonical form, so equality, hashing and the
/// (lexicographic) ordering only depend on the vertex set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Simplex {
  vertices: Vec<VertexIdx>,
}

impl Simplex {
  /// Sorts and deduplicates `vertices`. Returns `None` if nothing is left.
  pub fn new(mut vertices: Vec<VertexIdx>) -> Option<Self> {
    vertices.sort_unstable();
    vertices.dedup();
    (!vertices.is_empty()).then_some(Self { vertices })
  }
  pub fn single(vertex: VertexIdx) -> Self {
    Self {
      vertices: vec![vertex],
    }
  }
  /// Caller guarantees `vertices` is nonempty and strictly increasing.
  pub(crate) fn from_sorted(vertices: Vec<VertexIdx>) -> Self {
    debug_assert!(!vertices.is_empty());
    debug_assert!(vertices.iter().tuple_windows().all(|(a, b)| a < b));
    Self { vertices }
  }

  pub fn dim(&self) -> Dim {
    self.vertices.len() - 1
  }
  pub fn nvertices(&self) -> usize {
    self.vertices.len()
  }
  pub fn vertices(&self) -> &[VertexIdx] {
    &self.vertices
  }
  pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, VertexIdx>> {
    self.vertices.iter().copied()
  }
  pub fn contains(&self, vertex: VertexIdx) -> bool {
    self.vertices.binary_search(&vertex).is_ok()
  }

  /// All subsimplicies of dimension `dim_sub`, in lexicographic order.
  pub fn subsimps(&self, dim_sub: Dim) -> impl Iterator<Item = Simplex> + '_ {
    self
      .vertices
      .iter()
      .copied()
      .combinations(dim_sub + 1)
      .map(Simplex::from_sorted)
  }

  /// The facets, each obtained by dropping exactly one vertex.
  ///
  /// Yields `nvertices` simplicies, the `i`-th misses the `i`-th vertex.
  /// A vertex has no boundary.
  pub fn boundary(&self) -> impl Iterator<Item = Simplex> + '_ {
    let n = if self.dim() == 0 { 0 } else { self.nvertices() };
    (0..n).map(move |iskip| {
      let mut vertices = self.vertices.clone();
      vertices.remove(iskip);
      Simplex::from_sorted(vertices)
    })
  }

  pub fn is_subsimp_of(&self, other: &Self) -> bool {
    self.nvertices() <= other.nvertices() && self.iter().all(|v| other.contains(v))
  }

  pub fn points<'a>(&'a self, cloud: &'a PointCloud) -> impl Iterator<Item = &'a Point> + 'a {
    self.iter().map(|v| cloud.point(v))
  }
  pub fn names<'a>(&self, cloud: &'a PointCloud) -> Vec<&'a str> {
    self.iter().map(|v| cloud.point(v).name()).collect()
  }
}

impl std::ops::Index<usize> for Simplex {
  type Output = VertexIdx;
  fn index(&self, index: usize) -> &Self::Output {
    &self.vertices[index]
  }
}

impl<const N: usize> From<[VertexIdx; N]> for Simplex {
  /// # Panics
  /// If `N == 0`.
  fn from(value: [VertexIdx; N]) -> Self {
    assert!(N > 0, "A simplex needs at least one vertex.");
    let mut vertices = value.to_vec();
    vertices.sort_unstable();
    vertices.dedup();
    Self { vertices }
  }
}

pub fn nsubsimplicies(dim: Dim, dim_sub: Dim) -> usize {
  num_integer::binomial(dim + 1, dim_sub + 1)
}
