//! The Vietoris-Rips complex of a point cloud at a fixed scale.

use crate::{
  boundary::BoundaryOperator,
  clique,
  error::{ComplexError, ComplexResult},
  gf2::Gf2Matrix,
  graph::ProximityGraph,
  homology::{self, BettiNumbers},
  lattice::{FaceLattice, Incidence},
  simplex::Simplex,
  space::{Euclidean, Metric, PointCloud},
  Dim,
};

use std::collections::BTreeMap;

/// Owns the point cloud and everything derived from it for one epsilon.
///
/// The graph is always present. Maximal simplicies, the face lattice and the
/// boundary operators are computed on request and cached, `None` or absent
/// meaning not (yet) computed. Changing epsilon drops all of them.
///
/// The maximal simplicies have to be found explicitly before any face or
/// boundary query, otherwise those fail with [`ComplexError::NotYetComputed`].
#[derive(Clone)]
pub struct VietorisRipsComplex<M: Metric = Euclidean> {
  cloud: PointCloud,
  metric: M,
  graph: ProximityGraph,
  simplices: Option<Vec<Simplex>>,
  lattice: Option<FaceLattice>,
  boundaries: BTreeMap<Dim, BoundaryOperator>,
}

impl VietorisRipsComplex<Euclidean> {
  pub fn euclidean(cloud: PointCloud, epsilon: f64) -> ComplexResult<Self> {
    Self::new(cloud, epsilon, Euclidean)
  }
}

impl<M: Metric> VietorisRipsComplex<M> {
  /// Builds the proximity graph right away.
  pub fn new(cloud: PointCloud, epsilon: f64, metric: M) -> ComplexResult<Self> {
    let graph = ProximityGraph::build(&cloud, epsilon, &metric)?;
    Ok(Self {
      cloud,
      metric,
      graph,
      simplices: None,
      lattice: None,
      boundaries: BTreeMap::new(),
    })
  }

  pub fn cloud(&self) -> &PointCloud {
    &self.cloud
  }
  pub fn metric(&self) -> &M {
    &self.metric
  }
  pub fn graph(&self) -> &ProximityGraph {
    &self.graph
  }
  pub fn epsilon(&self) -> f64 {
    self.graph.epsilon()
  }
  pub fn npoints(&self) -> usize {
    self.cloud.len()
  }
  pub fn nedges(&self) -> usize {
    self.graph.nedges()
  }

  /// Rebuilds all edges for `epsilon` and drops every derived structure.
  ///
  /// On an invalid `epsilon` nothing changes.
  pub fn change_epsilon(&mut self, epsilon: f64) -> ComplexResult<()> {
    self
      .graph
      .rebuild_edges(&self.cloud, epsilon, &self.metric)?;
    self.simplices = None;
    self.lattice = None;
    self.boundaries.clear();
    Ok(())
  }

  /// Computes the maximal simplicies on first call, then returns the cached ones.
  pub fn find_maximal_simplices(&mut self) -> &[Simplex] {
    let graph = &self.graph;
    self.simplices.get_or_insert_with(|| {
      let simplices = clique::maximal_simplices(graph);
      tracing::debug!(
        nsimplices = simplices.len(),
        dim = clique::complex_dim(&simplices),
        "found maximal simplices"
      );
      simplices
    })
  }

  pub fn maximal_simplices(&self) -> ComplexResult<&[Simplex]> {
    self
      .simplices
      .as_deref()
      .ok_or(ComplexError::NotYetComputed {
        what: "maximal simplices",
      })
  }

  /// Largest maximal simplex size minus one.
  pub fn complex_dimension(&self) -> ComplexResult<Dim> {
    let simplices = self.maximal_simplices()?;
    Ok(clique::complex_dim(simplices).unwrap_or(0))
  }

  pub fn face_lattice(&mut self) -> ComplexResult<&FaceLattice> {
    ensure_lattice(&self.simplices, &mut self.lattice)
  }

  /// All faces, ordered by dimension first.
  pub fn faces(&mut self) -> ComplexResult<impl Iterator<Item = &Simplex> + '_> {
    Ok(self.face_lattice()?.faces())
  }

  pub fn faces_with_dim(&mut self, dim: Dim) -> ComplexResult<&[Simplex]> {
    Ok(self.face_lattice()?.skeleton(dim))
  }

  /// Incidence from the `dim_sup`-faces to the `(dim_sup-1)`-faces.
  pub fn incidence(&mut self, dim_sup: Dim) -> ComplexResult<Incidence> {
    if dim_sup == 0 {
      return Err(ComplexError::invalid_argument(
        "vertices have no lower dimensional faces",
      ));
    }
    Ok(self.face_lattice()?.incidence(dim_sup))
  }

  /// The boundary operator with the `n`-faces as rows, cached per `n`.
  pub fn boundary_operator(&mut self, n: Dim) -> ComplexResult<&BoundaryOperator> {
    let lattice = ensure_lattice(&self.simplices, &mut self.lattice)?;
    Ok(
      self
        .boundaries
        .entry(n)
        .or_insert_with(|| BoundaryOperator::from_lattice(lattice, n)),
    )
  }

  /// The matrix of [`Self::boundary_operator`] together with its row and column faces.
  pub fn boundary_matrix(
    &mut self,
    n: Dim,
  ) -> ComplexResult<(Gf2Matrix, Vec<Simplex>, Vec<Simplex>)> {
    Ok(self.boundary_operator(n)?.clone().into_parts())
  }

  pub fn boundary_rank(&mut self, n: Dim) -> ComplexResult<usize> {
    Ok(self.boundary_operator(n)?.rank())
  }

  pub fn betti_0(&self) -> usize {
    homology::betti_0(&self.graph)
  }
  pub fn betti_1(&self) -> usize {
    homology::betti_1(&self.graph)
  }
  pub fn betti_numbers(&self) -> BettiNumbers {
    BettiNumbers::of_graph(&self.graph)
  }
  /// Fails with [`ComplexError::UnsupportedOperation`] for `n >= 2`.
  pub fn nth_betti_number(&self, n: Dim) -> ComplexResult<usize> {
    homology::nth_betti_number(&self.graph, n)
  }
}

fn ensure_lattice<'a>(
  simplices: &Option<Vec<Simplex>>,
  lattice: &'a mut Option<FaceLattice>,
) -> ComplexResult<&'a FaceLattice> {
  let simplices = simplices
    .as_deref()
    .ok_or(ComplexError::NotYetComputed { what: "faces" })?;
  Ok(lattice.get_or_insert_with(|| FaceLattice::new(simplices)))
}

impl<M: Metric> std::fmt::Debug for VietorisRipsComplex<M> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("VietorisRipsComplex")
      .field("epsilon", &self.epsilon())
      .field("npoints", &self.npoints())
      .field("nedges", &self.nedges())
      .field("simplices", &self.simplices.as_ref().map(Vec::len))
      .field("lattice", &self.lattice.as_ref().map(FaceLattice::nfaces))
      .field("boundaries", &self.boundaries.keys().collect::<Vec<_>>())
      .finish()
  }
}
