//! Betti numbers with GF(2) coefficients.
//!
//! Degree 0 and 1 come from the 1-skeleton in closed form: $beta_0$ counts the
//! connected components and $beta_1 = beta_0 + |E| - |V|$ is the cyclomatic
//! number of the graph. Higher degrees would need the ranks of consecutive
//! boundary operators and are not provided.

use crate::{
  error::{ComplexError, ComplexResult},
  graph::ProximityGraph,
  Dim,
};

/// The graph level Betti numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BettiNumbers {
  pub betti_0: usize,
  pub betti_1: usize,
}

impl BettiNumbers {
  pub fn of_graph(graph: &ProximityGraph) -> Self {
    let betti_0 = betti_0(graph);
    Self {
      betti_0,
      betti_1: cyclomatic_number(graph, betti_0),
    }
  }

  /// $chi = beta_0 - beta_1 = |V| - |E|$
  pub fn euler_characteristic(&self) -> i64 {
    self.betti_0 as i64 - self.betti_1 as i64
  }
}

pub fn betti_0(graph: &ProximityGraph) -> usize {
  graph.ncomponents()
}

pub fn betti_1(graph: &ProximityGraph) -> usize {
  cyclomatic_number(graph, betti_0(graph))
}

fn cyclomatic_number(graph: &ProximityGraph, ncomponents: usize) -> usize {
  // a spanning forest has |V| - beta_0 edges, so this never underflows
  ncomponents + graph.nedges() - graph.nvertices()
}

pub fn nth_betti_number(graph: &ProximityGraph, n: Dim) -> ComplexResult<usize> {
  match n {
    0 => Ok(betti_0(graph)),
    1 => Ok(betti_1(graph)),
    n => Err(ComplexError::UnsupportedOperation(format!(
      "Betti number of degree {n}, only degrees 0 and 1 are computed"
    ))),
  }
}
