//! Maximal simplicies of a Vietoris-Rips complex as maximal cliques of its graph.

use crate::{graph::ProximityGraph, simplex::Simplex, Dim, VertexIdx};

use std::collections::BTreeSet;

/// All maximal cliques of `graph`, sorted lexicographically.
///
/// Bron-Kerbosch with Tomita pivoting. Every maximal clique is reported
/// exactly once and isolated vertices come out as singletons.
/// Exponential in the worst case.
pub fn maximal_simplices(graph: &ProximityGraph) -> Vec<Simplex> {
  let mut simplices = Vec::new();
  let mut clique = Vec::new();
  let candidates = graph.vertices().collect();
  bron_kerbosch(
    graph,
    &mut clique,
    candidates,
    BTreeSet::new(),
    &mut simplices,
  );
  simplices.sort_unstable();
  simplices
}

fn bron_kerbosch(
  graph: &ProximityGraph,
  clique: &mut Vec<VertexIdx>,
  mut candidates: BTreeSet<VertexIdx>,
  mut excluded: BTreeSet<VertexIdx>,
  simplices: &mut Vec<Simplex>,
) {
  let Some(pivot) = candidates
    .union(&excluded)
    .copied()
    .max_by_key(|&u| graph.neighbors(u).intersection(&candidates).count())
  else {
    // nothing left to add and nothing excluded: the clique is maximal
    simplices.extend(Simplex::new(clique.clone()));
    return;
  };
  if candidates.is_empty() {
    return;
  }

  let branches: Vec<_> = candidates
    .difference(graph.neighbors(pivot))
    .copied()
    .collect();
  for v in branches {
    let neighbors = graph.neighbors(v);
    clique.push(v);
    bron_kerbosch(
      graph,
      clique,
      candidates.intersection(neighbors).copied().collect(),
      excluded.intersection(neighbors).copied().collect(),
      simplices,
    );
    clique.pop();
    candidates.remove(&v);
    excluded.insert(v);
  }
}

/// Largest dimension among `simplices`, `None` if there are none.
pub fn complex_dim(simplices: &[Simplex]) -> Option<Dim> {
  simplices.iter().map(Simplex::dim).max()
}

#[cfg(test)]
mod test {
  use super::maximal_simplices;
  use crate::{
    graph::ProximityGraph,
    simplex::Simplex,
    space::{Euclidean, PointCloud},
  };

  fn graph(coords: Vec<Vec<f64>>, epsilon: f64) -> ProximityGraph {
    let cloud = PointCloud::from_coords(coords).unwrap();
    ProximityGraph::build(&cloud, epsilon, &Euclidean).unwrap()
  }

  #[test]
  fn isolated_vertices() {
    let g = graph(vec![vec![0.0], vec![5.0], vec![10.0]], 1.0);
    assert_eq!(
      maximal_simplices(&g),
      [Simplex::single(0), Simplex::single(1), Simplex::single(2)]
    );
  }

  #[test]
  fn path() {
    let g = graph(vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]], 1.5);
    assert_eq!(
      maximal_simplices(&g),
      [
        Simplex::from([0, 1]),
        Simplex::from([1, 2]),
        Simplex::from([2, 3])
      ]
    );
  }

  #[test]
  fn complete() {
    let g = graph(
      vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
      f64::INFINITY,
    );
    assert_eq!(maximal_simplices(&g), [Simplex::from([0, 1, 2, 3])]);
  }

  #[test]
  fn square_cycle() {
    // side 1, diagonal ~1.414
    let g = graph(
      vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0]],
      1.2,
    );
    assert_eq!(
      maximal_simplices(&g),
      [
        Simplex::from([0, 1]),
        Simplex::from([0, 3]),
        Simplex::from([1, 2]),
        Simplex::from([2, 3])
      ]
    );
  }

  #[test]
  fn maximality() {
    let coords = (0..9)
      .map(|i| {
        let t = i as f64 * 0.7;
        vec![t.cos() * (1.0 + 0.1 * i as f64), t.sin()]
      })
      .collect();
    let g = graph(coords, 1.1);
    let simplices = maximal_simplices(&g);
    for (i, a) in simplices.iter().enumerate() {
      for u in a.iter() {
        for v in a.iter().filter(|&v| v != u) {
          assert!(g.has_edge(u, v));
        }
      }
      for (j, b) in simplices.iter().enumerate() {
        if i != j {
          assert!(!a.is_subsimp_of(b));
        }
      }
    }
    for v in g.vertices() {
      assert!(simplices.iter().any(|s| s.contains(v)));
    }
  }
}
