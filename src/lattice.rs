//! Downward closure of the maximal simplicies and the incidence between faces.

use crate::{
  error::{ComplexError, ComplexResult},
  simplex::Simplex,
  Dim,
};

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use std::collections::BTreeSet;

/// Maps every face of one dimension to the faces one dimension lower it contains.
pub type Incidence = IndexMap<Simplex, Vec<Simplex>>;

/// All faces of a simplicial complex, graded by dimension.
///
/// Each skeleton is sorted lexicographically and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceLattice {
  skeletons: Vec<Vec<Simplex>>,
}

impl FaceLattice {
  /// Takes every nonempty subset of every simplex, merging shared faces.
  pub fn new(simplices: &[Simplex]) -> Self {
    let nskeletons = simplices.iter().map(Simplex::nvertices).max().unwrap_or(0);
    let mut skeletons = vec![BTreeSet::new(); nskeletons];
    for simp in simplices {
      for (dim_sub, skeleton) in skeletons.iter_mut().enumerate().take(simp.nvertices()) {
        skeleton.extend(simp.subsimps(dim_sub));
      }
    }
    let skeletons: Vec<Vec<Simplex>> = skeletons
      .into_iter()
      .map(|skeleton| skeleton.into_iter().collect())
      .collect();

    tracing::debug!(
      nfaces = ?skeletons.iter().map(Vec::len).collect_vec(),
      "built face lattice"
    );
    Self { skeletons }
  }

  /// `None` for the empty lattice.
  pub fn dim(&self) -> Option<Dim> {
    self.skeletons.len().checked_sub(1)
  }
  pub fn skeletons(&self) -> &[Vec<Simplex>] {
    &self.skeletons
  }

  /// The faces of dimension `dim`, empty above the lattice dimension.
  pub fn skeleton(&self, dim: Dim) -> &[Simplex] {
    self.skeletons.get(dim).map(Vec::as_slice).unwrap_or(&[])
  }

  /// All faces, ordered by dimension first.
  pub fn faces(&self) -> impl Iterator<Item = &Simplex> + '_ {
    self.skeletons.iter().flatten()
  }
  pub fn nfaces(&self) -> usize {
    self.skeletons.iter().map(Vec::len).sum()
  }
  pub fn into_faces(self) -> Vec<Simplex> {
    self.skeletons.into_iter().flatten().collect()
  }

  /// Incidence from the `dim_sup`-faces to the `(dim_sup-1)`-faces.
  ///
  /// # Panics
  /// If `dim_sup == 0`.
  pub fn incidence(&self, dim_sup: Dim) -> Incidence {
    assert!(dim_sup > 0, "Vertices have no incident faces.");
    let sups = self.skeleton(dim_sup);
    let subs: IndexSet<&Simplex> = self.skeleton(dim_sup - 1).iter().collect();
    incidence_map(sups, |face| subs.contains(face))
  }
}

/// The union of all nonempty subsets of `simplices`, ordered by dimension first.
pub fn faces(simplices: &[Simplex]) -> Vec<Simplex> {
  FaceLattice::new(simplices).into_faces()
}

/// The faces with exactly `dim + 1` vertices, sorted.
pub fn faces_with_dim(simplices: &[Simplex], dim: Dim) -> Vec<Simplex> {
  simplices
    .iter()
    .filter(|simp| simp.dim() >= dim)
    .flat_map(|simp| simp.subsimps(dim))
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

/// Which of `lower` each of `higher` contains.
///
/// A lower face is incident to a higher face iff dropping exactly one vertex
/// of the higher face yields it. Every higher face gets an entry, possibly empty.
/// All faces of `higher` must have one dimension more than all faces of `lower`.
pub fn incidence(higher: &[Simplex], lower: &[Simplex]) -> ComplexResult<Incidence> {
  let dim_sup = uniform_dim(higher, "higher")?;
  let dim_sub = uniform_dim(lower, "lower")?;
  match (dim_sup, dim_sub) {
    (Some(0), _) => {
      return Err(ComplexError::invalid_argument(
        "vertices have no lower dimensional faces",
      ))
    }
    (Some(sup), Some(sub)) if sup != sub + 1 => {
      return Err(ComplexError::invalid_argument(format!(
        "faces of dimension {sup} and {sub} are not one dimension apart"
      )))
    }
    _ => {}
  }

  let lower: IndexSet<&Simplex> = lower.iter().collect();
  Ok(incidence_map(higher, |face| lower.contains(face)))
}

fn incidence_map(sups: &[Simplex], is_sub: impl Fn(&Simplex) -> bool) -> Incidence {
  sups
    .iter()
    .map(|sup| {
      let subs = sup.boundary().filter(|sub| is_sub(sub)).collect();
      (sup.clone(), subs)
    })
    .collect()
}

fn uniform_dim(faces: &[Simplex], which: &str) -> ComplexResult<Option<Dim>> {
  match faces.iter().map(Simplex::dim).dedup().at_most_one() {
    Ok(dim) => Ok(dim),
    Err(_) => Err(ComplexError::invalid_argument(format!(
      "{which} faces have mixed dimensions"
    ))),
  }
}

#[cfg(test)]
mod test {
  use super::{faces, faces_with_dim, incidence, FaceLattice};
  use crate::{error::ComplexError, simplex::Simplex};

  use std::collections::HashSet;

  #[test]
  fn shared_faces_once() {
    let simplices = [Simplex::from([0, 1, 2]), Simplex::from([1, 2, 3])];
    let lattice = FaceLattice::new(&simplices);
    assert_eq!(lattice.dim(), Some(2));
    assert_eq!(lattice.skeleton(0).len(), 4);
    assert_eq!(lattice.skeleton(1).len(), 5);
    assert_eq!(lattice.skeleton(2).len(), 2);
    assert!(lattice.skeleton(3).is_empty());
    assert_eq!(lattice.nfaces(), 11);

    let all = faces(&simplices);
    let unique: HashSet<_> = all.iter().collect();
    assert_eq!(all.len(), unique.len());
  }

  #[test]
  fn graded_partition() {
    let simplices = [
      Simplex::from([0, 1, 2, 3]),
      Simplex::from([3, 4]),
      Simplex::from([2, 4, 5]),
      Simplex::single(6),
    ];
    let all = faces(&simplices);
    let mut recovered = Vec::new();
    for dim in 0..=4 {
      let with_dim = faces_with_dim(&simplices, dim);
      assert!(with_dim.iter().all(|f| f.dim() == dim));
      recovered.extend(with_dim);
    }
    assert_eq!(recovered, all);
  }

  #[test]
  fn incidence_drops_one_vertex() {
    let higher = [Simplex::from([0, 1, 2]), Simplex::from([1, 2, 3])];
    let lower = [
      Simplex::from([0, 1]),
      Simplex::from([1, 2]),
      Simplex::from([2, 3]),
    ];
    let map = incidence(&higher, &lower).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(
      map[&Simplex::from([0, 1, 2])],
      [Simplex::from([1, 2]), Simplex::from([0, 1])]
    );
    assert_eq!(
      map[&Simplex::from([1, 2, 3])],
      [Simplex::from([2, 3]), Simplex::from([1, 2])]
    );
  }

  #[test]
  fn incidence_keeps_unmatched() {
    let higher = [Simplex::from([5, 6])];
    let lower = [Simplex::single(0)];
    let map = incidence(&higher, &lower).unwrap();
    assert!(map[&Simplex::from([5, 6])].is_empty());
  }

  #[test]
  fn incidence_rejects_dims() {
    let tri = [Simplex::from([0, 1, 2])];
    let verts = [Simplex::single(0)];
    assert!(matches!(
      incidence(&tri, &verts),
      Err(ComplexError::InvalidArgument(_))
    ));
    let mixed = [Simplex::from([0, 1]), Simplex::single(2)];
    assert!(matches!(
      incidence(&tri, &mixed),
      Err(ComplexError::InvalidArgument(_))
    ));
    assert!(matches!(
      incidence(&verts, &[]),
      Err(ComplexError::InvalidArgument(_))
    ));
  }

  #[test]
  fn lattice_incidence_bound() {
    let simplices = [Simplex::from([0, 1, 2, 3, 4])];
    let lattice = FaceLattice::new(&simplices);
    for dim_sup in 1..=4 {
      let map = lattice.incidence(dim_sup);
      assert_eq!(map.len(), lattice.skeleton(dim_sup).len());
      for (sup, subs) in &map {
        assert_eq!(subs.len(), dim_sup + 1);
        assert!(subs.iter().all(|sub| sub.is_subsimp_of(sup)));
      }
    }
  }
}
