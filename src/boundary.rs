//! Boundary operators with GF(2) coefficients.

use crate::{
  error::ComplexResult,
  gf2::Gf2Matrix,
  lattice::{self, FaceLattice, Incidence},
  simplex::Simplex,
  Dim,
};

use indexmap::IndexSet;

/// $diff_(n+1): C_(n+1) -> C_n$ as a matrix.
///
/// Rows are the `n`-faces and columns the `(n+1)`-faces, both sorted.
/// An entry is one iff the row face is a facet of the column face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryOperator {
  degree: Dim,
  matrix: Gf2Matrix,
  rows: Vec<Simplex>,
  cols: Vec<Simplex>,
}

impl BoundaryOperator {
  /// The operator whose rows are the `degree`-faces of `lattice`.
  pub fn from_lattice(lattice: &FaceLattice, degree: Dim) -> Self {
    let rows = lattice.skeleton(degree).to_vec();
    let incidence = lattice.incidence(degree + 1);
    Self::assemble(degree, rows, incidence)
  }

  /// The operator between two explicit sets of faces one dimension apart.
  ///
  /// Repeated faces are kept once, at their first occurrence.
  pub fn from_faces(lower: Vec<Simplex>, higher: &[Simplex]) -> ComplexResult<Self> {
    let lower: Vec<Simplex> = lower.into_iter().collect::<IndexSet<_>>().into_iter().collect();
    let incidence = lattice::incidence(higher, &lower)?;
    let degree = lower
      .first()
      .map(Simplex::dim)
      .or_else(|| higher.first().map(|f| f.dim() - 1))
      .unwrap_or(0);
    Ok(Self::assemble(degree, lower, incidence))
  }

  fn assemble(degree: Dim, rows: Vec<Simplex>, incidence: Incidence) -> Self {
    let row_idxs: IndexSet<&Simplex> = rows.iter().collect();
    let mut matrix = Gf2Matrix::zeros(rows.len(), incidence.len());
    for (icol, subs) in incidence.values().enumerate() {
      for sub in subs {
        if let Some(irow) = row_idxs.get_index_of(sub) {
          matrix.set(irow, icol, true);
        }
      }
    }
    let cols = incidence.into_keys().collect();

    tracing::trace!(degree, shape = ?matrix.shape(), "assembled boundary operator");
    Self {
      degree,
      matrix,
      rows,
      cols,
    }
  }

  pub fn degree(&self) -> Dim {
    self.degree
  }
  pub fn matrix(&self) -> &Gf2Matrix {
    &self.matrix
  }
  pub fn rows(&self) -> &[Simplex] {
    &self.rows
  }
  pub fn cols(&self) -> &[Simplex] {
    &self.cols
  }
  pub fn row_face(&self, irow: usize) -> &Simplex {
    &self.rows[irow]
  }
  pub fn col_face(&self, icol: usize) -> &Simplex {
    &self.cols[icol]
  }
  pub fn into_parts(self) -> (Gf2Matrix, Vec<Simplex>, Vec<Simplex>) {
    (self.matrix, self.rows, self.cols)
  }

  pub fn rank(&self) -> usize {
    self.matrix.rank()
  }
}
