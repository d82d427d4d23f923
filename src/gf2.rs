//! Dense matrices over the two element field.
//!
//! Addition is XOR. Entries are stored as `0u8`/`1u8` in an nalgebra matrix,
//! all mutations keep them binary.

use crate::error::{ComplexError, ComplexResult};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gf2Matrix {
  entries: na::DMatrix<u8>,
}

impl Gf2Matrix {
  pub fn zeros(nrows: usize, ncols: usize) -> Self {
    Self {
      entries: na::DMatrix::zeros(nrows, ncols),
    }
  }
  pub fn identity(n: usize) -> Self {
    Self {
      entries: na::DMatrix::identity(n, n),
    }
  }

  /// Builds a matrix from equally long rows of zeros and ones.
  pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> ComplexResult<Self> {
    let nrows = rows.len();
    let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
    let mut matrix = Self::zeros(nrows, ncols);
    for (irow, row) in rows.iter().enumerate() {
      matrix.set_row(irow, row.as_ref())?;
    }
    Ok(matrix)
  }

  pub fn nrows(&self) -> usize {
    self.entries.nrows()
  }
  pub fn ncols(&self) -> usize {
    self.entries.ncols()
  }
  pub fn shape(&self) -> (usize, usize) {
    self.entries.shape()
  }
  pub fn as_nalgebra(&self) -> &na::DMatrix<u8> {
    &self.entries
  }

  pub fn get(&self, irow: usize, icol: usize) -> bool {
    self.entries[(irow, icol)] == 1
  }
  pub fn set(&mut self, irow: usize, icol: usize, value: bool) {
    self.entries[(irow, icol)] = u8::from(value);
  }

  pub fn row(&self, irow: usize) -> Vec<u8> {
    self.entries.row(irow).iter().copied().collect()
  }
  pub fn col(&self, icol: usize) -> Vec<u8> {
    self.entries.column(icol).iter().copied().collect()
  }

  pub fn set_row(&mut self, irow: usize, values: &[u8]) -> ComplexResult<()> {
    check_vector(values, self.ncols(), "row")?;
    for (icol, &v) in values.iter().enumerate() {
      self.entries[(irow, icol)] = v;
    }
    Ok(())
  }
  pub fn set_col(&mut self, icol: usize, values: &[u8]) -> ComplexResult<()> {
    check_vector(values, self.nrows(), "column")?;
    for (irow, &v) in values.iter().enumerate() {
      self.entries[(irow, icol)] = v;
    }
    Ok(())
  }

  pub fn is_zero_row(&self, irow: usize) -> bool {
    self.entries.row(irow).iter().all(|&v| v == 0)
  }
  pub fn is_zero(&self) -> bool {
    self.entries.iter().all(|&v| v == 0)
  }
  pub fn count_ones(&self) -> usize {
    self.entries.iter().filter(|&&v| v == 1).count()
  }

  /// `row[target] += row[source]` (mod 2).
  pub fn add_row_into(&mut self, target: usize, source: usize) {
    for icol in 0..self.ncols() {
      let v = self.entries[(source, icol)];
      self.entries[(target, icol)] ^= v;
    }
  }
  /// `col[target] += col[source]` (mod 2).
  pub fn add_col_into(&mut self, target: usize, source: usize) {
    for irow in 0..self.nrows() {
      let v = self.entries[(irow, source)];
      self.entries[(irow, target)] ^= v;
    }
  }

  pub fn swap_rows(&mut self, a: usize, b: usize) {
    self.entries.swap_rows(a, b);
  }
  pub fn swap_cols(&mut self, a: usize, b: usize) {
    self.entries.swap_columns(a, b);
  }

  pub fn transpose(&self) -> Self {
    Self {
      entries: self.entries.transpose(),
    }
  }

  /// Tries to get a one onto the diagonal entry `(i, i)`.
  ///
  /// Fails right away if row `i` is zero. Otherwise succeeds if the entry
  /// already is one, or after swapping in the first row below `i` with a one
  /// in column `i`, or else the first column right of `i` with a one in row `i`.
  /// Rows and columns before `i` are never touched.
  ///
  /// # Panics
  /// If `i` is not a diagonal index.
  pub fn ensure_nonzero_diagonal(&mut self, i: usize) -> bool {
    assert!(
      i < self.nrows().min(self.ncols()),
      "{i} is not a diagonal index of a {}x{} matrix.",
      self.nrows(),
      self.ncols()
    );

    if self.is_zero_row(i) {
      return false;
    }
    if self.get(i, i) {
      return true;
    }
    if let Some(irow) = (i + 1..self.nrows()).find(|&r| self.get(r, i)) {
      self.swap_rows(i, irow);
      return true;
    }
    if let Some(icol) = (i + 1..self.ncols()).find(|&c| self.get(i, c)) {
      self.swap_cols(i, icol);
      return true;
    }
    false
  }

  /// Moves any one of the trailing block `[i.., i..]` to `(i, i)`.
  fn pivot_from_trailing(&mut self, i: usize) -> bool {
    let pivot = (i..self.nrows())
      .flat_map(|r| (i..self.ncols()).map(move |c| (r, c)))
      .find(|&(r, c)| self.get(r, c));
    match pivot {
      Some((r, c)) => {
        self.swap_rows(i, r);
        self.swap_cols(i, c);
        true
      }
      None => false,
    }
  }

  /// Gauss-Jordan elimination in place, returning the rank.
  ///
  /// Afterwards the leading block is an identity of size rank, the pivot
  /// columns are cleared outside their pivot. Columns are not cleared beyond
  /// that, so this is no Smith normal form, but the rank is exact.
  /// Clone first to keep the original.
  pub fn reduce_to_row_echelon(&mut self) -> usize {
    let ndiag = self.nrows().min(self.ncols());
    for d in 0..ndiag {
      // A zero row `d` doesn't mean column `d` is done, rows below may still pivot.
      if !self.ensure_nonzero_diagonal(d) && !self.pivot_from_trailing(d) {
        break;
      }
      for irow in 0..self.nrows() {
        if irow != d && self.get(irow, d) {
          self.add_row_into(irow, d);
        }
      }
    }
    let rank = (0..ndiag).filter(|&d| self.get(d, d)).count();
    tracing::trace!(
      nrows = self.nrows(),
      ncols = self.ncols(),
      rank,
      "reduced gf2 matrix"
    );
    rank
  }

  pub fn rank(&self) -> usize {
    self.clone().reduce_to_row_echelon()
  }
}

fn check_vector(values: &[u8], expected: usize, what: &str) -> ComplexResult<()> {
  if values.len() != expected {
    return Err(ComplexError::invalid_argument(format!(
      "{what} of length {} given, expected {expected}",
      values.len()
    )));
  }
  if let Some(v) = values.iter().find(|&&v| v > 1) {
    return Err(ComplexError::invalid_argument(format!(
      "{what} entry {v} is not in GF(2)"
    )));
  }
  Ok(())
}

impl fmt::Display for Gf2Matrix {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for irow in 0..self.nrows() {
      let row = self.entries.row(irow);
      let mut entries = row.iter();
      if let Some(first) = entries.next() {
        write!(f, "{first}")?;
      }
      for v in entries {
        write!(f, " {v}")?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::Gf2Matrix;
  use crate::error::ComplexError;

  #[test]
  fn row_addition_self_inverse() {
    let mut m = Gf2Matrix::from_rows(&[[1u8, 0, 1, 1], [0, 1, 1, 0], [1, 1, 0, 0]]).unwrap();
    let original = m.clone();
    m.add_row_into(0, 2);
    assert_eq!(m.row(0), [0, 1, 1, 1]);
    m.add_row_into(0, 2);
    assert_eq!(m, original);

    m.add_col_into(3, 1);
    assert_eq!(m.col(3), [1, 1, 1]);
    m.add_col_into(3, 1);
    assert_eq!(m, original);
  }

  #[test]
  fn checked_rows_and_cols() {
    let mut m = Gf2Matrix::zeros(2, 3);
    m.set_row(1, &[1, 0, 1]).unwrap();
    m.set_col(1, &[1, 1]).unwrap();
    assert_eq!(m.row(0), [0, 1, 0]);
    assert_eq!(m.row(1), [1, 1, 1]);
    assert!(matches!(
      m.set_row(0, &[1, 0]),
      Err(ComplexError::InvalidArgument(_))
    ));
    assert!(matches!(
      m.set_col(0, &[1, 2]),
      Err(ComplexError::InvalidArgument(_))
    ));
    assert!(Gf2Matrix::from_rows(&[vec![1u8, 0], vec![1]]).is_err());
    assert_eq!(m.to_string(), "0 1 0\n1 1 1\n");
  }

  #[test]
  fn nonzero_diagonal() {
    let mut m = Gf2Matrix::from_rows(&[[1u8, 0], [0, 0]]).unwrap();
    assert!(m.ensure_nonzero_diagonal(0));
    assert!(!m.ensure_nonzero_diagonal(1));

    // row swap
    let mut m = Gf2Matrix::from_rows(&[[0u8, 1, 0], [0, 0, 1], [1, 0, 0]]).unwrap();
    assert!(m.ensure_nonzero_diagonal(0));
    assert_eq!(m.row(0), [1, 0, 0]);
    assert_eq!(m.row(2), [0, 1, 0]);

    // column swap
    let mut m = Gf2Matrix::from_rows(&[[0u8, 0, 1], [0, 1, 0]]).unwrap();
    assert!(m.ensure_nonzero_diagonal(0));
    assert_eq!(m.row(0), [1, 0, 0]);
    assert_eq!(m.row(1), [0, 1, 0]);

    // zero row fails even with a one below
    let mut m = Gf2Matrix::from_rows(&[[0u8, 0], [1, 0]]).unwrap();
    assert!(!m.ensure_nonzero_diagonal(0));
  }

  #[test]
  fn rank() {
    assert_eq!(Gf2Matrix::identity(4).rank(), 4);
    assert_eq!(Gf2Matrix::zeros(3, 5).rank(), 0);
    assert_eq!(Gf2Matrix::zeros(0, 0).rank(), 0);
    assert_eq!(Gf2Matrix::from_rows(&[[0u8, 0], [1, 0]]).unwrap().rank(), 1);
    // 1+1 = 0 makes these dependent over GF(2)
    assert_eq!(
      Gf2Matrix::from_rows(&[[1u8, 1, 0], [0, 1, 1], [1, 0, 1]])
        .unwrap()
        .rank(),
      2
    );
    assert_eq!(
      Gf2Matrix::from_rows(&[[1u8, 1, 0, 0], [1, 1, 0, 0], [0, 0, 1, 1]])
        .unwrap()
        .rank(),
      2
    );
  }

  #[test]
  fn reduction_in_place() {
    let mut m = Gf2Matrix::from_rows(&[[0u8, 1, 1], [1, 1, 0], [1, 0, 1]]).unwrap();
    let rank = m.reduce_to_row_echelon();
    assert_eq!(rank, 2);
    assert!(m.get(0, 0) && m.get(1, 1) && !m.get(2, 2));
    assert!(m.is_zero_row(2));
    assert_eq!(m.rank(), 2);
    assert_eq!(m.transpose().rank(), 2);
  }
}
