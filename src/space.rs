//! Points, point clouds and the metrics between them.

use crate::{
  error::{ComplexError, ComplexResult},
  Dim, VertexIdx,
};

use itertools::Itertools;

/// A named point in $RR^d$.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
  name: String,
  coords: na::DVector<f64>,
}
impl Point {
  pub fn new(name: impl Into<String>, coords: impl Into<Vec<f64>>) -> Self {
    Self {
      name: name.into(),
      coords: na::DVector::from_vec(coords.into()),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }
  pub fn coords(&self) -> &na::DVector<f64> {
    &self.coords
  }
  pub fn dim(&self) -> Dim {
    self.coords.len()
  }

  /// Bit patterns of the coordinates, usable as a hash key.
  fn coord_key(&self) -> Vec<u64> {
    // adding 0.0 normalizes -0.0 to 0.0
    self.coords.iter().map(|&c| (c + 0.0).to_bits()).collect()
  }
}

impl std::fmt::Display for Point {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name)
  }
}

/// Distance between two points.
///
/// Must be nonnegative and symmetric. The triangle inequality is not needed
/// for the construction itself, only for its topological interpretation.
pub trait Metric {
  fn distance(&self, a: &Point, b: &Point) -> f64;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Euclidean;
impl Metric for Euclidean {
  fn distance(&self, a: &Point, b: &Point) -> f64 {
    (a.coords() - b.coords()).norm()
  }
}

impl<F> Metric for F
where
  F: Fn(&Point, &Point) -> f64,
{
  fn distance(&self, a: &Point, b: &Point) -> f64 {
    self(a, b)
  }
}

/// A nonempty collection of points with unique names and a common dimension.
///
/// Points are kept sorted by name, so the vertex index of a point
/// orders the same way as its name.
#[derive(Debug, Clone)]
pub struct PointCloud {
  points: Vec<Point>,
}

impl PointCloud {
  pub fn new(points: Vec<Point>) -> ComplexResult<Self> {
    let points = sorted_unique_names(points)?;
    if let Some(dup) = points.iter().duplicates_by(|p| p.coord_key()).next() {
      return Err(ComplexError::invalid_input(format!(
        "duplicate coordinates {:?} (point `{}`)",
        dup.coords().as_slice(),
        dup.name()
      )));
    }
    Ok(Self { points })
  }

  /// Like [`Self::new`], but allows points with coinciding coordinates.
  pub fn new_unvalidated(points: Vec<Point>) -> ComplexResult<Self> {
    let points = sorted_unique_names(points)?;
    let ncoincident = points.iter().duplicates_by(|p| p.coord_key()).count();
    if ncoincident > 0 {
      tracing::warn!(ncoincident, "point cloud contains coinciding coordinates");
    }
    Ok(Self { points })
  }

  /// Pairs `names` with `coords`, prepending `prefix` to every name.
  pub fn from_list<S: AsRef<str>>(
    names: &[S],
    coords: Vec<Vec<f64>>,
    prefix: &str,
  ) -> ComplexResult<Self> {
    if names.len() != coords.len() {
      return Err(ComplexError::invalid_input(format!(
        "{} names for {} coordinate vectors",
        names.len(),
        coords.len()
      )));
    }
    let points = names
      .iter()
      .zip(coords)
      .map(|(name, coords)| Point::new(format!("{prefix}{}", name.as_ref()), coords))
      .collect();
    Self::new(points)
  }

  /// Names the points `0, 1, ...` in the given order, zero-padded to a
  /// common width so vertex `i` is the `i`-th coordinate vector.
  pub fn from_coords(coords: Vec<Vec<f64>>) -> ComplexResult<Self> {
    let width = coords.len().saturating_sub(1).to_string().len();
    let points = coords
      .into_iter()
      .enumerate()
      .map(|(i, coords)| Point::new(format!("{i:0width$}"), coords))
      .collect();
    Self::new(points)
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }
  /// Always `false`, construction rejects empty clouds.
  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }
  /// Dimension of the ambient space.
  pub fn dim(&self) -> Dim {
    self.points[0].dim()
  }

  pub fn points(&self) -> &[Point] {
    &self.points
  }
  pub fn point(&self, ivertex: VertexIdx) -> &Point {
    &self.points[ivertex]
  }
  pub fn iter(&self) -> std::slice::Iter<'_, Point> {
    self.points.iter()
  }

  pub fn vertex_of(&self, name: &str) -> Option<VertexIdx> {
    self
      .points
      .binary_search_by(|p| p.name.as_str().cmp(name))
      .ok()
  }
}

/// Checks nonemptiness, a common dimension and unique names, then sorts by name.
fn sorted_unique_names(mut points: Vec<Point>) -> ComplexResult<Vec<Point>> {
  if points.is_empty() {
    return Err(ComplexError::invalid_input("point set cannot be empty"));
  }
  let dim = points[0].dim();
  if let Some(p) = points.iter().find(|p| p.dim() != dim) {
    return Err(ComplexError::invalid_input(format!(
      "point `{}` has dimension {}, expected {dim}",
      p.name(),
      p.dim()
    )));
  }

  points.sort_by(|a, b| a.name.cmp(&b.name));
  if let Some((a, _)) = points.iter().tuple_windows().find(|(a, b)| a.name == b.name) {
    return Err(ComplexError::invalid_input(format!(
      "duplicate point name `{}`",
      a.name()
    )));
  }
  Ok(points)
}

impl<'a> IntoIterator for &'a PointCloud {
  type Item = &'a Point;
  type IntoIter = std::slice::Iter<'a, Point>;
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

#[cfg(test)]
mod test {
  use super::{Euclidean, Metric, Point, PointCloud};
  use crate::error::ComplexError;

  use approx::assert_relative_eq;

  #[test]
  fn euclidean_distance() {
    let a = Point::new("a", [0.0, 0.0]);
    let b = Point::new("b", [3.0, 4.0]);
    assert_relative_eq!(Euclidean.distance(&a, &b), 5.0);
    assert_relative_eq!(Euclidean.distance(&b, &a), 5.0);
    assert_relative_eq!(Euclidean.distance(&a, &a), 0.0);
  }

  #[test]
  fn closure_metric() {
    let manhattan = |a: &Point, b: &Point| (a.coords() - b.coords()).abs().sum();
    let a = Point::new("a", [0.0, 0.0]);
    let b = Point::new("b", [3.0, -4.0]);
    assert_relative_eq!(manhattan.distance(&a, &b), 7.0);
  }

  #[test]
  fn sorted_by_name() {
    let cloud = PointCloud::new(vec![
      Point::new("c", [2.0]),
      Point::new("a", [0.0]),
      Point::new("b", [1.0]),
    ])
    .unwrap();
    let names: Vec<_> = cloud.iter().map(|p| p.name()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(cloud.vertex_of("b"), Some(1));
    assert_eq!(cloud.vertex_of("z"), None);
  }

  #[test]
  fn rejects_bad_input() {
    assert!(matches!(
      PointCloud::new(vec![]),
      Err(ComplexError::InvalidInput(_))
    ));
    assert!(matches!(
      PointCloud::new(vec![Point::new("a", [0.0]), Point::new("a", [1.0])]),
      Err(ComplexError::InvalidInput(_))
    ));
    assert!(matches!(
      PointCloud::new(vec![Point::new("a", [0.0]), Point::new("b", [-0.0])]),
      Err(ComplexError::InvalidInput(_))
    ));
    assert!(matches!(
      PointCloud::new(vec![Point::new("a", [0.0]), Point::new("b", [1.0, 0.0])]),
      Err(ComplexError::InvalidInput(_))
    ));
  }

  #[test]
  fn unvalidated_allows_coinciding() {
    let coinciding = vec![Point::new("a", [0.0]), Point::new("b", [0.0])];
    assert!(PointCloud::new(coinciding.clone()).is_err());
    let cloud = PointCloud::new_unvalidated(coinciding).unwrap();
    assert_eq!(cloud.len(), 2);

    let same_name = vec![Point::new("a", [0.0]), Point::new("a", [1.0])];
    assert!(PointCloud::new_unvalidated(same_name).is_err());
  }

  #[test]
  fn from_list_and_coords() {
    let cloud = PointCloud::from_list(&["x", "y"], vec![vec![0.0], vec![1.0]], "p").unwrap();
    assert_eq!(cloud.point(0).name(), "px");
    assert_eq!(cloud.point(1).name(), "py");
    assert!(PointCloud::from_list(&["x"], vec![vec![0.0], vec![1.0]], "").is_err());

    let cloud = PointCloud::from_coords(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
    assert_eq!(cloud.dim(), 2);
    assert_eq!(cloud.point(0).name(), "0");
  }

  #[test]
  fn from_coords_keeps_input_order() {
    let coords = (0..12).map(|i| vec![i as f64]).collect();
    let cloud = PointCloud::from_coords(coords).unwrap();
    assert_eq!(cloud.point(2).name(), "02");
    assert_eq!(cloud.point(11).name(), "11");
    for (i, p) in cloud.iter().enumerate() {
      assert_eq!(p.coords()[0], i as f64);
    }
  }
}
