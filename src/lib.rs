//! Vietoris-Rips complexes of finite point clouds.
//!
//! Points closer than epsilon get connected, the maximal cliques of the
//! resulting graph are the maximal simplicies, and their downward closure is
//! the complex. From there the boundary operators over GF(2) and the low
//! degree Betti numbers are computed.
//!
//! ```
//! use ripscomplex::{PointCloud, VietorisRipsComplex};
//!
//! let cloud = PointCloud::from_coords(vec![
//!   vec![0.0, 0.0],
//!   vec![1.0, 0.0],
//!   vec![1.0, 1.0],
//!   vec![0.0, 1.0],
//! ])?;
//! let mut complex = VietorisRipsComplex::euclidean(cloud, 1.2)?;
//! assert_eq!(complex.find_maximal_simplices().len(), 4);
//! assert_eq!(complex.betti_1(), 1);
//! # Ok::<(), ripscomplex::ComplexError>(())
//! ```

extern crate nalgebra as na;

pub mod boundary;
pub mod clique;
pub mod complex;
pub mod error;
pub mod gf2;
pub mod graph;
pub mod homology;
pub mod lattice;
pub mod simplex;
pub mod space;

pub use complex::VietorisRipsComplex;
pub use error::{ComplexError, ComplexResult};
pub use simplex::Simplex;
pub use space::{Euclidean, Metric, Point, PointCloud};

pub type Dim = usize;
pub type VertexIdx = usize;
