//! # crossgrid: orthogonal linked-list sparse matrices for grids
//!
//! crossgrid stores a two-dimensional grid of tagged cells (walls, entries,
//! numbered cells and a few special tiles of a maze or board) without
//! allocating a dense array.
//!
//! ## Overview
//!
//! The matrix is an orthogonal linked list:
//!
//! - A **row header list** and a **column header list**, each kept in ascending
//!   id order, with every header pointing at the first stored cell of its row or
//!   column.
//! - **Nodes** that sit on one row chain (ordered by column through
//!   `left`/`right` links) and one column chain (ordered by row through
//!   `up`/`down` links) at the same time.
//!
//! Only inserted cells consume storage, lookups cost time proportional to row
//! occupancy, and both rows and columns can be walked in order.
//!
//! ## Usage
//!
//! ```
//! use crossgrid::SparseMatrix;
//!
//! let mut maze = SparseMatrix::new(1);
//! maze.insert(0, 0, 'E').unwrap();
//! maze.insert(0, 2, '*').unwrap();
//! maze.insert(1, 1, 'C').unwrap();
//!
//! let row: Vec<_> = maze.traverse_row(0).map(|n| (n.y(), n.tag())).collect();
//! assert_eq!(row, vec![(0, 'E'), (2, '*')]);
//! assert_eq!(maze.get(1, 1), Some('C'));
//! assert_eq!(maze.get(0, 1), None);
//! ```
//!
//! The structure can be exported as a Graphviz graph for visual debugging:
//!
//! ```
//! use crossgrid::{SparseMatrix, GraphRenderer};
//!
//! let mut maze = SparseMatrix::new(1);
//! maze.insert(0, 0, 'E').unwrap();
//!
//! let dot = GraphRenderer::default().render_to_string(&maze).unwrap();
//! assert!(dot.contains("N0_0[label=\"E\""));
//! ```
//!
//! ## Threading
//!
//! All operations are synchronous and run to completion. Insertion and removal
//! take `&mut self`, so a traversal can never observe a chain being rewired.
//! Share a matrix across threads behind your own lock.

pub mod error;
pub mod matrix;
pub mod render;
pub mod utils;

// Re-export primary components
pub use error::{Axis, MatrixError, Result};
pub use matrix::{CellKind, Cells, Header, HeaderList, Node, NodeId, SparseMatrix};
pub use render::{to_dot, GraphRenderer, Palette, RenderConfig, TagStyle};
pub use utils::{to_dense, to_sprs_csc, to_sprs_csr};

/// Version information for the crossgrid library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
