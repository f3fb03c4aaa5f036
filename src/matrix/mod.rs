// Matrix data structures and operations

pub mod header;
pub mod node;
pub mod sparse;

pub(crate) use header::HeaderId;
pub use header::{Header, HeaderList, HeaderRef, Headers};
pub use node::{CellKind, Node, NodeId};
pub use sparse::{Cells, SparseMatrix};
