//! Utilities for converting the linked matrix to external library formats
//!
//! Cell tags become `u32` code points in the `sprs` exports so the compressed
//! matrices can be handled with ordinary numeric tooling.
//!
//! Every export allocates along the matrix extent rather than the stored
//! cells, so a single far cell can ask for an enormous buffer. Shapes are
//! checked against [`MAX_EXPORT_DIM`] and [`MAX_DENSE_CELLS`] first and
//! rejected with [`MatrixError::ExportTooLarge`].

use log::warn;
use ndarray::Array2;
use sprs::CsMat;

use crate::error::{MatrixError, Result};
use crate::matrix::SparseMatrix;
use crate::utils::exclusive_scan;

/// Largest compressed axis (rows for CSR, columns for CSC) an sprs export
/// will allocate pointers for
pub const MAX_EXPORT_DIM: usize = 1 << 24;

/// Largest `rows * cols` a dense export will allocate
pub const MAX_DENSE_CELLS: usize = 1 << 24;

/// Dimensions covering every declared row and column
///
/// Headers are sorted, so the last header of each list holds the largest id.
/// Ids never exceed `isize::MAX`, so the `+ 1` cannot overflow.
pub fn extent(matrix: &SparseMatrix) -> (usize, usize) {
    let n_rows = matrix.row_headers().last().map_or(0, |h| h.id() + 1);
    let n_cols = matrix.column_headers().last().map_or(0, |h| h.id() + 1);
    (n_rows, n_cols)
}

fn check_shape(rows: usize, cols: usize, compressed: usize, limit: usize) -> Result<()> {
    let fits = rows.checked_mul(cols).is_some() && compressed <= limit;
    if !fits {
        warn!("refusing {}x{} export (limit {})", rows, cols, limit);
        return Err(MatrixError::ExportTooLarge { rows, cols, limit });
    }
    Ok(())
}

/// Converts the matrix to sprs CsMat in CSR format, built from the row chains
///
/// # Errors
///
/// Returns [`MatrixError::ExportTooLarge`] when the row count exceeds
/// [`MAX_EXPORT_DIM`] or the shape's element count overflows `usize`.
pub fn to_sprs_csr(matrix: &SparseMatrix) -> Result<CsMat<u32>> {
    let (n_rows, n_cols) = extent(matrix);
    check_shape(n_rows, n_cols, n_rows, MAX_EXPORT_DIM)?;

    let mut row_counts = vec![0; n_rows];
    for header in matrix.row_headers() {
        row_counts[header.id()] = header.len();
    }
    let indptr = exclusive_scan(&row_counts);

    // Row-major walk visits columns in ascending order within each row
    let mut indices = Vec::with_capacity(matrix.nnz());
    let mut data = Vec::with_capacity(matrix.nnz());
    for node in matrix.iter() {
        indices.push(node.y());
        data.push(u32::from(node.tag()));
    }

    Ok(CsMat::new((n_rows, n_cols), indptr, indices, data))
}

/// Converts the matrix to sprs CsMat in CSC format, built from the column chains
///
/// # Errors
///
/// Returns [`MatrixError::ExportTooLarge`] when the column count exceeds
/// [`MAX_EXPORT_DIM`] or the shape's element count overflows `usize`.
pub fn to_sprs_csc(matrix: &SparseMatrix) -> Result<CsMat<u32>> {
    let (n_rows, n_cols) = extent(matrix);
    check_shape(n_rows, n_cols, n_cols, MAX_EXPORT_DIM)?;

    let mut col_counts = vec![0; n_cols];
    for header in matrix.column_headers() {
        col_counts[header.id()] = header.len();
    }
    let indptr = exclusive_scan(&col_counts);

    let mut indices = Vec::with_capacity(matrix.nnz());
    let mut data = Vec::with_capacity(matrix.nnz());
    for header in matrix.column_headers() {
        for node in matrix.traverse_column(header.id()) {
            indices.push(node.x());
            data.push(u32::from(node.tag()));
        }
    }

    Ok(CsMat::new_csc((n_rows, n_cols), indptr, indices, data))
}

/// Dense view of the grid, `None` where no cell is stored
///
/// # Errors
///
/// Returns [`MatrixError::ExportTooLarge`] when `rows * cols` overflows or
/// exceeds [`MAX_DENSE_CELLS`].
pub fn to_dense(matrix: &SparseMatrix) -> Result<Array2<Option<char>>> {
    let (n_rows, n_cols) = extent(matrix);
    let cells = n_rows.checked_mul(n_cols).unwrap_or(usize::MAX);
    check_shape(n_rows, n_cols, cells, MAX_DENSE_CELLS)?;

    let mut dense = Array2::from_elem((n_rows, n_cols), None);
    for node in matrix.iter() {
        dense[[node.x(), node.y()]] = Some(node.tag());
    }
    Ok(dense)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseMatrix {
        // [E . *]
        // [. C .]
        let mut matrix = SparseMatrix::new(0);
        matrix.insert(0, 0, 'E').unwrap();
        matrix.insert(0, 2, '*').unwrap();
        matrix.insert(1, 1, 'C').unwrap();
        matrix
    }

    #[test]
    fn test_extent() {
        assert_eq!(extent(&SparseMatrix::new(0)), (0, 0));
        assert_eq!(extent(&sample()), (2, 3));
    }

    #[test]
    fn test_csr_structure() {
        let csr = to_sprs_csr(&sample()).unwrap();
        assert!(csr.is_csr());
        assert_eq!(csr.shape(), (2, 3));
        assert_eq!(csr.indptr().raw_storage(), &[0, 2, 3]);
        assert_eq!(csr.indices(), &[0, 2, 1]);
        assert_eq!(csr.data(), &[u32::from('E'), u32::from('*'), u32::from('C')]);
    }

    #[test]
    fn test_csc_matches_csr() {
        let matrix = sample();
        let csc = to_sprs_csc(&matrix).unwrap();
        assert!(csc.is_csc());
        assert_eq!(csc, to_sprs_csr(&matrix).unwrap().to_csc());
    }

    #[test]
    fn test_dense() {
        let dense = to_dense(&sample()).unwrap();
        assert_eq!(dense.dim(), (2, 3));
        assert_eq!(dense[[0, 0]], Some('E'));
        assert_eq!(dense[[0, 1]], None);
        assert_eq!(dense[[1, 1]], Some('C'));
    }

    #[test]
    fn test_far_row_is_rejected() {
        let mut matrix = SparseMatrix::new(0);
        matrix.insert(isize::MAX, 0, 'E').unwrap();
        let rows = isize::MAX as usize + 1;
        assert_eq!(extent(&matrix), (rows, 1));

        let err = MatrixError::ExportTooLarge { rows, cols: 1, limit: MAX_EXPORT_DIM };
        assert_eq!(to_sprs_csr(&matrix), Err(err));
        // one column is a small CSC pointer array
        let csc = to_sprs_csc(&matrix).unwrap();
        assert_eq!(csc.get(isize::MAX as usize, 0), Some(&u32::from('E')));
        assert!(matches!(
            to_dense(&matrix),
            Err(MatrixError::ExportTooLarge { limit: MAX_DENSE_CELLS, .. })
        ));
    }

    #[test]
    fn test_far_cell_on_both_axes_is_rejected() {
        let mut matrix = SparseMatrix::new(0);
        matrix.insert(0, 0, 'E').unwrap();
        matrix.insert(isize::MAX, isize::MAX, '*').unwrap();

        // the element count overflows usize
        assert!(to_sprs_csr(&matrix).is_err());
        assert!(to_sprs_csc(&matrix).is_err());
        assert!(to_dense(&matrix).is_err());
    }

    #[test]
    fn test_dense_limit_is_a_product() {
        let mut matrix = SparseMatrix::new(0);
        // 4097 x 4097 is just over 1 << 24 cells
        matrix.insert(4096, 4096, 'E').unwrap();
        assert!(to_sprs_csr(&matrix).is_ok());
        assert!(matches!(
            to_dense(&matrix),
            Err(MatrixError::ExportTooLarge { rows: 4097, cols: 4097, .. })
        ));
    }
}
