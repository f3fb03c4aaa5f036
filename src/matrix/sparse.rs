//! Orthogonal linked-list sparse matrix
//!
//! Every stored cell is a single [`Node`] that sits on two chains at once: the
//! row chain of its `x` header, sorted by `y` through `left`/`right` links, and
//! the column chain of its `y` header, sorted by `x` through `up`/`down` links.
//! Only inserted cells consume storage, and a row scan costs time proportional
//! to the row's occupancy rather than the grid width.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Freed slots
//! are recycled by later insertions.

use std::fmt;

use log::{debug, trace};

use crate::error::{Axis, MatrixError, Result};
use crate::matrix::header::{HeaderId, HeaderList};
use crate::matrix::node::{Node, NodeId};

/// A sparse grid of tagged cells
#[derive(Clone, Debug)]
pub struct SparseMatrix {
    layer: i32,
    rows: HeaderList,
    columns: HeaderList,
    nodes: Vec<Option<Node>>,
    free: Vec<NodeId>,
    nnz: usize,
}

impl SparseMatrix {
    /// Creates an empty matrix tagged with `layer`
    pub fn new(layer: i32) -> Self {
        Self {
            layer,
            rows: HeaderList::new(Axis::Row),
            columns: HeaderList::new(Axis::Column),
            nodes: Vec::new(),
            free: Vec::new(),
            nnz: 0,
        }
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    /// Number of stored cells
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    pub fn is_empty(&self) -> bool {
        self.nnz == 0
    }

    pub fn row_headers(&self) -> &HeaderList {
        &self.rows
    }

    pub fn column_headers(&self) -> &HeaderList {
        &self.columns
    }

    /// Declares an empty row ahead of any insertion
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] for a negative id, the same bound
    /// `insert` applies, and [`MatrixError::DuplicateKey`] if the row already
    /// exists.
    pub fn declare_row(&mut self, id: isize) -> Result<()> {
        let Ok(uid) = usize::try_from(id) else {
            return Err(MatrixError::OutOfRange { x: id, y: 0 });
        };
        self.rows.append_header(uid).map(|_| ())
    }

    /// Declares an empty column ahead of any insertion
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] for a negative id and
    /// [`MatrixError::DuplicateKey`] if the column already exists.
    pub fn declare_column(&mut self, id: isize) -> Result<()> {
        let Ok(uid) = usize::try_from(id) else {
            return Err(MatrixError::OutOfRange { x: 0, y: id });
        };
        self.columns.append_header(uid).map(|_| ())
    }

    /// Stores `tag` at `(x, y)`
    ///
    /// Missing row and column headers are created on the way. Inserting at a
    /// coordinate that is already stored overwrites its tag in place and
    /// returns the existing node; this is a success, not an error, and never
    /// creates a second node for the same cell.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if either coordinate is negative.
    /// The matrix is left untouched in that case.
    pub fn insert(&mut self, x: isize, y: isize, tag: char) -> Result<NodeId> {
        let (ux, uy) = match (usize::try_from(x), usize::try_from(y)) {
            (Ok(ux), Ok(uy)) => (ux, uy),
            _ => return Err(MatrixError::OutOfRange { x, y }),
        };

        if let Some(id) = self.find(ux, uy) {
            let node = self.node_mut(id);
            trace!("overwrote ({}, {}) {:?} -> {:?}", ux, uy, node.tag, tag);
            node.tag = tag;
            return Ok(id);
        }

        let row = self.rows.get_or_insert(ux);
        let column = self.columns.get_or_insert(uy);
        let id = self.alloc(Node::new(ux, uy, tag));

        self.splice_row(row, id);
        self.splice_column(column, id);
        self.nnz += 1;

        trace!("spliced ({}, {}) {:?}", ux, uy, tag);
        Ok(id)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId::new(self.nodes.len() - 1)
            }
        }
    }

    fn splice_row(&mut self, row: HeaderId, id: NodeId) {
        let y = self.node_at(id).y;

        let mut prev = NodeId::invalid();
        let mut next = self.rows.header(row).access;
        while next.is_valid() && self.node_at(next).y < y {
            prev = next;
            next = self.node_at(next).right;
        }

        let node = self.node_mut(id);
        node.left = prev;
        node.right = next;

        if prev.is_valid() {
            self.node_mut(prev).right = id;
        } else {
            self.rows.header_mut(row).access = id;
        }
        if next.is_valid() {
            self.node_mut(next).left = id;
        }
        self.rows.header_mut(row).len += 1;
    }

    fn splice_column(&mut self, column: HeaderId, id: NodeId) {
        let x = self.node_at(id).x;

        let mut prev = NodeId::invalid();
        let mut next = self.columns.header(column).access;
        while next.is_valid() && self.node_at(next).x < x {
            prev = next;
            next = self.node_at(next).down;
        }

        let node = self.node_mut(id);
        node.up = prev;
        node.down = next;

        if prev.is_valid() {
            self.node_mut(prev).down = id;
        } else {
            self.columns.header_mut(column).access = id;
        }
        if next.is_valid() {
            self.node_mut(next).up = id;
        }
        self.columns.header_mut(column).len += 1;
    }

    /// Removes the cell at `(x, y)`, returning its tag if it was stored
    ///
    /// Headers are kept even when their row or column becomes empty.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutOfRange`] if either coordinate is negative.
    pub fn remove(&mut self, x: isize, y: isize) -> Result<Option<char>> {
        let (ux, uy) = match (usize::try_from(x), usize::try_from(y)) {
            (Ok(ux), Ok(uy)) => (ux, uy),
            _ => return Err(MatrixError::OutOfRange { x, y }),
        };

        let Some(id) = self.find(ux, uy) else {
            return Ok(None);
        };
        let &Node { left, right, up, down, tag, .. } = self.node_at(id);
        let row = self.header_of(Axis::Row, ux);
        let column = self.header_of(Axis::Column, uy);

        if left.is_valid() {
            self.node_mut(left).right = right;
        } else {
            self.rows.header_mut(row).access = right;
        }
        if right.is_valid() {
            self.node_mut(right).left = left;
        }

        if up.is_valid() {
            self.node_mut(up).down = down;
        } else {
            self.columns.header_mut(column).access = down;
        }
        if down.is_valid() {
            self.node_mut(down).up = up;
        }

        self.rows.header_mut(row).len -= 1;
        self.columns.header_mut(column).len -= 1;

        self.nodes[id.index()] = None;
        self.free.push(id);
        self.nnz -= 1;

        debug!("removed ({}, {}) {:?}", ux, uy, tag);
        Ok(Some(tag))
    }

    /// Header of a stored cell's row or column
    ///
    /// Every stored node hangs off both of its headers, so a miss means the
    /// links are corrupt.
    fn header_of(&self, axis: Axis, id: usize) -> HeaderId {
        let list = match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        };
        match list.find_id(id) {
            Some(hid) => hid,
            None => panic!("stored cell has no {} header {}", axis, id),
        }
    }

    /// Walks row `x` until column `y` is found or passed
    fn find(&self, x: usize, y: usize) -> Option<NodeId> {
        let mut current = self.rows.find(x)?.access;
        while current.is_valid() {
            let node = self.node_at(current);
            if node.y == y {
                return Some(current);
            }
            if node.y > y {
                return None;
            }
            current = node.right;
        }
        None
    }

    /// Returns the node stored at `(x, y)`
    ///
    /// Cost is proportional to the occupancy of row `x`. Negative coordinates
    /// are never stored, so they simply yield `None`.
    pub fn lookup(&self, x: isize, y: isize) -> Option<&Node> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.find(x, y).map(|id| self.node_at(id))
    }

    /// Tag stored at `(x, y)`
    pub fn get(&self, x: isize, y: isize) -> Option<char> {
        self.lookup(x, y).map(Node::tag)
    }

    pub fn contains(&self, x: isize, y: isize) -> bool {
        self.lookup(x, y).is_some()
    }

    /// Resolves a node handle
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.get()?.index())?.as_ref()
    }

    fn node_at(&self, id: NodeId) -> &Node {
        match self.nodes[id.index()].as_ref() {
            Some(node) => node,
            None => panic!("dangling link to freed node {:?}", id),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes[id.index()].as_mut() {
            Some(node) => node,
            None => panic!("dangling link to freed node {:?}", id),
        }
    }

    /// Right neighbour of `node`
    ///
    /// `node` must come from this matrix. A node from another matrix resolves
    /// against this arena and yields an unrelated cell or `None`.
    pub fn right_of(&self, node: &Node) -> Option<&Node> {
        self.node(node.right)
    }

    /// Left neighbour of `node`, which must come from this matrix
    pub fn left_of(&self, node: &Node) -> Option<&Node> {
        self.node(node.left)
    }

    /// Down neighbour of `node`, which must come from this matrix
    pub fn below(&self, node: &Node) -> Option<&Node> {
        self.node(node.down)
    }

    /// Up neighbour of `node`, which must come from this matrix
    pub fn above(&self, node: &Node) -> Option<&Node> {
        self.node(node.up)
    }

    /// Cells of row `id` in ascending column order
    ///
    /// An unknown or empty row yields nothing.
    pub fn traverse_row(&self, id: usize) -> Cells<'_> {
        let start = self.rows.find(id).map_or(NodeId::invalid(), |h| h.access);
        Cells {
            matrix: self,
            current: start,
            axis: Axis::Row,
        }
    }

    /// Cells of column `id` in ascending row order
    ///
    /// An unknown or empty column yields nothing.
    pub fn traverse_column(&self, id: usize) -> Cells<'_> {
        let start = self.columns.find(id).map_or(NodeId::invalid(), |h| h.access);
        Cells {
            matrix: self,
            current: start,
            axis: Axis::Column,
        }
    }

    /// All stored cells, row by row
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.rows.iter().flat_map(move |h| self.traverse_row(h.id()))
    }

    pub fn row_len(&self, id: usize) -> usize {
        self.rows.find(id).map_or(0, |h| h.len())
    }

    pub fn column_len(&self, id: usize) -> usize {
        self.columns.find(id).map_or(0, |h| h.len())
    }

    /// Rows ranked by number of stored cells, busiest first
    ///
    /// Rows with equal counts keep ascending id order.
    pub fn row_occupancy(&self) -> Vec<(usize, usize)> {
        let mut counts: Vec<_> = self.rows.iter().map(|h| (h.id(), h.len())).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Checks every structural invariant of both chain families
    ///
    /// Returns `false` if a chain is out of order, a back-link disagrees with
    /// its forward link, a header's count is stale, or a node is reachable from
    /// its row but not from its column.
    pub fn is_consistent(&self) -> bool {
        let mut row_total = 0;
        for header in &self.rows {
            let mut prev = NodeId::invalid();
            let mut current = header.access;
            let mut count = 0;
            while current.is_valid() {
                let node = self.node_at(current);
                if node.x != header.id() || node.left != prev {
                    return false;
                }
                if prev.is_valid() && self.node_at(prev).y >= node.y {
                    return false;
                }
                if !self.column_contains(node.y, current) {
                    return false;
                }
                count += 1;
                prev = current;
                current = node.right;
            }
            if count != header.len() {
                return false;
            }
            row_total += count;
        }

        let mut column_total = 0;
        for header in &self.columns {
            let mut prev = NodeId::invalid();
            let mut current = header.access;
            let mut count = 0;
            while current.is_valid() {
                let node = self.node_at(current);
                if node.y != header.id() || node.up != prev {
                    return false;
                }
                if prev.is_valid() && self.node_at(prev).x >= node.x {
                    return false;
                }
                count += 1;
                prev = current;
                current = node.down;
            }
            if count != header.len() {
                return false;
            }
            column_total += count;
        }

        row_total == self.nnz && column_total == self.nnz
    }

    fn column_contains(&self, y: usize, target: NodeId) -> bool {
        let Some(header) = self.columns.find(y) else {
            return false;
        };
        let mut current = header.access;
        while current.is_valid() {
            if current == target {
                return true;
            }
            current = self.node_at(current).down;
        }
        false
    }
}

/// Iterator along a row (right links) or a column (down links)
#[derive(Clone)]
pub struct Cells<'a> {
    matrix: &'a SparseMatrix,
    current: NodeId,
    axis: Axis,
}

impl<'a> Iterator for Cells<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.matrix.node_at(self.current.get()?);
        self.current = match self.axis {
            Axis::Row => node.right,
            Axis::Column => node.down,
        };
        Some(node)
    }
}

/// Tab-separated table over the declared rows and columns, `0` for empty cells
impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\t")?;
        for column in &self.columns {
            write!(f, "{}\t", column.id())?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{}\t", row.id())?;
            let mut cells = self.traverse_row(row.id()).peekable();
            for column in &self.columns {
                match cells.next_if(|n| n.y == column.id()) {
                    Some(node) => write!(f, "{}\t", node.tag)?,
                    None => write!(f, "0\t")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
