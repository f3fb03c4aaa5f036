//! Graphviz `dot` export of a [`SparseMatrix`]
//!
//! The output lists, in order:
//!
//! 1. Graph attributes and a `root` node labelled with the matrix layer
//! 2. Row headers `F<id>` and their links in both directions
//! 3. Column headers `C<id>` and their links in both directions
//! 4. `root` linked to the first row and column header, ranked with all
//!    column headers
//! 5. One `N<x>_<y>` node per stored cell, coloured by the palette
//! 6. Per row: header to first cell, right-chain links, and a rank group
//! 7. Per column: header to first cell and down-chain links
//!
//! Headers are visited in list order and cells strictly along their chains,
//! so the same matrix state always renders to the same bytes.

use std::fmt::Write;

use log::debug;

use crate::error::{MatrixError, Result};
use crate::matrix::{Node, SparseMatrix};
use crate::render::config::{RenderConfig, TagStyle};

/// Writes a matrix as a directed graph description
#[derive(Debug, Clone, Default)]
pub struct GraphRenderer {
    config: RenderConfig,
}

impl GraphRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders into a fresh string
    pub fn render_to_string(&self, matrix: &SparseMatrix) -> Result<String> {
        let mut out = String::new();
        self.render(matrix, &mut out)?;
        Ok(out)
    }

    /// Appends the graph for `matrix` to `out`
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::UnknownTag`] for the first cell, in row-major
    /// order, whose tag has no palette entry. Nothing is written in that case.
    /// Sink failures surface as [`MatrixError::Fmt`].
    pub fn render<W: Write>(&self, matrix: &SparseMatrix, out: &mut W) -> Result<()> {
        for node in matrix.iter() {
            self.style(node)?;
        }

        self.write_preamble(matrix, out)?;
        self.write_row_headers(matrix, out)?;
        self.write_column_headers(matrix, out)?;
        self.write_root(matrix, out)?;
        self.write_cells(matrix, out)?;
        self.write_rows(matrix, out)?;
        self.write_columns(matrix, out)?;
        writeln!(out, "}}")?;

        debug!(
            "rendered layer {} with {} rows, {} columns, {} cells",
            matrix.layer(),
            matrix.row_headers().len(),
            matrix.column_headers().len(),
            matrix.nnz()
        );
        Ok(())
    }

    fn style(&self, node: &Node) -> Result<&TagStyle> {
        self.config
            .palette
            .style(node.tag())
            .ok_or(MatrixError::UnknownTag {
                x: node.x(),
                y: node.y(),
                tag: node.tag(),
            })
    }

    fn write_preamble<W: Write>(&self, matrix: &SparseMatrix, out: &mut W) -> Result<()> {
        let c = &self.config;
        writeln!(out, "digraph T {{")?;
        writeln!(
            out,
            "node[shape={} fontname=\"{}\" fillcolor=\"{}\" style=filled];",
            c.node_shape,
            escape(&c.font_name),
            escape(&c.default_fill)
        )?;
        writeln!(out, "root[label=\"layer: {}\",group=1];", matrix.layer())?;
        writeln!(out, "label=\"{}\";", escape(&c.title))?;
        writeln!(out, "fontname=\"{}\";", escape(&c.title_font_name))?;
        writeln!(out, "fontsize=\"{}\";", escape(&c.title_font_size))?;
        Ok(())
    }

    fn write_row_headers<W: Write>(&self, matrix: &SparseMatrix, out: &mut W) -> Result<()> {
        let rows = matrix.row_headers();
        let fill = escape(&self.config.row_header_fill);
        for header in rows {
            writeln!(
                out,
                "F{0}[label=\"F{0}\",fillcolor=\"{1}\",group=1];",
                header.id(),
                fill
            )?;
        }
        for header in rows {
            if let Some(next) = rows.next(header) {
                writeln!(out, "F{}->F{};", header.id(), next.id())?;
                writeln!(out, "F{}->F{};", next.id(), header.id())?;
            }
        }
        Ok(())
    }

    fn write_column_headers<W: Write>(&self, matrix: &SparseMatrix, out: &mut W) -> Result<()> {
        let columns = matrix.column_headers();
        let fill = escape(&self.config.column_header_fill);
        for header in columns {
            writeln!(
                out,
                "C{0}[label=\"C{0}\",fillcolor=\"{1}\",group={2}];",
                header.id(),
                fill,
                header.id() + 1
            )?;
        }
        for header in columns {
            if let Some(next) = columns.next(header) {
                writeln!(out, "C{}->C{};", header.id(), next.id())?;
                writeln!(out, "C{}->C{};", next.id(), header.id())?;
            }
        }
        Ok(())
    }

    fn write_root<W: Write>(&self, matrix: &SparseMatrix, out: &mut W) -> Result<()> {
        if let Some(first) = matrix.row_headers().first() {
            writeln!(out, "root->F{};", first.id())?;
        }
        if let Some(first) = matrix.column_headers().first() {
            writeln!(out, "root->C{};", first.id())?;
        }

        write!(out, "{{rank=same;root;")?;
        for header in matrix.column_headers() {
            write!(out, "C{};", header.id())?;
        }
        writeln!(out, "}}")?;
        Ok(())
    }

    fn write_cells<W: Write>(&self, matrix: &SparseMatrix, out: &mut W) -> Result<()> {
        for node in matrix.iter() {
            let style = self.style(node)?;
            let label = match &style.label {
                Some(label) => escape(label),
                None => escape(&node.tag().to_string()),
            };
            writeln!(
                out,
                "{}[label=\"{}\",group=\"{}\",fillcolor=\"{}\"];",
                cell_name(node),
                label,
                node.y() + 1,
                escape(&style.fillcolor)
            )?;
        }
        Ok(())
    }

    fn write_rows<W: Write>(&self, matrix: &SparseMatrix, out: &mut W) -> Result<()> {
        for header in matrix.row_headers() {
            let mut rank = format!("{{rank=same;F{};", header.id());
            let mut cells = matrix.traverse_row(header.id()).peekable();

            if let Some(first) = cells.peek() {
                writeln!(out, "F{}->{};", header.id(), cell_name(first))?;
                writeln!(out, "{}->F{};", cell_name(first), header.id())?;
            }
            for node in cells {
                if let Some(right) = matrix.right_of(node) {
                    writeln!(out, "{}->{};", cell_name(node), cell_name(right))?;
                    writeln!(out, "{}->{};", cell_name(right), cell_name(node))?;
                }
                write!(rank, "{};", cell_name(node))?;
            }

            writeln!(out, "{}}}", rank)?;
        }
        Ok(())
    }

    fn write_columns<W: Write>(&self, matrix: &SparseMatrix, out: &mut W) -> Result<()> {
        for header in matrix.column_headers() {
            let mut cells = matrix.traverse_column(header.id()).peekable();

            if let Some(first) = cells.peek() {
                writeln!(out, "C{}->{};", header.id(), cell_name(first))?;
                writeln!(out, "{}->C{};", cell_name(first), header.id())?;
            }
            for node in cells {
                if let Some(down) = matrix.below(node) {
                    writeln!(out, "{}->{};", cell_name(node), cell_name(down))?;
                    writeln!(out, "{}->{};", cell_name(down), cell_name(node))?;
                }
            }
        }
        Ok(())
    }
}

/// Shorthand for rendering with the default configuration
pub fn to_dot(matrix: &SparseMatrix) -> Result<String> {
    GraphRenderer::default().render_to_string(matrix)
}

fn cell_name(node: &Node) -> String {
    format!("N{}_{}", node.x(), node.y())
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
