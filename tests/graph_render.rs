//! Integration tests for the Graphviz export

use std::fmt;

use crossgrid::{GraphRenderer, MatrixError, Palette, RenderConfig, SparseMatrix, TagStyle};

fn create_example() -> SparseMatrix {
    let mut matrix = SparseMatrix::new(1);
    matrix.insert(0, 0, 'E').unwrap();
    matrix.insert(0, 2, '*').unwrap();
    matrix.insert(1, 1, 'C').unwrap();
    matrix
}

#[test]
fn test_full_output() {
    let dot = crossgrid::to_dot(&create_example()).unwrap();

    let expected = r#"digraph T {
node[shape=box fontname="Arial" fillcolor="white" style=filled];
root[label="layer: 1",group=1];
label="SPARSE MATRIX";
fontname="Arial Black";
fontsize="15pt";
F0[label="F0",fillcolor="plum",group=1];
F1[label="F1",fillcolor="plum",group=1];
F0->F1;
F1->F0;
C0[label="C0",fillcolor="powderblue",group=1];
C1[label="C1",fillcolor="powderblue",group=2];
C2[label="C2",fillcolor="powderblue",group=3];
C0->C1;
C1->C0;
C1->C2;
C2->C1;
root->F0;
root->C0;
{rank=same;root;C0;C1;C2;}
N0_0[label="E",group="1",fillcolor="green"];
N0_2[label="*",group="3",fillcolor="black"];
N1_1[label="C",group="2",fillcolor="blue"];
F0->N0_0;
N0_0->F0;
N0_0->N0_2;
N0_2->N0_0;
{rank=same;F0;N0_0;N0_2;}
F1->N1_1;
N1_1->F1;
{rank=same;F1;N1_1;}
C0->N0_0;
N0_0->C0;
C1->N1_1;
N1_1->C1;
C2->N0_2;
N0_2->C2;
}
"#;
    assert_eq!(dot, expected);
}

#[test]
fn test_rendering_is_deterministic() {
    let matrix = create_example();
    let renderer = GraphRenderer::default();

    let first = renderer.render_to_string(&matrix).unwrap();
    let second = renderer.render_to_string(&matrix).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_insertion_order_does_not_change_output() {
    let coords = [(0, 0, 'E'), (2, 1, '*'), (0, 3, 'w'), (2, 3, '7'), (1, 1, ' ')];

    let mut forward = SparseMatrix::new(4);
    for &(x, y, tag) in &coords {
        forward.insert(x, y, tag).unwrap();
    }
    let mut backward = SparseMatrix::new(4);
    for &(x, y, tag) in coords.iter().rev() {
        backward.insert(x, y, tag).unwrap();
    }

    assert_eq!(
        crossgrid::to_dot(&forward).unwrap(),
        crossgrid::to_dot(&backward).unwrap()
    );
}

#[test]
fn test_down_chain_links() {
    let mut matrix = SparseMatrix::new(0);
    matrix.insert(3, 2, 'R').unwrap();
    matrix.insert(0, 2, 'E').unwrap();

    let dot = crossgrid::to_dot(&matrix).unwrap();
    assert!(dot.contains("C2->N0_2;\nN0_2->C2;\nN0_2->N3_2;\nN3_2->N0_2;\n"));
    assert!(dot.contains("F0->F3;\nF3->F0;\n"));
}

#[test]
fn test_unknown_tag_is_reported() {
    let mut matrix = create_example();
    matrix.insert(1, 0, '?').unwrap();

    let err = crossgrid::to_dot(&matrix).unwrap_err();
    assert_eq!(err, MatrixError::UnknownTag { x: 1, y: 0, tag: '?' });
}

#[test]
fn test_extended_palette() {
    let mut matrix = create_example();
    matrix.insert(1, 0, '?').unwrap();

    let palette = Palette::default().with('?', TagStyle::new("orange"));
    let renderer = GraphRenderer::new(RenderConfig::with_palette(palette));
    let dot = renderer.render_to_string(&matrix).unwrap();
    assert!(dot.contains("N1_0[label=\"?\",group=\"1\",fillcolor=\"orange\"];"));
}

#[test]
fn test_render_into_existing_sink() {
    let matrix = create_example();
    let mut out = String::from("// layer dump\n");
    GraphRenderer::default().render(&matrix, &mut out).unwrap();

    assert!(out.starts_with("// layer dump\ndigraph T {\n"));
}

struct FailingSink;

impl fmt::Write for FailingSink {
    fn write_str(&mut self, _: &str) -> fmt::Result {
        Err(fmt::Error)
    }
}

#[test]
fn test_sink_failure_is_reported() {
    let err = GraphRenderer::default()
        .render(&create_example(), &mut FailingSink)
        .unwrap_err();
    assert!(matches!(err, MatrixError::Fmt(_)));
}

#[test]
fn test_largest_declared_ids_render() {
    let mut matrix = create_example();
    matrix.declare_row(isize::MAX).unwrap();
    matrix.declare_column(isize::MAX).unwrap();
    matrix.insert(isize::MAX, isize::MAX, 'E').unwrap();

    let dot = crossgrid::to_dot(&matrix).unwrap();
    let far = isize::MAX;
    let group = isize::MAX as usize + 1;
    let header = format!("C{far}[label=\"C{far}\",fillcolor=\"powderblue\",group={group}];");
    let cell = format!("N{far}_{far}[label=\"E\",group=\"{group}\"");
    assert!(dot.contains(&header));
    assert!(dot.contains(&cell));
    assert!(dot.ends_with("}\n"));
}

#[test]
fn test_negative_declarations_are_rejected() {
    let mut matrix = create_example();
    assert_eq!(
        matrix.declare_row(-1),
        Err(MatrixError::OutOfRange { x: -1, y: 0 })
    );
    assert_eq!(
        matrix.declare_column(isize::MIN),
        Err(MatrixError::OutOfRange { x: 0, y: isize::MIN })
    );
    assert_eq!(matrix.row_headers().len(), 2);
    assert_eq!(matrix.column_headers().len(), 3);
}
