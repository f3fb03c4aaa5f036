//! Interior cells of the orthogonal list

/// Index of a node in the matrix arena
///
/// `NodeId::invalid()` marks an absent link.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

impl Default for NodeId {
    fn default() -> Self {
        Self::invalid()
    }
}

impl NodeId {
    pub(crate) fn new(value: usize) -> Self {
        Self(value)
    }

    pub const fn invalid() -> Self {
        Self(usize::MAX)
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::invalid()
    }

    pub(crate) fn index(&self) -> usize {
        debug_assert!(self.is_valid());
        self.0
    }

    pub(crate) fn get(self) -> Option<Self> {
        self.is_valid().then_some(self)
    }
}

/// A stored cell
///
/// Links are only ever changed by [`SparseMatrix`](crate::SparseMatrix), which
/// keeps the row chain sorted by `y` and the column chain sorted by `x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub(crate) x: usize,
    pub(crate) y: usize,
    pub(crate) tag: char,

    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) up: NodeId,
    pub(crate) down: NodeId,
}

impl Node {
    pub(crate) fn new(x: usize, y: usize, tag: char) -> Self {
        Self {
            x,
            y,
            tag,
            left: NodeId::invalid(),
            right: NodeId::invalid(),
            up: NodeId::invalid(),
            down: NodeId::invalid(),
        }
    }

    /// Row coordinate
    pub fn x(&self) -> usize {
        self.x
    }

    /// Column coordinate
    pub fn y(&self) -> usize {
        self.y
    }

    pub fn tag(&self) -> char {
        self.tag
    }

    pub fn coords(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left.get()
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right.get()
    }

    pub fn up(&self) -> Option<NodeId> {
        self.up.get()
    }

    pub fn down(&self) -> Option<NodeId> {
        self.down.get()
    }
}

/// Meaning of a cell tag in a maze grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellKind {
    /// `*`
    Wall,
    /// `E`
    Entry,
    /// A blank cell
    Empty,
    /// `0`-`9`
    Numeric(u8),
    /// `C`
    SpecialC,
    /// `R`
    SpecialR,
    /// `w`
    SpecialW,
}

impl CellKind {
    /// Classifies a raw tag, returning `None` for characters outside the alphabet
    pub fn classify(tag: char) -> Option<Self> {
        match tag {
            '*' => Some(CellKind::Wall),
            'E' => Some(CellKind::Entry),
            ' ' => Some(CellKind::Empty),
            'C' => Some(CellKind::SpecialC),
            'R' => Some(CellKind::SpecialR),
            'w' => Some(CellKind::SpecialW),
            d => d.to_digit(10).map(|n| CellKind::Numeric(n as u8)),
        }
    }

    /// The canonical tag for this kind
    pub fn tag(&self) -> char {
        match self {
            CellKind::Wall => '*',
            CellKind::Entry => 'E',
            CellKind::Empty => ' ',
            CellKind::Numeric(n) => char::from(b'0' + n % 10),
            CellKind::SpecialC => 'C',
            CellKind::SpecialR => 'R',
            CellKind::SpecialW => 'w',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_sentinel() {
        assert!(!NodeId::default().is_valid());
        assert_eq!(NodeId::invalid().get(), None);
        assert_eq!(NodeId::new(3).get(), Some(NodeId::new(3)));
    }

    #[test]
    fn test_fresh_node_is_unlinked() {
        let node = Node::new(2, 5, 'E');
        assert_eq!(node.coords(), (2, 5));
        assert_eq!(node.tag(), 'E');
        assert!(node.left().is_none());
        assert!(node.right().is_none());
        assert!(node.up().is_none());
        assert!(node.down().is_none());
    }

    #[test]
    fn test_classify() {
        assert_eq!(CellKind::classify('*'), Some(CellKind::Wall));
        assert_eq!(CellKind::classify(' '), Some(CellKind::Empty));
        assert_eq!(CellKind::classify('7'), Some(CellKind::Numeric(7)));
        assert_eq!(CellKind::classify('w'), Some(CellKind::SpecialW));
        assert_eq!(CellKind::classify('W'), None);

        for tag in ['*', 'E', ' ', '0', '9', 'C', 'R', 'w'] {
            assert_eq!(CellKind::classify(tag).map(|k| k.tag()), Some(tag));
        }
    }
}
