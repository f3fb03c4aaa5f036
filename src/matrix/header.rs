//! Row and column header lists
//!
//! A [`HeaderList`] is a doubly linked list of headers kept in ascending `id`
//! order. Each header owns an access link to the first stored node of its row
//! or column. Headers are allocated in an arena and never freed, so a
//! header handle stays valid for the lifetime of the list.

use log::debug;

use crate::error::{Axis, MatrixError, Result};
use crate::matrix::node::NodeId;

/// Index of a header in its list's arena
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub(crate) struct HeaderId(usize);

impl HeaderId {
    const fn invalid() -> Self {
        Self(usize::MAX)
    }

    fn get(self) -> Option<Self> {
        (self != Self::invalid()).then_some(self)
    }
}

/// A row or column header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    id: usize,
    next: HeaderId,
    prev: HeaderId,
    pub(crate) access: NodeId,
    pub(crate) len: usize,
}

impl Header {
    fn new(id: usize) -> Self {
        Self {
            id,
            next: HeaderId::invalid(),
            prev: HeaderId::invalid(),
            access: NodeId::invalid(),
            len: 0,
        }
    }

    /// Row or column index this header stands for
    pub fn id(&self) -> usize {
        self.id
    }

    /// First stored node along this header, if any
    pub fn access(&self) -> Option<NodeId> {
        self.access.get()
    }

    /// Number of nodes currently stored along this header
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub type HeaderRef<'a> = &'a Header;

/// Ordered list of row or column headers
#[derive(Clone, Debug)]
pub struct HeaderList {
    axis: Axis,
    headers: Vec<Header>,
    first: HeaderId,
    last: HeaderId,
}

impl HeaderList {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            headers: Vec::new(),
            first: HeaderId::invalid(),
            last: HeaderId::invalid(),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of headers in the list
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Adds a header for `id`
    ///
    /// The header is linked in at its ascending-id position, which is the tail
    /// whenever ids are declared in increasing order.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DuplicateKey`] if `id` is already present.
    pub fn append_header(&mut self, id: usize) -> Result<HeaderRef<'_>> {
        if self.find_id(id).is_some() {
            return Err(MatrixError::DuplicateKey { axis: self.axis, id });
        }
        let hid = self.link_new(id);
        Ok(&self.headers[hid.0])
    }

    /// Returns the header for `id`, creating it if needed
    pub(crate) fn get_or_insert(&mut self, id: usize) -> HeaderId {
        match self.find_id(id) {
            Some(hid) => hid,
            None => self.link_new(id),
        }
    }

    fn link_new(&mut self, id: usize) -> HeaderId {
        let hid = HeaderId(self.headers.len());
        self.headers.push(Header::new(id));

        // Find the first header with a greater id, scanning from the tail
        // since sequential declaration is the common case.
        let mut after = self.last;
        while let Some(h) = after.get() {
            if self.headers[h.0].id < id {
                break;
            }
            after = self.headers[h.0].prev;
        }

        let before = match after.get() {
            Some(h) => self.headers[h.0].next,
            None => self.first,
        };

        self.headers[hid.0].prev = after;
        self.headers[hid.0].next = before;

        match after.get() {
            Some(h) => self.headers[h.0].next = hid,
            None => self.first = hid,
        }
        match before.get() {
            Some(h) => self.headers[h.0].prev = hid,
            None => self.last = hid,
        }

        debug!("created {} header {}", self.axis, id);
        hid
    }

    pub fn first(&self) -> Option<HeaderRef<'_>> {
        self.first.get().map(|h| &self.headers[h.0])
    }

    pub fn last(&self) -> Option<HeaderRef<'_>> {
        self.last.get().map(|h| &self.headers[h.0])
    }

    /// Header after `header`, which must come from this list
    ///
    /// A header from another list resolves against this arena and yields an
    /// unrelated header or `None`.
    pub fn next(&self, header: HeaderRef<'_>) -> Option<HeaderRef<'_>> {
        self.headers.get(header.next.get()?.0)
    }

    /// Header before `header`, which must come from this list
    pub fn prev(&self, header: HeaderRef<'_>) -> Option<HeaderRef<'_>> {
        self.headers.get(header.prev.get()?.0)
    }

    /// Linear scan for the header with the given id
    pub fn find(&self, id: usize) -> Option<HeaderRef<'_>> {
        self.find_id(id).map(|h| &self.headers[h.0])
    }

    pub(crate) fn find_id(&self, id: usize) -> Option<HeaderId> {
        let mut current = self.first;
        while let Some(h) = current.get() {
            let header = &self.headers[h.0];
            if header.id == id {
                return Some(h);
            }
            if header.id > id {
                return None;
            }
            current = header.next;
        }
        None
    }

    pub(crate) fn header(&self, hid: HeaderId) -> &Header {
        &self.headers[hid.0]
    }

    pub(crate) fn header_mut(&mut self, hid: HeaderId) -> &mut Header {
        &mut self.headers[hid.0]
    }

    /// Iterates over headers in ascending id order
    pub fn iter(&self) -> Headers<'_> {
        Headers {
            list: self,
            current: self.first(),
        }
    }

    /// Header ids in list order
    pub fn ids(&self) -> Vec<usize> {
        self.iter().map(Header::id).collect()
    }
}

/// Forward iterator over a [`HeaderList`]
#[derive(Clone)]
pub struct Headers<'a> {
    list: &'a HeaderList,
    current: Option<HeaderRef<'a>>,
}

impl<'a> Iterator for Headers<'a> {
    type Item = HeaderRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let header = self.current?;
        self.current = self.list.next(header);
        Some(header)
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = HeaderRef<'a>;
    type IntoIter = Headers<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
