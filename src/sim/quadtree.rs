//! Point quad-tree for broad-phase region queries
//!
//! Rebuilt from scratch every tick from live entity positions; there is no
//! removal. Each point carries a payload (usually an index into the live
//! entity list) so query results can be mapped back to entities cheaply.
//!
//! Points are kept in the node itself until it holds `capacity` of them, then
//! the node splits into four quadrants and further points descend. With
//! `push_to_leaves`, splitting also drains the node's own points into its
//! children, so only leaves ever hold points.

use glam::Vec2;

use super::geometry::Rect;

/// Nodes at this depth never split (guards against stacks of coincident points)
pub const MAX_DEPTH: u32 = 24;

/// A position with an attached payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint<T> {
    pub pos: Vec2,
    pub data: T,
}

impl<T> IndexedPoint<T> {
    pub fn new(pos: Vec2, data: T) -> Self {
        Self { pos, data }
    }
}

/// A quad-tree node owning its points and (once split) its four children
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    region: Rect,
    capacity: usize,
    push_to_leaves: bool,
    depth: u32,
    points: Vec<IndexedPoint<T>>,
    children: Option<Box<[QuadTree<T>; 4]>>,
}

impl<T> QuadTree<T> {
    /// Create an empty tree covering `region`. Capacity is clamped to at least 1.
    pub fn new(region: Rect, capacity: usize, push_to_leaves: bool) -> Self {
        Self::node(region, capacity.max(1), push_to_leaves, 0)
    }

    fn node(region: Rect, capacity: usize, push_to_leaves: bool, depth: u32) -> Self {
        Self {
            region,
            capacity,
            push_to_leaves,
            depth,
            points: Vec::new(),
            children: None,
        }
    }

    /// Region covered by this node
    pub fn region(&self) -> &Rect {
        &self.region
    }

    /// Whether this node has been split into quadrants
    pub fn is_split(&self) -> bool {
        self.children.is_some()
    }

    /// Total points stored in this node and all descendants
    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children
                .as_ref()
                .map_or(0, |c| c.iter().map(QuadTree::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a point. Returns false (and leaves the tree untouched) if the
    /// point lies outside the root region.
    pub fn insert(&mut self, point: IndexedPoint<T>) -> bool {
        if !self.region.contains_point(point.pos) {
            return false;
        }
        self.insert_contained(point);
        true
    }

    /// Insert a point already known to lie within this node's region
    fn insert_contained(&mut self, point: IndexedPoint<T>) {
        if self.points.len() < self.capacity || self.depth >= MAX_DEPTH {
            self.points.push(point);
            return;
        }

        if self.children.is_none() {
            self.split();
        }

        match self
            .children
            .as_mut()
            .and_then(|c| c.iter_mut().find(|q| q.region.contains_point(point.pos)))
        {
            Some(child) => child.insert_contained(point),
            // Quadrants cover the parent exactly; only degenerate float regions land here
            None => self.points.push(point),
        }
    }

    /// Create the four children. In push-to-leaves mode the node's own points
    /// move down and the node stops holding points.
    fn split(&mut self) {
        let [ll, hl, lh, hh] = self.region.quadrants();
        let depth = self.depth + 1;
        let (capacity, push) = (self.capacity, self.push_to_leaves);
        self.children = Some(Box::new([
            Self::node(ll, capacity, push, depth),
            Self::node(hl, capacity, push, depth),
            Self::node(lh, capacity, push, depth),
            Self::node(hh, capacity, push, depth),
        ]));

        if self.push_to_leaves {
            self.capacity = 0;
            for point in std::mem::take(&mut self.points) {
                self.insert_contained(point);
            }
        }
    }

    /// All points inside `range` (half-open containment). Order is unspecified.
    pub fn query(&self, range: &Rect) -> Vec<&IndexedPoint<T>> {
        let mut found = Vec::new();
        self.query_into(range, &mut found);
        found
    }

    /// Append points inside `range` to `found` without clearing it
    pub fn query_into<'a>(&'a self, range: &Rect, found: &mut Vec<&'a IndexedPoint<T>>) {
        if !self.region.intersects(range) {
            return;
        }

        found.extend(self.points.iter().filter(|p| range.contains_point(p.pos)));

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_into(range, found);
            }
        }
    }

    /// Every node region, parents before children (for debug overlays)
    pub fn regions(&self) -> Vec<Rect> {
        let mut out = Vec::new();
        self.collect_regions(&mut out);
        out
    }

    fn collect_regions(&self, out: &mut Vec<Rect>) {
        out.push(self.region);
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_regions(out);
            }
        }
    }
}
