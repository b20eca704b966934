//! Spatial Index Module
//!
//! Provides R-tree based spatial indexing for hit testing on a page.
//! Point queries return the few elements whose bounding boxes contain the
//! pointer; the exact shape test and priority ordering happen in
//! [`crate::hit_testing`].

use crate::input::coords::Percent;
use crate::types::ElementRef;
use rstar::{AABB, RTree, RTreeObject};

/// Exact hit shape of an indexed element, in percentage space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    /// Inclusive rectangle `[x, x+width] x [y, y+height]`
    Rect { x: f64, y: f64, width: f64, height: f64 },
    /// Open disc: hit when the distance is strictly below `radius`
    Circle { center: Percent, radius: f64 },
}

impl HitShape {
    #[inline]
    pub fn contains(&self, point: Percent) -> bool {
        match *self {
            HitShape::Rect { x, y, width, height } => {
                point.x >= x && point.x <= x + width && point.y >= y && point.y <= y + height
            }
            HitShape::Circle { center, radius } => point.distance_to(center) < radius,
        }
    }

    fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        match *self {
            HitShape::Rect { x, y, width, height } => ([x, y], [x + width, y + height]),
            HitShape::Circle { center, radius } => (
                [center.x - radius, center.y - radius],
                [center.x + radius, center.y + radius],
            ),
        }
    }
}

/// A spatial entry: one element, its shape and its hit priority.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub element: ElementRef,
    pub shape: HitShape,
    /// Higher wins when several elements contain the pointer
    pub priority: usize,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let (min, max) = self.shape.bounds();
        AABB::from_corners(min, max)
    }
}

/// Spatial index for the elements of one page using an R-tree.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build a spatial index from an iterator of entries.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = SpatialEntry>,
    {
        Self {
            tree: RTree::bulk_load(entries.into_iter().collect()),
        }
    }

    /// All entries whose exact shape contains the point, in no particular order.
    pub fn query_point(&self, point: Percent) -> Vec<&SpatialEntry> {
        let envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.shape.contains(point))
            .collect()
    }

    /// The highest-priority entry containing the point.
    pub fn topmost_at(&self, point: Percent) -> Option<&SpatialEntry> {
        self.query_point(point)
            .into_iter()
            .max_by_key(|entry| entry.priority)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
