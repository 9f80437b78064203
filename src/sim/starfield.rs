//! Decorative background stars
//!
//! Stars are scattered once over the whole world and kept in a push-to-leaves
//! index, so only leaves hold stars and a viewport query touches the few
//! leaves under the screen. Purely visual; nothing collides with them.

use glam::Vec2;

use super::camera::Viewport;
use super::geometry::Rect;
use super::quadtree::{IndexedPoint, QuadTree};
use super::random::Dice;

/// A background star; the payload is its brightness in [0.3, 1]
pub type Star = IndexedPoint<f32>;

#[derive(Debug, Clone)]
pub struct Starfield {
    tree: QuadTree<f32>,
}

impl Starfield {
    /// Scatter `count` stars uniformly over the world `[-world_half, world_half)`
    pub fn new(count: usize, capacity: usize, world_half: Vec2, rng: &mut impl Dice) -> Self {
        let region = Rect::from_center(Vec2::ZERO, world_half);
        let mut tree = QuadTree::new(region, capacity, true);
        for _ in 0..count {
            let pos = Vec2::new(
                rng.range(region.x1, region.x2),
                rng.range(region.y1, region.y2),
            );
            let brightness = rng.range(0.3, 1.0);
            // A roll of exactly the high edge lands outside the half-open region
            if !tree.insert(IndexedPoint::new(pos, brightness)) {
                log::trace!("Dropped star on the world edge at {}", pos);
            }
        }
        log::debug!("Starfield: {} stars", tree.len());
        Self { tree }
    }

    /// Stars on screen
    pub fn visible(&self, view: &Viewport) -> Vec<&Star> {
        self.tree.query(&view.rect())
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The underlying index (for debug overlays)
    pub fn index(&self) -> &QuadTree<f32> {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::seeded;

    #[test]
    fn test_visible_matches_brute_force() {
        let mut rng = seeded(4);
        let field = Starfield::new(2000, 8, Vec2::splat(2000.0), &mut rng);
        assert!(field.len() <= 2000 && field.len() > 1990);
        assert!(field.index().is_split());

        let view = Viewport::new(Vec2::new(300.0, -150.0), Vec2::new(800.0, 600.0));
        let visible = field.visible(&view);
        let all = field.index().query(field.index().region());
        let expected = all
            .iter()
            .filter(|s| view.rect().contains_point(s.pos))
            .count();
        assert_eq!(visible.len(), expected);
        assert!(!visible.is_empty());
        assert!(visible.iter().all(|s| (0.3..=1.0).contains(&s.data)));
    }

    #[test]
    fn test_empty_starfield() {
        let field = Starfield::new(0, 8, Vec2::splat(100.0), &mut seeded(1));
        assert!(field.is_empty());
        let view = Viewport::new(Vec2::ZERO, Vec2::new(50.0, 50.0));
        assert!(field.visible(&view).is_empty());
    }
}
