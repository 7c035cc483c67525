//! Pixel regions that each clustering pass is restricted to.

/// Default width, in pixels, of each edge band.
pub const EDGE_MARGIN: u32 = 10;

/// Decides which pixel coordinates take part in a clustering pass.
///
/// Implemented for [`Region`] and for any `Fn(u32, u32) -> bool` closure.
pub trait RegionPredicate {
    fn contains(&self, x: u32, y: u32) -> bool;
}

impl<F> RegionPredicate for F
where
    F: Fn(u32, u32) -> bool,
{
    #[inline]
    fn contains(&self, x: u32, y: u32) -> bool {
        self(x, y)
    }
}

/// The five regions a palette is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Every pixel.
    Full,
    Top,
    Right,
    Bottom,
    Left,
}

impl Region {
    pub const EDGES: [Region; 4] = [Region::Top, Region::Right, Region::Bottom, Region::Left];

    /// Bind this region to concrete image dimensions and an edge margin.
    pub fn bounds(self, width: u32, height: u32, margin: u32) -> RegionBounds {
        RegionBounds {
            region: self,
            width,
            height,
            margin,
        }
    }
}

/// A [`Region`] resolved against an image size.
#[derive(Clone, Copy, Debug)]
pub struct RegionBounds {
    region: Region,
    width: u32,
    height: u32,
    margin: u32,
}

impl RegionPredicate for RegionBounds {
    #[inline]
    fn contains(&self, x: u32, y: u32) -> bool {
        // Bands wider than the image cover all of it.
        match self.region {
            Region::Full => true,
            Region::Top => y < self.margin,
            Region::Bottom => y >= self.height.saturating_sub(self.margin),
            Region::Left => x < self.margin,
            Region::Right => x >= self.width.saturating_sub(self.margin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_bands() {
        let (w, h) = (30, 20);
        let top = Region::Top.bounds(w, h, EDGE_MARGIN);
        let bottom = Region::Bottom.bounds(w, h, EDGE_MARGIN);
        let left = Region::Left.bounds(w, h, EDGE_MARGIN);
        let right = Region::Right.bounds(w, h, EDGE_MARGIN);

        assert!(top.contains(15, 9));
        assert!(!top.contains(15, 10));
        assert!(bottom.contains(0, 10));
        assert!(!bottom.contains(0, 9));
        assert!(left.contains(9, 5));
        assert!(!left.contains(10, 5));
        assert!(right.contains(20, 5));
        assert!(!right.contains(19, 5));
    }

    #[test]
    fn margin_wider_than_image_covers_everything() {
        let bottom = Region::Bottom.bounds(4, 4, EDGE_MARGIN);
        let right = Region::Right.bounds(4, 4, EDGE_MARGIN);
        for y in 0..4 {
            for x in 0..4 {
                assert!(bottom.contains(x, y));
                assert!(right.contains(x, y));
            }
        }
    }

    #[test]
    fn closures_are_predicates() {
        let diagonal = |x: u32, y: u32| x == y;
        assert!(diagonal.contains(3, 3));
        assert!(!diagonal.contains(3, 4));
    }
}
