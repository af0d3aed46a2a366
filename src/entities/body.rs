use crate::mask::Mask;

/// Anything with a position and a collision mask
pub trait Body {
    fn position(&self) -> (i32, i32);
    fn mask(&self) -> &Mask;

    /// Per-pixel overlap test between two bodies
    fn collides_with(&self, other: &impl Body) -> bool
    where
        Self: Sized,
    {
        let (x1, y1) = self.position();
        let (x2, y2) = other.position();
        self.mask()
            .overlap(other.mask(), (x2 - x1, y2 - y1))
            .is_some()
    }
}
