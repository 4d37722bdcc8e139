use crate::types::Vec2;

/// Is a `dim` sized box at `pos` fully inside `[min, max]`?
pub fn in_bounds(pos: Vec2, min: Vec2, max: Vec2, dim: Vec2) -> bool {
    pos.x >= min.x && pos.y >= min.y && pos.x + dim.x <= max.x && pos.y + dim.y <= max.y
}

/// Move `pos` to the closest point where a `dim` sized box fits inside `[min, max]`.
///
/// Each axis is clamped on its own. When the box is bigger than the rectangle on an axis
/// the min edge wins, so oversized glyphs stay anchored at the start of the line.
pub fn move_in_bounds(pos: Vec2, min: Vec2, max: Vec2, dim: Vec2) -> Vec2 {
    Vec2::new(
        clamp_axis(pos.x, min.x, max.x - dim.x),
        clamp_axis(pos.y, min.y, max.y - dim.y),
    )
}

#[inline]
fn clamp_axis(v: i32, lo: i32, hi: i32) -> i32 {
    // Not i32::clamp: hi < lo is legal here (box larger than region)
    v.min(hi).max(lo)
}
