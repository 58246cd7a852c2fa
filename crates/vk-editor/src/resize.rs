//! Corner-handle resize math.
//!
//! Every step recomputes geometry from the snapshot taken when the drag
//! began, so rounding never accumulates across steps.

use vk_core::{Bounds, Unit, UnitHandle};
use vk_render::ResizeHandle;

/// Smallest width or height a resized selection may have.
pub const MIN_GROUP_SIZE: i32 = 12;
/// Largest width or height a resized selection may have.
pub const MAX_GROUP_SIZE: i32 = 1 << 20;
/// Smallest width or height of a single unit after scaling.
pub const MIN_UNIT_SIZE: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSnapshot {
    pub handle: UnitHandle,
    pub bounds: Bounds,
}

/// State of an in-progress resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    pub handle: ResizeHandle,
    pub start: Bounds,
    pub pointer_start: (f64, f64),
    pub snapshots: Vec<UnitSnapshot>,
}

impl ResizeDrag {
    pub fn begin(
        handle: ResizeHandle,
        start: Bounds,
        pointer_start: (f64, f64),
        units: &[Unit],
        members: &[UnitHandle],
    ) -> Self {
        let snapshots = members
            .iter()
            .filter_map(|h| {
                units.get(h.0).map(|u| UnitSnapshot {
                    handle: *h,
                    bounds: u.bounds(),
                })
            })
            .collect();
        Self {
            handle,
            start,
            pointer_start,
            snapshots,
        }
    }

    /// Width over height of the starting bounds.
    pub fn aspect(&self) -> f64 {
        self.start.width as f64 / self.start.height as f64
    }

    /// Aspect-locked bounds for the pointer at `(px, py)` (overlay space),
    /// plus whether the horizontal axis dominated. `None` when the starting
    /// bounds are degenerate.
    pub fn propose(&self, px: f64, py: f64) -> Option<(Bounds, bool)> {
        let s = self.start;
        if s.width <= 0 || s.height <= 0 {
            return None;
        }
        let dx = (px - self.pointer_start.0).round() as i32;
        let dy = (py - self.pointer_start.1).round() as i32;
        let horizontal = dx.unsigned_abs() >= dy.unsigned_abs();

        let grow_x = if self.handle.moves_left() { dx.saturating_neg() } else { dx };
        let grow_y = if self.handle.moves_top() { dy.saturating_neg() } else { dy };
        let mut width = s.width.saturating_add(grow_x).clamp(MIN_GROUP_SIZE, MAX_GROUP_SIZE);
        let mut height = s.height.saturating_add(grow_y).clamp(MIN_GROUP_SIZE, MAX_GROUP_SIZE);

        let aspect = self.aspect();
        if horizontal {
            height = ((width as f64 / aspect).round() as i32).clamp(MIN_GROUP_SIZE, MAX_GROUP_SIZE);
        } else {
            width = ((height as f64 * aspect).round() as i32).clamp(MIN_GROUP_SIZE, MAX_GROUP_SIZE);
        }

        // the corner opposite the handle is the anchor
        let x = if self.handle.moves_left() { s.right().saturating_sub(width) } else { s.x };
        let y = if self.handle.moves_top() { s.bottom().saturating_sub(height) } else { s.y };
        Some((Bounds::new(x, y, width, height), horizontal))
    }

    /// Map every snapshot from the start bounds onto `target`.
    pub fn apply(&self, units: &mut [Unit], target: &Bounds) {
        let s = self.start;
        if s.width <= 0 || s.height <= 0 {
            return;
        }
        let sx = target.width as f64 / s.width as f64;
        let sy = target.height as f64 / s.height as f64;
        for snap in &self.snapshots {
            let Some(unit) = units.get_mut(snap.handle.0) else {
                continue;
            };
            let b = snap.bounds;
            unit.set_bounds(Bounds::new(
                (target.x as f64 + (b.x - s.x) as f64 * sx).round() as i32,
                (target.y as f64 + (b.y - s.y) as f64 * sy).round() as i32,
                ((b.width as f64 * sx).round() as i32).max(MIN_UNIT_SIZE),
                ((b.height as f64 * sy).round() as i32).max(MIN_UNIT_SIZE),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vk_core::{GroupId, InputSource};

    fn drag(handle: ResizeHandle, start: Bounds, units: &[Unit]) -> ResizeDrag {
        let members: Vec<UnitHandle> = (0..units.len()).map(UnitHandle).collect();
        ResizeDrag::begin(handle, start, (0.0, 0.0), units, &members)
    }

    #[test]
    fn bottom_right_keeps_top_left_and_aspect() {
        let d = drag(ResizeHandle::BottomRight, Bounds::new(0, 0, 40, 20), &[]);
        let (b, horizontal) = d.propose(4.0, 0.0).unwrap();
        assert!(horizontal);
        assert_eq!(b, Bounds::new(0, 0, 44, 22));
    }

    #[test]
    fn top_left_anchors_bottom_right() {
        let d = drag(ResizeHandle::TopLeft, Bounds::new(10, 10, 40, 20), &[]);
        let (b, _) = d.propose(-10.0, -2.0).unwrap();
        assert_eq!(b, Bounds::new(0, 5, 50, 25));
        assert_eq!((b.right(), b.bottom()), (50, 30));
    }

    #[test]
    fn vertical_drag_derives_width() {
        let d = drag(ResizeHandle::BottomLeft, Bounds::new(0, 0, 40, 20), &[]);
        let (b, horizontal) = d.propose(1.0, 10.0).unwrap();
        assert!(!horizontal);
        assert_eq!(b, Bounds::new(-20, 0, 60, 30));
    }

    #[test]
    fn clamps_to_minimum_group_size() {
        let d = drag(ResizeHandle::TopRight, Bounds::new(0, 0, 40, 20), &[]);
        let (b, _) = d.propose(-100.0, 0.0).unwrap();
        assert_eq!((b.width, b.height), (12, 12));
        assert_eq!(b.bottom(), 20);
    }

    #[test]
    fn far_pointer_is_capped() {
        let d = drag(ResizeHandle::BottomRight, Bounds::new(0, 0, 40, 20), &[]);
        let (b, _) = d.propose(1e12, 0.0).unwrap();
        assert_eq!(b, Bounds::new(0, 0, MAX_GROUP_SIZE, MAX_GROUP_SIZE / 2));

        let d = drag(ResizeHandle::TopLeft, Bounds::new(10, 10, 40, 20), &[]);
        let (b, horizontal) = d.propose(f64::MIN, f64::MIN).unwrap();
        assert!(horizontal);
        assert_eq!((b.right(), b.bottom()), (50, 30));
        assert_eq!((b.width, b.height), (MAX_GROUP_SIZE, MAX_GROUP_SIZE / 2));
    }

    #[test]
    fn degenerate_start_is_a_no_op() {
        let d = drag(ResizeHandle::BottomRight, Bounds::new(0, 0, 0, 20), &[]);
        assert_eq!(d.propose(5.0, 5.0), None);
    }

    #[test]
    fn units_scale_from_snapshot() {
        let g = GroupId::intern("resize_units");
        let mut units = vec![
            Unit::new("a", InputSource::Key(65), Bounds::new(0, 0, 10, 10), g),
            Unit::new("b", InputSource::Key(66), Bounds::new(10, 0, 10, 10), g),
        ];
        let d = drag(ResizeHandle::BottomRight, Bounds::new(0, 0, 20, 10), &units);

        d.apply(&mut units, &Bounds::new(0, 0, 40, 20));
        assert_eq!(units[1].bounds(), Bounds::new(20, 0, 20, 20));

        // a later step starts from the snapshot again, not the previous step
        d.apply(&mut units, &Bounds::new(0, 0, 30, 15));
        assert_eq!(units[0].bounds(), Bounds::new(0, 0, 15, 15));
        assert_eq!(units[1].bounds(), Bounds::new(15, 0, 15, 15));
    }

    #[test]
    fn unit_size_floor() {
        let g = GroupId::intern("resize_floor");
        let mut units = vec![Unit::new("a", InputSource::Key(65), Bounds::new(0, 0, 6, 6), g)];
        let d = drag(ResizeHandle::BottomRight, Bounds::new(0, 0, 60, 60), &units);
        d.apply(&mut units, &Bounds::new(0, 0, 12, 12));
        assert_eq!(units[0].bounds(), Bounds::new(0, 0, 4, 4));
    }
}
