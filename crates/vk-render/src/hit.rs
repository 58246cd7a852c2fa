//! Hit testing in overlay space: point → group, rect → groups, and the
//! selection chrome (resize handles, trash and edit icons).

use vk_core::{Bounds, Group, Unit};

/// Side of a resize handle's square hot zone.
pub const HANDLE_SIZE: i32 = 6;
pub const ICON_SIZE: i32 = 8;
pub const ICON_GAP: i32 = 4;

/// Find the group at `(px, py)`.
///
/// Visible groups are tried largest-area first and the first one containing
/// the point wins, so a large group shadows smaller groups it overlaps.
/// Equal areas keep list order. Returns an index into `groups`.
pub fn hit_test_group(groups: &[Group], units: &[Unit], px: f64, py: f64) -> Option<usize> {
    let mut order: Vec<(usize, Bounds)> = groups
        .iter()
        .enumerate()
        .filter(|(_, g)| g.is_visible(units))
        .map(|(i, g)| (i, g.bounds(units)))
        .collect();
    order.sort_by(|a, b| b.1.area().cmp(&a.1.area()));
    order
        .into_iter()
        .find(|(_, b)| b.contains(px, py))
        .map(|(i, _)| i)
}

/// Every visible group whose bounds intersect `rect`, in list order.
/// Used for lasso selection.
pub fn hit_test_rect(groups: &[Group], units: &[Unit], rect: &Bounds) -> Vec<usize> {
    groups
        .iter()
        .enumerate()
        .filter(|(_, g)| g.is_visible(units) && g.intersects(units, rect))
        .map(|(i, _)| i)
        .collect()
}

// ─── Selection chrome ────────────────────────────────────────────────────

/// Corner handles of a selection rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    /// The corner this handle sits on.
    pub fn corner(self, b: &Bounds) -> (i32, i32) {
        match self {
            ResizeHandle::TopLeft => (b.left(), b.top()),
            ResizeHandle::TopRight => (b.right(), b.top()),
            ResizeHandle::BottomLeft => (b.left(), b.bottom()),
            ResizeHandle::BottomRight => (b.right(), b.bottom()),
        }
    }

    /// Hot zone: a `HANDLE_SIZE` square centered on the corner.
    pub fn rect(self, b: &Bounds) -> Bounds {
        let (cx, cy) = self.corner(b);
        let half = HANDLE_SIZE / 2;
        Bounds::new(cx - half, cy - half, HANDLE_SIZE, HANDLE_SIZE)
    }

    pub const fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::BottomLeft)
    }

    pub const fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::TopLeft | ResizeHandle::TopRight)
    }
}

/// First handle (TL, TR, BL, BR) whose hot zone contains the point.
pub fn hit_test_handle(selection: &Bounds, px: f64, py: f64) -> Option<ResizeHandle> {
    ResizeHandle::ALL
        .into_iter()
        .find(|h| h.rect(selection).contains(px, py))
}

/// Trash icon, just outside the selection's bottom-right corner.
pub fn trash_icon_bounds(selection: &Bounds) -> Bounds {
    Bounds::new(selection.right() + 5, selection.bottom() + 4, ICON_SIZE, ICON_SIZE)
}

/// Edit (pencil) icon, to the right of the trash icon.
pub fn edit_icon_bounds(selection: &Bounds) -> Bounds {
    let trash = trash_icon_bounds(selection);
    Bounds::new(trash.right() + ICON_GAP, trash.y, ICON_SIZE, ICON_SIZE)
}
