//! Alignment snapping.
//!
//! Candidate bounds are compared in screen space against canvas landmarks
//! (both edges and the middle of each axis) and against the edges of
//! sibling groups. Every landmark within the threshold produces a guide;
//! the closest one per axis becomes the correction.

use crate::resize::MIN_GROUP_SIZE;
use vk_core::{Bounds, SnapSettings, ViewTransform, Viewport};
use vk_render::ResizeHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuideAxis {
    /// A vertical line at a fixed screen x.
    Vertical,
    /// A horizontal line at a fixed screen y.
    Horizontal,
}

/// Alignment guide in screen pixels. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuideLine {
    pub axis: GuideAxis,
    pub position: i32,
}

/// Screen-pixel gap between an edge and the canvas boundary, anchored just
/// inside that edge (overlay coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceLabel {
    pub x: i32,
    pub y: i32,
    pub value: i32,
}

/// Which edges of the candidate may snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapEdges {
    pub left: bool,
    pub right: bool,
    pub center_x: bool,
    pub top: bool,
    pub bottom: bool,
    pub center_y: bool,
}

impl SnapEdges {
    pub const ALL: SnapEdges = SnapEdges {
        left: true,
        right: true,
        center_x: true,
        top: true,
        bottom: true,
        center_y: true,
    };

    /// The two edges a corner handle drags. Centers never snap on resize.
    pub fn for_handle(handle: ResizeHandle) -> Self {
        Self {
            left: handle.moves_left(),
            right: !handle.moves_left(),
            center_x: false,
            top: handle.moves_top(),
            bottom: !handle.moves_top(),
            center_y: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub bounds: Bounds,
    pub guides: Vec<GuideLine>,
    pub labels: Vec<DistanceLabel>,
}

impl SnapResult {
    fn passthrough(bounds: Bounds) -> Self {
        Self {
            bounds,
            guides: Vec::new(),
            labels: Vec::new(),
        }
    }
}

/// Per-axis accumulator: guides seen and the best correction so far.
#[derive(Debug, Default)]
struct AxisProbe {
    threshold: f64,
    best: Option<f64>,
    guides: Vec<i32>,
}

impl AxisProbe {
    fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    fn consider(&mut self, landmark: f64, edge: f64) {
        let delta = landmark - edge;
        if delta.abs() > self.threshold {
            return;
        }
        let pos = landmark.round() as i32;
        if !self.guides.contains(&pos) {
            self.guides.push(pos);
        }
        // strictly closer replaces; ties keep the first match
        if self.best.is_none_or(|b| delta.abs() < b.abs()) {
            self.best = Some(delta);
        }
    }
}

/// Screen-space edges of one rectangle on one axis.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: f64,
    end: f64,
    center: f64,
}

/// Everything the engine needs to know about the scene around a drag.
pub struct SnapContext<'a> {
    pub viewport: Viewport,
    pub transform: &'a ViewTransform,
    pub settings: &'a SnapSettings,
    /// Bounds of visible, unselected groups.
    pub siblings: &'a [Bounds],
}

impl SnapContext<'_> {
    fn span_x(&self, b: &Bounds) -> Span {
        Span {
            start: self.transform.x_to_screen(b.left() as f64),
            end: self.transform.x_to_screen(b.right() as f64),
            center: self.transform.x_to_screen(b.center_x()),
        }
    }

    fn span_y(&self, b: &Bounds) -> Span {
        Span {
            start: self.transform.y_to_screen(b.top() as f64),
            end: self.transform.y_to_screen(b.bottom() as f64),
            center: self.transform.y_to_screen(b.center_y()),
        }
    }

    fn probe_axis(&self, probe: &mut AxisProbe, extent: i32, own: Span, others: &[Span], eligible: (bool, bool, bool)) {
        let (start_ok, end_ok, center_ok) = eligible;
        let extent = extent as f64;
        for landmark in [0.0, extent / 2.0, extent] {
            if center_ok {
                probe.consider(landmark, own.center);
            }
            if start_ok {
                probe.consider(landmark, own.start);
            }
            if end_ok {
                probe.consider(landmark, own.end);
            }
        }
        for other in others {
            if start_ok {
                probe.consider(other.start, own.start);
                probe.consider(other.end, own.start);
            }
            if end_ok {
                probe.consider(other.end, own.end);
                probe.consider(other.start, own.end);
            }
            if center_ok {
                probe.consider(other.center, own.center);
            }
        }
    }

    /// Run both axes. Probing is skipped unless snapping or guides are on.
    fn probe(&self, b: &Bounds, edges: SnapEdges) -> (AxisProbe, AxisProbe) {
        let threshold = self.settings.effective_threshold() as f64;
        let mut px = AxisProbe::new(threshold);
        let mut py = AxisProbe::new(threshold);
        if !(self.settings.snapping_enabled || self.settings.guides_enabled) {
            return (px, py);
        }

        let xs: Vec<Span> = self.siblings.iter().map(|s| self.span_x(s)).collect();
        let ys: Vec<Span> = self.siblings.iter().map(|s| self.span_y(s)).collect();
        self.probe_axis(
            &mut px,
            self.viewport.width,
            self.span_x(b),
            &xs,
            (edges.left, edges.right, edges.center_x),
        );
        self.probe_axis(
            &mut py,
            self.viewport.height,
            self.span_y(b),
            &ys,
            (edges.top, edges.bottom, edges.center_y),
        );
        (px, py)
    }

    /// Best correction converted to whole overlay units, if snapping is on.
    fn correction(&self, probe: &AxisProbe) -> Option<i32> {
        if !self.settings.snapping_enabled {
            return None;
        }
        probe
            .best
            .map(|d| (d / self.transform.scale()).round() as i32)
    }

    fn guides(&self, px: &AxisProbe, py: &AxisProbe) -> Vec<GuideLine> {
        if !self.settings.guides_enabled {
            return Vec::new();
        }
        let vertical = px.guides.iter().map(|p| GuideLine {
            axis: GuideAxis::Vertical,
            position: *p,
        });
        let horizontal = py.guides.iter().map(|p| GuideLine {
            axis: GuideAxis::Horizontal,
            position: *p,
        });
        vertical.chain(horizontal).collect()
    }

    fn finish(&self, bounds: Bounds, px: &AxisProbe, py: &AxisProbe) -> SnapResult {
        let labels = if self.settings.distance_labels_enabled {
            self.distance_labels(&bounds)
        } else {
            Vec::new()
        };
        SnapResult {
            bounds,
            guides: self.guides(px, py),
            labels,
        }
    }

    /// Snap a translated selection. All six edges are eligible.
    pub fn snap_move(&self, proposed: Bounds) -> SnapResult {
        if !self.settings.any_enabled() {
            return SnapResult::passthrough(proposed);
        }
        let (px, py) = self.probe(&proposed, SnapEdges::ALL);
        let dx = self.correction(&px).unwrap_or(0);
        let dy = self.correction(&py).unwrap_or(0);
        self.finish(proposed.translated(dx, dy), &px, &py)
    }

    /// Snap a resize candidate. Only the dominant axis moves its dragged
    /// edge; the other extent is re-derived from `aspect` and the corner
    /// opposite `handle` stays put.
    pub fn snap_resize(
        &self,
        proposed: Bounds,
        handle: ResizeHandle,
        horizontal_dominant: bool,
        aspect: f64,
    ) -> SnapResult {
        if !self.settings.any_enabled() {
            return SnapResult::passthrough(proposed);
        }
        let (px, py) = self.probe(&proposed, SnapEdges::for_handle(handle));
        let (mut left, mut top) = (proposed.left(), proposed.top());
        let (mut right, mut bottom) = (proposed.right(), proposed.bottom());

        if horizontal_dominant {
            if let Some(d) = self.correction(&px).filter(|d| *d != 0) {
                if handle.moves_left() {
                    left += d;
                } else {
                    right += d;
                }
                let width = (right - left).max(MIN_GROUP_SIZE);
                let height = ((width as f64 / aspect).round() as i32).max(MIN_GROUP_SIZE);
                if handle.moves_left() {
                    left = right - width;
                } else {
                    right = left + width;
                }
                if handle.moves_top() {
                    top = bottom - height;
                } else {
                    bottom = top + height;
                }
            }
        } else if let Some(d) = self.correction(&py).filter(|d| *d != 0) {
            if handle.moves_top() {
                top += d;
            } else {
                bottom += d;
            }
            let height = (bottom - top).max(MIN_GROUP_SIZE);
            let width = ((height as f64 * aspect).round() as i32).max(MIN_GROUP_SIZE);
            if handle.moves_top() {
                top = bottom - height;
            } else {
                bottom = top + height;
            }
            if handle.moves_left() {
                left = right - width;
            } else {
                right = left + width;
            }
        }

        self.finish(Bounds::new(left, top, right - left, bottom - top), &px, &py)
    }

    /// Labels for edges within twice the threshold of a canvas boundary.
    /// The gap is signed, so an edge past the boundary is always labeled
    /// with its negative overhang.
    pub fn distance_labels(&self, b: &Bounds) -> Vec<DistanceLabel> {
        let limit = self.settings.effective_threshold() * 2;
        let t = self.transform;
        let left = t.x_to_screen(b.left() as f64).round() as i32;
        let top = t.y_to_screen(b.top() as f64).round() as i32;
        let right = (self.viewport.width as f64 - t.x_to_screen(b.right() as f64)).round() as i32;
        let bottom = (self.viewport.height as f64 - t.y_to_screen(b.bottom() as f64)).round() as i32;

        let mid_x = b.left() + b.width / 2;
        let mid_y = b.top() + b.height / 2;
        [
            (left, b.left() + 2, mid_y),
            (right, b.right() - 2, mid_y),
            (top, mid_x, b.top() + 2),
            (bottom, mid_x, b.bottom() - 2),
        ]
        .into_iter()
        .filter(|(d, _, _)| *d <= limit)
        .map(|(value, x, y)| DistanceLabel { x, y, value })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vk_core::ScaleGranularity;

    const VIEW: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    fn identity() -> ViewTransform {
        ViewTransform::new(0, 0, 1.0, ScaleGranularity::HalfStep)
    }

    fn settings(snap: bool, guides: bool, labels: bool) -> SnapSettings {
        SnapSettings {
            snapping_enabled: snap,
            guides_enabled: guides,
            distance_labels_enabled: labels,
            threshold: 6,
        }
    }

    #[test]
    fn snaps_to_sibling_edge() {
        let t = identity();
        let s = settings(true, true, false);
        let siblings = [Bounds::new(100, 300, 50, 50)];
        let ctx = SnapContext {
            viewport: VIEW,
            transform: &t,
            settings: &s,
            siblings: &siblings,
        };
        // left edge 3px short of the sibling's right edge
        let r = ctx.snap_move(Bounds::new(147, 200, 20, 20));
        assert_eq!(r.bounds, Bounds::new(150, 200, 20, 20));
        assert!(r.guides.contains(&GuideLine {
            axis: GuideAxis::Vertical,
            position: 150
        }));
    }

    #[test]
    fn snapping_is_idempotent() {
        let t = identity();
        let s = settings(true, true, true);
        let siblings = [Bounds::new(100, 100, 40, 40)];
        let ctx = SnapContext {
            viewport: VIEW,
            transform: &t,
            settings: &s,
            siblings: &siblings,
        };
        let once = ctx.snap_move(Bounds::new(143, 97, 30, 30)).bounds;
        let twice = ctx.snap_move(once).bounds;
        assert_eq!(once, Bounds::new(140, 100, 30, 30));
        assert_eq!(twice, once);
    }

    #[test]
    fn closest_landmark_wins_and_ties_keep_first() {
        let t = identity();
        let s = settings(true, false, false);
        let siblings = [Bounds::new(0, 500, 104, 10), Bounds::new(0, 520, 98, 10)];
        let ctx = SnapContext {
            viewport: VIEW,
            transform: &t,
            settings: &s,
            siblings: &siblings,
        };
        // left edge at 100: sibling rights at 104 (+4) and 98 (-2)
        let r = ctx.snap_move(Bounds::new(100, 200, 20, 20));
        assert_eq!(r.bounds.x, 98);
        assert!(r.guides.is_empty(), "guides disabled");

        let tied = [Bounds::new(0, 500, 103, 10), Bounds::new(0, 520, 97, 10)];
        let ctx = SnapContext {
            siblings: &tied,
            ..ctx
        };
        assert_eq!(ctx.snap_move(Bounds::new(100, 200, 20, 20)).bounds.x, 103);
    }

    #[test]
    fn canvas_center_is_a_landmark() {
        let t = identity();
        let s = settings(true, true, false);
        let ctx = SnapContext {
            viewport: VIEW,
            transform: &t,
            settings: &s,
            siblings: &[],
        };
        // center at 398 vs canvas middle 400
        let r = ctx.snap_move(Bounds::new(388, 200, 20, 20));
        assert_eq!(r.bounds.x, 390);
    }

    #[test]
    fn guides_without_snapping_leave_bounds() {
        let t = identity();
        let s = settings(false, true, false);
        let ctx = SnapContext {
            viewport: VIEW,
            transform: &t,
            settings: &s,
            siblings: &[],
        };
        let r = ctx.snap_move(Bounds::new(3, 200, 20, 20));
        assert_eq!(r.bounds, Bounds::new(3, 200, 20, 20));
        assert_eq!(
            r.guides,
            vec![GuideLine {
                axis: GuideAxis::Vertical,
                position: 0
            }]
        );
    }

    #[test]
    fn everything_off_passes_through() {
        let t = identity();
        let s = settings(false, false, false);
        let ctx = SnapContext {
            viewport: VIEW,
            transform: &t,
            settings: &s,
            siblings: &[],
        };
        let b = Bounds::new(2, 2, 10, 10);
        assert_eq!(ctx.snap_move(b), SnapResult::passthrough(b));
    }

    #[test]
    fn correction_respects_scale() {
        let t = ViewTransform::new(0, 0, 2.0, ScaleGranularity::HalfStep);
        let s = settings(true, false, false);
        let ctx = SnapContext {
            viewport: VIEW,
            transform: &t,
            settings: &s,
            siblings: &[],
        };
        // left edge at screen 4, canvas edge at 0 → -4px → -2 overlay units
        assert_eq!(ctx.snap_move(Bounds::new(2, 100, 10, 10)).bounds.x, 0);
    }

    #[test]
    fn distance_labels_near_canvas_edges() {
        let t = identity();
        let s = settings(false, false, true);
        let ctx = SnapContext {
            viewport: VIEW,
            transform: &t,
            settings: &s,
            siblings: &[],
        };
        let r = ctx.snap_move(Bounds::new(5, 200, 40, 20));
        assert_eq!(r.labels, vec![DistanceLabel { x: 7, y: 210, value: 5 }]);

        let corner = ctx.distance_labels(&Bounds::new(760, 590, 30, 8));
        assert_eq!(
            corner,
            vec![
                DistanceLabel { x: 788, y: 594, value: 10 },
                DistanceLabel { x: 775, y: 596, value: 2 },
            ]
        );
    }

    #[test]
    fn overhanging_edge_reports_negative_gap() {
        let t = identity();
        let s = settings(false, false, true);
        let ctx = SnapContext {
            viewport: VIEW,
            transform: &t,
            settings: &s,
            siblings: &[],
        };
        let labels = ctx.distance_labels(&Bounds::new(-20, 200, 40, 20));
        assert_eq!(labels, vec![DistanceLabel { x: -18, y: 210, value: -20 }]);
    }

    #[test]
    fn resize_snap_moves_dragged_edge_and_keeps_aspect() {
        let t = identity();
        let s = settings(true, false, false);
        let siblings = [Bounds::new(200, 400, 10, 10)];
        let ctx = SnapContext {
            viewport: VIEW,
            transform: &t,
            settings: &s,
            siblings: &siblings,
        };
        // 2:1 box growing from the bottom-right, right edge 3px short of 200
        let r = ctx.snap_resize(Bounds::new(100, 100, 97, 49), ResizeHandle::BottomRight, true, 2.0);
        assert_eq!(r.bounds, Bounds::new(100, 100, 100, 50));

        // top-left handle: the bottom-right corner stays fixed
        let r = ctx.snap_resize(Bounds::new(203, 150, 40, 20), ResizeHandle::TopLeft, true, 2.0);
        assert_eq!(r.bounds.right(), 243);
        assert_eq!(r.bounds.bottom(), 170);
        assert_eq!(r.bounds.left(), 200);
        assert_eq!(r.bounds.height, 22);
    }
}
