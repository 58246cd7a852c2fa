pub mod hit;
pub mod paint;
pub mod recording;
pub mod surface;

pub use hit::{ResizeHandle, hit_test_group, hit_test_handle, hit_test_rect};
pub use recording::{DrawCmd, RecordingSurface};
pub use surface::DrawSurface;
