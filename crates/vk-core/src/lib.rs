pub mod bounds;
pub mod catalog;
pub mod color;
pub mod config;
pub mod group;
pub mod id;
pub mod input;
pub mod model;
pub mod transform;

pub use bounds::Bounds;
pub use catalog::{Template, TemplateCatalog};
pub use color::{Argb, Hsv};
pub use config::{ConfigStore, JsonFileStore, MemoryStore, OverlayConfig, SnapSettings};
pub use group::{Group, build_groups};
pub use id::GroupId;
pub use input::{ClickRateTracker, InputQuery, NoInput, TrackedInput};
pub use model::*;
pub use transform::{ScaleGranularity, ViewTransform, Viewport};
