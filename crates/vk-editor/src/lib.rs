pub mod editor;
pub mod input;
pub mod panels;
pub mod picker;
pub mod render;
pub mod resize;
pub mod selection;
pub mod shortcuts;
pub mod sidebar;
pub mod snap;

pub use editor::{ColorState, DragMode, LayoutEditor};
pub use input::{InputEvent, Key, PointerButton};
pub use panels::{EditPanel, SettingsPanel, VisibilityState};
pub use picker::{ColorPicker, PickerResponse};
pub use resize::ResizeDrag;
pub use selection::Selection;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use sidebar::Sidebar;
pub use snap::{DistanceLabel, GuideAxis, GuideLine, SnapContext, SnapResult};
