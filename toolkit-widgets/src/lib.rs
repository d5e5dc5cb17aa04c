//! Keyboard-driven overlays for the toolkit.
//!
//! Pure state: filtering, selection, grouping and key resolution. Rendering
//! and event binding belong to the host, which performs the [`Action`]s
//! returned here.

pub mod action;
pub mod data;
mod error;
pub mod overlays;
pub mod palette;
pub mod search;
pub mod selection;
pub mod shortcuts;

pub use action::{Action, App, Theme};
pub use data::{ItemId, ToolkitData};
pub use error::{WidgetError, WidgetResult};
pub use overlays::Overlays;
pub use palette::{Command, CommandPalette};
pub use search::{GlobalSearch, ResultKind, SearchResult};
pub use selection::NavKey;
pub use shortcuts::{KeyEvent, Shortcut, ShortcutRegistry};
