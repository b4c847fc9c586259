pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::delegate::{DelegateCall, RecordingDelegate};
pub use app::permissions::StaticPermissions;
pub use app::stack_preview::StackPreview;
pub use config::PickerConfig;
pub use crate::core::cart::Cart;
pub use crate::core::controller::{Outcome, Phase, PickerAction, PickerController};
pub use crate::core::policy::SelectionPolicy;
pub use crate::core::session::{PickerSession, SessionHandle, SessionMessage};
pub use domain::model::{AssetId, MediaItem, MediaKind, Selection, Tab};
pub use domain::ports::{CartObserver, ConfigProvider, PermissionProvider, PickerDelegate};
pub use utils::error::{PickerError, Result};
