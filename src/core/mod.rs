pub mod cart;
pub mod controller;
pub mod policy;
pub mod session;

pub use crate::domain::model::{MediaItem, MediaKind, Selection, Tab};
pub use crate::domain::ports::{CartObserver, ConfigProvider, PermissionProvider, PickerDelegate};
pub use crate::utils::error::Result;
