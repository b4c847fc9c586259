use crate::domain::ports::PermissionProvider;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Permission answers set by the host. Clones share state, so the task that
/// drives the system prompt can keep a clone and flip it on success.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissions {
    photos: Arc<AtomicBool>,
    camera: Arc<AtomicBool>,
}

impl StaticPermissions {
    pub fn new(photos: bool, camera: bool) -> Self {
        Self {
            photos: Arc::new(AtomicBool::new(photos)),
            camera: Arc::new(AtomicBool::new(camera)),
        }
    }

    pub fn all() -> Self {
        Self::new(true, true)
    }

    pub fn none() -> Self {
        Self::new(false, false)
    }

    pub fn grant_all(&self) {
        self.photos.store(true, Ordering::Release);
        self.camera.store(true, Ordering::Release);
    }
}

impl PermissionProvider for StaticPermissions {
    fn photos_authorized(&self) -> bool {
        self.photos.load(Ordering::Acquire)
    }

    fn camera_authorized(&self) -> bool {
        self.camera.load(Ordering::Acquire)
    }
}
