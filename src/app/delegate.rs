use crate::domain::model::MediaItem;
use crate::domain::ports::PickerDelegate;
use serde::Serialize;
use std::cell::RefCell;

/// One delegate callback, as the host saw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "callback", rename_all = "snake_case")]
pub enum DelegateCall {
    ImagesSelected { images: Vec<MediaItem> },
    VideosSelected { videos: Vec<MediaItem> },
    VideoSelected { video: MediaItem },
    PreviewRequested { images: Vec<MediaItem> },
    Cancelled,
}

/// Delegate that logs every callback and keeps it for later inspection.
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    calls: RefCell<Vec<DelegateCall>>,
}

impl RecordingDelegate {
    pub fn calls(&self) -> Vec<DelegateCall> {
        self.calls.borrow().clone()
    }

    pub fn take_calls(&self) -> Vec<DelegateCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    fn record(&self, call: DelegateCall) {
        tracing::debug!("Delegate callback: {:?}", call);
        self.calls.borrow_mut().push(call);
    }
}

impl PickerDelegate for RecordingDelegate {
    fn on_images_selected(&self, images: &[MediaItem]) {
        self.record(DelegateCall::ImagesSelected {
            images: images.to_vec(),
        });
    }

    fn on_videos_selected(&self, videos: &[MediaItem]) {
        self.record(DelegateCall::VideosSelected {
            videos: videos.to_vec(),
        });
    }

    fn on_video_selected(&self, video: &MediaItem) {
        self.record(DelegateCall::VideoSelected {
            video: video.clone(),
        });
    }

    fn on_preview_requested(&self, images: &[MediaItem]) {
        self.record(DelegateCall::PreviewRequested {
            images: images.to_vec(),
        });
    }

    fn on_cancelled(&self) {
        self.record(DelegateCall::Cancelled);
    }
}
