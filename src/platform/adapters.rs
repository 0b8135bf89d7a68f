use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{DispatchError, Result};

/// Which dispatch convention the host platform follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    /// One handler at a time; no native multi-option prompt is assumed,
    /// so multi-manager dispatch is handed back to the caller.
    SingleHandler,
    /// A native chooser prompt is available for multi-manager dispatch.
    NativeChooser,
}

/// Host capabilities the dispatcher relies on: scheme presence queries,
/// URL launching, and (on chooser platforms) a native option prompt.
#[async_trait]
pub trait Platform: Send + Sync {
    fn family(&self) -> PlatformFamily;

    /// Whether an app handling `scheme` is installed. The registry treats
    /// an error here the same as `Ok(false)`.
    async fn can_open(&self, scheme: &str) -> Result<bool>;

    /// Fire-and-forget launch of `url`.
    async fn open_url(&self, url: &str) -> Result<()>;

    /// Present `options` and report the selected index; `cancel_index` is
    /// the dismiss option. Only called on `NativeChooser` platforms.
    async fn present_options(&self, _options: &[String], _cancel_index: usize) -> Result<usize> {
        Err(DispatchError::Unsupported("native chooser".to_string()))
    }
}

pub type SharedPlatform = Arc<dyn Platform>;

pub mod portable;
