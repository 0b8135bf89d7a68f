//! OTP credential-manager deeplink dispatch library.
//!
//! This crate provides:
//! - A registry of known credential-manager apps and their deeplink builders
//! - Installed-app resolution via URL-scheme probing
//! - Dispatch of an `otpauth://` enrollment URI to the right manager,
//!   including the multi-manager choice flow

pub mod dispatch;
pub mod error;
pub mod manager;
pub mod picker;
pub mod platform;
pub mod registry;

// Re-export main types
pub use dispatch::{dispatch, resolve_choice, ChoiceRequest, DispatchOptions, DispatchOutcome};
pub use error::{DispatchError, Result};
pub use manager::{default_managers, DeepLink, ManagerDescriptor};
pub use picker::{AutoCancelPresenter, ChoicePresenter, ChoiceSelection};
pub use platform::{default_platform, Platform, PlatformFamily, SharedPlatform};
pub use registry::ManagerRegistry;
