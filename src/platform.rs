mod adapters;
pub mod factory;

pub use adapters::{Platform, PlatformFamily, SharedPlatform};
pub use factory::default_platform;
