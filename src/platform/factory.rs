use std::sync::Arc;

use super::adapters::SharedPlatform;

pub fn default_platform() -> SharedPlatform {
    Arc::new(super::adapters::portable::PortablePlatform::new())
}
