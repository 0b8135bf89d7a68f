use std::process::ExitStatus;

use async_trait::async_trait;
use tokio::process::Command;

use super::{Platform, PlatformFamily};
use crate::error::{DispatchError, Result};

/// Desktop adapter. Opens URLs through the operating system's open
/// command; scheme probing uses the desktop's handler query where one
/// exists and otherwise reports nothing installed. No native chooser, so
/// the portable family is `SingleHandler`.
#[derive(Debug, Default)]
pub struct PortablePlatform;

impl PortablePlatform {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Platform for PortablePlatform {
    fn family(&self) -> PlatformFamily {
        PlatformFamily::SingleHandler
    }

    async fn can_open(&self, scheme: &str) -> Result<bool> {
        scheme_has_handler(scheme).await
    }

    async fn open_url(&self, url: &str) -> Result<()> {
        open_url_native(url).await
    }
}

fn launch_failed(url: &str, reason: String) -> DispatchError {
    DispatchError::Launch {
        url: url.to_string(),
        reason,
    }
}

fn ensure_command_success(status: ExitStatus, url: &str) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(launch_failed(url, format!("open command exited with {status}")))
    }
}

#[cfg(target_os = "linux")]
async fn scheme_has_handler(scheme: &str) -> Result<bool> {
    let scheme = scheme.trim_end_matches("://");
    let output = Command::new("xdg-settings")
        .arg("get")
        .arg("default-url-scheme-handler")
        .arg(scheme)
        .output()
        .await
        .map_err(|error| DispatchError::Platform(format!("failed to run xdg-settings: {error}")))?;
    if !output.status.success() {
        return Ok(false);
    }
    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
}

#[cfg(not(target_os = "linux"))]
async fn scheme_has_handler(_scheme: &str) -> Result<bool> {
    // No portable scheme-handler query on this desktop.
    Ok(false)
}

#[cfg(target_os = "macos")]
async fn open_url_native(url: &str) -> Result<()> {
    let status = Command::new("open")
        .arg(url)
        .status()
        .await
        .map_err(|error| launch_failed(url, format!("failed to run open: {error}")))?;
    ensure_command_success(status, url)
}

#[cfg(target_os = "linux")]
async fn open_url_native(url: &str) -> Result<()> {
    let status = Command::new("xdg-open")
        .arg(url)
        .status()
        .await
        .map_err(|error| launch_failed(url, format!("failed to run xdg-open: {error}")))?;
    ensure_command_success(status, url)
}

#[cfg(target_os = "windows")]
async fn open_url_native(url: &str) -> Result<()> {
    let status = Command::new("cmd")
        .arg("/C")
        .arg("start")
        .arg("")
        .arg(url)
        .status()
        .await
        .map_err(|error| launch_failed(url, format!("failed to run start: {error}")))?;
    ensure_command_success(status, url)
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
async fn open_url_native(url: &str) -> Result<()> {
    Err(DispatchError::Unsupported(format!(
        "open_url is not supported on this platform (url: {url})"
    )))
}
