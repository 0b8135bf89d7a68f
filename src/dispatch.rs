use std::sync::Arc;

use crate::error::{DispatchError, Result};
use crate::manager::ManagerDescriptor;
use crate::picker::{ChoicePresenter, ChoiceSelection};
use crate::platform::{Platform, PlatformFamily};
use crate::registry::ManagerRegistry;

/// Where users without any known manager get sent on chooser platforms.
const DISCOVERY_URL: &str =
    "https://play.google.com/store/apps/details?id=com.google.android.apps.authenticator2";

const CANCEL_LABEL: &str = "Cancel";

/// Per-call configuration for [`dispatch`].
#[derive(Clone)]
pub struct DispatchOptions {
    /// Override the built-in manager table.
    pub managers: Option<Vec<ManagerDescriptor>>,
    /// When nothing is installed on a single-handler platform, hand the
    /// raw URI to the system handler instead of doing nothing.
    pub fallback_to_system: bool,
    /// Presenter for the multi-manager choice on single-handler platforms.
    /// Without one, dispatch yields [`DispatchOutcome::AwaitingChoice`].
    pub presenter: Option<Arc<dyn ChoicePresenter>>,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            managers: None,
            fallback_to_system: true,
            presenter: None,
        }
    }
}

/// A pending multi-manager decision: the original URI plus the installed
/// managers the user may pick from, in registry order. Lives for exactly
/// one dispatch; feed it back through [`resolve_choice`] to finish the
/// flow.
#[derive(Debug, Clone)]
pub struct ChoiceRequest {
    uri: String,
    candidates: Vec<ManagerDescriptor>,
}

impl ChoiceRequest {
    pub fn new(uri: String, candidates: Vec<ManagerDescriptor>) -> Self {
        Self { uri, candidates }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn candidates(&self) -> &[ManagerDescriptor] {
        &self.candidates
    }
}

/// How a dispatch settled.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// A deeplink (or the discovery page) was handed to the platform.
    /// `url` is the exact string that was opened.
    Opened { url: String },
    /// No manager was installed; the raw URI went to the system handler.
    FellBack { url: String },
    /// Multiple managers are installed and the caller owns presentation;
    /// complete the flow with [`resolve_choice`].
    AwaitingChoice(ChoiceRequest),
    /// Nothing was opened: fallback disabled, empty input, or the user
    /// cancelled. A valid terminal outcome, not an error.
    Dismissed,
}

/// Resolve which installed manager should receive `uri` and dispatch the
/// user there.
///
/// Installed managers are re-probed on every call; nothing is cached.
/// With zero managers the outcome depends on the platform family (system
/// fallback vs. discovery page), with exactly one the manager's deeplink
/// is opened directly, and with two or more either the native chooser
/// runs or the choice is handed back to the caller. Launch failures
/// propagate; probe failures never do.
pub async fn dispatch(
    platform: &dyn Platform,
    uri: &str,
    options: DispatchOptions,
) -> Result<DispatchOutcome> {
    if uri.is_empty() {
        tracing::debug!("empty enrollment uri, nothing to dispatch");
        return Ok(DispatchOutcome::Dismissed);
    }

    let registry = match options.managers {
        Some(managers) => ManagerRegistry::new(managers),
        None => ManagerRegistry::with_defaults(),
    };
    let available = registry.resolve_available(platform, uri).await;
    tracing::debug!(
        "resolved {} of {} managers as installed",
        available.len(),
        registry.managers().len()
    );

    match platform.family() {
        PlatformFamily::NativeChooser => dispatch_native_chooser(platform, uri, available).await,
        PlatformFamily::SingleHandler => {
            dispatch_single_handler(
                platform,
                uri,
                available,
                options.fallback_to_system,
                options.presenter.as_deref(),
            )
            .await
        }
    }
}

async fn dispatch_native_chooser(
    platform: &dyn Platform,
    uri: &str,
    available: Vec<ManagerDescriptor>,
) -> Result<DispatchOutcome> {
    match available.len() {
        // Nobody to hand the URI to; send the user to an install page for
        // a default handler instead.
        0 => open(platform, DISCOVERY_URL.to_string()).await,
        1 => open(platform, available[0].build_url(uri)).await,
        _ => {
            let mut labels: Vec<String> =
                available.iter().map(|m| m.name().to_string()).collect();
            labels.push(CANCEL_LABEL.to_string());
            let cancel_index = available.len();
            let selected = platform.present_options(&labels, cancel_index).await?;
            match available.get(selected) {
                Some(manager) => open(platform, manager.build_url(uri)).await,
                None => Ok(DispatchOutcome::Dismissed),
            }
        }
    }
}

async fn dispatch_single_handler(
    platform: &dyn Platform,
    uri: &str,
    available: Vec<ManagerDescriptor>,
    fallback_to_system: bool,
    presenter: Option<&dyn ChoicePresenter>,
) -> Result<DispatchOutcome> {
    match available.len() {
        0 if fallback_to_system => {
            platform.open_url(uri).await?;
            Ok(DispatchOutcome::FellBack {
                url: uri.to_string(),
            })
        }
        0 => Ok(DispatchOutcome::Dismissed),
        1 => open(platform, available[0].build_url(uri)).await,
        _ => {
            let request = ChoiceRequest::new(uri.to_string(), available);
            match presenter {
                Some(presenter) => {
                    let selection = presenter.present(&request).await;
                    resolve_choice(platform, request, selection).await
                }
                None => Ok(DispatchOutcome::AwaitingChoice(request)),
            }
        }
    }
}

/// Complete a dispatch that settled as [`DispatchOutcome::AwaitingChoice`],
/// applying the user's selection.
pub async fn resolve_choice(
    platform: &dyn Platform,
    request: ChoiceRequest,
    selection: ChoiceSelection,
) -> Result<DispatchOutcome> {
    match selection {
        ChoiceSelection::Cancelled => Ok(DispatchOutcome::Dismissed),
        ChoiceSelection::Manager(index) => {
            let count = request.candidates().len();
            let Some(manager) = request.candidates().get(index) else {
                return Err(DispatchError::InvalidSelection { index, count });
            };
            open(platform, manager.build_url(request.uri())).await
        }
    }
}

async fn open(platform: &dyn Platform, url: String) -> Result<DispatchOutcome> {
    platform.open_url(&url).await?;
    Ok(DispatchOutcome::Opened { url })
}
