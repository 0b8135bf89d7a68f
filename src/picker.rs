use async_trait::async_trait;

use crate::dispatch::ChoiceRequest;

/// What a presenter (or the caller) decided for a pending choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSelection {
    /// Index into the request's candidate list.
    Manager(usize),
    Cancelled,
}

/// Renders a multi-option choice on platforms without a native prompt.
///
/// An implementation resolves exactly once per call: the returned
/// selection is the whole answer, there is no separate cancel channel.
/// The dispatcher invokes a presenter at most once per dispatch.
#[async_trait]
pub trait ChoicePresenter: Send + Sync {
    async fn present(&self, request: &ChoiceRequest) -> ChoiceSelection;
}

/// Presenter for headless contexts: dismisses every choice.
#[derive(Debug, Default)]
pub struct AutoCancelPresenter;

#[async_trait]
impl ChoicePresenter for AutoCancelPresenter {
    async fn present(&self, _request: &ChoiceRequest) -> ChoiceSelection {
        ChoiceSelection::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::default_managers;

    #[tokio::test]
    async fn auto_cancel_always_cancels() {
        let request = ChoiceRequest::new("otpauth://totp/x".to_string(), default_managers());
        let presenter = AutoCancelPresenter;
        assert_eq!(
            presenter.present(&request).await,
            ChoiceSelection::Cancelled
        );
    }
}
