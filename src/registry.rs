use futures_util::future::join_all;

use crate::manager::{default_managers, ManagerDescriptor};
use crate::platform::Platform;

/// Holds the configured manager descriptors and answers which of them are
/// currently installed. Descriptors are fixed at construction; every
/// resolution re-probes the platform, nothing is cached across calls.
#[derive(Debug, Clone)]
pub struct ManagerRegistry {
    managers: Vec<ManagerDescriptor>,
}

impl ManagerRegistry {
    pub fn new(managers: Vec<ManagerDescriptor>) -> Self {
        Self { managers }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_managers())
    }

    pub fn managers(&self) -> &[ManagerDescriptor] {
        &self.managers
    }

    /// Probe every descriptor's scheme and return the installed subset in
    /// registry order.
    ///
    /// Probes run concurrently and the result order never depends on
    /// completion order. A probe error counts as "not installed" for that
    /// descriptor only. `uri` gates whether probing is worthwhile at all:
    /// an empty input cannot be dispatched anywhere, so no probes are
    /// issued for it; the probes themselves never read it.
    pub async fn resolve_available(
        &self,
        platform: &dyn Platform,
        uri: &str,
    ) -> Vec<ManagerDescriptor> {
        if uri.is_empty() {
            return Vec::new();
        }

        let probes = self.managers.iter().map(|manager| async move {
            match platform.can_open(manager.scheme_probe()).await {
                Ok(installed) => installed,
                Err(error) => {
                    tracing::debug!(
                        "probe for {} failed, treating as unavailable: {error}",
                        manager.scheme_probe()
                    );
                    false
                }
            }
        });
        // join_all yields results in input order.
        let installed = join_all(probes).await;

        self.managers
            .iter()
            .zip(installed)
            .filter(|(_, installed)| *installed)
            .map(|(manager, _)| manager.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{DispatchError, Result};
    use crate::manager::DeepLink;
    use crate::platform::PlatformFamily;

    const SAMPLE_URI: &str = "otpauth://totp/Example?secret=ABC";

    /// Probe-only platform: schemes answer per a fixed table, optionally
    /// after a per-scheme delay so completion order differs from list
    /// order, and probe invocations are counted.
    struct ProbePlatform {
        installed: Vec<&'static str>,
        erroring: Vec<&'static str>,
        delays_ms: Vec<(&'static str, u64)>,
        probes: AtomicUsize,
    }

    impl ProbePlatform {
        fn new(installed: Vec<&'static str>) -> Self {
            Self {
                installed,
                erroring: Vec::new(),
                delays_ms: Vec::new(),
                probes: AtomicUsize::new(0),
            }
        }

        fn with_errors(mut self, erroring: Vec<&'static str>) -> Self {
            self.erroring = erroring;
            self
        }

        fn with_delays(mut self, delays_ms: Vec<(&'static str, u64)>) -> Self {
            self.delays_ms = delays_ms;
            self
        }
    }

    #[async_trait]
    impl Platform for ProbePlatform {
        fn family(&self) -> PlatformFamily {
            PlatformFamily::SingleHandler
        }

        async fn can_open(&self, scheme: &str) -> Result<bool> {
            self.probes.fetch_add(1, Ordering::SeqCst);
            if let Some((_, delay)) = self.delays_ms.iter().find(|(s, _)| *s == scheme) {
                tokio::time::sleep(Duration::from_millis(*delay)).await;
            }
            if self.erroring.contains(&scheme) {
                return Err(DispatchError::Platform(format!(
                    "query failed for {scheme}"
                )));
            }
            Ok(self.installed.contains(&scheme))
        }

        async fn open_url(&self, _url: &str) -> Result<()> {
            Ok(())
        }
    }

    fn names(managers: &[ManagerDescriptor]) -> Vec<&str> {
        managers.iter().map(|m| m.name()).collect()
    }

    #[tokio::test]
    async fn resolves_installed_subset_in_registry_order() {
        let platform =
            ProbePlatform::new(vec!["bitwarden://", "otpauth://", "dashlane://"]);
        let registry = ManagerRegistry::with_defaults();
        let available = registry.resolve_available(&platform, SAMPLE_URI).await;
        assert_eq!(names(&available), vec!["Passwords", "Bitwarden", "Dashlane"]);
    }

    #[tokio::test]
    async fn order_is_stable_under_slow_probes() {
        // The first schemes answer last; the result must still follow
        // registry order.
        let platform = ProbePlatform::new(vec!["otpauth://", "onepassword://", "authy://"])
            .with_delays(vec![
                ("otpauth://", 40),
                ("onepassword://", 25),
                ("authy://", 5),
            ]);
        let registry = ManagerRegistry::with_defaults();
        let available = registry.resolve_available(&platform, SAMPLE_URI).await;
        assert_eq!(names(&available), vec!["Passwords", "1Password", "Authy"]);
    }

    #[tokio::test]
    async fn probe_errors_exclude_only_that_manager() {
        let platform = ProbePlatform::new(vec!["otpauth://", "bitwarden://"])
            .with_errors(vec!["otpauth://"]);
        let registry = ManagerRegistry::with_defaults();
        let available = registry.resolve_available(&platform, SAMPLE_URI).await;
        assert_eq!(names(&available), vec!["Bitwarden"]);
    }

    #[tokio::test]
    async fn empty_uri_skips_probing_entirely() {
        let platform = ProbePlatform::new(vec!["otpauth://"]);
        let registry = ManagerRegistry::with_defaults();
        let available = registry.resolve_available(&platform, "").await;
        assert!(available.is_empty());
        assert_eq!(platform.probes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn every_resolution_re_probes() {
        let platform = ProbePlatform::new(vec!["otpauth://"]);
        let registry = ManagerRegistry::with_defaults();
        registry.resolve_available(&platform, SAMPLE_URI).await;
        registry.resolve_available(&platform, SAMPLE_URI).await;
        let expected = registry.managers().len() * 2;
        assert_eq!(platform.probes.load(Ordering::SeqCst), expected);
    }

    #[tokio::test]
    async fn override_list_is_probed_as_given() {
        let registry = ManagerRegistry::new(vec![
            ManagerDescriptor::new("KeeperB", "keeperb://", DeepLink::encoded("keeperb://")),
            ManagerDescriptor::new("KeeperA", "keepera://", DeepLink::encoded("keepera://")),
        ]);
        let platform = ProbePlatform::new(vec!["keepera://", "keeperb://"]);
        let available = registry.resolve_available(&platform, SAMPLE_URI).await;
        // Insertion order, not alphabetical.
        assert_eq!(names(&available), vec!["KeeperB", "KeeperA"]);
    }
}
