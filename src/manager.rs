use std::fmt;
use std::sync::Arc;

/// How a manager turns the original OTP URI into its app-specific deeplink.
#[derive(Clone)]
pub enum DeepLink {
    /// Hand the URI over unchanged (system credential store).
    PassThrough,
    /// Prefix followed by the URI percent-encoded as a single component.
    Encoded { prefix: String },
    /// Caller-supplied pure transform.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl DeepLink {
    pub fn encoded(prefix: impl Into<String>) -> Self {
        DeepLink::Encoded {
            prefix: prefix.into(),
        }
    }

    /// Build the final deeplink for `uri`. Pure; no platform access.
    pub fn build(&self, uri: &str) -> String {
        match self {
            DeepLink::PassThrough => uri.to_string(),
            DeepLink::Encoded { prefix } => format!("{prefix}{}", urlencoding::encode(uri)),
            DeepLink::Custom(build) => build(uri),
        }
    }
}

impl fmt::Debug for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeepLink::PassThrough => write!(f, "PassThrough"),
            DeepLink::Encoded { prefix } => {
                f.debug_struct("Encoded").field("prefix", prefix).finish()
            }
            DeepLink::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// One known credential-manager app: a display name, the URI scheme used
/// to detect that the app is installed, and its deeplink builder. The
/// probe scheme is only ever queried, never opened.
#[derive(Debug, Clone)]
pub struct ManagerDescriptor {
    name: String,
    scheme_probe: String,
    link: DeepLink,
}

impl ManagerDescriptor {
    pub fn new(name: impl Into<String>, scheme_probe: impl Into<String>, link: DeepLink) -> Self {
        Self {
            name: name.into(),
            scheme_probe: scheme_probe.into(),
            link,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scheme_probe(&self) -> &str {
        &self.scheme_probe
    }

    pub fn build_url(&self, uri: &str) -> String {
        self.link.build(uri)
    }
}

/// The built-in table of well-known managers, in presentation order.
/// "Passwords" is the system credential store and consumes the raw
/// `otpauth://` URI; the rest each use their own scheme and receive the
/// URI percent-encoded.
pub fn default_managers() -> Vec<ManagerDescriptor> {
    vec![
        ManagerDescriptor::new("Passwords", "otpauth://", DeepLink::PassThrough),
        ManagerDescriptor::new(
            "1Password",
            "onepassword://",
            DeepLink::encoded("onepassword://add-item?otp="),
        ),
        ManagerDescriptor::new("Bitwarden", "bitwarden://", DeepLink::encoded("bitwarden://")),
        ManagerDescriptor::new("Authy", "authy://", DeepLink::encoded("authy://")),
        ManagerDescriptor::new("LastPass", "lastpass://", DeepLink::encoded("lastpass://")),
        ManagerDescriptor::new("Dashlane", "dashlane://", DeepLink::encoded("dashlane://")),
        ManagerDescriptor::new(
            "Authenticator",
            "msauthv2://",
            DeepLink::encoded("msauthv2://"),
        ),
    ]
}
