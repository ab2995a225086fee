//! Sign-in redirect rules
//!
//! The sign-in page and the sign-in modal both decide where the browser
//! goes next. These are the pure parts of that decision; the actual
//! authentication is handled elsewhere.
//!
//! Only same-site paths (starting with `/`) are honored as redirect
//! targets. Anything else falls back to the site root.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SignInError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// An external OAuth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthProvider {
    pub provider: String,
    #[serde(default)]
    pub display_name: String,
    /// Provider sign-in endpoint
    pub url: String,
}

/// Site settings relevant to sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub base_url: String,
    pub tenant_name: String,
    pub private: bool,
    pub email_auth_allowed: bool,
    pub oauth: Vec<OAuthProvider>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            tenant_name: String::new(),
            private: false,
            email_auth_allowed: true,
            oauth: Vec::new(),
        }
    }
}

impl SiteSettings {
    /// The only sign-in option, if it is a single OAuth provider
    pub fn sole_provider(&self) -> Option<&OAuthProvider> {
        match self.oauth.as_slice() {
            [provider] if !self.email_auth_allowed => Some(provider),
            _ => None,
        }
    }
}

/// Where the sign-in flow is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInContext {
    /// Dedicated sign-in page, honors `?redirect=`
    Page,
    /// Modal over the current page, returns to it
    Modal,
}

/// What happens once the user has verified their code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "url", rename_all = "snake_case")]
pub enum AfterSignIn {
    /// Close the modal and reload the current page
    Reload,
    /// Navigate to the given URL
    Navigate(String),
}

/// Notice shown above the sign-in form on the sign-in page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignInNotice {
    Private,
    Locked,
}

impl SignInNotice {
    pub fn for_site(settings: &SiteSettings) -> Self {
        if settings.private {
            SignInNotice::Private
        } else {
            SignInNotice::Locked
        }
    }

    pub fn title(&self, tenant: &str) -> String {
        match self {
            SignInNotice::Private => format!(
                "{} is a private space, you must sign in to participate and vote.",
                tenant
            ),
            SignInNotice::Locked => format!("{} is currently locked.", tenant),
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            SignInNotice::Private => {
                "If you have an account or an invitation, you may use following options to sign in."
            }
            SignInNotice::Locked => {
                "To reactivate this site, sign in with an administrator account and update the required settings."
            }
        }
    }
}

/// Resolves the post-sign-in destination from a `redirect` parameter
pub fn redirect_target(base_url: &str, redirect: Option<&str>) -> String {
    match redirect {
        Some(path) if path.starts_with('/') => format!("{}{}", base_url, path),
        _ => base_url.to_string(),
    }
}

/// Extracts the `redirect` query parameter from a page URL
pub fn redirect_param(current_url: &str) -> Result<Option<String>, SignInError> {
    let url = parse_url(current_url)?;
    Ok(url
        .query_pairs()
        .find(|(key, _)| key == "redirect")
        .map(|(_, value)| value.into_owned()))
}

/// Builds the provider URL to jump to when OAuth is the only option.
///
/// Returns `None` unless exactly one provider is configured and email
/// sign-in is disabled.
pub fn auto_redirect(settings: &SiteSettings, redirect_to: &str) -> Result<Option<String>, SignInError> {
    let Some(provider) = settings.sole_provider() else {
        return Ok(None);
    };

    let mut url = parse_url(&provider.url)?;
    url.query_pairs_mut().append_pair("redirect", redirect_to);
    Ok(Some(url.into()))
}

/// Where the user lands after sign-in, for the given context.
///
/// `current_url` is the page the user is on.
pub fn return_url(settings: &SiteSettings, context: SignInContext, current_url: &str) -> Result<String, SignInError> {
    match context {
        SignInContext::Modal => Ok(current_url.to_string()),
        SignInContext::Page => {
            let redirect = redirect_param(current_url)?;
            Ok(redirect_target(&settings.base_url, redirect.as_deref()))
        }
    }
}

/// Action taken after the code is verified
pub fn after_sign_in(settings: &SiteSettings, context: SignInContext, current_url: &str) -> Result<AfterSignIn, SignInError> {
    match context {
        SignInContext::Modal => Ok(AfterSignIn::Reload),
        SignInContext::Page => Ok(AfterSignIn::Navigate(return_url(settings, context, current_url)?)),
    }
}

fn parse_url(raw: &str) -> Result<Url, SignInError> {
    Url::parse(raw).map_err(|source| SignInError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}
