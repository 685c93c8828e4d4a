//! Cross-origin access, response hardening headers, body limit, compression.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{self, HeaderName, HeaderValue};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::utility::constants::DEFAULT_MAX_BODY_SIZE;
use crate::{Error, Result};

/// Headers set on every response regardless of configuration.
fn fixed_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
        (
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ),
    ]
}

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS, response headers, the body limit and compression.
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self;

    /// Same as [`with_security`] with defaults: any origin, no CSP.
    ///
    /// [`with_security`]: RouterSecurityExt::with_security
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self {
        let mut router = self
            .layer(DefaultBodyLimit::max(DEFAULT_MAX_BODY_SIZE))
            .layer(CompressionLayer::new())
            .layer(cors.to_layer());

        for (name, value) in fixed_headers() {
            router = router.layer(SetResponseHeaderLayer::overriding(name, value));
        }

        match headers.content_security_policy() {
            Some(csp) => router.layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_SECURITY_POLICY,
                csp,
            )),
            None => router,
        }
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default(), &SecurityHeadersConfig::default())
    }
}

/// Cross-origin resource sharing rules.
///
/// With no explicit origins every origin is allowed, which is how both
/// servers run by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// Origins allowed to make cross-origin requests; empty allows any.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// How long browsers may cache a preflight response, in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    /// Whether credentialed requests are allowed; needs explicit origins.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ALLOW_CREDENTIALS", default_value = "false")
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Returns true if any origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }

    /// Builds the CORS layer. Origins that are not valid header values are
    /// skipped; [`validate`](Self::validate) reports them.
    pub fn to_layer(&self) -> CorsLayer {
        let allow_origin = if self.allows_any_origin() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(
                self.allowed_origins
                    .iter()
                    .filter_map(|origin| HeaderValue::from_str(origin).ok()),
            )
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::HEAD, Method::POST])
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(self.allow_credentials && !self.allows_any_origin())
            .max_age(Duration::from_secs(self.max_age_seconds))
    }

    /// Rejects unparsable origins and credentials without explicit origins.
    pub fn validate(&self) -> Result<()> {
        if let Some(origin) = self
            .allowed_origins
            .iter()
            .find(|origin| HeaderValue::from_str(origin).is_err())
        {
            return Err(Error::config(
                "allowed-origins",
                format!("{origin:?} is not a valid origin"),
            ));
        }

        if self.allow_credentials && self.allows_any_origin() {
            return Err(Error::config(
                "allow-credentials",
                "credentials require explicit allowed origins",
            ));
        }

        Ok(())
    }
}

/// Optional response headers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SecurityHeadersConfig {
    /// Content-Security-Policy directives.
    ///
    /// Unset by default so the Scalar UI can load its scripts.
    pub content_security_policy: Option<String>,
}

impl SecurityHeadersConfig {
    /// Returns the CSP header value, if one is configured and valid.
    fn content_security_policy(&self) -> Option<HeaderValue> {
        let csp = self.content_security_policy.as_deref()?;
        HeaderValue::from_str(csp)
            .inspect_err(|err| {
                tracing::warn!(error = %err, "ignoring invalid content security policy");
            })
            .ok()
    }
}
