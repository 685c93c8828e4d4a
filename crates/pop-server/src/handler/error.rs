//! HTTP errors produced by handlers, extractors and middleware.

use std::borrow::Cow;
use std::fmt;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use strum::IntoStaticStr;

use crate::TRACING_TARGET_RESPONSE;
use crate::handler::response::ErrorResponse;

/// The kinds of HTTP error the servers can produce.
///
/// The snake_case variant name is sent to clients as the error `name`.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The request body is not valid JSON.
    BadRequest,
    /// No route matches the request.
    NotFound,
    /// The request body exceeds the configured limit.
    PayloadTooLarge,
    /// A handler panicked, timed out or a middleware failed.
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Returns the client-facing name of this kind.
    #[inline]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Returns the HTTP status code for this kind.
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn default_message(self) -> &'static str {
        match self {
            Self::BadRequest => "Invalid request data.",
            Self::NotFound => "Resource not found.",
            Self::PayloadTooLarge => "Payload too large.",
            Self::InternalServerError => "Internal server error.",
        }
    }

    /// Creates an [`Error`] of this kind with a client-facing message.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'static, str>>) -> Error {
        Error::new(self).with_message(message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An HTTP error rendered as a JSON [`ErrorResponse`].
///
/// The message and resource are sent to the client; the context is only
/// logged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "errors do nothing unless turned into a response"]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    resource: Option<String>,
    context: Option<String>,
}

impl Error {
    /// Creates an error carrying the kind's default message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: Cow::Borrowed(kind.default_message()),
            resource: None,
            context: None,
        }
    }

    /// Replaces the client-facing message.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Names the resource the error relates to.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Attaches diagnostic context for the logs.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the client-facing message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the related resource, if any.
    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Returns the diagnostic context, if any.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.kind.status_code(), self.message)?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();

        tracing::warn!(
            target: TRACING_TARGET_RESPONSE,
            status = %status,
            name = self.kind.name(),
            message = %self.message,
            resource = ?self.resource,
            context = ?self.context,
            "error response"
        );

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
