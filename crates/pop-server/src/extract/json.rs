//! Lenient JSON body extractor.
//!
//! [`Json`] wraps [`axum::Json`] for responses and OpenAPI generation. As an
//! extractor it is used in its optional form, `Option<Json<T>>`, which treats
//! any request that does not carry a JSON body as having no body at all.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, JsonRejection};
use axum::extract::{FromRequest, Json as AxumJson, OptionalFromRequest, Request};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::TRACING_TARGET_EXTRACT;
use crate::handler::{Error, ErrorKind};

/// JSON request or response body.
///
/// Extracting `Option<Json<T>>` yields:
///
/// - `None` when the `Content-Type` is missing or is not JSON
/// - `None` when the body is empty
/// - `400 Bad Request` when the body is not valid JSON
/// - `413 Payload Too Large` when the body exceeds the configured limit
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Returns the inner value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> OptionalFromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            tracing::trace!(
                target: TRACING_TARGET_EXTRACT,
                content_type = ?req.headers().get(header::CONTENT_TYPE),
                "no json content type, ignoring body"
            );
            return Ok(None);
        }

        let bytes = Bytes::from_request(req, state).await?;
        if bytes.is_empty() {
            tracing::trace!(target: TRACING_TARGET_EXTRACT, "empty json body");
            return Ok(None);
        }

        let AxumJson(value) = AxumJson::<T>::from_bytes(&bytes)?;
        Ok(Some(Self(value)))
    }
}

/// Returns whether the `Content-Type` is `application/json` or a `+json` type.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    #[inline]
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

impl From<BytesRejection> for Error {
    fn from(rejection: BytesRejection) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_EXTRACT,
            rejection = %rejection,
            "request body rejected"
        );

        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ErrorKind::PayloadTooLarge
                .with_message("Request body too large")
                .with_context(rejection.body_text())
        } else {
            ErrorKind::BadRequest
                .with_message("Failed to read request body")
                .with_context(rejection.body_text())
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_EXTRACT,
            rejection = %rejection,
            "json body rejected"
        );

        ErrorKind::BadRequest
            .with_message("Invalid JSON syntax in request body")
            .with_context(first_line(&rejection.body_text()))
    }
}

/// Keeps serde's error text to a single log line.
fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().to_owned()
}

impl<T> aide::OperationInput for Json<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumJson::<T>::operation_input(ctx, operation);
    }
}

impl<T> aide::OperationOutput for Json<T>
where
    T: schemars::JsonSchema + Serialize,
{
    type Inner = T;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        AxumJson::<T>::operation_response(ctx, operation)
    }

    fn inferred_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumJson::<T>::inferred_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use serde_json::{Value, json};

    use super::*;

    fn request(content_type: Option<&str>, body: &'static str) -> anyhow::Result<Request> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        Ok(builder.body(Body::from(body))?)
    }

    async fn extract(req: Request) -> Result<Option<Value>, Error> {
        <Json<Value> as OptionalFromRequest<()>>::from_request(req, &())
            .await
            .map(|json| json.map(Json::into_inner))
    }

    #[tokio::test]
    async fn extracts_well_formed_json() -> anyhow::Result<()> {
        let req = request(Some("application/json; charset=utf-8"), r#"{"name":"pop"}"#)?;
        assert_eq!(extract(req).await?, Some(json!({ "name": "pop" })));
        Ok(())
    }

    #[tokio::test]
    async fn missing_content_type_is_none() -> anyhow::Result<()> {
        assert_eq!(extract(request(None, r#"{"name":"pop"}"#)?).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn non_json_content_type_is_none() -> anyhow::Result<()> {
        assert_eq!(extract(request(Some("text/plain"), "hello")?).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn empty_json_body_is_none() -> anyhow::Result<()> {
        assert_eq!(extract(request(Some("application/json"), "")?).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn syntax_error_is_bad_request() -> anyhow::Result<()> {
        let Err(error) = extract(request(Some("application/json"), "{not json")?).await else {
            anyhow::bail!("expected a rejection");
        };
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        Ok(())
    }

    #[test]
    fn recognizes_json_media_types() {
        let cases = [
            ("application/json", true),
            ("Application/JSON; charset=utf-8", true),
            ("application/merge-patch+json", true),
            ("text/json", false),
            ("text/plain", false),
            ("application/x-www-form-urlencoded", false),
        ];

        for (content_type, expected) in cases {
            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, content_type.parse().unwrap());
            assert_eq!(has_json_content_type(&headers), expected, "{content_type}");
        }
    }
}
