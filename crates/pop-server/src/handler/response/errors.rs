use schemars::JsonSchema;
use serde::Serialize;

use crate::handler::Error;

/// JSON body of every error response.
///
/// Built from a handler [`Error`]; diagnostic context stays in the logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<'a> {
    /// Error kind identifier, e.g. `not_found`.
    pub name: &'a str,
    /// Client-facing description.
    pub message: &'a str,
    /// The resource the error relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<&'a str>,
}

impl<'a> From<&'a Error> for ErrorResponse<'a> {
    fn from(error: &'a Error) -> Self {
        Self {
            name: error.kind().name(),
            message: error.message(),
            resource: error.resource(),
        }
    }
}
