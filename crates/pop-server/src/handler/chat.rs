//! Chat message handlers.
//!
//! Messages live in the injected [`MessageStore`] for the lifetime of the
//! process. Listing returns them in the order they were posted; posting
//! appends one and echoes it back with its generated id and timestamp.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use pop_core::{Message, MessageStore};

use crate::TRACING_TARGET_CHAT;
use crate::extract::Json;
use crate::handler::request::PostMessage;
use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

/// Returns every stored message in insertion order.
#[tracing::instrument(skip_all)]
async fn get_all_messages(
    State(message_store): State<MessageStore>,
) -> (StatusCode, Json<Vec<Message>>) {
    let messages = message_store.list().await;

    tracing::debug!(
        target: TRACING_TARGET_CHAT,
        message_count = messages.len(),
        "Messages listed",
    );

    (StatusCode::OK, Json(messages))
}

fn get_all_messages_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List messages")
        .description("Returns all messages posted since the server started, oldest first.")
        .response::<200, Json<Vec<Message>>>()
}

/// Appends a message and returns it.
///
/// A request without a JSON body (no or non-JSON `Content-Type`, or an empty
/// body) creates a message with both fields absent.
#[tracing::instrument(skip_all)]
async fn post_message(
    State(message_store): State<MessageStore>,
    request: Option<Json<PostMessage>>,
) -> (StatusCode, Json<Message>) {
    let request = request.map(Json::into_inner).unwrap_or_default();

    tracing::debug!(
        target: TRACING_TARGET_CHAT,
        has_username = request.username.is_some(),
        has_content = request.content.is_some(),
        "Posting message",
    );

    let message = message_store
        .append(request.username, request.content)
        .await;

    tracing::info!(
        target: TRACING_TARGET_CHAT,
        message_id = %message.id,
        "Message created",
    );

    (StatusCode::CREATED, Json(message))
}

fn post_message_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Post message")
        .description("Appends a message to the chat log and returns it with its id and time.")
        .response::<201, Json<Message>>()
        .response::<400, Json<ErrorResponse<'static>>>()
        .response::<413, Json<ErrorResponse<'static>>>()
}

/// Returns an [`ApiRouter`] with all chat routes.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/chat",
            get_with(get_all_messages, get_all_messages_docs)
                .post_with(post_message, post_message_docs),
        )
        .with_path_items(|item| item.tag("Chat"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::{Value, json};
    use uuid::Uuid;

    use super::*;
    use crate::handler::test::{create_test_server_with_router, create_test_server_with_state};

    #[tokio::test]
    async fn fresh_store_lists_nothing() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.get("/chat").await;
        response.assert_status_ok();
        assert!(response.json::<Vec<Message>>().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn post_returns_created_message() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/chat")
            .json(&PostMessage::new("a", "hi"))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        assert_eq!(body["username"], "a");
        assert_eq!(body["content"], "hi");
        assert!(body["id"].as_str().is_some_and(|id| Uuid::parse_str(id).is_ok()));
        assert!(body["time"].is_i64());

        Ok(())
    }

    #[tokio::test]
    async fn list_preserves_post_order() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let mut posted = Vec::new();
        for content in ["first", "second", "third"] {
            let response = server
                .post("/chat")
                .json(&PostMessage::new("pop", content))
                .await;
            posted.push(response.json::<Message>());
        }

        let listed = server.get("/chat").await.json::<Vec<Message>>();
        assert_eq!(listed, posted);

        Ok(())
    }

    #[tokio::test]
    async fn identical_posts_get_distinct_ids() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let mut ids = HashSet::new();
        for _ in 0..5 {
            let message = server
                .post("/chat")
                .json(&PostMessage::new("same", "same"))
                .await
                .json::<Message>();
            ids.insert(message.id);
        }
        assert_eq!(ids.len(), 5);

        Ok(())
    }

    #[tokio::test]
    async fn missing_fields_are_stored_absent() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.post("/chat").json(&json!({})).await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        assert!(body.get("username").is_none());
        assert!(body.get("content").is_none());
        assert!(body.get("id").is_some());

        Ok(())
    }

    #[tokio::test]
    async fn post_without_content_type_creates_empty_message() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.post("/chat").await;
        response.assert_status(StatusCode::CREATED);

        let message = response.json::<Message>();
        assert_eq!(message.username, None);
        assert_eq!(message.content, None);

        Ok(())
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/chat")
            .text("{\"username\":")
            .content_type("application/json")
            .await;
        response.assert_status_bad_request();

        let body = response.json::<Value>();
        assert_eq!(body["name"], "bad_request");

        let listed = server.get("/chat").await.json::<Vec<Message>>();
        assert!(listed.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn empty_json_body_creates_empty_message() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.post("/chat").content_type("application/json").await;
        response.assert_status(StatusCode::CREATED);

        let message = response.json::<Message>();
        assert_eq!(message.username, None);
        assert_eq!(message.content, None);

        Ok(())
    }

    #[tokio::test]
    async fn non_json_body_is_ignored() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/chat")
            .text("hello")
            .content_type("text/plain")
            .await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        assert!(body.get("username").is_none());
        assert!(body.get("content").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn field_values_are_stored_unchanged() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server
            .post("/chat")
            .json(&json!({ "username": 7, "content": { "text": "hi" } }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        assert_eq!(body["username"], json!(7));
        assert_eq!(body["content"], json!({ "text": "hi" }));

        let listed = server.get("/chat").await.json::<Vec<Value>>();
        assert_eq!(listed, vec![body]);

        Ok(())
    }

    #[tokio::test]
    async fn array_body_has_no_fields() -> anyhow::Result<()> {
        let server = create_test_server_with_router(|_| routes()).await?;

        let response = server.post("/chat").json(&json!(["a", "hi"])).await;
        response.assert_status(StatusCode::CREATED);

        let body = response.json::<Value>();
        assert!(body.get("username").is_none());
        assert!(body.get("content").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn handlers_share_injected_store() -> anyhow::Result<()> {
        let state = ServiceState::new();
        let store = state.message_store.clone();
        let server = create_test_server_with_state(routes(), state).await?;

        server
            .post("/chat")
            .json(&PostMessage::new("a", "hi"))
            .await
            .assert_status(StatusCode::CREATED);

        assert_eq!(store.len().await, 1);
        let stored = store.list().await;
        assert_eq!(stored[0].content, Some(json!("hi")));

        Ok(())
    }

    #[tokio::test]
    async fn separate_states_do_not_share_messages() -> anyhow::Result<()> {
        let first = create_test_server_with_router(|_| routes()).await?;
        let second = create_test_server_with_router(|_| routes()).await?;

        first
            .post("/chat")
            .json(&PostMessage::new("a", "hi"))
            .await
            .assert_status(StatusCode::CREATED);

        let listed = second.get("/chat").await.json::<Vec<Message>>();
        assert!(listed.is_empty());

        Ok(())
    }
}
