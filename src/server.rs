/// Single-page web surface over the same session the terminal uses
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::profile::{FitnessGoal, FitnessLevel, RestrictionSet, UserProfile};
use crate::session::{ChatSession, Submission};
use crate::transcript::Turn;

/// The session behind a lock: one completion request in flight at a time,
/// later submissions wait their turn.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<ChatSession>>,
}

pub fn router(session: ChatSession) -> Router {
    let state = AppState {
        session: Arc::new(Mutex::new(session)),
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/session", get(get_session))
        .route("/api/chat", post(post_chat))
        .route("/api/profile", put(put_profile))
        .with_state(state)
}

pub async fn serve(session: ChatSession, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Advisor web surface listening on http://{bind}");
    axum::serve(listener, router(session)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Serialize)]
struct SessionView {
    profile: UserProfile,
    turns: Vec<Turn>,
}

async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView {
        profile: session.profile.clone(),
        turns: session.transcript().turns().cloned().collect(),
    })
}

#[derive(Deserialize)]
struct ChatInput {
    message: String,
}

#[derive(Serialize)]
struct ChatReply {
    turns: Vec<Turn>,
    banner: Option<&'static str>,
}

async fn post_chat(State(state): State<AppState>, Json(input): Json<ChatInput>) -> Response {
    let message = input.message.trim();
    if message.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": "message must not be empty"})),
        )
            .into_response();
    }

    let mut session = state.session.lock().await;
    let outcome = session.submit(message).await;

    let banner = match outcome {
        Submission::Answered => None,
        Submission::Failed { banner } => Some(banner),
    };
    // The submission appended exactly two turns; hand those back.
    let skip = session.transcript().len() - 2;
    let turns: Vec<Turn> = session.transcript().turns().skip(skip).cloned().collect();

    Json(ChatReply { turns, banner }).into_response()
}

#[derive(Deserialize)]
struct ProfileUpdate {
    goal: Option<FitnessGoal>,
    level: Option<FitnessLevel>,
    restrictions: Option<RestrictionSet>,
}

async fn put_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Json<UserProfile> {
    let mut session = state.session.lock().await;
    if let Some(goal) = update.goal {
        session.profile.goal = goal;
    }
    if let Some(level) = update.level {
        session.profile.level = level;
    }
    if let Some(restrictions) = update.restrictions {
        session.profile.restrictions = restrictions;
    }
    tracing::info!(profile = %session.profile.context_sentence(), "Profile updated");
    Json(session.profile.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NutritionAdvisorError;
    use crate::transport::MockCompletionTransport;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_router(mock: MockCompletionTransport) -> Router {
        let session = ChatSession::new(
            UserProfile::default(),
            Arc::new(mock),
            "deepseek/deepseek-r1:free",
        );
        router(session)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_answers() {
        let app = test_router(MockCompletionTransport::new());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn index_serves_the_chat_page() {
        let app = test_router(MockCompletionTransport::new());
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("Sports Diet Advisor"));
    }

    #[tokio::test]
    async fn session_view_starts_with_welcome_and_default_profile() {
        let app = test_router(MockCompletionTransport::new());
        let response = app
            .oneshot(Request::builder().uri("/api/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let view = body_json(response).await;

        assert_eq!(view["profile"]["goal"], "unselected");
        assert_eq!(view["profile"]["level"], "beginner");
        assert_eq!(view["turns"].as_array().unwrap().len(), 1);
        assert_eq!(view["turns"][0]["role"], "assistant");
    }

    #[tokio::test]
    async fn chat_round_trip_returns_both_new_turns() {
        let mut mock = MockCompletionTransport::new();
        mock.expect_complete()
            .returning(|_| Ok("Bananas work well before cardio.".to_string()));

        let app = test_router(mock);
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/chat",
                json!({"message": "Pre-cardio snack?"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let reply = body_json(response).await;
        let turns = reply["turns"].as_array().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0]["role"], "user");
        assert_eq!(turns[0]["text"], "Pre-cardio snack?");
        assert_eq!(turns[1]["role"], "assistant");
        assert_eq!(turns[1]["text"], "Bananas work well before cardio.");
        assert!(reply["banner"].is_null());
    }

    #[tokio::test]
    async fn blank_message_is_rejected_without_touching_the_session() {
        let app = test_router(MockCompletionTransport::new());

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/chat", json!({"message": "   "})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app
            .oneshot(Request::builder().uri("/api/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let view = body_json(response).await;
        assert_eq!(view["turns"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn network_failure_surfaces_fallback_and_banner() {
        let mut mock = MockCompletionTransport::new();
        mock.expect_complete()
            .returning(|_| Err(NutritionAdvisorError::Network("unreachable".to_string())));

        let app = test_router(mock);
        let response = app
            .oneshot(json_request("POST", "/api/chat", json!({"message": "hello"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let reply = body_json(response).await;
        assert_eq!(reply["banner"], "Connection issue. Please try again.");
        assert_eq!(
            reply["turns"][1]["text"],
            "Network error. Please check your connection."
        );
    }

    #[tokio::test]
    async fn profile_update_persists_for_later_reads() {
        let app = test_router(MockCompletionTransport::new());

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/profile",
                json!({"goal": "muscle_gain", "restrictions": ["Vegan", "Gluten-free"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let profile = body_json(response).await;
        assert_eq!(profile["goal"], "muscle_gain");

        let response = app
            .oneshot(Request::builder().uri("/api/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let view = body_json(response).await;
        assert_eq!(view["profile"]["goal"], "muscle_gain");
        assert_eq!(view["profile"]["restrictions"][0], "Vegan");
        assert_eq!(view["profile"]["restrictions"][1], "Gluten-free");
    }

    #[tokio::test]
    async fn unknown_goal_value_is_rejected() {
        let app = test_router(MockCompletionTransport::new());
        let response = app
            .oneshot(json_request("PUT", "/api/profile", json!({"goal": "cardio"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
