use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{NutritionAdvisorError, Result};
use crate::models::CompletionRequest;
use crate::parser;
use crate::profile::UserProfile;
use crate::prompt;
use crate::transcript::{Transcript, Turn};
use crate::transport::{CompletionTransport, OpenRouterTransport};

/// Where a session sits between submissions. There is no failure state:
/// errors are absorbed into fallback turns and the session returns to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

/// Fallback texts appended to the transcript when a submission fails.
pub const NETWORK_FALLBACK: &str = "Network error. Please check your connection.";
pub const PROCESSING_FALLBACK: &str = "Sorry, I couldn't process that. Please rephrase.";

/// Transient banner texts. The underlying cause never reaches the user;
/// it goes to the log instead.
pub const NETWORK_BANNER: &str = "Connection issue. Please try again.";
pub const PROCESSING_BANNER: &str = "Something went wrong. Please try again.";

/// Outcome of one submission, for the presentation layer. The transcript
/// already holds the turns either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The reply landed as the newest assistant turn.
    Answered,
    /// A fallback turn was appended; show the banner once, then drop it.
    Failed { banner: &'static str },
}

/// Drives one chat session: holds the profile and transcript, assembles
/// requests, and absorbs transport failures into fallback turns.
pub struct ChatSession {
    pub profile: UserProfile,
    transcript: Transcript,
    transport: Arc<dyn CompletionTransport>,
    model: String,
    state: SessionState,
    id: Uuid,
}

impl ChatSession {
    pub fn new(
        profile: UserProfile,
        transport: Arc<dyn CompletionTransport>,
        model: impl Into<String>,
    ) -> Self {
        let transcript = Transcript::seeded(&profile);
        Self {
            profile,
            transcript,
            transport,
            model: model.into(),
            state: SessionState::Idle,
            id: Uuid::new_v4(),
        }
    }

    /// Builds a session over the real OpenRouter transport.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = Arc::new(OpenRouterTransport::new(&config.advisor)?);
        Ok(Self::new(
            UserProfile::default(),
            transport,
            config.advisor.model.clone(),
        ))
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs one full submission: appends the user turn, sends the assembled
    /// request, and appends exactly one assistant turn - the reply on
    /// success, a fixed fallback on failure. Errors never escape.
    pub async fn submit(&mut self, text: impl Into<String>) -> Submission {
        let text = text.into();
        self.transcript.append(Turn::user(text));

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: prompt::assemble_messages(&self.profile, &self.transcript),
        };

        self.state = SessionState::AwaitingResponse;
        let result = self.transport.complete(&request).await;
        self.state = SessionState::Idle;

        match result {
            Ok(reply) => {
                let table = parser::extract_meal_table(&reply);
                tracing::info!(
                    session = %self.id,
                    reply_chars = reply.chars().count(),
                    table_rows = table.as_ref().map(|rows| rows.len()).unwrap_or(0),
                    "Completion received"
                );
                self.transcript.append(Turn::assistant(reply, table));
                Submission::Answered
            }
            Err(err) => {
                tracing::warn!(session = %self.id, error = %err, "Completion failed");
                let (fallback, banner) = match err {
                    NutritionAdvisorError::Network(_) => (NETWORK_FALLBACK, NETWORK_BANNER),
                    _ => (PROCESSING_FALLBACK, PROCESSING_BANNER),
                };
                self.transcript.append(Turn::assistant(fallback, None));
                Submission::Failed { banner }
            }
        }
    }
}
