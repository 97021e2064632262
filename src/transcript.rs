use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{MealRow, Role};
use crate::profile::UserProfile;
use crate::prompt;

/// One message in the chat history. Assistant turns may carry a parsed meal
/// table alongside the raw text; the text itself is never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub table: Option<Vec<MealRow>>,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), None)
    }

    pub fn assistant(text: impl Into<String>, table: Option<Vec<MealRow>>) -> Self {
        Self::new(Role::Assistant, text.into(), table)
    }

    fn new(role: Role, text: String, table: Option<Vec<MealRow>>) -> Self {
        Self {
            role,
            text,
            table,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only chat history for one session; insertion order is
/// chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Starts a transcript with the welcome turn, templated from the profile
    /// as it stands right now. Called once per session.
    pub fn seeded(profile: &UserProfile) -> Self {
        Self {
            turns: vec![Turn::assistant(prompt::welcome_message(profile), None)],
        }
    }

    /// Rebuilds a transcript from previously captured turns.
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
