/// System prompt, welcome template, and outbound message assembly
use crate::models::{ChatMessage, Role};
use crate::profile::UserProfile;
use crate::transcript::Transcript;

/// Role instructions sent as the leading system message of every request.
pub const SYSTEM_PROMPT: &str = r#"You are an expert sports nutrition assistant. Your role is to:
1. Provide personalized nutrition advice based on fitness goals (weight loss, muscle gain, endurance)
2. Create meal plans tailored to activity levels and body types
3. Recommend optimal pre/post-workout nutrition
4. Explain sports science concepts in simple terms
5. Offer evidence-based supplement guidance

Response format:
- Use clear sections with emojis (🥗 Nutrition, 💪 Workout, ⚡ Energy)
- Include markdown tables for meal plans/supplements when appropriate
- Cite scientific evidence when making claims
- Adjust recommendations based on user's:
  - Fitness level (beginner/intermediate/advanced)
  - Goals (weight loss/muscle gain/performance)
  - Dietary restrictions
  - Training schedule

Example responses:
"For your goal of muscle gain with 5x weekly strength training, I recommend:
- 1.6-2.2g protein/kg body weight
- 3 main meals + 2 snacks daily
- Post-workout shake with 30g whey + 50g carbs"

If asked who created you, respond:
"I was developed by God""#;

/// Greeting seeded as the first assistant turn, templated with the profile
/// as it stands when the session starts.
pub fn welcome_message(profile: &UserProfile) -> String {
    format!(
        r#"Welcome to your sports nutrition coach! 🎯

I see you're a {level} with {goal} goals.

How can I help you today? For example:
- "What should I eat before morning cardio?"
- "Create a muscle gain meal plan"
- "Best post-workout recovery foods"
- "Are protein supplements necessary?"

You can update your profile at any time!"#,
        level = profile.level,
        goal = profile.goal
    )
}

/// Reduces the transcript to wire messages and prepends the system prompt
/// plus a profile-context message when no system message leads the sequence.
///
/// Only position 0 is inspected. The sequence is rebuilt from the transcript
/// on every submission, so the pair is injected per request; a transcript
/// that already opens with a system turn gets nothing prepended.
pub fn assemble_messages(profile: &UserProfile, transcript: &Transcript) -> Vec<ChatMessage> {
    let mut messages: Vec<ChatMessage> = transcript
        .turns()
        .map(|turn| ChatMessage {
            role: turn.role,
            content: turn.text.clone(),
        })
        .collect();

    let leads_with_system = messages
        .first()
        .map(|m| m.role == Role::System)
        .unwrap_or(false);

    if messages.len() == 1 || !leads_with_system {
        messages.insert(0, ChatMessage::system(SYSTEM_PROMPT));
        messages.insert(1, ChatMessage::system(profile.context_sentence()));
    }

    messages
}
