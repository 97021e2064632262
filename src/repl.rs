/// Interactive terminal surface: reads questions line by line, renders turns
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::Result;
use crate::profile::{DietaryRestriction, RestrictionSet};
use crate::session::{ChatSession, Submission};
use crate::visual::ChatVisual;

pub async fn run(mut session: ChatSession) -> Result<()> {
    ChatVisual::heading();
    for turn in session.transcript().turns() {
        ChatVisual::turn(turn);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    ChatVisual::prompt_marker();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        if input.is_empty() {
            ChatVisual::prompt_marker();
            continue;
        }

        if let Some(command) = input.strip_prefix('/') {
            if !handle_command(command, &mut session) {
                break;
            }
            ChatVisual::prompt_marker();
            continue;
        }

        ChatVisual::analyzing();
        let outcome = session.submit(input).await;
        if let Submission::Failed { banner } = outcome {
            ChatVisual::banner(banner);
        }
        if let Some(turn) = session.transcript().last() {
            ChatVisual::turn(turn);
        }
        ChatVisual::prompt_marker();
    }

    Ok(())
}

/// Applies a slash command to the session. Returns false to exit the loop.
fn handle_command(command: &str, session: &mut ChatSession) -> bool {
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "quit" | "exit" | "q" => return false,
        "help" => ChatVisual::help(),
        "profile" => ChatVisual::profile(&session.profile),
        "goal" => match rest.parse() {
            Ok(goal) => {
                session.profile.goal = goal;
                ChatVisual::profile(&session.profile);
            }
            Err(e) => ChatVisual::banner(&e),
        },
        "level" => match rest.parse() {
            Ok(level) => {
                session.profile.level = level;
                ChatVisual::profile(&session.profile);
            }
            Err(e) => ChatVisual::banner(&e),
        },
        "restrict" => match parse_restrictions(rest) {
            Ok(restrictions) => {
                session.profile.restrictions = restrictions;
                ChatVisual::profile(&session.profile);
            }
            Err(e) => ChatVisual::banner(&e),
        },
        other => ChatVisual::banner(&format!("Unknown command: /{other} (try /help)")),
    }

    true
}

/// Parses a comma-separated restriction list; "clear" (or nothing) empties it.
fn parse_restrictions(input: &str) -> std::result::Result<RestrictionSet, String> {
    let mut set = RestrictionSet::default();
    if input.is_empty() || input.eq_ignore_ascii_case("clear") {
        return Ok(set);
    }
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        set.insert(part.parse::<DietaryRestriction>()?);
    }
    Ok(set)
}
