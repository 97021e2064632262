/// Terminal rendering for the chat surface
use colored::Colorize;
use std::io::Write;

use crate::models::{MealRow, Role};
use crate::profile::UserProfile;
use crate::transcript::Turn;

pub struct ChatVisual;

impl ChatVisual {
    pub fn heading() {
        println!("{}", "🏋️  Sports Diet Advisor".bright_green().bold());
        println!(
            "{}",
            "Ask your nutrition question... (/help for commands, /quit to exit)".dimmed()
        );
        println!();
    }

    /// Renders one turn: speaker tag, text, then any parsed meal table.
    pub fn turn(turn: &Turn) {
        match turn.role {
            Role::Assistant => println!("{} {}", "🥗", "Coach".bright_green().bold()),
            Role::User => println!("{} {}", "💬", "You".bright_cyan().bold()),
            Role::System => return,
        }
        println!("{}", turn.text);
        if let Some(rows) = &turn.table {
            println!();
            Self::meal_table(rows);
        }
        println!();
    }

    /// Column-aligned rendering of extracted meal rows.
    pub fn meal_table(rows: &[MealRow]) {
        let headers = ["Meal Time", "Food Items", "Nutrition"];
        let mut widths = headers.map(|h| h.chars().count());
        for row in rows {
            widths[0] = widths[0].max(row.meal_time.chars().count());
            widths[1] = widths[1].max(row.food_items.chars().count());
            widths[2] = widths[2].max(row.nutrition.chars().count());
        }

        println!(
            "   {} | {} | {}",
            pad(headers[0], widths[0]).bright_cyan(),
            pad(headers[1], widths[1]).bright_cyan(),
            pad(headers[2], widths[2]).bright_cyan()
        );
        println!(
            "   {}",
            format!(
                "{}-+-{}-+-{}",
                "-".repeat(widths[0]),
                "-".repeat(widths[1]),
                "-".repeat(widths[2])
            )
            .dimmed()
        );
        for row in rows {
            println!(
                "   {} | {} | {}",
                pad(&row.meal_time, widths[0]),
                pad(&row.food_items, widths[1]),
                pad(&row.nutrition, widths[2])
            );
        }
    }

    pub fn analyzing() {
        println!("{}", "Analyzing your nutrition needs...".dimmed());
    }

    pub fn banner(message: &str) {
        println!("{} {}", "⚠".bright_red(), message.bright_red());
    }

    pub fn profile(profile: &UserProfile) {
        println!("{}", "🏆 Profile".bright_yellow().bold());
        println!("   Goal:         {}", profile.goal);
        println!("   Level:        {}", profile.level);
        println!("   Restrictions: {}", profile.restrictions.labels());
        println!();
    }

    pub fn help() {
        println!("{}", "Commands".bright_yellow().bold());
        println!("   /profile            show the current profile");
        println!("   /goal <value>       set goal (select, weight_loss, muscle_gain, endurance, maintenance)");
        println!("   /level <value>      set level (beginner, intermediate, advanced)");
        println!("   /restrict <a, b>    set restrictions (none, vegetarian, vegan, gluten-free, dairy-free)");
        println!("   /restrict clear     remove all restrictions");
        println!("   /quit               exit");
        println!();
    }

    pub fn prompt_marker() {
        print!("{} ", ">".bright_cyan());
        let _ = std::io::stdout().flush();
    }
}

fn pad(text: &str, width: usize) -> String {
    let deficit = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(deficit))
}
