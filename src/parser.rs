/// Best-effort extraction of markdown-style meal tables from reply text
use crate::models::MealRow;

/// Scans a reply line by line for a markdown table and returns the data rows,
/// or `None` when no row qualifies.
///
/// The scan is deliberately loose and stateful: a `---` separator line (one
/// that also contains a pipe) arms collection for the rest of the reply, rows
/// are any armed pipe lines with three or more non-empty cells, and lines
/// containing "meal" in any case are skipped as headers. Lines without a pipe
/// never touch the armed flag, so a second table later in the reply is
/// collected into the same row list. Cells past the third are dropped.
pub fn extract_meal_table(reply: &str) -> Option<Vec<MealRow>> {
    let mut rows = Vec::new();
    let mut in_table = false;

    for line in reply.lines() {
        if !line.contains('|') {
            continue;
        }
        if line.contains("---") {
            in_table = true;
            continue;
        }
        if in_table && !line.to_lowercase().contains("meal") {
            let cells: Vec<&str> = line
                .split('|')
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .collect();
            if cells.len() >= 3 {
                rows.push(MealRow {
                    meal_time: cells[0].to_string(),
                    food_items: cells[1].to_string(),
                    nutrition: cells[2].to_string(),
                });
            }
        }
    }

    if rows.is_empty() { None } else { Some(rows) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_rows_from_standard_markdown_table() {
        let reply = "Here is your plan:\n\
            | Meal Time | Food Items | Nutrition |\n\
            |-----------|------------|-----------|\n\
            | Breakfast | Oats with berries | 450 kcal, 20g protein |\n\
            | Lunch | Chicken and rice | 650 kcal, 45g protein |\n\
            Enjoy!";

        let rows = extract_meal_table(reply).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].meal_time, "Breakfast");
        assert_eq!(rows[0].food_items, "Oats with berries");
        assert_eq!(rows[0].nutrition, "450 kcal, 20g protein");
        assert_eq!(rows[1].meal_time, "Lunch");
    }

    #[test]
    fn typical_reply_yields_trimmed_row_fields() {
        let reply = "| Meal | Food | Nutrition |\n\
            |---|---|---|\n\
            | Breakfast | Oats + banana | 350 kcal |";

        let rows = extract_meal_table(reply).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meal_time, "Breakfast");
        assert_eq!(rows[0].food_items, "Oats + banana");
        assert_eq!(rows[0].nutrition, "350 kcal");
    }

    #[test]
    fn returns_none_without_separator_line() {
        // Pipe rows before any --- line are never collected.
        let reply = "| Breakfast | Oats | 450 kcal |\n| Lunch | Rice | 650 kcal |";
        assert_eq!(extract_meal_table(reply), None);
    }

    #[test]
    fn returns_none_for_plain_text() {
        assert_eq!(extract_meal_table("Drink water and eat your greens."), None);
        assert_eq!(extract_meal_table(""), None);
    }

    #[test]
    fn header_skip_is_case_insensitive() {
        let reply = "|---|---|---|\n\
            | MEAL TIME | foods | macros |\n\
            | Dinner | Salmon | 30g protein |";

        let rows = extract_meal_table(reply).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meal_time, "Dinner");
    }

    #[test]
    fn data_row_mentioning_meal_is_dropped() {
        // The header check is a substring match, so rows whose cells mention
        // "meal" are skipped too.
        let reply = "|---|\n\
            | Post-meal snack | Yogurt | 150 kcal |\n\
            | Dinner | Salmon | 500 kcal |";

        let rows = extract_meal_table(reply).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meal_time, "Dinner");
    }

    #[test]
    fn rows_with_fewer_than_three_cells_are_ignored() {
        let reply = "|---|---|\n\
            | Breakfast | Oats |\n\
            | Lunch | Rice | 650 kcal |";

        let rows = extract_meal_table(reply).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meal_time, "Lunch");
    }

    #[test]
    fn extra_cells_beyond_third_are_dropped() {
        let reply = "|---|\n| Breakfast | Oats | 450 kcal | high fiber |";

        let rows = extract_meal_table(reply).unwrap();
        assert_eq!(rows[0].nutrition, "450 kcal");
    }

    #[test]
    fn flag_survives_interleaved_prose_and_collects_second_table() {
        let reply = "|---|\n\
            | Breakfast | Oats | 450 kcal |\n\
            Some prose between tables, no pipes at all.\n\
            | Dinner | Salmon | 500 kcal |";

        let rows = extract_meal_table(reply).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].meal_time, "Dinner");
    }

    #[test]
    fn separator_without_pipe_does_not_arm_collection() {
        let reply = "---\n| Breakfast | Oats | 450 kcal |";
        assert_eq!(extract_meal_table(reply), None);
    }

    #[test]
    fn leading_and_trailing_pipes_produce_trimmed_cells() {
        let reply = "|---|---|---|\n|  Snack  |  Almonds  |  200 kcal  |";

        let rows = extract_meal_table(reply).unwrap();
        assert_eq!(rows[0].meal_time, "Snack");
        assert_eq!(rows[0].food_items, "Almonds");
        assert_eq!(rows[0].nutrition, "200 kcal");
    }
}
