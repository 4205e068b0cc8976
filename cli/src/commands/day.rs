use anyhow::Result;

use macrolog_core::TrackerError;
use macrolog_core::aggregate::DayView;

use super::AppTracker;
use super::entry::entry_line;
use super::helpers::{confirm, exit_with_notice, fmt_amount, parse_date, progress_line};

fn render_day(view: &DayView<'_>) -> String {
    let mut out = format!("=== {} | {} ===\n\n", view.date, view.items);

    // entries arrive sorted by meal
    for group in view.entries.chunk_by(|a, b| a.meal == b.meal) {
        let label = group[0].meal.as_str().to_uppercase();
        out.push_str(&format!("  {label}\n"));
        for e in group {
            out.push_str(&format!("    [{}] {}\n", e.id, entry_line(e)));
            if !e.notes.is_empty() {
                out.push_str(&format!("        {}\n", e.notes));
            }
        }
        out.push('\n');
    }

    out.push_str(&format!("  {}\n", progress_line("Calories", "kcal", &view.calories)));
    out.push_str(&format!("  {}\n", progress_line("Protein", "g", &view.protein)));
    out.push_str(&format!("  {}\n", progress_line("Carbs", "g", &view.carbs)));
    out.push_str(&format!("  {}\n", progress_line("Fat", "g", &view.fat)));
    out.push_str(&format!("\n  {} kcal left", fmt_amount(view.calories_left)));
    out
}

pub(crate) fn cmd_day(tracker: &mut AppTracker, date: Option<String>, json: bool) -> Result<()> {
    let date = parse_date(date)?;
    tracker.select_date(date.to_string());
    let view = tracker.day_view();

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.entries.is_empty() {
        exit_with_notice(&format!("No entries for {date}"), false);
    }

    println!("{}", render_day(&view));
    Ok(())
}

pub(crate) fn cmd_copy(
    tracker: &mut AppTracker,
    from: Option<String>,
    to: Option<String>,
    json: bool,
) -> Result<()> {
    let to = parse_date(to)?;
    tracker.select_date(to.to_string());

    let (from, copied) = match from {
        Some(from) => {
            let from = parse_date(Some(from))?;
            (from, tracker.copy_day(&from.to_string(), &to.to_string()))
        }
        None => (to - chrono::Duration::days(1), tracker.copy_previous_day()),
    };

    let count = match copied {
        Ok(count) => count,
        Err(TrackerError::NotFound(_)) => {
            exit_with_notice(&format!("No entries on {from} to copy"), json)
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({ "from": from.to_string(), "to": to.to_string(), "copied": count })
        );
    } else {
        println!("Copied {count} entries from {from} to {to}");
    }
    Ok(())
}

pub(crate) fn cmd_clear(
    tracker: &mut AppTracker,
    date: Option<String>,
    yes: bool,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?.to_string();
    tracker.select_date(date.clone());

    let count = tracker.day_entries().len();
    if count == 0 {
        exit_with_notice(&format!("No entries for {date}"), json);
    }

    if !yes && !confirm(&format!("Remove all {count} entries on {date}?"))? {
        exit_with_notice("Cancelled", json);
    }

    let removed = tracker.clear_day(&date)?;

    if json {
        println!("{}", serde_json::json!({ "date": date, "removed": removed }));
    } else {
        println!("Removed {removed} entries from {date}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use macrolog_core::db::Database;
    use macrolog_core::models::{DraftEntry, Entry, Goals, Meal};
    use macrolog_core::tracker::Tracker;

    fn tracker_with_day() -> AppTracker {
        let mut t = Tracker::new(Database::open_in_memory().unwrap());
        t.select_date("2024-06-15");
        for (meal, name, calories) in [
            (Meal::Dinner, "Pasta", 700.0),
            (Meal::Breakfast, "Oats", 150.0),
        ] {
            t.create_or_update_entry(DraftEntry {
                meal,
                name: name.to_string(),
                calories: Some(calories),
                ..DraftEntry::default()
            })
            .unwrap();
        }
        t
    }

    #[test]
    fn test_render_day_orders_meals() {
        let t = tracker_with_day();
        let out = render_day(&t.day_view());
        assert!(out.starts_with("=== 2024-06-15 | 2 items ==="));
        let breakfast = out.find("BREAKFAST").unwrap();
        let dinner = out.find("DINNER").unwrap();
        assert!(breakfast < dinner);
        assert!(!out.contains("LUNCH"));
        assert!(out.ends_with("1350 kcal left"));
    }

    #[test]
    fn test_render_day_shows_imported_meal_names() {
        let mut t = tracker_with_day();
        let waffles = Entry {
            id: "w1".to_string(),
            meal: Meal::Other("Brunch".to_string()),
            name: "Waffles".to_string(),
            ..t.entries()[0].clone()
        };
        let mut entries = t.entries().to_vec();
        entries.push(waffles);
        t.replace_all_entries(entries).unwrap();

        let out = render_day(&t.day_view());
        let brunch = out.find("BRUNCH").unwrap();
        let breakfast = out.find("BREAKFAST").unwrap();
        assert!(brunch < breakfast);
        assert!(out.contains("Waffles"));
    }

    #[test]
    fn test_copy_defaults_to_previous_day() {
        let mut t = tracker_with_day();
        cmd_copy(&mut t, None, Some("2024-06-16".to_string()), true).unwrap();
        assert_eq!(t.entries().len(), 4);
        assert_eq!(t.day_entries().len(), 2);
        assert_eq!(t.date(), "2024-06-16");
    }

    #[test]
    fn test_clear_with_yes() {
        let mut t = tracker_with_day();
        cmd_clear(&mut t, Some("2024-06-15".to_string()), true, true).unwrap();
        assert!(t.entries().is_empty());
        assert_eq!(*t.goals(), Goals::default());
    }
}
