use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use macrolog_core::aggregate::{DaySummary, percent_of_goal};
use macrolog_core::models::Goals;

use super::AppTracker;
use super::helpers::{exit_with_notice, fmt_amount};

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Items")]
    items: usize,
    #[tabled(rename = "Calories")]
    calories: String,
    #[tabled(rename = "Goal")]
    goal: String,
    #[tabled(rename = "Protein")]
    protein: String,
    #[tabled(rename = "Carbs")]
    carbs: String,
    #[tabled(rename = "Fat")]
    fat: String,
}

fn history_rows(days: &[DaySummary], goals: &Goals) -> Vec<HistoryRow> {
    days.iter()
        .map(|d| {
            let pct = percent_of_goal(d.totals.calories, goals.calories);
            HistoryRow {
                date: d.date.clone(),
                items: d.items,
                calories: fmt_amount(d.totals.calories),
                goal: format!("{pct:.0}%"),
                protein: format!("{}g", fmt_amount(d.totals.protein)),
                carbs: format!("{}g", fmt_amount(d.totals.carbs)),
                fat: format!("{}g", fmt_amount(d.totals.fat)),
            }
        })
        .collect()
}

pub(crate) fn cmd_history(tracker: &AppTracker, json: bool) -> Result<()> {
    let days = tracker.history();

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    if days.is_empty() {
        exit_with_notice("No entries logged yet", false);
    }

    let rows = history_rows(&days, tracker.goals());
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    Ok(())
}
