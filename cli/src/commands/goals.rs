use anyhow::{Result, bail};

use macrolog_core::models::{Goals, GoalsDraft};

use super::AppTracker;
use super::helpers::fmt_amount;

fn print_goals(goals: &Goals) {
    println!("Calories: {} kcal", fmt_amount(goals.calories));
    println!("Protein:  {} g", fmt_amount(goals.protein));
    println!("Carbs:    {} g", fmt_amount(goals.carbs));
    println!("Fat:      {} g", fmt_amount(goals.fat));
}

pub(crate) fn cmd_goals_show(tracker: &AppTracker, json: bool) -> Result<()> {
    let goals = tracker.goals();
    if json {
        println!("{}", serde_json::to_string_pretty(goals)?);
    } else {
        print_goals(goals);
    }
    Ok(())
}

pub(crate) fn cmd_goals_set(
    tracker: &mut AppTracker,
    calories: Option<f64>,
    protein: Option<f64>,
    carbs: Option<f64>,
    fat: Option<f64>,
    json: bool,
) -> Result<()> {
    let given = [calories, protein, carbs, fat];
    if given.iter().all(Option::is_none) {
        bail!("Nothing to update. Provide at least one of --calories, --protein, --carbs, or --fat");
    }
    if given.iter().flatten().any(|v| !v.is_finite() || *v < 0.0) {
        bail!("Goals must be non-negative numbers");
    }

    let mut draft = GoalsDraft::from(*tracker.goals());
    if calories.is_some() {
        draft.calories = calories;
    }
    if protein.is_some() {
        draft.protein = protein;
    }
    if carbs.is_some() {
        draft.carbs = carbs;
    }
    if fat.is_some() {
        draft.fat = fat;
    }

    let goals = tracker.set_goals(draft)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&goals)?);
    } else {
        println!("Goals updated");
        print_goals(&goals);
    }
    Ok(())
}
