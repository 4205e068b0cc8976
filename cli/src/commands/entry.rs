use anyhow::{Context, Result, bail};
use clap::Args;

use macrolog_core::models::{DraftEntry, Entry, Meal};
use macrolog_core::presets::find_preset;

use super::AppTracker;
use super::helpers::{confirm, exit_with_notice, fmt_amount, parse_date};

/// Form fields shared by `add` and `edit`.
#[derive(Args, Debug, Default)]
pub(crate) struct EntryFields {
    /// Food name
    #[arg(long)]
    name: Option<String>,
    /// Meal: breakfast, lunch, dinner, snack
    #[arg(short, long)]
    meal: Option<String>,
    /// Calories (kcal)
    #[arg(long)]
    calories: Option<f64>,
    /// Protein (g)
    #[arg(long)]
    protein: Option<f64>,
    /// Carbs (g)
    #[arg(long)]
    carbs: Option<f64>,
    /// Fat (g)
    #[arg(long)]
    fat: Option<f64>,
    /// Free-text quantity (e.g. "1 cup", "150 g")
    #[arg(long)]
    qty: Option<String>,
    /// Notes
    #[arg(long)]
    notes: Option<String>,
}

impl EntryFields {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.meal.is_none()
            && self.calories.is_none()
            && self.protein.is_none()
            && self.carbs.is_none()
            && self.fat.is_none()
            && self.qty.is_none()
            && self.notes.is_none()
    }

    /// Overwrite the draft with every field that was given.
    fn apply(self, draft: &mut DraftEntry) -> Result<()> {
        if let Some(meal) = self.meal {
            draft.meal = meal.parse::<Meal>()?;
        }
        if let Some(name) = self.name {
            draft.name = name;
        }
        if self.calories.is_some() {
            draft.calories = self.calories;
        }
        if self.protein.is_some() {
            draft.protein = self.protein;
        }
        if self.carbs.is_some() {
            draft.carbs = self.carbs;
        }
        if self.fat.is_some() {
            draft.fat = self.fat;
        }
        if let Some(qty) = self.qty {
            draft.qty = qty;
        }
        if let Some(notes) = self.notes {
            draft.notes = notes;
        }
        Ok(())
    }
}

pub(crate) fn entry_line(e: &Entry) -> String {
    let qty = if e.qty.is_empty() {
        String::new()
    } else {
        format!(" ({})", e.qty)
    };
    format!(
        "{}{qty} | {} kcal | P:{}g C:{}g F:{}g",
        e.name,
        fmt_amount(e.calories),
        fmt_amount(e.protein),
        fmt_amount(e.carbs),
        fmt_amount(e.fat)
    )
}

pub(crate) fn cmd_add(
    tracker: &mut AppTracker,
    fields: EntryFields,
    preset: Option<&str>,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    let date = parse_date(date)?;

    let mut draft = match preset {
        Some(name) => find_preset(name)
            .with_context(|| format!("Unknown preset '{name}'. Run `macrolog presets` to list them"))?
            .draft(Meal::default()),
        None => DraftEntry::default(),
    };
    fields.apply(&mut draft)?;

    tracker.select_date(date.to_string());
    let entry = tracker.create_or_update_entry(draft)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        let meal = &entry.meal;
        let id = &entry.id;
        println!("Logged {} for {meal} on {date} [{id}]", entry_line(&entry));
    }
    Ok(())
}

pub(crate) fn cmd_edit(
    tracker: &mut AppTracker,
    id: &str,
    fields: EntryFields,
    date: Option<String>,
    json: bool,
) -> Result<()> {
    if fields.is_empty() && date.is_none() {
        bail!("Nothing to update. Provide at least one field flag (--name, --meal, --calories, ...) or --date");
    }
    let date = date.map(Some).map(parse_date).transpose()?;

    let Some(existing) = tracker.begin_edit(id) else {
        exit_with_notice(&format!("Entry {id} not found"), json);
    };
    let mut draft = DraftEntry::from_entry(existing);
    if let Err(e) = fields.apply(&mut draft) {
        tracker.cancel_edit();
        return Err(e);
    }
    if let Some(date) = date {
        tracker.select_date(date.to_string());
    }

    let entry = tracker.create_or_update_entry(draft)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        let meal = &entry.meal;
        let date = &entry.date;
        println!("Updated entry {id}: {} for {meal} on {date}", entry_line(&entry));
    }
    Ok(())
}

pub(crate) fn cmd_delete(tracker: &mut AppTracker, id: &str, yes: bool, json: bool) -> Result<()> {
    let Some(entry) = tracker.find_entry(id) else {
        exit_with_notice(&format!("Entry {id} not found"), json);
    };

    if !yes {
        let question = format!("Delete {} from {} on {}?", entry.name, entry.meal, entry.date);
        if !confirm(&question)? {
            exit_with_notice("Cancelled", json);
        }
    }

    if !tracker.delete_entry(id)? {
        exit_with_notice(&format!("Entry {id} not found"), json);
    }

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Deleted entry {id}");
    }
    Ok(())
}
