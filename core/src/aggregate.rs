//! Pure queries over the entry collection. Nothing here mutates or persists.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::models::{Entry, Goals};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign<&Entry> for Totals {
    fn add_assign(&mut self, entry: &Entry) {
        self.calories += entry.calories;
        self.protein += entry.protein;
        self.carbs += entry.carbs;
        self.fat += entry.fat;
    }
}

impl<'a> Sum<&'a Entry> for Totals {
    fn sum<I: Iterator<Item = &'a Entry>>(iter: I) -> Totals {
        iter.fold(Totals::default(), |mut acc, e| {
            acc += e;
            acc
        })
    }
}

/// Progress toward one goal, as shown by the day view's rings and bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub value: f64,
    pub goal: f64,
    pub percent: f64,
}

impl Progress {
    #[must_use]
    pub fn new(value: f64, goal: f64) -> Self {
        Self {
            value,
            goal,
            percent: percent_of_goal(value, goal),
        }
    }
}

/// Everything the day view renders for one date.
#[derive(Debug, Clone, Serialize)]
pub struct DayView<'a> {
    pub date: String,
    pub entries: Vec<&'a Entry>,
    pub totals: Totals,
    pub calories_left: f64,
    pub calories: Progress,
    pub protein: Progress,
    pub carbs: Progress,
    pub fat: Progress,
    pub items: String,
}

impl<'a> DayView<'a> {
    #[must_use]
    pub fn build(entries: &'a [Entry], date: &str, goals: &Goals) -> Self {
        let day = entries_for_date(entries, date);
        let totals = day_totals(day.iter().copied());
        Self {
            date: date.to_string(),
            items: item_count_label(day.len()),
            entries: day,
            totals,
            calories_left: calories_left(&totals, goals),
            calories: Progress::new(totals.calories, goals.calories),
            protein: Progress::new(totals.protein, goals.protein),
            carbs: Progress::new(totals.carbs, goals.carbs),
            fat: Progress::new(totals.fat, goals.fat),
        }
    }
}

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: String,
    pub totals: Totals,
    pub items: usize,
}

/// Entries logged on `date`, ordered Breakfast, Lunch, Dinner, Snack, with
/// unrecognized meals first. Entries in the same meal keep their collection
/// order.
#[must_use]
pub fn entries_for_date<'a>(entries: &'a [Entry], date: &str) -> Vec<&'a Entry> {
    let mut day: Vec<&Entry> = entries.iter().filter(|e| e.date == date).collect();
    day.sort_by(|a, b| a.meal.cmp(&b.meal));
    day
}

#[must_use]
pub fn day_totals<'a, I>(entries: I) -> Totals
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries.into_iter().sum()
}

/// `value / goal` as a percentage clamped to `[0, 100]`, or 0 without a goal.
///
/// The clamp is for display only; totals themselves may exceed the goal.
#[must_use]
pub fn percent_of_goal(value: f64, goal: f64) -> f64 {
    if goal == 0.0 || goal.is_nan() {
        return 0.0;
    }
    (value / goal * 100.0).clamp(0.0, 100.0)
}

#[must_use]
pub fn calories_left(totals: &Totals, goals: &Goals) -> f64 {
    (goals.calories - totals.calories).max(0.0)
}

/// Partition entries by date, keeping collection order within each day.
#[must_use]
pub fn group_by_date(entries: &[Entry]) -> BTreeMap<&str, Vec<&Entry>> {
    let mut by_date: BTreeMap<&str, Vec<&Entry>> = BTreeMap::new();
    for e in entries {
        by_date.entry(e.date.as_str()).or_default().push(e);
    }
    by_date
}

/// Per-day totals, newest date first.
#[must_use]
pub fn history(entries: &[Entry]) -> Vec<DaySummary> {
    group_by_date(entries)
        .into_iter()
        .rev()
        .map(|(date, list)| DaySummary {
            date: date.to_string(),
            totals: day_totals(list.iter().copied()),
            items: list.len(),
        })
        .collect()
}

/// Round a display value to 2 decimals. The epsilon nudge keeps values
/// like `0.1 + 0.2` from rendering with representation noise.
#[must_use]
pub fn round2(n: f64) -> f64 {
    ((n + f64::EPSILON) * 100.0).round() / 100.0
}

#[must_use]
pub fn item_count_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}
