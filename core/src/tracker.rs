use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::{self, DayView, DaySummary};
use crate::codec;
use crate::db::KeyValueStore;
use crate::error::{Result, TrackerError};
use crate::models::{DraftEntry, Entry, Goals, GoalsDraft, new_id};

pub const ENTRIES_KEY: &str = "pft-entries";
pub const GOALS_KEY: &str = "pft-goals";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub ids_assigned: usize,
}

/// Application state: the entry log, goals, selected date, and the entry
/// currently open for editing.
///
/// All writes go through the methods below. Each one that changes entries
/// or goals writes the whole record to the store before updating memory,
/// so a failed write leaves the tracker unchanged.
pub struct Tracker<S: KeyValueStore> {
    store: S,
    entries: Vec<Entry>,
    goals: Goals,
    date: String,
    editing: Option<String>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Load state from `store`, falling back to an empty log and default
    /// goals. The selected date starts at today.
    pub fn new(store: S) -> Self {
        let entries: Vec<Entry> = store.load(ENTRIES_KEY, Vec::new());
        let goals = store.load(GOALS_KEY, Goals::default());
        debug!(entries = entries.len(), "loaded tracker state");
        Self {
            store,
            entries,
            goals,
            date: Local::now().date_naive().to_string(),
            editing: None,
        }
    }

    // --- Read-only snapshots ---

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn find_entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    // --- Queries ---

    pub fn day_entries(&self) -> Vec<&Entry> {
        aggregate::entries_for_date(&self.entries, &self.date)
    }

    pub fn day_view(&self) -> DayView<'_> {
        DayView::build(&self.entries, &self.date, &self.goals)
    }

    pub fn history(&self) -> Vec<DaySummary> {
        aggregate::history(&self.entries)
    }

    pub fn export_csv(&self) -> Result<String> {
        codec::export_csv(&self.entries)
    }

    pub fn export_json(&self) -> Result<String> {
        codec::export_json(&self.entries)
    }

    // --- Selection ---

    pub fn select_date(&mut self, date: impl Into<String>) {
        self.date = date.into();
    }

    /// Open an entry for editing. Moves the selected date to the entry's
    /// date. Returns `None` and leaves state alone if the id is unknown.
    pub fn begin_edit(&mut self, id: &str) -> Option<&Entry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        self.editing = Some(id.to_string());
        self.date.clone_from(&self.entries[pos].date);
        Some(&self.entries[pos])
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // --- Mutations ---

    /// Save a draft on the selected date.
    ///
    /// With an entry open for editing, that entry is replaced in place and
    /// keeps its id; otherwise a new entry is appended.
    pub fn create_or_update_entry(&mut self, draft: DraftEntry) -> Result<Entry> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(TrackerError::Validation("Please enter a name".to_string()));
        }

        let entry = Entry {
            id: self.editing.clone().unwrap_or_else(new_id),
            date: self.date.clone(),
            meal: draft.meal,
            name: name.to_string(),
            calories: draft.calories.unwrap_or(0.0),
            protein: draft.protein.unwrap_or(0.0),
            carbs: draft.carbs.unwrap_or(0.0),
            fat: draft.fat.unwrap_or(0.0),
            qty: draft.qty,
            notes: draft.notes,
        };

        let mut next = self.entries.clone();
        match self.editing.as_deref() {
            Some(target) => {
                let Some(slot) = next.iter_mut().find(|e| e.id == target) else {
                    warn!(id = %target, "entry being edited no longer exists");
                    let err = TrackerError::NotFound(format!("Entry {target} no longer exists"));
                    self.editing = None;
                    return Err(err);
                };
                *slot = entry.clone();
                debug!(id = %entry.id, "updated entry");
            }
            None => {
                next.push(entry.clone());
                debug!(id = %entry.id, date = %entry.date, "added entry");
            }
        }

        self.commit_entries(next)?;
        self.editing = None;
        Ok(entry)
    }

    /// Remove an entry. Unknown ids are a no-op and return `false`.
    pub fn delete_entry(&mut self, id: &str) -> Result<bool> {
        let next: Vec<Entry> = self.entries.iter().filter(|e| e.id != id).cloned().collect();
        if next.len() == self.entries.len() {
            return Ok(false);
        }
        self.commit_entries(next)?;
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        debug!(id, "deleted entry");
        Ok(true)
    }

    /// Clone every entry on `from` onto `to` with fresh ids.
    pub fn copy_day(&mut self, from: &str, to: &str) -> Result<usize> {
        let clones: Vec<Entry> = self
            .entries
            .iter()
            .filter(|e| e.date == from)
            .map(|e| Entry {
                id: new_id(),
                date: to.to_string(),
                ..e.clone()
            })
            .collect();

        if clones.is_empty() {
            return Err(TrackerError::NotFound(format!("No entries on {from}")));
        }

        let count = clones.len();
        let mut next = self.entries.clone();
        next.extend(clones);
        self.commit_entries(next)?;
        info!(from, to, count, "copied day");
        Ok(count)
    }

    /// Copy the day before the selected date onto the selected date.
    pub fn copy_previous_day(&mut self) -> Result<usize> {
        let today = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            TrackerError::Validation(format!(
                "Invalid selected date '{}'. Must be YYYY-MM-DD",
                self.date
            ))
        })?;
        let prev = today
            .pred_opt()
            .ok_or_else(|| TrackerError::Validation(format!("No day before {today}")))?
            .to_string();
        let to = self.date.clone();
        self.copy_day(&prev, &to)
    }

    /// Remove every entry on `date`. Returns how many were removed.
    pub fn clear_day(&mut self, date: &str) -> Result<usize> {
        let next: Vec<Entry> = self.entries.iter().filter(|e| e.date != date).cloned().collect();
        let removed = self.entries.len() - next.len();
        if removed > 0 {
            let editing_removed = self
                .editing
                .as_deref()
                .is_some_and(|id| !next.iter().any(|e| e.id == id));
            self.commit_entries(next)?;
            if editing_removed {
                self.editing = None;
            }
            info!(date, removed, "cleared day");
        }
        Ok(removed)
    }

    pub fn set_goals(&mut self, draft: GoalsDraft) -> Result<Goals> {
        let goals = draft.into_goals();
        self.store.save(GOALS_KEY, &goals)?;
        self.goals = goals;
        debug!(?goals, "goals updated");
        Ok(goals)
    }

    /// Replace the whole log, giving a fresh id to any entry without one
    /// or whose id repeats an earlier entry's. Returns how many ids were
    /// assigned.
    pub fn replace_all_entries(&mut self, mut entries: Vec<Entry>) -> Result<usize> {
        let mut seen = std::collections::HashSet::new();
        let mut assigned = 0;
        for e in &mut entries {
            if e.id.is_empty() || !seen.insert(e.id.clone()) {
                e.id = new_id();
                seen.insert(e.id.clone());
                assigned += 1;
            }
        }
        self.commit_entries(entries)?;
        self.editing = None;
        Ok(assigned)
    }

    /// Replace the log with the contents of an exported JSON file. On any
    /// format error the current log is kept.
    pub fn import_json(&mut self, text: &str) -> Result<ImportSummary> {
        let entries = codec::import_json(text)?;
        let imported = entries.len();
        let ids_assigned = self.replace_all_entries(entries)?;
        info!(imported, ids_assigned, "imported entries");
        Ok(ImportSummary {
            imported,
            ids_assigned,
        })
    }

    fn commit_entries(&mut self, next: Vec<Entry>) -> Result<()> {
        self.store.save(ENTRIES_KEY, &next)?;
        self.entries = next;
        Ok(())
    }
}
