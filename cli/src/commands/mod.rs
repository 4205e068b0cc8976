mod day;
mod entry;
mod goals;
mod helpers;
mod history;
mod presets;
mod transfer;

use macrolog_core::db::Database;
use macrolog_core::tracker::Tracker;

pub(crate) type AppTracker = Tracker<Database>;

pub(crate) use day::{cmd_clear, cmd_copy, cmd_day};
pub(crate) use entry::{EntryFields, cmd_add, cmd_delete, cmd_edit};
pub(crate) use goals::{cmd_goals_set, cmd_goals_show};
pub(crate) use history::cmd_history;
pub(crate) use presets::cmd_presets;
pub(crate) use transfer::{ExportFormat, cmd_export, cmd_import};
