use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::error::TrackerError;

/// Meal slot. Variant order is display order within a day.
///
/// `Other` holds a meal name read from an imported file that is not one of
/// the four slots. It is kept verbatim and sorts before `Breakfast`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Meal {
    Other(String),
    #[default]
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Meal {
    pub const ALL: [Meal; 4] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner, Meal::Snack];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Meal::Other(name) => name,
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::Dinner => "Dinner",
            Meal::Snack => "Snack",
        }
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses user input. Only the four slots are accepted, ignoring case.
impl FromStr for Meal {
    type Err = TrackerError;

    fn from_str(meal: &str) -> Result<Self, Self::Err> {
        Meal::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(meal.trim()))
            .ok_or_else(|| {
                let names: Vec<String> = Meal::ALL.into_iter().map(|m| m.to_string()).collect();
                TrackerError::Validation(format!(
                    "Invalid meal type '{meal}'. Must be one of: {}",
                    names.join(", ")
                ))
            })
    }
}

impl Serialize for Meal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Stored and imported meals are taken as-is: an exact slot name maps to
/// its variant, anything else is kept as `Other`.
impl<'de> Deserialize<'de> for Meal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = match Value::deserialize(deserializer)? {
            Value::Null => return Ok(Meal::default()),
            Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(Meal::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .unwrap_or(Meal::Other(name)))
    }
}

/// One logged food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default)]
    pub meal: Meal,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub protein: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub fat: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub qty: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,
}

/// Form value for creating or editing an entry. `None` amounts are blank
/// fields and are stored as 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftEntry {
    pub meal: Meal,
    pub name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub qty: String,
    pub notes: String,
}

impl DraftEntry {
    /// Prefill a form from an existing entry, as when opening it for editing.
    #[must_use]
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            meal: entry.meal.clone(),
            name: entry.name.clone(),
            calories: Some(entry.calories),
            protein: Some(entry.protein),
            carbs: Some(entry.carbs),
            fat: Some(entry.fat),
            qty: entry.qty.clone(),
            notes: entry.notes.clone(),
        }
    }
}

/// Daily targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            calories: 2200.0,
            protein: 170.0,
            carbs: 220.0,
            fat: 70.0,
        }
    }
}

/// Goals form. Every field is written on save; blank means 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GoalsDraft {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl GoalsDraft {
    #[must_use]
    pub fn into_goals(self) -> Goals {
        Goals {
            calories: self.calories.unwrap_or(0.0),
            protein: self.protein.unwrap_or(0.0),
            carbs: self.carbs.unwrap_or(0.0),
            fat: self.fat.unwrap_or(0.0),
        }
    }
}

impl From<Goals> for GoalsDraft {
    fn from(goals: Goals) -> Self {
        Self {
            calories: Some(goals.calories),
            protein: Some(goals.protein),
            carbs: Some(goals.carbs),
            fat: Some(goals.fat),
        }
    }
}

/// Fresh opaque entry id.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Coercions for imported records. Field values are taken as-is: amounts
/// that are not numbers become NaN rather than failing the import.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    pub(super) fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(b)),
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) if s.trim().is_empty() => 0.0,
            Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
            Value::Array(_) | Value::Object(_) => f64::NAN,
        })
    }
}
