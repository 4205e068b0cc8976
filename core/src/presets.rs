//! Built-in quick-add foods. Read-only; picking one only prefills a draft.

use serde::Serialize;

use crate::models::{DraftEntry, Meal};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub qty: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Chicken breast",
        calories: 165.0,
        protein: 31.0,
        carbs: 0.0,
        fat: 3.6,
        qty: "100 g",
    },
    Preset {
        name: "White rice, cooked",
        calories: 205.0,
        protein: 4.3,
        carbs: 45.0,
        fat: 0.4,
        qty: "1 cup",
    },
    Preset {
        name: "Egg",
        calories: 72.0,
        protein: 6.3,
        carbs: 0.4,
        fat: 4.8,
        qty: "1 large",
    },
    Preset {
        name: "Greek yogurt",
        calories: 100.0,
        protein: 17.0,
        carbs: 6.0,
        fat: 0.7,
        qty: "170 g",
    },
    Preset {
        name: "Oats",
        calories: 150.0,
        protein: 5.0,
        carbs: 27.0,
        fat: 3.0,
        qty: "40 g",
    },
    Preset {
        name: "Banana",
        calories: 105.0,
        protein: 1.3,
        carbs: 27.0,
        fat: 0.4,
        qty: "1 medium",
    },
    Preset {
        name: "Whey protein",
        calories: 120.0,
        protein: 24.0,
        carbs: 3.0,
        fat: 1.5,
        qty: "1 scoop",
    },
    Preset {
        name: "Peanut butter",
        calories: 190.0,
        protein: 7.0,
        carbs: 7.0,
        fat: 16.0,
        qty: "2 tbsp",
    },
];

impl Preset {
    /// A draft prefilled with this preset. Notes stay blank.
    #[must_use]
    pub fn draft(&self, meal: Meal) -> DraftEntry {
        DraftEntry {
            meal,
            name: self.name.to_string(),
            calories: Some(self.calories),
            protein: Some(self.protein),
            carbs: Some(self.carbs),
            fat: Some(self.fat),
            qty: self.qty.to_string(),
            notes: String::new(),
        }
    }
}

/// Look up a preset by name, ignoring case.
#[must_use]
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let name = name.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_preset_case_insensitive() {
        let p = find_preset("egg").unwrap();
        assert_eq!(p.name, "Egg");
        assert!(find_preset("  GREEK YOGURT ").is_some());
    }

    #[test]
    fn test_find_preset_unknown() {
        assert!(find_preset("dragonfruit").is_none());
    }

    #[test]
    fn test_preset_names_unique() {
        for (i, a) in PRESETS.iter().enumerate() {
            for b in &PRESETS[i + 1..] {
                assert!(!a.name.eq_ignore_ascii_case(b.name));
            }
        }
    }

    #[test]
    fn test_preset_draft() {
        let draft = find_preset("Oats").unwrap().draft(Meal::Breakfast);
        assert_eq!(draft.meal, Meal::Breakfast);
        assert_eq!(draft.name, "Oats");
        assert_eq!(draft.calories, Some(150.0));
        assert_eq!(draft.qty, "40 g");
        assert!(draft.notes.is_empty());
    }
}
