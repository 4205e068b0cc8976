use macrolog_core::db::{Database, KeyValueStore};
use macrolog_core::models::{DraftEntry, GoalsDraft, Meal};
use macrolog_core::tracker::{ENTRIES_KEY, Tracker};

fn draft(meal: Meal, name: &str, calories: f64) -> DraftEntry {
    DraftEntry {
        meal,
        name: name.to_string(),
        calories: Some(calories),
        ..DraftEntry::default()
    }
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("macrolog.db");

    let (entries, goals) = {
        let mut t = Tracker::new(Database::open(&path).unwrap());
        t.select_date("2024-06-15");
        t.create_or_update_entry(draft(Meal::Dinner, "Curry", 640.0))
            .unwrap();
        t.create_or_update_entry(draft(Meal::Breakfast, "Toast", 180.0))
            .unwrap();
        let goals = t
            .set_goals(GoalsDraft {
                calories: Some(1900.0),
                protein: Some(160.0),
                carbs: Some(190.0),
                fat: Some(60.0),
            })
            .unwrap();
        (t.entries().to_vec(), goals)
    };

    let mut t = Tracker::new(Database::open(&path).unwrap());
    assert_eq!(t.entries(), entries.as_slice());
    assert_eq!(*t.goals(), goals);

    t.select_date("2024-06-15");
    let names: Vec<&str> = t.day_entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Toast", "Curry"]);
}

#[test]
fn test_corrupt_store_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("macrolog.db");

    {
        let mut db = Database::open(&path).unwrap();
        db.set(ENTRIES_KEY, "not json at all").unwrap();
    }

    let t = Tracker::new(Database::open(&path).unwrap());
    assert!(t.entries().is_empty());
    assert_eq!(t.goals().calories, 2200.0);
}

#[test]
fn test_import_replaces_persisted_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("macrolog.db");

    {
        let mut t = Tracker::new(Database::open(&path).unwrap());
        t.create_or_update_entry(draft(Meal::Lunch, "Old", 100.0))
            .unwrap();
        let summary = t
            .import_json(
                r#"[
                    {"id":"a","date":"2024-01-02","meal":"Snack","name":"Apple","calories":95},
                    {"date":"2024-01-02","meal":"Lunch","name":"Soup","calories":"210"}
                ]"#,
            )
            .unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.ids_assigned, 1);
    }

    let t = Tracker::new(Database::open(&path).unwrap());
    assert_eq!(t.entries().len(), 2);
    assert_eq!(t.entries()[0].id, "a");
    assert_eq!(t.entries()[1].calories, 210.0);
    assert!(t.entries().iter().all(|e| e.name != "Old"));
}

#[test]
fn test_non_numeric_amount_reloads_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("macrolog.db");

    {
        let mut t = Tracker::new(Database::open(&path).unwrap());
        t.import_json(r#"[{"id":"a","date":"2024-01-02","name":"Mystery","calories":"lots"}]"#)
            .unwrap();
        assert!(t.entries()[0].calories.is_nan());
    }

    let t = Tracker::new(Database::open(&path).unwrap());
    assert_eq!(t.entries().len(), 1);
    assert_eq!(t.entries()[0].calories, 0.0);
}
