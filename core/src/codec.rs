//! CSV/JSON export and JSON import of the entry collection.

use serde_json::Value;

use crate::error::{Result, TrackerError};
use crate::models::Entry;

pub const CSV_HEADER: [&str; 10] = [
    "id", "date", "meal", "name", "calories", "protein", "carbs", "fat", "qty", "notes",
];

pub const CSV_MIME: &str = "text/csv";
pub const JSON_MIME: &str = "application/json";
pub const CSV_FILE_NAME: &str = "food-log.csv";
pub const JSON_FILE_NAME: &str = "food-log.json";

/// Render entries as CSV, one row per entry in collection order.
///
/// Fields containing a comma, double quote, or newline are quoted with
/// interior quotes doubled. Rows are separated by `\n`; the header line
/// always ends with one, the last row does not.
pub fn export_csv(entries: &[Entry]) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;
    for e in entries {
        wtr.write_record([
            e.id.clone(),
            e.date.clone(),
            e.meal.to_string(),
            e.name.clone(),
            e.calories.to_string(),
            e.protein.to_string(),
            e.carbs.to_string(),
            e.fat.to_string(),
            e.qty.clone(),
            e.notes.clone(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|err| TrackerError::Serialize(err.to_string()))?;
    let mut out =
        String::from_utf8(bytes).map_err(|err| TrackerError::Serialize(err.to_string()))?;
    if !entries.is_empty() {
        out.pop();
    }
    Ok(out)
}

/// Pretty-printed JSON array of entries.
pub fn export_json(entries: &[Entry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Parse an exported JSON file back into entries.
///
/// The payload must be a JSON array of objects. Field values are taken
/// as-is; ids are left empty where the record has none, and the tracker
/// assigns them when the collection is replaced.
pub fn import_json(text: &str) -> Result<Vec<Entry>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| TrackerError::Format(format!("not valid JSON ({err})")))?;

    let Value::Array(items) = value else {
        return Err(TrackerError::Format(
            "expected a JSON array of entries".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(TrackerError::Format(format!(
                    "item {} is not an object",
                    i + 1
                )));
            }
            serde_json::from_value(item)
                .map_err(|err| TrackerError::Format(format!("item {}: {err}", i + 1)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Meal;

    fn sample_entries() -> Vec<Entry> {
        vec![
            Entry {
                id: "e1".to_string(),
                date: "2024-06-15".to_string(),
                meal: Meal::Breakfast,
                name: "Oatmeal".to_string(),
                calories: 150.0,
                protein: 5.0,
                carbs: 27.0,
                fat: 3.0,
                qty: "40 g".to_string(),
                notes: String::new(),
            },
            Entry {
                id: "e2".to_string(),
                date: "2024-06-15".to_string(),
                meal: Meal::Lunch,
                name: "Rice, \"jasmine\"".to_string(),
                calories: 205.5,
                protein: 4.3,
                carbs: 45.0,
                fat: 0.4,
                qty: "1 cup".to_string(),
                notes: "with soy sauce\nand scallions".to_string(),
            },
        ]
    }

    #[test]
    fn test_export_csv_header_only() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv, "id,date,meal,name,calories,protein,carbs,fat,qty,notes\n");
    }

    #[test]
    fn test_export_csv_plain_row() {
        let entries = sample_entries();
        let csv = export_csv(&entries[..1]).unwrap();
        assert_eq!(
            csv,
            "id,date,meal,name,calories,protein,carbs,fat,qty,notes\n\
             e1,2024-06-15,Breakfast,Oatmeal,150,5,27,3,40 g,"
        );
    }

    #[test]
    fn test_export_csv_escapes_free_text() {
        let entries = sample_entries();
        let csv = export_csv(&entries[1..]).unwrap();
        assert!(csv.contains(",\"Rice, \"\"jasmine\"\"\","));
        assert!(csv.contains("\"with soy sauce\nand scallions\""));
        assert!(csv.contains(",205.5,4.3,45,0.4,1 cup,"));
        assert!(csv.ends_with("and scallions\""));
    }

    #[test]
    fn test_export_csv_keeps_collection_order() {
        let mut entries = sample_entries();
        entries.reverse();
        let csv = export_csv(&entries).unwrap();
        let e2 = csv.find("e2,").unwrap();
        let e1 = csv.find("e1,").unwrap();
        assert!(e2 < e1);
    }

    #[test]
    fn test_export_csv_parses_back() {
        let entries = sample_entries();
        let csv = export_csv(&entries).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][3], "Rice, \"jasmine\"");
        assert_eq!(&rows[1][9], "with soy sauce\nand scallions");
    }

    #[test]
    fn test_export_json_is_indented_array() {
        let json = export_json(&sample_entries()).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": \"e1\""));
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let entries = sample_entries();
        let json = export_json(&entries).unwrap();
        let back = import_json(&json).unwrap();
        assert_eq!(back, entries);
    }

    #[test]
    fn test_import_rejects_object() {
        let err = import_json(r#"{"a":1}"#).unwrap_err();
        assert!(matches!(err, TrackerError::Format(_)));
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        let err = import_json("[{").unwrap_err();
        assert!(matches!(err, TrackerError::Format(_)));
    }

    #[test]
    fn test_import_rejects_non_object_item() {
        let err = import_json(r#"[{"name":"ok"}, 3]"#).unwrap_err();
        assert!(matches!(err, TrackerError::Format(_)));
        assert!(err.to_string().contains("item 2"));
    }

    #[test]
    fn test_import_keeps_unknown_meal() {
        let entries = import_json(
            r#"[{"id":"a","date":"2024-06-15","meal":"Brunch","name":"Toast","calories":100}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].meal, Meal::Other("Brunch".to_string()));
        assert_eq!(entries[0].calories, 100.0);

        let json = export_json(&entries).unwrap();
        assert!(json.contains("\"meal\": \"Brunch\""));
        assert_eq!(import_json(&json).unwrap(), entries);
    }

    #[test]
    fn test_import_empty_array() {
        assert!(import_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_import_leaves_missing_id_empty() {
        let entries = import_json(r#"[{"date":"2024-06-15","name":"Egg","calories":72}]"#).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "");
        assert_eq!(entries[0].calories, 72.0);
    }
}
