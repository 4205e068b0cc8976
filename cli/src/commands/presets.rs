use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use macrolog_core::presets::PRESETS;

use super::helpers::fmt_amount;

pub(crate) fn cmd_presets(json: bool) -> Result<()> {
    #[derive(Tabled)]
    struct PresetRow {
        #[tabled(rename = "Name")]
        name: &'static str,
        #[tabled(rename = "Qty")]
        qty: &'static str,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Protein")]
        protein: String,
        #[tabled(rename = "Carbs")]
        carbs: String,
        #[tabled(rename = "Fat")]
        fat: String,
    }

    if json {
        println!("{}", serde_json::to_string_pretty(PRESETS)?);
        return Ok(());
    }

    let rows: Vec<PresetRow> = PRESETS
        .iter()
        .map(|p| PresetRow {
            name: p.name,
            qty: p.qty,
            calories: fmt_amount(p.calories),
            protein: format!("{}g", fmt_amount(p.protein)),
            carbs: format!("{}g", fmt_amount(p.carbs)),
            fat: format!("{}g", fmt_amount(p.fat)),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
    println!("\nUse one with `macrolog add --preset <name> --meal <meal>`");

    Ok(())
}
