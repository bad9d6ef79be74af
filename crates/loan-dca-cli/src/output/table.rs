use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{cell, fields_of, rows_of};

/// Format output as a table using the tabled crate.
///
/// Batch output (`results` arrays) becomes one row per scenario; envelope or
/// flat objects become a two-column field/value table. Envelope warnings and
/// methodology are appended below the table.
pub fn print_table(value: &Value) {
    if let Some(rows) = rows_of(value) {
        print_row_table(rows);
    } else if let Some(fields) = fields_of(value) {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in fields {
            builder.push_record([key.as_str(), &cell(val)]);
        }
        println!("{}", Table::from(builder));
    } else {
        println!("{value}");
    }

    if let Value::Object(map) = value {
        if let Some(Value::Array(warnings)) = map.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings {
                    println!("  - {}", cell(w));
                }
            }
        }
        if let Some(Value::String(methodology)) = map.get("methodology") {
            println!("\nMethodology: {methodology}");
        }
    }
}

fn print_row_table(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(no results)");
        return;
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows {
        if let Value::Object(map) = row {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(*h).map(cell).unwrap_or_default()),
            );
        }
    }
    println!("{}", Table::from(builder));
}
