use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_value, result_of, split_rows};

/// Field/value table for the headline figures, followed by a row table for
/// any schedule entries.
pub fn print_table(value: &Value) {
    match result_of(value) {
        Value::Object(result) => {
            let (scalars, rows) = split_rows(result);
            print_fields(&scalars);
            if let Some(rows) = rows {
                println!();
                print_rows(rows);
            }
        }
        other => println!("{}", format_value(other)),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }
    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_fields(fields: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        match val {
            // One level of nesting reads better flattened: debt_to_income.after_loan
            Value::Object(inner) => {
                for (sub, v) in inner {
                    builder.push_record([format!("{key}.{sub}"), format_value(v)]);
                }
            }
            _ => builder.push_record([key.clone(), format_value(val)]),
        }
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(no periods)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(h).map(format_value).unwrap_or_default())
            .collect();
        builder.push_record(record);
    }
    println!("{}", Table::from(builder));
}
