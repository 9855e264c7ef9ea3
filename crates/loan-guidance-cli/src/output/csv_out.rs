use serde_json::Value;
use std::io;

use super::{format_value, result_of, split_rows};

/// Schedules print one row per period; anything else prints field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match result_of(value) {
        Value::Object(result) => match split_rows(result) {
            (_, Some(rows)) => write_rows(&mut wtr, rows),
            (scalars, None) => {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in &scalars {
                    let _ = wtr.write_record([key.as_str(), &format_value(val)]);
                }
            }
        },
        other => {
            let _ = wtr.write_record([&format_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(format_value).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}
