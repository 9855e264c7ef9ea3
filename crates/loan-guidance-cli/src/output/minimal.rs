use serde_json::Value;

use super::{format_value, result_of};

/// Fields worth printing on their own, most specific first.
const PRIORITY_KEYS: [&str; 4] = ["monthly_payment", "recommendations", "periods", "overall_risk"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    if let Value::Object(map) = result {
        // Analyses nest the payment under "analysis"
        let scope = map.get("analysis").and_then(Value::as_object).unwrap_or(map);
        for key in PRIORITY_KEYS {
            if let Some(val) = scope.get(key).filter(|v| !v.is_null()) {
                println!("{}", format_value(val));
                return;
            }
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result));
}
