use serde_json::Value;

use super::cell;

/// Key fields in priority order, one per command's headline number.
const PRIORITY_KEYS: [&str; 8] = [
    "effective_apr_pct",
    "annualized_pct",
    "roi_pct",
    "monthly_payment",
    "mean_pct",
    "net_position",
    "scenarios_computed",
    "regime",
];

/// Print just the headline answer from the output.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", cell(val));
                    return;
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, cell(val));
            return;
        }
    }

    println!("{}", cell(result));
}
