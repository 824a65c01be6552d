use serde_json::Value;

use super::format_value;

/// Headline figures, most specific first. Dotted keys look into nested
/// result sections.
const PRIORITY_KEYS: [&str; 6] = [
    "summary.rating",
    "rating",
    "monthly_payment",
    "max_offer_price",
    "cash_flow.monthly_cash_flow",
    "cap_rate",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for key in PRIORITY_KEYS {
        if let Some(val) = lookup(result_obj, key) {
            if !val.is_null() {
                println!("{}", format_value(val));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_value(val));
            return;
        }
    }

    println!("{}", format_value(result_obj));
}

fn lookup<'a>(value: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(value, |current, part| current.as_object()?.get(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested() {
        let v = json!({ "summary": { "rating": "Good" } });
        assert_eq!(lookup(&v, "summary.rating"), Some(&json!("Good")));
        assert_eq!(lookup(&v, "summary.missing"), None);
        assert_eq!(lookup(&v, "cap_rate"), None);
    }
}
