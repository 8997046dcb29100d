use serde_json::Value;

/// Minor currency units (cents).
pub type Cents = u32;

/// Reads a per-unit price. Accepts a decimal string or a JSON number; anything
/// non-finite, negative or unparseable is `None`.
pub fn parse_price(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };

    if amount.is_finite() && amount >= 0.0 {
        Some(amount)
    } else {
        None
    }
}

/// `round(base + fee, 2)` expressed in cents, rounding half away from zero.
pub fn apply_fee(base: f64, fee: Cents) -> Option<u64> {
    let total = (base + f64::from(fee) / 100.0) * 100.0;
    let rounded = total.round();
    if rounded.is_finite() && rounded >= 0.0 && rounded <= u64::MAX as f64 {
        Some(rounded as u64)
    } else {
        None
    }
}

/// 2044 → "20.44", 5 → "0.05"
pub fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
