use crate::core::fee::select_fee;
use crate::core::jurisdiction::JurisdictionCode;
use crate::core::money::{apply_fee, format_cents, parse_price};
use crate::core::schedule::{self, FeeSchedule};
use crate::domain::model::{
    CartLine, CartOperation, CartTransformInput, CartTransformResult, LineUpdateOperation,
    Merchandise,
};
use std::borrow::Cow;

/// Shared "no changes" result. Empty runs borrow it so callers can compare
/// by identity.
pub static NO_CHANGES: CartTransformResult = CartTransformResult {
    operations: Vec::new(),
};

const FALLBACK_TITLE: &str = "Item";

/// Stateless eco fee transform. Each call is a pure function of its input
/// and the static fee tables; unresolved conditions produce no mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartTransformEngine;

impl CartTransformEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, input: &CartTransformInput) -> Cow<'static, CartTransformResult> {
        let Some(code) = JurisdictionCode::resolve(input.jurisdiction_value()) else {
            tracing::debug!("no usable jurisdiction configured; skipping eco fees");
            return Cow::Borrowed(&NO_CHANGES);
        };

        let schedule = schedule::lookup(code);
        if !schedule.enabled {
            tracing::debug!(jurisdiction = %code, "jurisdiction is not enabled; skipping eco fees");
            return Cow::Borrowed(&NO_CHANGES);
        }

        let operations: Vec<CartOperation> = input
            .cart
            .lines
            .iter()
            .filter_map(|line| line_update(line, schedule))
            .map(CartOperation::LineUpdate)
            .collect();

        tracing::debug!(
            jurisdiction = %code,
            lines = input.cart.lines.len(),
            updated = operations.len(),
            "eco fee transform finished"
        );

        if operations.is_empty() {
            Cow::Borrowed(&NO_CHANGES)
        } else {
            Cow::Owned(CartTransformResult { operations })
        }
    }
}

/// Convenience wrapper over [`CartTransformEngine::run`].
pub fn run(input: &CartTransformInput) -> Cow<'static, CartTransformResult> {
    CartTransformEngine::new().run(input)
}

pub fn is_no_changes(result: &CartTransformResult) -> bool {
    std::ptr::eq(result, &NO_CHANGES)
}

fn line_update(line: &CartLine, schedule: &FeeSchedule) -> Option<LineUpdateOperation> {
    let Merchandise::ProductVariant { product } = &line.merchandise else {
        tracing::trace!(line = %line.id, "skipping non-variant merchandise");
        return None;
    };

    let title = product
        .as_ref()
        .and_then(|p| p.title.as_deref())
        .unwrap_or(FALLBACK_TITLE);
    let flags = product
        .as_ref()
        .and_then(|p| p.eco_category_tags.as_deref())
        .unwrap_or(&[]);

    let fee = select_fee(flags, schedule)?;

    let Some(base) = parse_price(&line.cost.amount_per_quantity.amount) else {
        tracing::warn!(
            line = %line.id,
            amount = %line.cost.amount_per_quantity.amount,
            "malformed base price; leaving line untouched"
        );
        return None;
    };
    let new_price = apply_fee(base, fee.cents)?;

    tracing::trace!(
        line = %line.id,
        category = %fee.category,
        fee_cents = fee.cents,
        "applying eco fee"
    );

    Some(LineUpdateOperation::new(
        line.id.clone(),
        format!(
            "{} – {}",
            title,
            fee_suffix(schedule.label, u64::from(fee.cents))
        ),
        format_cents(new_price),
    ))
}

fn fee_suffix(label: &str, fee_cents: u64) -> String {
    format!("♻️ {}: +${} per unit", label, format_cents(fee_cents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cart(jurisdiction: serde_json::Value, lines: serde_json::Value) -> CartTransformInput {
        serde_json::from_value(json!({
            "shop": { "jurisdiction": { "value": jurisdiction } },
            "cart": { "lines": lines }
        }))
        .unwrap()
    }

    fn variant_line(id: &str, amount: serde_json::Value, tags: &[(&str, bool)]) -> serde_json::Value {
        let tags: Vec<_> = tags
            .iter()
            .map(|(tag, has)| json!({ "tag": tag, "hasTag": has }))
            .collect();
        json!({
            "id": id,
            "cost": { "amountPerQuantity": { "amount": amount } },
            "merchandise": {
                "__typename": "ProductVariant",
                "product": { "title": "Desktop Tower", "ecoCategoryTags": tags }
            }
        })
    }

    #[test]
    fn test_alberta_computer_line() {
        let input = cart(
            json!("AB"),
            json!([variant_line("line-1", json!("19.99"), &[("eco-category-computers", true)])]),
        );

        let result = run(&input);
        assert!(!is_no_changes(&result));
        assert_eq!(result.operations.len(), 1);

        let CartOperation::LineUpdate(update) = &result.operations[0];
        assert_eq!(update.cart_line_id, "line-1");
        assert_eq!(update.amount(), "20.44");
        assert_eq!(
            update.title,
            "Desktop Tower – ♻️ AB Environmental Fee: +$0.45 per unit"
        );
    }

    #[test]
    fn test_empty_result_is_the_shared_sentinel() {
        let input = cart(
            json!("AB"),
            json!([variant_line("line-1", json!("10.00"), &[("eco-category-peripherals", true)])]),
        );
        let result = run(&input);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(is_no_changes(&result));
    }

    #[test]
    fn test_missing_product_falls_back_to_no_fee() {
        let input = cart(
            json!("BC"),
            json!([{
                "id": "line-1",
                "cost": { "amountPerQuantity": { "amount": "10.00" } },
                "merchandise": { "__typename": "ProductVariant" }
            }]),
        );
        assert!(is_no_changes(&run(&input)));
    }

    #[test]
    fn test_missing_title_uses_placeholder() {
        let input = cart(
            json!("BC"),
            json!([{
                "id": "line-1",
                "cost": { "amountPerQuantity": { "amount": "100.00" } },
                "merchandise": {
                    "__typename": "ProductVariant",
                    "product": {
                        "ecoCategoryTags": [ { "tag": "eco-category-printers", "hasTag": true } ]
                    }
                }
            }]),
        );
        let result = run(&input);
        let CartOperation::LineUpdate(update) = &result.operations[0];
        assert_eq!(update.title, "Item – ♻️ BC Environmental Fee: +$6.50 per unit");
        assert_eq!(update.amount(), "106.50");
    }

    #[test]
    fn test_malformed_price_skips_only_that_line() {
        let input = cart(
            json!("SK"),
            json!([
                variant_line("bad", json!("not-a-number"), &[("eco-category-laptops", true)]),
                variant_line("good", json!("899.00"), &[("eco-category-laptops", true)])
            ]),
        );
        let result = run(&input);
        assert_eq!(result.operations.len(), 1);
        let CartOperation::LineUpdate(update) = &result.operations[0];
        assert_eq!(update.cart_line_id, "good");
        assert_eq!(update.amount(), "899.45");
    }

    #[test]
    fn test_fee_suffix_format() {
        assert_eq!(
            fee_suffix("SK Environmental Fee", 700),
            "♻️ SK Environmental Fee: +$7.00 per unit"
        );
    }
}
