use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cart transform input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartTransformInput {
    #[serde(default)]
    pub shop: Option<Shop>,
    pub cart: Cart,
}

impl CartTransformInput {
    /// Raw jurisdiction setting, `Null` when the shop has none.
    pub fn jurisdiction_value(&self) -> &serde_json::Value {
        static NULL: serde_json::Value = serde_json::Value::Null;
        self.shop
            .as_ref()
            .and_then(|shop| shop.jurisdiction.as_ref())
            .map(|metafield| &metafield.value)
            .unwrap_or(&NULL)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shop {
    #[serde(default)]
    pub jurisdiction: Option<Metafield>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metafield {
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub lines: Vec<CartLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    #[serde(default)]
    pub cost: LineCost,
    #[serde(default)]
    pub merchandise: Merchandise,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCost {
    #[serde(default)]
    pub amount_per_quantity: MoneyV2,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoneyV2 {
    /// Decimal string on the wire; numbers are tolerated.
    #[serde(default)]
    pub amount: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum Merchandise {
    ProductVariant {
        #[serde(default)]
        product: Option<Product>,
    },
    /// Bundles, custom items and anything else the platform adds later.
    #[serde(other)]
    Other,
}

impl Default for Merchandise {
    fn default() -> Self {
        Merchandise::Other
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub eco_category_tags: Option<Vec<CategoryFlag>>,
}

/// "This product is tagged with category X."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFlag {
    pub tag: String,
    pub has_tag: bool,
}

// ---------------------------------------------------------------------------
// Cart transform output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartTransformResult {
    pub operations: Vec<CartOperation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CartOperation {
    LineUpdate(LineUpdateOperation),
}

/// Authoritative override of one line's title and per-unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineUpdateOperation {
    pub cart_line_id: String,
    pub title: String,
    pub price: LineUpdatePrice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineUpdatePrice {
    pub adjustment: PriceAdjustment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAdjustment {
    pub fixed_price_per_unit: FixedPrice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedPrice {
    pub amount: String,
}

impl LineUpdateOperation {
    pub fn new(cart_line_id: impl Into<String>, title: impl Into<String>, amount: String) -> Self {
        Self {
            cart_line_id: cart_line_id.into(),
            title: title.into(),
            price: LineUpdatePrice {
                adjustment: PriceAdjustment {
                    fixed_price_per_unit: FixedPrice { amount },
                },
            },
        }
    }

    pub fn amount(&self) -> &str {
        &self.price.adjustment.fixed_price_per_unit.amount
    }
}

// ---------------------------------------------------------------------------
// Admin API records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionNode {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub api_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTransformNode {
    pub id: String,
    #[serde(default)]
    pub function_id: Option<String>,
    #[serde(default)]
    pub block_on_failure: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAddress {
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub province_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldWrite {
    pub owner_id: String,
    pub namespace: String,
    pub key: String,
    pub r#type: String,
    pub value: String,
}

/// Platform ids arrive either plain or as `gid://shopify/Type/123`; compare
/// them by their last path segment.
pub fn normalize_gid(id: &str) -> Option<String> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("gid://") {
        return trimmed
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string);
    }
    Some(trimmed.to_string())
}
