//! JSON-LD structured-data extraction
//!
//! Scans <script type="application/ld+json"> blocks for schema.org product
//! data. Malformed blocks are skipped without aborting extraction. When
//! several blocks qualify, the last one in document order wins.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::FieldSet;
use crate::dom::Dom;

/// Loose view over one schema.org product node. Fields the page omits stay
/// `None` and fall through to the next stage.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub name: Option<String>,
    /// A single URL or a list of URLs; some sites use image objects instead,
    /// which are ignored.
    #[serde(default)]
    pub image: Option<OneOrMany<Value>>,
    #[serde(default)]
    pub offers: Option<OneOrMany<Offer>>,
}

/// One schema.org Offer. When a page lists several, only the first is
/// considered authoritative.
#[derive(Debug, Clone, Deserialize)]
pub struct Offer {
    /// String or number; rendered verbatim, never reformatted.
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default, rename = "priceCurrency")]
    pub price_currency: Option<String>,
}

/// Single value or ordered list. The list variant must come first: untagged
/// deserialization tries variants in order, and a bare `Value` would also
/// match arrays.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_first(self) -> Option<T> {
        match self {
            OneOrMany::Many(v) => v.into_iter().next(),
            OneOrMany::One(v) => Some(v),
        }
    }
}

/// Extract title/price/image from embedded JSON-LD product blocks.
pub fn extract_structured_data(dom: &Dom) -> FieldSet {
    let mut candidate: Option<ProductRecord> = None;

    for block in dom.script_blocks("application/ld+json") {
        let text = block.trim();
        if text.is_empty() {
            continue;
        }

        let json: Value = match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                debug!(error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };

        if let Some(node) = qualifying_node(&json) {
            match serde_json::from_value::<ProductRecord>(node.clone()) {
                // Later qualifying blocks overwrite earlier ones.
                Ok(record) => candidate = Some(record),
                Err(e) => debug!(error = %e, "skipping unusable product block"),
            }
        }
    }

    let Some(record) = candidate else {
        return FieldSet::default();
    };

    FieldSet {
        title: record.name,
        image: record
            .image
            .and_then(OneOrMany::into_first)
            .and_then(|v| v.as_str().map(String::from)),
        price: record
            .offers
            .and_then(OneOrMany::into_first)
            .and_then(render_offer_price),
    }
}

/// Find the product node inside one parsed block. A top-level object
/// qualifies when typed Product or ItemPage; a top-level array contributes
/// its first Product element.
fn qualifying_node(json: &Value) -> Option<&Value> {
    match json {
        Value::Object(_) if has_type(json, &["Product", "ItemPage"]) => Some(json),
        Value::Array(items) => items.iter().find(|item| has_type(item, &["Product"])),
        _ => None,
    }
}

/// Check the node's @type, which may be a single string or a list.
fn has_type(node: &Value, wanted: &[&str]) -> bool {
    match node.get("@type") {
        Some(Value::String(t)) => wanted.contains(&t.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(|t| t.as_str())
            .any(|t| wanted.contains(&t)),
        _ => false,
    }
}

/// "{currency} {amount}" with the raw offer value concatenated as text.
/// Currency defaults to "$" when the offer omits it.
fn render_offer_price(offer: Offer) -> Option<String> {
    let amount = match offer.price? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let currency = offer.price_currency.unwrap_or_else(|| "$".to_string());
    Some(format!("{} {}", currency, amount))
}
