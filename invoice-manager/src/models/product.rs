//! Product line model for invoice-manager.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Single billable item with rate and quantity; owned by exactly one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub rate: Decimal,
    pub quantity: u32,
}

impl ProductLine {
    /// Always derived as `rate * quantity`, never stored authoritatively.
    pub fn amount(&self) -> Decimal {
        self.rate * Decimal::from(self.quantity)
    }
}

impl From<ProductRecord> for ProductLine {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            rate: record.rate,
            quantity: record.quantity,
        }
    }
}

/// Product as held by the store, keyed to its invoice and carrying the
/// denormalized amount the store's JSON shape expects.
///
/// The store file is hand-editable, so numeric fields decode leniently:
/// non-numeric rate/quantity coerce to 0 instead of failing a whole fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub invoice_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub rate: Decimal,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
}

impl ProductRecord {
    pub fn from_line(invoice_id: &str, line: &ProductLine) -> Self {
        Self {
            id: line.id.clone(),
            invoice_id: invoice_id.to_string(),
            name: line.name.clone(),
            rate: line.rate,
            quantity: line.quantity,
            amount: line.amount(),
        }
    }
}

fn coerce_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => n.to_string().parse().unwrap_or(Decimal::ZERO),
        Value::String(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

fn coerce_quantity(value: &Value) -> u32 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() && n >= 0.0 {
        n.trunc() as u32
    } else {
        0
    }
}

pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value))
}

pub fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_quantity(&value))
}

pub fn lenient_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        other => Ok(Some(coerce_decimal(&other))),
    }
}
