use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tradable instrument from the backend catalog. Read-only here: the
/// catalog is fetched for the allocation form's selector and never mutated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub id: i32,
    pub name: String,
    /// Unit price, a JSON number on the wire.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}
