use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::asset::Asset;

/// A client's holding of a specific asset.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: i32,
    pub client_id: i32,
    pub asset: Asset,
    pub quantity: i64,
}

impl Allocation {
    /// Total position value, `price * quantity`. Computed at render time,
    /// never persisted.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.asset.price * Decimal::from(self.quantity)
    }
}

/// Payload for `POST /clients/{id}/allocations`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewAllocation {
    pub asset_id: i32,
    pub quantity: i64,
}

/// Payload for `PUT /clients/{id}/allocations/{asset_id}`. The asset of an
/// allocation is immutable after creation, so only the quantity travels.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateAllocation {
    pub quantity: i64,
}
