//! View models for the per-client allocations page.

use serde::Serialize;

use crate::domain::allocation::Allocation;
use crate::domain::asset::Asset;
use crate::pagination::Paginated;

/// One allocation shaped for display. Both the table renderer and the card
/// renderer consume this same row model, so the monetary formatting lives
/// here rather than in either template branch.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AllocationRow {
    pub id: i32,
    pub asset_id: i32,
    pub asset_name: String,
    pub price: String,
    pub quantity: i64,
    pub total: String,
}

impl From<&Allocation> for AllocationRow {
    fn from(allocation: &Allocation) -> Self {
        Self {
            id: allocation.id,
            asset_id: allocation.asset.id,
            asset_name: allocation.asset.name.clone(),
            price: format!("R$ {:.2}", allocation.asset.price),
            quantity: allocation.quantity,
            total: format!("R$ {:.2}", allocation.total_value()),
        }
    }
}

/// An asset catalog entry shaped for the form selector.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AssetOption {
    pub id: i32,
    pub name: String,
    pub price: String,
}

impl From<&Asset> for AssetOption {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id,
            name: asset.name.clone(),
            price: format!("R$ {:.2}", asset.price),
        }
    }
}

#[derive(Serialize)]
pub struct AllocationsPageData {
    pub client_id: i32,
    pub allocations: Paginated<AllocationRow>,
    pub assets: Vec<AssetOption>,
    pub edit_target: Option<AllocationRow>,
    pub modal_open: bool,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn row_formats_price_and_total_to_two_places() {
        let allocation = Allocation {
            id: 1,
            client_id: 42,
            asset: Asset {
                id: 7,
                name: "PETR4".into(),
                price: Decimal::new(105, 1), // 10.5
            },
            quantity: 3,
        };
        let row = AllocationRow::from(&allocation);
        assert_eq!(row.price, "R$ 10.50");
        assert_eq!(row.total, "R$ 31.50");
        assert_eq!(row.asset_id, 7);
    }
}
