use serde::Deserialize;
use validator::Validate;

use crate::domain::allocation::{NewAllocation, UpdateAllocation};
use crate::forms::empty_as_none;

/// Form data for creating an allocation.
#[derive(Debug, Deserialize, Validate)]
pub struct AddAllocationForm {
    /// Unselected selectors post an empty string, which maps to `None`.
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(required(message = "Selecione um ativo"))]
    pub asset_id: Option<i32>,
    #[validate(range(min = 1, message = "Quantidade mínima é 1"))]
    pub quantity: i64,
}

/// Form data for updating an allocation. The asset is immutable after
/// creation, so only the quantity is editable.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveAllocationForm {
    #[validate(range(min = 1, message = "Quantidade mínima é 1"))]
    pub quantity: i64,
}

impl AddAllocationForm {
    /// Builds the create payload. Call only after `validate()` succeeded.
    pub fn to_new_allocation(&self) -> Option<NewAllocation> {
        Some(NewAllocation {
            asset_id: self.asset_id?,
            quantity: self.quantity,
        })
    }
}

impl From<&SaveAllocationForm> for UpdateAllocation {
    fn from(form: &SaveAllocationForm) -> Self {
        UpdateAllocation {
            quantity: form.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_selector_deserializes_to_none() {
        let form: AddAllocationForm =
            serde_json::from_value(serde_json::json!({ "asset_id": "", "quantity": 3 })).unwrap();
        assert_eq!(form.asset_id, None);
        assert!(form.validate().is_err());
    }

    #[test]
    fn selected_asset_parses() {
        let form: AddAllocationForm =
            serde_json::from_value(serde_json::json!({ "asset_id": "7", "quantity": 3 })).unwrap();
        assert_eq!(form.asset_id, Some(7));
        assert!(form.validate().is_ok());
        assert_eq!(
            form.to_new_allocation(),
            Some(NewAllocation {
                asset_id: 7,
                quantity: 3
            })
        );
    }
}
