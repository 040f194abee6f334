use validator::Validate;

use crate::domain::allocation::{Allocation, UpdateAllocation};
use crate::dto::allocations::{AllocationRow, AllocationsPageData, AssetOption};
use crate::forms::allocations::{AddAllocationForm, SaveAllocationForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{AllocationListQuery, AllocationReader, AllocationWriter, AssetReader};
use crate::services::{ServiceError, ServiceResult};

/// Parsed query string of a client's allocations page.
#[derive(Debug, Clone, Copy)]
pub struct AllocationsQuery {
    pub client_id: i32,
    pub page: Option<usize>,
    /// Asset identifier of the allocation being edited, if any. Allocations
    /// are addressed by `(client_id, asset_id)` on the wire.
    pub edit: Option<i32>,
    pub modal_new: bool,
}

/// Loads one page of a client's allocations plus the asset catalog for the
/// form selector.
pub async fn load_allocations_page<R>(
    repo: &R,
    query: AllocationsQuery,
) -> ServiceResult<AllocationsPageData>
where
    R: AllocationReader + AssetReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let result = repo
        .list_allocations(AllocationListQuery::new(
            query.client_id,
            page,
            DEFAULT_ITEMS_PER_PAGE,
        ))
        .await?;
    let assets = repo.list_assets().await?;

    let rows: Vec<AllocationRow> = result.data.iter().map(AllocationRow::from).collect();

    let edit_target = query
        .edit
        .and_then(|asset_id| rows.iter().find(|row| row.asset_id == asset_id).cloned());
    let modal_open = query.modal_new || edit_target.is_some();

    let total_pages = result.meta.total_pages();
    let allocations = Paginated::new(rows, result.meta.page, total_pages);

    Ok(AllocationsPageData {
        client_id: query.client_id,
        allocations,
        assets: assets.iter().map(AssetOption::from).collect(),
        edit_target,
        modal_open,
    })
}

/// Validates the add-allocation form and creates the allocation. No request
/// is issued when validation fails.
pub async fn add_allocation<R>(
    repo: &R,
    client_id: i32,
    form: &AddAllocationForm,
) -> ServiceResult<Allocation>
where
    R: AllocationWriter + ?Sized,
{
    form.validate()?;
    let new_allocation = form
        .to_new_allocation()
        .ok_or_else(|| ServiceError::Validation(vec!["Selecione um ativo".to_string()]))?;
    Ok(repo.create_allocation(client_id, &new_allocation).await?)
}

/// Validates the quantity and updates the allocation addressed by
/// `(client_id, asset_id)`. Only the quantity travels; the asset is
/// immutable after creation.
pub async fn save_allocation<R>(
    repo: &R,
    client_id: i32,
    asset_id: i32,
    form: &SaveAllocationForm,
) -> ServiceResult<Allocation>
where
    R: AllocationWriter + ?Sized,
{
    form.validate()?;
    Ok(repo
        .update_allocation(client_id, asset_id, &UpdateAllocation::from(form))
        .await?)
}

pub async fn delete_allocation<R>(repo: &R, client_id: i32, asset_id: i32) -> ServiceResult<()>
where
    R: AllocationWriter + ?Sized,
{
    Ok(repo.delete_allocation(client_id, asset_id).await?)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::asset::Asset;
    use crate::repository::mock::MockRepository;
    use crate::repository::{Page, PageMeta};

    fn allocation(asset_id: i32, quantity: i64) -> Allocation {
        Allocation {
            id: asset_id * 100,
            client_id: 42,
            asset: Asset {
                id: asset_id,
                name: format!("ASSET{asset_id}"),
                price: Decimal::new(1000, 2),
            },
            quantity,
        }
    }

    #[tokio::test]
    async fn page_uses_backend_total_pages_when_present() {
        let mut repo = MockRepository::new();
        repo.expect_list_allocations().returning(|query| {
            assert_eq!(query.client_id, 42);
            Ok(Page {
                data: vec![allocation(7, 3)],
                meta: PageMeta {
                    page: 1,
                    per_page: 10,
                    total: 11,
                    total_pages: Some(2),
                },
            })
        });
        repo.expect_list_assets().returning(|| {
            Ok(vec![Asset {
                id: 7,
                name: "ASSET7".into(),
                price: Decimal::new(1000, 2),
            }])
        });

        let data = load_allocations_page(
            &repo,
            AllocationsQuery {
                client_id: 42,
                page: None,
                edit: None,
                modal_new: false,
            },
        )
        .await
        .unwrap();

        assert_eq!(data.allocations.pages, vec![1, 2]);
        assert_eq!(data.allocations.items[0].total, "R$ 30.00");
        assert_eq!(data.assets.len(), 1);
    }

    #[tokio::test]
    async fn edit_target_matches_by_asset_id() {
        let mut repo = MockRepository::new();
        repo.expect_list_allocations().returning(|_| {
            Ok(Page {
                data: vec![allocation(7, 3), allocation(8, 1)],
                meta: PageMeta {
                    page: 1,
                    per_page: 10,
                    total: 2,
                    total_pages: Some(1),
                },
            })
        });
        repo.expect_list_assets().returning(|| Ok(vec![]));

        let data = load_allocations_page(
            &repo,
            AllocationsQuery {
                client_id: 42,
                page: None,
                edit: Some(8),
                modal_new: false,
            },
        )
        .await
        .unwrap();

        assert!(data.modal_open);
        assert_eq!(data.edit_target.unwrap().asset_id, 8);
    }

    #[tokio::test]
    async fn rejected_quantities_never_reach_the_repository() {
        let repo = MockRepository::new(); // panics if any call happens

        for quantity in [0, -5] {
            let form = AddAllocationForm {
                asset_id: Some(7),
                quantity,
            };
            match add_allocation(&repo, 42, &form).await {
                Err(ServiceError::Validation(messages)) => {
                    assert_eq!(messages, vec!["Quantidade mínima é 1"]);
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }

        let form = AddAllocationForm {
            asset_id: None,
            quantity: 3,
        };
        match add_allocation(&repo, 42, &form).await {
            Err(ServiceError::Validation(messages)) => {
                assert_eq!(messages, vec!["Selecione um ativo"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn valid_create_issues_one_request() {
        let mut repo = MockRepository::new();
        repo.expect_create_allocation()
            .times(1)
            .withf(|client_id, new_allocation| {
                *client_id == 42 && new_allocation.asset_id == 7 && new_allocation.quantity == 3
            })
            .returning(|_, _| Ok(allocation(7, 3)));

        let form = AddAllocationForm {
            asset_id: Some(7),
            quantity: 3,
        };
        add_allocation(&repo, 42, &form).await.unwrap();
    }

    #[tokio::test]
    async fn save_transmits_quantity_only() {
        let mut repo = MockRepository::new();
        repo.expect_update_allocation()
            .withf(|client_id, asset_id, updates| {
                *client_id == 42 && *asset_id == 7 && updates.quantity == 5
            })
            .returning(|_, _, _| Ok(allocation(7, 5)));

        let form = SaveAllocationForm { quantity: 5 };
        let updated = save_allocation(&repo, 42, 7, &form).await.unwrap();
        assert_eq!(updated.quantity, 5);
    }
}
