use crate::cache::QueryKey;
use crate::domain::allocation::{Allocation, NewAllocation, UpdateAllocation};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AllocationListQuery, AllocationReader, AllocationWriter, ApiRepository, Page,
};

impl AllocationReader for ApiRepository {
    async fn list_allocations(
        &self,
        query: AllocationListQuery,
    ) -> RepositoryResult<Page<Allocation>> {
        let pagination = query.pagination;
        let key = QueryKey::allocations(query.client_id, pagination.page, pagination.per_page);

        if let Some(page) = self.cache().get::<Page<Allocation>>(&key) {
            return Ok(page);
        }

        let token = self.cache().begin(&key);
        let page: Page<Allocation> = self
            .http()
            .get(
                &format!("clients/{}/allocations", query.client_id),
                &[
                    ("page", pagination.page.to_string()),
                    ("perPage", pagination.per_page.to_string()),
                ],
            )
            .await?;
        self.cache().complete(&key, token, &page);

        Ok(page)
    }
}

impl AllocationWriter for ApiRepository {
    async fn create_allocation(
        &self,
        client_id: i32,
        new_allocation: &NewAllocation,
    ) -> RepositoryResult<Allocation> {
        let allocation = self
            .http()
            .post(&format!("clients/{client_id}/allocations"), new_allocation)
            .await?;
        self.cache()
            .invalidate_prefix(&QueryKey::allocations_prefix(client_id));
        Ok(allocation)
    }

    async fn update_allocation(
        &self,
        client_id: i32,
        asset_id: i32,
        updates: &UpdateAllocation,
    ) -> RepositoryResult<Allocation> {
        let allocation = self
            .http()
            .put(
                &format!("clients/{client_id}/allocations/{asset_id}"),
                updates,
            )
            .await?;
        self.cache()
            .invalidate_prefix(&QueryKey::allocations_prefix(client_id));
        Ok(allocation)
    }

    async fn delete_allocation(&self, client_id: i32, asset_id: i32) -> RepositoryResult<()> {
        self.http()
            .delete(&format!("clients/{client_id}/allocations/{asset_id}"))
            .await?;
        self.cache()
            .invalidate_prefix(&QueryKey::allocations_prefix(client_id));
        Ok(())
    }
}
