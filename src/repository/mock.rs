//! Mock repository for isolating services in tests.

use mockall::mock;

use crate::domain::allocation::{Allocation, NewAllocation, UpdateAllocation};
use crate::domain::asset::Asset;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AllocationListQuery, AllocationReader, AllocationWriter, AssetReader, ClientListQuery,
    ClientReader, ClientWriter, Page,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        async fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Page<Client>>;
    }

    impl ClientWriter for Repository {
        async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        async fn update_client(
            &self,
            client_id: i32,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client>;
        async fn delete_client(&self, client_id: i32) -> RepositoryResult<()>;
    }

    impl AssetReader for Repository {
        async fn list_assets(&self) -> RepositoryResult<Vec<Asset>>;
    }

    impl AllocationReader for Repository {
        async fn list_allocations(
            &self,
            query: AllocationListQuery,
        ) -> RepositoryResult<Page<Allocation>>;
    }

    impl AllocationWriter for Repository {
        async fn create_allocation(
            &self,
            client_id: i32,
            new_allocation: &NewAllocation,
        ) -> RepositoryResult<Allocation>;
        async fn update_allocation(
            &self,
            client_id: i32,
            asset_id: i32,
            updates: &UpdateAllocation,
        ) -> RepositoryResult<Allocation>;
        async fn delete_allocation(&self, client_id: i32, asset_id: i32) -> RepositoryResult<()>;
    }
}
