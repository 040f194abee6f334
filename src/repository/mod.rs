use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cache::QueryCache;
use crate::domain::allocation::{Allocation, NewAllocation, UpdateAllocation};
use crate::domain::asset::Asset;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::repository::errors::RepositoryResult;
use crate::repository::http::HttpApi;

pub mod allocations;
pub mod assets;
pub mod clients;
pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct ClientListQuery {
    pub pagination: Pagination,
}

impl ClientListQuery {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            pagination: Pagination { page, per_page },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AllocationListQuery {
    pub client_id: i32,
    pub pagination: Pagination,
}

impl AllocationListQuery {
    pub fn new(client_id: i32, page: usize, per_page: usize) -> Self {
        Self {
            client_id,
            pagination: Pagination { page, per_page },
        }
    }
}

/// Metadata of a paginated backend response. `total_pages` is present on
/// some endpoints and derived from `total / per_page` on the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
}

impl PageMeta {
    pub fn total_pages(&self) -> usize {
        self.total_pages
            .unwrap_or_else(|| self.total.div_ceil(self.per_page.max(1)))
    }
}

/// The `{data, meta}` envelope every list endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[allow(async_fn_in_trait)]
pub trait ClientReader {
    async fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Page<Client>>;
}

#[allow(async_fn_in_trait)]
pub trait ClientWriter {
    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    async fn update_client(&self, client_id: i32, updates: &UpdateClient)
    -> RepositoryResult<Client>;
    async fn delete_client(&self, client_id: i32) -> RepositoryResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait AssetReader {
    async fn list_assets(&self) -> RepositoryResult<Vec<Asset>>;
}

#[allow(async_fn_in_trait)]
pub trait AllocationReader {
    async fn list_allocations(
        &self,
        query: AllocationListQuery,
    ) -> RepositoryResult<Page<Allocation>>;
}

#[allow(async_fn_in_trait)]
pub trait AllocationWriter {
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

/// Repository backed by the external REST API, with a shared query cache in
/// front of the read paths. Cheap to clone: one per Actix worker.
#[derive(Clone)]
pub struct ApiRepository {
    http: HttpApi,
    cache: Arc<QueryCache>,
}

impl ApiRepository {
    pub fn new(http: HttpApi) -> Self {
        Self {
            http,
            cache: Arc::new(QueryCache::new()),
        }
    }

    pub(crate) fn http(&self) -> &HttpApi {
        &self.http
    }

    pub(crate) fn cache(&self) -> &QueryCache {
        &self.cache
    }
}
