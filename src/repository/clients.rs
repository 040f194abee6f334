use crate::cache::QueryKey;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, ClientListQuery, ClientReader, ClientWriter, Page};

impl ClientReader for ApiRepository {
    async fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Page<Client>> {
        let pagination = query.pagination;
        let key = QueryKey::clients(pagination.page, pagination.per_page);

        if let Some(page) = self.cache().get::<Page<Client>>(&key) {
            return Ok(page);
        }

        let token = self.cache().begin(&key);
        let page: Page<Client> = self
            .http()
            .get(
                "clients",
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

impl ClientWriter for ApiRepository {
    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let client = self.http().post("clients", new_client).await?;
        self.cache().invalidate_prefix(&QueryKey::clients_prefix());
        Ok(client)
    }

    async fn update_client(
        &self,
        client_id: i32,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        let client = self
            .http()
            .put(&format!("clients/{client_id}"), updates)
            .await?;
        self.cache().invalidate_prefix(&QueryKey::clients_prefix());
        Ok(client)
    }

    async fn delete_client(&self, client_id: i32) -> RepositoryResult<()> {
        self.http().delete(&format!("clients/{client_id}")).await?;
        self.cache().invalidate_prefix(&QueryKey::clients_prefix());
        Ok(())
    }
}
