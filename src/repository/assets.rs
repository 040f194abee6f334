use crate::cache::QueryKey;
use crate::domain::asset::Asset;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ApiRepository, AssetReader};

impl AssetReader for ApiRepository {
    /// The catalog is unpaginated and read-only, so its cache entry is
    /// never invalidated.
    async fn list_assets(&self) -> RepositoryResult<Vec<Asset>> {
        let key = QueryKey::assets();

        if let Some(assets) = self.cache().get::<Vec<Asset>>(&key) {
            return Ok(assets);
        }

        let token = self.cache().begin(&key);
        let assets: Vec<Asset> = self.http().get("assets", &[]).await?;
        self.cache().complete(&key, token, &assets);

        Ok(assets)
    }
}
