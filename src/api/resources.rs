//! Reference data: platforms, regions and the name-only resources.

use super::segment;
use crate::models::{Data, NamedResource, Paginated, Platform, Region};
use crate::query::{NameOrderBy, PaginationParameters, PlatformOrderBy, QueryItems, SortOrder};
use crate::{Client, Result};

/// `/platforms` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PlatformsApi<'a> {
    client: &'a Client,
}

impl<'a> PlatformsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        sort: SortOrder<PlatformOrderBy>,
        page: PaginationParameters,
    ) -> Result<Paginated<Platform>> {
        let mut items = QueryItems::new();
        items.append(&sort).append(&page);
        let response = self
            .client
            .get_with_query::<Paginated<Platform>>("/platforms", items)
            .await?;
        Ok(response.data)
    }

    pub async fn get(&self, id: &str) -> Result<Platform> {
        let path = format!("/platforms/{}", segment(id));
        Ok(self.client.get::<Data<Platform>>(path).await?.into_inner())
    }
}

/// `/regions` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct RegionsApi<'a> {
    client: &'a Client,
}

impl<'a> RegionsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        sort: SortOrder<NameOrderBy>,
        page: PaginationParameters,
    ) -> Result<Paginated<Region>> {
        let mut items = QueryItems::new();
        items.append(&sort).append(&page);
        let response = self
            .client
            .get_with_query::<Paginated<Region>>("/regions", items)
            .await?;
        Ok(response.data)
    }

    pub async fn get(&self, id: &str) -> Result<Region> {
        let path = format!("/regions/{}", segment(id));
        Ok(self.client.get::<Data<Region>>(path).await?.into_inner())
    }
}

/// Genres, engines, developers, publishers and game types share one shape and
/// one pair of endpoints under different collection names.
#[derive(Debug, Clone, Copy)]
pub struct NamedResourcesApi<'a> {
    client: &'a Client,
    collection: &'static str,
}

impl<'a> NamedResourcesApi<'a> {
    pub(crate) fn new(client: &'a Client, collection: &'static str) -> Self {
        Self { client, collection }
    }

    pub async fn list(
        &self,
        sort: SortOrder<NameOrderBy>,
        page: PaginationParameters,
    ) -> Result<Paginated<NamedResource>> {
        let mut items = QueryItems::new();
        items.append(&sort).append(&page);
        let path = format!("/{}", self.collection);
        let response = self
            .client
            .get_with_query::<Paginated<NamedResource>>(path, items)
            .await?;
        Ok(response.data)
    }

    pub async fn get(&self, id: &str) -> Result<NamedResource> {
        let path = format!("/{}/{}", self.collection, segment(id));
        Ok(self.client.get::<Data<NamedResource>>(path).await?.into_inner())
    }
}
