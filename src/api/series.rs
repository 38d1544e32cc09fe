use super::segment;
use crate::models::{Data, Game, GameEmbed, Paginated, Series, SeriesEmbed};
use crate::query::{PaginationParameters, QueryItems, SeriesQuery};
use crate::{Client, Result};

/// `/series` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SeriesApi<'a> {
    client: &'a Client,
}

impl<'a> SeriesApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        query: &SeriesQuery,
        embeds: &[SeriesEmbed],
    ) -> Result<Paginated<Series>> {
        let mut items = QueryItems::new();
        items.append(query).embed(embeds);
        let response = self
            .client
            .get_with_query::<Paginated<Series>>("/series", items)
            .await?;
        Ok(response.data)
    }

    pub async fn get(&self, id: &str, embeds: &[SeriesEmbed]) -> Result<Series> {
        let mut items = QueryItems::new();
        items.embed(embeds);
        let path = format!("/series/{}", segment(id));
        let response = self.client.get_with_query::<Data<Series>>(path, items).await?;
        Ok(response.into_inner())
    }

    /// Games belonging to the series.
    pub async fn games(
        &self,
        id: &str,
        page: PaginationParameters,
        embeds: &[GameEmbed],
    ) -> Result<Paginated<Game>> {
        let mut items = QueryItems::new();
        items.append(&page).embed(embeds);
        let path = format!("/series/{}/games", segment(id));
        let response = self
            .client
            .get_with_query::<Paginated<Game>>(path, items)
            .await?;
        Ok(response.data)
    }
}
