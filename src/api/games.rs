use super::segment;
use crate::models::{
    Category, Data, Game, GameBulk, GameEmbed, Leaderboard, Level, Paginated, Variable,
};
use crate::query::{
    CategoryOrderBy, GameQuery, LevelOrderBy, PaginationParameters, QueryItems, RecordsQuery,
    SortOrder, VariableOrderBy,
};
use crate::{Client, Result};

/// `/games` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct GamesApi<'a> {
    client: &'a Client,
}

impl<'a> GamesApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Searches games. `query.bulk` is ignored here; use [`list_bulk`](Self::list_bulk).
    pub async fn list(&self, query: &GameQuery, embeds: &[GameEmbed]) -> Result<Paginated<Game>> {
        let mut items = QueryItems::new();
        items
            .append(&GameQuery {
                bulk: false,
                ..query.clone()
            })
            .embed(embeds);
        Ok(self.client.get_with_query::<Paginated<Game>>("/games", items).await?.data)
    }

    /// Searches games in bulk mode: larger pages of the reduced game shape.
    /// Embeds are not available in this mode.
    pub async fn list_bulk(&self, query: &GameQuery) -> Result<Paginated<GameBulk>> {
        let mut items = QueryItems::new();
        items.append(&GameQuery {
            bulk: true,
            ..query.clone()
        });
        Ok(self.client.get_with_query::<Paginated<GameBulk>>("/games", items).await?.data)
    }

    /// Fetches one game by ID or abbreviation.
    pub async fn get(&self, id: &str, embeds: &[GameEmbed]) -> Result<Game> {
        let mut items = QueryItems::new();
        items.embed(embeds);
        let path = format!("/games/{}", segment(id));
        let response = self.client.get_with_query::<Data<Game>>(path, items).await?;
        Ok(response.into_inner())
    }

    pub async fn categories(
        &self,
        id: &str,
        miscellaneous: Option<bool>,
        sort: SortOrder<CategoryOrderBy>,
    ) -> Result<Vec<Category>> {
        let mut items = QueryItems::new();
        items.push_opt("miscellaneous", miscellaneous).append(&sort);
        let path = format!("/games/{}/categories", segment(id));
        let response = self
            .client
            .get_with_query::<Data<Vec<Category>>>(path, items)
            .await?;
        Ok(response.into_inner())
    }

    pub async fn levels(&self, id: &str, sort: SortOrder<LevelOrderBy>) -> Result<Vec<Level>> {
        let mut items = QueryItems::new();
        items.append(&sort);
        let path = format!("/games/{}/levels", segment(id));
        let response = self
            .client
            .get_with_query::<Data<Vec<Level>>>(path, items)
            .await?;
        Ok(response.into_inner())
    }

    pub async fn variables(
        &self,
        id: &str,
        sort: SortOrder<VariableOrderBy>,
    ) -> Result<Vec<Variable>> {
        let mut items = QueryItems::new();
        items.append(&sort);
        let path = format!("/games/{}/variables", segment(id));
        let response = self
            .client
            .get_with_query::<Data<Vec<Variable>>>(path, items)
            .await?;
        Ok(response.into_inner())
    }

    /// Romhacks and other games derived from this one.
    pub async fn derived_games(
        &self,
        id: &str,
        page: PaginationParameters,
    ) -> Result<Paginated<Game>> {
        let mut items = QueryItems::new();
        items.append(&page);
        let path = format!("/games/{}/derived-games", segment(id));
        Ok(self.client.get_with_query::<Paginated<Game>>(path, items).await?.data)
    }

    /// Top runs of every board of the game.
    pub async fn records(
        &self,
        id: &str,
        options: &RecordsQuery,
    ) -> Result<Paginated<Leaderboard>> {
        let mut items = QueryItems::new();
        items.append(options);
        let path = format!("/games/{}/records", segment(id));
        Ok(self.client.get_with_query::<Paginated<Leaderboard>>(path, items).await?.data)
    }
}
