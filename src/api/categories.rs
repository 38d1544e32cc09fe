use super::segment;
use crate::models::{
    Category, CategoryEmbed, Data, Leaderboard, Level, LevelEmbed, Paginated, Variable,
};
use crate::query::{CategoryOrderBy, QueryItems, RecordsQuery, SortOrder, VariableOrderBy};
use crate::{Client, Result};

/// `/categories` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct CategoriesApi<'a> {
    client: &'a Client,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str, embeds: &[CategoryEmbed]) -> Result<Category> {
        let mut items = QueryItems::new();
        items.embed(embeds);
        let path = format!("/categories/{}", segment(id));
        let response = self
            .client
            .get_with_query::<Data<Category>>(path, items)
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
        let path = format!("/categories/{}/variables", segment(id));
        let response = self
            .client
            .get_with_query::<Data<Vec<Variable>>>(path, items)
            .await?;
        Ok(response.into_inner())
    }

    /// Top runs of the category, one board per level for per-level categories.
    pub async fn records(
        &self,
        id: &str,
        options: &RecordsQuery,
    ) -> Result<Paginated<Leaderboard>> {
        let mut items = QueryItems::new();
        items.append(options);
        let path = format!("/categories/{}/records", segment(id));
        Ok(self.client.get_with_query::<Paginated<Leaderboard>>(path, items).await?.data)
    }
}

/// `/levels` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct LevelsApi<'a> {
    client: &'a Client,
}

impl<'a> LevelsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str, embeds: &[LevelEmbed]) -> Result<Level> {
        let mut items = QueryItems::new();
        items.embed(embeds);
        let path = format!("/levels/{}", segment(id));
        let response = self.client.get_with_query::<Data<Level>>(path, items).await?;
        Ok(response.into_inner())
    }

    /// Per-level categories usable with this level.
    pub async fn categories(
        &self,
        id: &str,
        miscellaneous: Option<bool>,
        sort: SortOrder<CategoryOrderBy>,
    ) -> Result<Vec<Category>> {
        let mut items = QueryItems::new();
        items.push_opt("miscellaneous", miscellaneous).append(&sort);
        let path = format!("/levels/{}/categories", segment(id));
        let response = self
            .client
            .get_with_query::<Data<Vec<Category>>>(path, items)
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
        let path = format!("/levels/{}/variables", segment(id));
        let response = self
            .client
            .get_with_query::<Data<Vec<Variable>>>(path, items)
            .await?;
        Ok(response.into_inner())
    }

    pub async fn records(
        &self,
        id: &str,
        options: &RecordsQuery,
    ) -> Result<Paginated<Leaderboard>> {
        let mut items = QueryItems::new();
        items.append(options);
        let path = format!("/levels/{}/records", segment(id));
        Ok(self.client.get_with_query::<Paginated<Leaderboard>>(path, items).await?.data)
    }
}

/// `/variables` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct VariablesApi<'a> {
    client: &'a Client,
}

impl<'a> VariablesApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<Variable> {
        let path = format!("/variables/{}", segment(id));
        Ok(self.client.get::<Data<Variable>>(path).await?.into_inner())
    }
}
