use super::segment;
use crate::models::{Data, Guest, Notification, Paginated, PersonalBest, PersonalBestEmbed, User};
use crate::query::{
    NotificationOrderBy, PaginationParameters, PersonalBestsQuery, QueryItems, SortOrder,
    UserQuery,
};
use crate::{Client, Error, Result};

/// `/users` and `/guests` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct UsersApi<'a> {
    client: &'a Client,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &UserQuery) -> Result<Paginated<User>> {
        let mut items = QueryItems::new();
        items.append(query);
        let response = self
            .client
            .get_with_query::<Paginated<User>>("/users", items)
            .await?;
        Ok(response.data)
    }

    /// Fetches a user by ID or name.
    pub async fn get(&self, id: &str) -> Result<User> {
        let path = format!("/users/{}", segment(id));
        Ok(self.client.get::<Data<User>>(path).await?.into_inner())
    }

    pub async fn personal_bests(
        &self,
        id: &str,
        query: &PersonalBestsQuery,
        embeds: &[PersonalBestEmbed],
    ) -> Result<Vec<PersonalBest>> {
        let mut items = QueryItems::new();
        items.append(query).embed(embeds);
        let path = format!("/users/{}/personal-bests", segment(id));
        let response = self
            .client
            .get_with_query::<Data<Vec<PersonalBest>>>(path, items)
            .await?;
        Ok(response.into_inner())
    }

    /// Looks up a guest runner by name (case-insensitive).
    pub async fn guest(&self, name: &str) -> Result<Guest> {
        let path = format!("/guests/{}", segment(name));
        Ok(self.client.get::<Data<Guest>>(path).await?.into_inner())
    }
}

/// Endpoints for the account behind the configured API key.
///
/// Without a key these fail with [`Error::AuthenticationRequired`] before
/// anything is sent.
#[derive(Debug, Clone, Copy)]
pub struct ProfileApi<'a> {
    client: &'a Client,
}

impl<'a> ProfileApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn require_key(&self) -> Result<()> {
        match self.client.configuration().api_key() {
            Some(_) => Ok(()),
            None => Err(Error::AuthenticationRequired),
        }
    }

    pub async fn get(&self) -> Result<User> {
        self.require_key()?;
        Ok(self.client.get::<Data<User>>("/profile").await?.into_inner())
    }

    pub async fn notifications(
        &self,
        sort: SortOrder<NotificationOrderBy>,
        page: PaginationParameters,
    ) -> Result<Paginated<Notification>> {
        self.require_key()?;
        let mut items = QueryItems::new();
        items.append(&sort).append(&page);
        let response = self
            .client
            .get_with_query::<Paginated<Notification>>("/notifications", items)
            .await?;
        Ok(response.data)
    }
}
