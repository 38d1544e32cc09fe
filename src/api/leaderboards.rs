use super::segment;
use crate::models::{Data, Leaderboard, LeaderboardEmbed};
use crate::query::{LeaderboardQuery, QueryItems};
use crate::{Client, Result};

/// `/leaderboards` endpoints.
///
/// # Examples
///
/// ```no_run
/// use srcom::query::LeaderboardQuery;
/// use srcom::{Client, Configuration};
///
/// # async fn example() -> Result<(), srcom::Error> {
/// let client = Client::new(Configuration::default())?;
/// let query = LeaderboardQuery {
///     top: Some(10),
///     ..LeaderboardQuery::default()
/// }
/// .variable("e8m7em86", "9qj7z0oq");
///
/// let board = client
///     .leaderboards()
///     .full_game("sm64", "120_Star", &query, &[])
///     .await?;
/// println!("{} runs", board.runs.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LeaderboardsApi<'a> {
    client: &'a Client,
}

impl<'a> LeaderboardsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// The full-game board of `category` in `game` (IDs or abbreviations).
    pub async fn full_game(
        &self,
        game: &str,
        category: &str,
        query: &LeaderboardQuery,
        embeds: &[LeaderboardEmbed],
    ) -> Result<Leaderboard> {
        let path = format!(
            "/leaderboards/{}/category/{}",
            segment(game),
            segment(category)
        );
        self.fetch(path, query, embeds).await
    }

    /// The board of `category` for one `level` of `game`.
    pub async fn level(
        &self,
        game: &str,
        level: &str,
        category: &str,
        query: &LeaderboardQuery,
        embeds: &[LeaderboardEmbed],
    ) -> Result<Leaderboard> {
        let path = format!(
            "/leaderboards/{}/level/{}/{}",
            segment(game),
            segment(level),
            segment(category)
        );
        self.fetch(path, query, embeds).await
    }

    async fn fetch(
        &self,
        path: String,
        query: &LeaderboardQuery,
        embeds: &[LeaderboardEmbed],
    ) -> Result<Leaderboard> {
        let mut items = QueryItems::new();
        items.append(query).embed(embeds);
        let response = self
            .client
            .get_with_query::<Data<Leaderboard>>(path, items)
            .await?;
        Ok(response.into_inner())
    }
}
