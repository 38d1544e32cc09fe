use super::segment;
use crate::models::{Data, Paginated, Run, RunEmbed, RunState, RunSubmit, SubmitPlayer};
use crate::query::{QueryItems, RunQuery};
use crate::{Client, Result};
use serde::de::IgnoredAny;
use serde::Serialize;

/// `/runs` endpoints. Everything except `list` and `get` needs an API key.
#[derive(Debug, Clone, Copy)]
pub struct RunsApi<'a> {
    client: &'a Client,
}

#[derive(Serialize)]
struct SubmitBody<'r> {
    run: &'r RunSubmit,
}

#[derive(Serialize)]
struct StatusBody<'r> {
    status: StatusChange<'r>,
}

#[derive(Serialize)]
struct StatusChange<'r> {
    status: RunState,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'r str>,
}

#[derive(Serialize)]
struct PlayersBody<'r> {
    players: &'r [SubmitPlayer],
}

impl<'a> RunsApi<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &RunQuery, embeds: &[RunEmbed]) -> Result<Paginated<Run>> {
        let mut items = QueryItems::new();
        items.append(query).embed(embeds);
        let response = self
            .client
            .get_with_query::<Paginated<Run>>("/runs", items)
            .await?;
        Ok(response.data)
    }

    pub async fn get(&self, id: &str, embeds: &[RunEmbed]) -> Result<Run> {
        let mut items = QueryItems::new();
        items.embed(embeds);
        let path = format!("/runs/{}", segment(id));
        let response = self.client.get_with_query::<Data<Run>>(path, items).await?;
        Ok(response.into_inner())
    }

    /// Submits a run and returns it as stored.
    pub async fn create(&self, run: &RunSubmit) -> Result<Run> {
        let response = self
            .client
            .post::<_, Data<Run>>("/runs", &SubmitBody { run })
            .await?;
        Ok(response.into_inner())
    }

    /// Deletes a run and returns what was deleted.
    pub async fn delete(&self, id: &str) -> Result<Run> {
        let path = format!("/runs/{}", segment(id));
        Ok(self.client.delete::<Data<Run>>(path).await?.into_inner())
    }

    /// Verifies or rejects a run. `reason` is only meaningful for rejections.
    pub async fn update_status(
        &self,
        id: &str,
        status: RunState,
        reason: Option<&str>,
    ) -> Result<()> {
        let path = format!("/runs/{}/status", segment(id));
        let body = StatusBody {
            status: StatusChange { status, reason },
        };
        self.client.put::<_, IgnoredAny>(path, &body).await?;
        Ok(())
    }

    /// Replaces the run's player list.
    pub async fn update_players(&self, id: &str, players: &[SubmitPlayer]) -> Result<Run> {
        let path = format!("/runs/{}/players", segment(id));
        let response = self
            .client
            .put::<_, Data<Run>>(path, &PlayersBody { players })
            .await?;
        Ok(response.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_body_shape() {
        let body = StatusBody {
            status: StatusChange {
                status: RunState::Rejected,
                reason: Some("No video"),
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"status": {"status": "rejected", "reason": "No video"}})
        );
    }

    #[test]
    fn players_body_shape() {
        let players = [SubmitPlayer::user("zxzno3jq")];
        assert_eq!(
            serde_json::to_value(PlayersBody { players: &players }).unwrap(),
            serde_json::json!({"players": [{"rel": "user", "id": "zxzno3jq"}]})
        );
    }
}
