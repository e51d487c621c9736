use crate::state::types::{EntityDescriptor, EntityType, ModelInfo, SessionEntry};
use crate::utils::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WireModel {
    #[serde(default)]
    provider: String,
}

#[derive(Debug, Deserialize)]
struct WireAgent {
    agent_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    model: Option<WireModel>,
    #[serde(default)]
    storage: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct WireTeam {
    team_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    model: Option<WireModel>,
    #[serde(default)]
    storage: Option<bool>,
}

fn descriptor(
    kind: EntityType,
    id: String,
    name: Option<String>,
    model: Option<WireModel>,
    storage: Option<bool>,
) -> EntityDescriptor {
    EntityDescriptor {
        kind,
        label: name.filter(|n| !n.is_empty()).unwrap_or_else(|| id.clone()),
        value: id,
        model: ModelInfo {
            provider: model.map(|m| m.provider).unwrap_or_default(),
        },
        storage,
    }
}

impl From<WireAgent> for EntityDescriptor {
    fn from(a: WireAgent) -> Self {
        descriptor(EntityType::Agent, a.agent_id, a.name, a.model, a.storage)
    }
}

impl From<WireTeam> for EntityDescriptor {
    fn from(t: WireTeam) -> Self {
        descriptor(EntityType::Team, t.team_id, t.name, t.model, t.storage)
    }
}

/// Client for a playground endpoint's `/v1/playground` API.
pub struct PlaygroundClient {
    base_url: String,
    client: reqwest::Client,
}

impl PlaygroundClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let url = format!("{}/v1/playground{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(AppError::Network)?;

        if !response.status().is_success() {
            return Err(AppError::Api(format!(
                "Failed to list {}: {}",
                what,
                response.status()
            )));
        }

        response.json().await.map_err(AppError::Network)
    }

    /// `Ok(false)` when the endpoint answers with a non-success status.
    pub async fn status(&self) -> Result<bool> {
        let url = format!("{}/v1/playground/status", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(AppError::Network)?;

        Ok(response.status().is_success())
    }

    pub async fn list_agents(&self) -> Result<Vec<EntityDescriptor>> {
        let agents: Vec<WireAgent> = self.get_json("/agents", "agents").await?;
        Ok(agents.into_iter().map(EntityDescriptor::from).collect())
    }

    pub async fn list_teams(&self) -> Result<Vec<EntityDescriptor>> {
        let teams: Vec<WireTeam> = self.get_json("/teams", "teams").await?;
        Ok(teams.into_iter().map(EntityDescriptor::from).collect())
    }

    pub async fn list_sessions(&self, kind: EntityType, id: &str) -> Result<Vec<SessionEntry>> {
        let path = match kind {
            EntityType::Agent => format!("/agents/{}/sessions", id),
            EntityType::Team => format!("/teams/{}/sessions", id),
        };
        self.get_json(&path, "sessions").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn agents_map_onto_descriptors() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/playground/agents")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"agent_id":"researcher","name":"Researcher","model":{"provider":"OpenAI","name":"gpt-4o"},"storage":true},
                    {"agent_id":"bare"}
                ]"#,
            )
            .create_async()
            .await;

        let client = PlaygroundClient::new(format!("{}/", server.url()));
        let agents = client.list_agents().await.unwrap();

        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].kind, EntityType::Agent);
        assert_eq!(agents[0].value, "researcher");
        assert_eq!(agents[0].label, "Researcher");
        assert_eq!(agents[0].model.provider, "OpenAI");
        assert_eq!(agents[0].storage, Some(true));
        assert_eq!(agents[1].label, "bare");
        assert_eq!(agents[1].model.provider, "");
        assert_eq!(agents[1].storage, None);
    }

    #[tokio::test]
    async fn teams_map_onto_team_kind() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/playground/teams")
            .with_status(200)
            .with_body(r#"[{"team_id":"crew","name":"Crew","model":{"provider":"Anthropic"},"storage":false}]"#)
            .create_async()
            .await;

        let teams = PlaygroundClient::new(server.url()).list_teams().await.unwrap();

        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].kind, EntityType::Team);
        assert_eq!(teams[0].value, "crew");
        assert_eq!(teams[0].storage, Some(false));
    }

    #[tokio::test]
    async fn sessions_path_depends_on_kind() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/playground/teams/crew/sessions")
            .with_status(200)
            .with_body(r#"[{"session_id":"s-1","title":"First","created_at":1700000000}]"#)
            .create_async()
            .await;

        let sessions = PlaygroundClient::new(server.url())
            .list_sessions(EntityType::Team, "crew")
            .await
            .unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].session_id, "s-1");
        assert_eq!(sessions[0].title, "First");
    }

    #[tokio::test]
    async fn error_status_becomes_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/playground/agents")
            .with_status(502)
            .create_async()
            .await;

        let err = PlaygroundClient::new(server.url())
            .list_agents()
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Api(_)));
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn status_reflects_response_code() {
        let mut server = Server::new_async().await;
        let _ok = server
            .mock("GET", "/v1/playground/status")
            .with_status(200)
            .create_async()
            .await;
        assert!(PlaygroundClient::new(server.url()).status().await.unwrap());

        let mut down = Server::new_async().await;
        let _err = down
            .mock("GET", "/v1/playground/status")
            .with_status(503)
            .create_async()
            .await;
        assert!(!PlaygroundClient::new(down.url()).status().await.unwrap());
    }
}
