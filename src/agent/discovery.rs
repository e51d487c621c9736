use crate::agent::client::PlaygroundClient;
use crate::state::store::PlaygroundStore;
use crate::state::types::{EntityDescriptor, EntityType};
use crate::utils::{AppError, Result};

/// Fills the store's catalogs from the selected playground endpoint.
pub struct EntityDiscovery {
    client: PlaygroundClient,
}

impl EntityDiscovery {
    pub fn new(base_url: String) -> Self {
        Self {
            client: PlaygroundClient::new(base_url),
        }
    }

    pub fn for_store(store: &PlaygroundStore) -> Self {
        Self::new(store.selected_endpoint())
    }

    /// Loads agents and teams. On failure the catalogs are cleared and the
    /// endpoint is marked inactive; the loading flag is cleared either way.
    pub async fn refresh(&self, store: &PlaygroundStore) -> Result<()> {
        store.set_is_endpoint_loading(true);

        let outcome = match self.load_catalog().await {
            Ok((agents, teams)) => {
                log::info!(
                    "Loaded {} agents and {} teams from {}",
                    agents.len(),
                    teams.len(),
                    self.client.base_url()
                );
                store.set_agents(agents);
                store.set_teams(teams);
                store.set_is_endpoint_active(true);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load catalog from {}: {}", self.client.base_url(), e);
                store.set_agents(Vec::new());
                store.set_teams(Vec::new());
                store.set_is_endpoint_active(false);
                Err(e)
            }
        };

        store.set_is_endpoint_loading(false);
        outcome
    }

    async fn load_catalog(&self) -> Result<(Vec<EntityDescriptor>, Vec<EntityDescriptor>)> {
        if !self.client.status().await? {
            return Err(AppError::EndpointInactive(
                self.client.base_url().to_string(),
            ));
        }

        let agents = self.client.list_agents().await?;

        // Endpoints without team support answer the teams route with an error.
        let teams = match self.client.list_teams().await {
            Ok(teams) => teams,
            Err(e) => {
                log::warn!("Teams unavailable, continuing with agents only: {}", e);
                Vec::new()
            }
        };

        Ok((agents, teams))
    }

    /// Replaces `sessions_data` with the entity's sessions. A failed fetch
    /// leaves an empty, loaded list behind.
    pub async fn load_sessions(
        &self,
        store: &PlaygroundStore,
        kind: EntityType,
        id: &str,
    ) -> Result<()> {
        store.set_is_sessions_loading(true);

        let outcome = match self.client.list_sessions(kind, id).await {
            Ok(sessions) => {
                log::debug!("Loaded {} sessions for {} {}", sessions.len(), kind, id);
                store.set_sessions_data(Some(sessions));
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load sessions for {} {}: {}", kind, id, e);
                store.set_sessions_data(Some(Vec::new()));
                Err(e)
            }
        };

        store.set_is_sessions_loading(false);
        outcome
    }
}

/// Points the selection at `entity`, keeping entity type, team id, model and
/// storage flag consistent with each other.
pub fn select_entity(store: &PlaygroundStore, entity: &EntityDescriptor) {
    store.set_selected_entity_type(Some(entity.kind));
    store.set_selected_team_id(match entity.kind {
        EntityType::Team => Some(entity.value.clone()),
        EntityType::Agent => None,
    });
    store.set_selected_model(entity.model.provider.clone());
    store.set_has_storage(entity.storage.unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::persist::MemoryStorage;
    use crate::state::types::ModelInfo;
    use mockito::{Mock, Server};
    use std::sync::Arc;

    fn store() -> PlaygroundStore {
        PlaygroundStore::new(Arc::new(MemoryStorage::new()))
    }

    async fn route(server: &mut Server, path: &str, status: usize, body: &str) -> Mock {
        server
            .mock("GET", path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn refresh_fills_catalogs_and_flags() {
        let mut server = Server::new_async().await;
        let _status = route(&mut server, "/v1/playground/status", 200, "{}").await;
        let _agents = route(
            &mut server,
            "/v1/playground/agents",
            200,
            r#"[{"agent_id":"a1","name":"One","model":{"provider":"OpenAI"}}]"#,
        )
        .await;
        let _teams = route(
            &mut server,
            "/v1/playground/teams",
            200,
            r#"[{"team_id":"t1","name":"Crew","model":{"provider":"Anthropic"}}]"#,
        )
        .await;

        let store = store();
        store.set_selected_endpoint(server.url());
        EntityDiscovery::for_store(&store).refresh(&store).await.unwrap();

        let s = store.snapshot();
        assert!(s.is_endpoint_active);
        assert!(!s.is_endpoint_loading);
        assert_eq!(s.agents.len(), 1);
        assert_eq!(s.agents[0].value, "a1");
        assert_eq!(s.teams.len(), 1);
        assert_eq!(s.teams[0].kind, EntityType::Team);
    }

    #[tokio::test]
    async fn missing_teams_route_leaves_agents_usable() {
        let mut server = Server::new_async().await;
        let _status = route(&mut server, "/v1/playground/status", 200, "{}").await;
        let _agents = route(
            &mut server,
            "/v1/playground/agents",
            200,
            r#"[{"agent_id":"a1"}]"#,
        )
        .await;
        let _teams = route(&mut server, "/v1/playground/teams", 404, "").await;

        let store = store();
        EntityDiscovery::new(server.url()).refresh(&store).await.unwrap();

        let s = store.snapshot();
        assert!(s.is_endpoint_active);
        assert_eq!(s.agents.len(), 1);
        assert!(s.teams.is_empty());
    }

    #[tokio::test]
    async fn inactive_endpoint_clears_catalogs() {
        let mut server = Server::new_async().await;
        let _status = route(&mut server, "/v1/playground/status", 503, "").await;

        let store = store();
        store.set_is_endpoint_active(true);
        store.set_agents(vec![EntityDescriptor {
            kind: EntityType::Agent,
            value: "stale".to_string(),
            label: "Stale".to_string(),
            model: ModelInfo::default(),
            storage: None,
        }]);

        let result = EntityDiscovery::new(server.url()).refresh(&store).await;

        assert!(matches!(result, Err(AppError::EndpointInactive(_))));
        let s = store.snapshot();
        assert!(!s.is_endpoint_active);
        assert!(!s.is_endpoint_loading);
        assert!(s.agents.is_empty());
    }

    #[tokio::test]
    async fn load_sessions_replaces_data_and_clears_flag() {
        let mut server = Server::new_async().await;
        let _sessions = route(
            &mut server,
            "/v1/playground/agents/a1/sessions",
            200,
            r#"[{"session_id":"s1","title":"Hello","created_at":1}]"#,
        )
        .await;

        let store = store();
        EntityDiscovery::new(server.url())
            .load_sessions(&store, EntityType::Agent, "a1")
            .await
            .unwrap();

        let s = store.snapshot();
        assert!(!s.is_sessions_loading);
        let sessions = s.sessions_data.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].title, "Hello");
    }

    #[tokio::test]
    async fn failed_session_load_marks_list_loaded_and_empty() {
        let mut server = Server::new_async().await;
        let _sessions = route(&mut server, "/v1/playground/agents/a1/sessions", 500, "").await;

        let store = store();
        let result = EntityDiscovery::new(server.url())
            .load_sessions(&store, EntityType::Agent, "a1")
            .await;

        assert!(result.is_err());
        let s = store.snapshot();
        assert!(!s.is_sessions_loading);
        assert_eq!(s.sessions_data, Some(Vec::new()));
    }

    #[test]
    fn selecting_a_team_sets_correlated_fields() {
        let store = store();
        let team = EntityDescriptor {
            kind: EntityType::Team,
            value: "crew".to_string(),
            label: "Crew".to_string(),
            model: ModelInfo {
                provider: "Anthropic".to_string(),
            },
            storage: Some(true),
        };
        select_entity(&store, &team);

        let s = store.snapshot();
        assert_eq!(s.selected_entity_type, Some(EntityType::Team));
        assert_eq!(s.selected_team_id.as_deref(), Some("crew"));
        assert_eq!(s.selected_model, "Anthropic");
        assert!(s.has_storage);

        let agent = EntityDescriptor {
            kind: EntityType::Agent,
            value: "a1".to_string(),
            label: "One".to_string(),
            model: ModelInfo {
                provider: "OpenAI".to_string(),
            },
            storage: None,
        };
        select_entity(&store, &agent);

        let s = store.snapshot();
        assert_eq!(s.selected_entity_type, Some(EntityType::Agent));
        assert_eq!(s.selected_team_id, None);
        assert_eq!(s.selected_model, "OpenAI");
        assert!(!s.has_storage);
    }
}
