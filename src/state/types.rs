use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:7777";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub endpoint: String,
    pub id_playground_endpoint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Agent,
    Team,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityType::Agent => write!(f, "agent"),
            EntityType::Team => write!(f, "team"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub provider: String,
}

/// An agent or a team as listed by a playground endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub kind: EntityType,
    pub value: String,
    pub label: String,
    pub model: ModelInfo,
    /// Whether the entity keeps persistent session history.
    pub storage: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaygroundChatMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default)]
    pub streaming_error: bool,
    pub created_at: i64,
}

impl PlaygroundChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>, created_at: i64) -> Self {
        Self {
            role,
            content: content.into(),
            streaming_error: false,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub session_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: i64,
}

/// Everything the playground UI observes. Only `selected_endpoint` outlives a
/// reload.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaygroundState {
    pub hydrated: bool,
    pub streaming_error_message: String,
    pub is_streaming: bool,
    pub is_endpoint_active: bool,
    pub is_endpoint_loading: bool,
    pub has_storage: bool,
    pub is_sessions_loading: bool,

    pub endpoints: Vec<EndpointDescriptor>,
    pub messages: Vec<PlaygroundChatMessage>,
    pub agents: Vec<EntityDescriptor>,
    pub teams: Vec<EntityDescriptor>,
    /// `None` until sessions have been loaded once.
    pub sessions_data: Option<Vec<SessionEntry>>,

    pub selected_endpoint: String,
    pub selected_model: String,
    pub selected_team_id: Option<String>,
    pub selected_entity_type: Option<EntityType>,
}

impl Default for PlaygroundState {
    fn default() -> Self {
        Self {
            hydrated: false,
            streaming_error_message: String::new(),
            is_streaming: false,
            is_endpoint_active: false,
            is_endpoint_loading: true,
            has_storage: false,
            is_sessions_loading: false,
            endpoints: Vec::new(),
            messages: Vec::new(),
            agents: Vec::new(),
            teams: Vec::new(),
            sessions_data: None,
            selected_endpoint: DEFAULT_ENDPOINT.to_string(),
            selected_model: String::new(),
            selected_team_id: None,
            selected_entity_type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EntityType::Agent).unwrap(), "\"agent\"");
        let kind: EntityType = serde_json::from_str("\"team\"").unwrap();
        assert_eq!(kind, EntityType::Team);
        assert_eq!(EntityType::Team.to_string(), "team");
    }

    #[test]
    fn default_state_matches_initial_values() {
        let state = PlaygroundState::default();
        assert!(!state.hydrated);
        assert!(state.is_endpoint_loading);
        assert!(!state.is_endpoint_active);
        assert_eq!(state.selected_endpoint, "http://localhost:7777");
        assert_eq!(state.selected_model, "");
        assert!(state.sessions_data.is_none());
        assert!(state.selected_entity_type.is_none());
    }

    #[test]
    fn session_entry_tolerates_missing_optional_fields() {
        let entry: SessionEntry = serde_json::from_str(r#"{"session_id":"s-1"}"#).unwrap();
        assert_eq!(entry.session_id, "s-1");
        assert_eq!(entry.title, "");
        assert_eq!(entry.created_at, 0);
    }
}
