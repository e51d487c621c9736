use crate::state::hydration::HydrationStatus;
use crate::state::persist::{PersistedSnapshot, StateStorage};
use crate::state::types::{
    EndpointDescriptor, EntityDescriptor, EntityType, PlaygroundChatMessage, PlaygroundState,
    SessionEntry,
};
use crate::state::update::Update;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Shared slot for the chat text input's draft. Not part of the observable
/// state and never persisted.
#[derive(Debug, Clone, Default)]
pub struct ChatInputRef {
    current: Arc<Mutex<Option<String>>>,
}

impl ChatInputRef {
    pub fn current(&self) -> Option<String> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set(&self, value: Option<String>) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = value;
    }

    pub fn take(&self) -> Option<String> {
        self.current.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

/// Observable playground state.
///
/// Every setter commits one transaction against the owned state and then
/// notifies subscribers. Derived updates run while the state is locked, so
/// they must not call back into the store.
pub struct PlaygroundStore {
    state: watch::Sender<PlaygroundState>,
    storage: Arc<dyn StateStorage>,
    pub(crate) hydration: Mutex<HydrationStatus>,
    chat_input: ChatInputRef,
}

pub type SharedStore = Arc<PlaygroundStore>;

impl PlaygroundStore {
    pub fn new(storage: Arc<dyn StateStorage>) -> Self {
        let (state, _) = watch::channel(PlaygroundState::default());
        Self {
            state,
            storage,
            hydration: Mutex::new(HydrationStatus::NotStarted),
            chat_input: ChatInputRef::default(),
        }
    }

    pub fn snapshot(&self) -> PlaygroundState {
        self.state.borrow().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&PlaygroundState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaygroundState> {
        self.state.subscribe()
    }

    pub fn hydrated(&self) -> bool {
        self.state.borrow().hydrated
    }

    pub fn selected_endpoint(&self) -> String {
        self.state.borrow().selected_endpoint.clone()
    }

    pub fn chat_input(&self) -> &ChatInputRef {
        &self.chat_input
    }

    pub(crate) fn storage(&self) -> &dyn StateStorage {
        self.storage.as_ref()
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut PlaygroundState)) {
        self.state.send_modify(f);
    }

    pub fn set_hydrated(&self) {
        self.update(|s| s.hydrated = true);
    }

    pub fn set_streaming_error_message(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|s| s.streaming_error_message = message);
    }

    pub fn set_is_streaming(&self, is_streaming: bool) {
        self.update(|s| s.is_streaming = is_streaming);
    }

    pub fn set_is_endpoint_active(&self, is_active: bool) {
        self.update(|s| s.is_endpoint_active = is_active);
    }

    pub fn set_is_endpoint_loading(&self, is_loading: bool) {
        self.update(|s| s.is_endpoint_loading = is_loading);
    }

    pub fn set_has_storage(&self, has_storage: bool) {
        self.update(|s| s.has_storage = has_storage);
    }

    pub fn set_is_sessions_loading(&self, is_loading: bool) {
        self.update(|s| s.is_sessions_loading = is_loading);
    }

    pub fn set_endpoints(&self, endpoints: Vec<EndpointDescriptor>) {
        self.update(|s| s.endpoints = endpoints);
    }

    pub fn set_agents(&self, agents: Vec<EntityDescriptor>) {
        self.update(|s| s.agents = agents);
    }

    pub fn set_teams(&self, teams: Vec<EntityDescriptor>) {
        self.update(|s| s.teams = teams);
    }

    pub fn set_messages(&self, update: impl Into<Update<Vec<PlaygroundChatMessage>>>) {
        let update = update.into();
        self.update(|s| {
            let previous = std::mem::take(&mut s.messages);
            s.messages = update.apply(previous);
        });
    }

    pub fn set_sessions_data(&self, update: impl Into<Update<Option<Vec<SessionEntry>>>>) {
        let update = update.into();
        self.update(|s| {
            let previous = s.sessions_data.take();
            s.sessions_data = update.apply(previous);
        });
    }

    /// Also writes the persisted snapshot. A failed write is logged and the
    /// in-memory value is kept.
    pub fn set_selected_endpoint(&self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        let snapshot = PersistedSnapshot {
            selected_endpoint: endpoint.clone(),
        };
        self.update(|s| s.selected_endpoint = endpoint);

        if let Err(e) = snapshot.save(self.storage()) {
            log::warn!("Failed to persist selected endpoint: {}", e);
        }
    }

    pub fn set_selected_model(&self, model: impl Into<String>) {
        let model = model.into();
        self.update(|s| s.selected_model = model);
    }

    pub fn set_selected_team_id(&self, team_id: Option<String>) {
        self.update(|s| s.selected_team_id = team_id);
    }

    pub fn set_selected_entity_type(&self, kind: Option<EntityType>) {
        self.update(|s| s.selected_entity_type = kind);
    }
}
