use crate::state::persist::PersistedSnapshot;
use crate::state::store::PlaygroundStore;
use crate::utils::{AppError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationStatus {
    NotStarted,
    Pending,
    Hydrated,
}

/// Where the selected endpoint came from once hydration finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointOrigin {
    Default,
    Persisted,
    Server,
}

impl std::fmt::Display for EndpointOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointOrigin::Default => write!(f, "built-in default"),
            EndpointOrigin::Persisted => write!(f, "persisted selection"),
            EndpointOrigin::Server => write!(f, "server default"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DefaultEndpointResponse {
    #[serde(default)]
    endpoint: Option<String>,
}

/// Client for the app's `/api/default-endpoint` route.
pub struct DefaultEndpointSource {
    app_url: String,
    client: reqwest::Client,
}

impl DefaultEndpointSource {
    pub fn new(app_url: String) -> Self {
        Self {
            app_url,
            client: reqwest::Client::new(),
        }
    }

    /// `Ok(None)` when the server has no opinion: a missing, null or empty
    /// `endpoint` field. The body is read whatever the status; only transport
    /// errors and non-JSON bodies fail.
    pub async fn fetch(&self) -> Result<Option<String>> {
        let url = format!("{}/api/default-endpoint", self.app_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(AppError::Network)?;

        if !response.status().is_success() {
            log::debug!("Default endpoint answered {}", response.status());
        }

        let body = response.text().await.map_err(AppError::Network)?;
        let data: Option<DefaultEndpointResponse> = serde_json::from_str(&body)?;

        Ok(data
            .and_then(|d| d.endpoint)
            .filter(|endpoint| !endpoint.is_empty()))
    }
}

impl PlaygroundStore {
    pub fn hydration_status(&self) -> HydrationStatus {
        *self.hydration.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Restores the persisted endpoint, then lets the server default override
    /// it. `hydrated` is set whether or not the request succeeds.
    ///
    /// Runs once per store; later calls return `None` without touching state.
    pub async fn rehydrate(&self, source: &DefaultEndpointSource) -> Option<EndpointOrigin> {
        {
            let mut status = self.hydration.lock().unwrap_or_else(|e| e.into_inner());
            if *status != HydrationStatus::NotStarted {
                log::debug!("Rehydration skipped, status is {:?}", *status);
                return None;
            }
            *status = HydrationStatus::Pending;
        }

        let mut origin = self.restore_persisted();

        match source.fetch().await {
            Ok(Some(endpoint)) => {
                log::info!("Server default endpoint overrides selection: {}", endpoint);
                self.set_selected_endpoint(endpoint);
                origin = EndpointOrigin::Server;
            }
            Ok(None) => {
                log::debug!("Server returned no default endpoint");
            }
            Err(e) => {
                log::error!("Failed to override selected endpoint: {}", e);
            }
        }

        self.set_hydrated();
        *self.hydration.lock().unwrap_or_else(|e| e.into_inner()) = HydrationStatus::Hydrated;

        Some(origin)
    }

    fn restore_persisted(&self) -> EndpointOrigin {
        match PersistedSnapshot::load(self.storage()) {
            Ok(Some(snapshot)) => {
                log::debug!("Restored persisted endpoint {}", snapshot.selected_endpoint);
                self.update(|s| s.selected_endpoint = snapshot.selected_endpoint);
                EndpointOrigin::Persisted
            }
            Ok(None) => EndpointOrigin::Default,
            Err(e) => {
                log::warn!("Ignoring unreadable persisted state: {}", e);
                EndpointOrigin::Default
            }
        }
    }
}
