mod cli;

use anyhow::Result;
use clap::Parser;
use playground_cli::config::{Config, ConfigManager};
use playground_cli::state::{
    DefaultEndpointSource, EndpointOrigin, EntityType, FileStorage, MemoryStorage,
    PlaygroundStore, SharedStore, StateStorage,
};
use playground_cli::utils::logging::init_logging;
use std::sync::Arc;

use crate::cli::{Cli, Commands, EndpointAction};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = if let Some(config_path) = cli.config_path {
        ConfigManager::with_path(config_path)
    } else {
        ConfigManager::new()?
    };

    let mut config = config_manager.load()?;
    if let Some(app_url) = cli.app_url {
        config.app_url = app_url;
    }

    let base_dir = config_manager.base_dir();
    init_logging(&config.log_level, &base_dir.join("playground-cli.log"))?;

    let storage: Arc<dyn StateStorage> = if cli.no_persist {
        Arc::new(MemoryStorage::new())
    } else {
        Arc::new(FileStorage::new(config.storage_dir.clone().unwrap_or(base_dir)))
    };

    let store: SharedStore = Arc::new(PlaygroundStore::new(storage));
    store.set_endpoints(config.endpoints.clone());

    // Setting an endpoint does not need the server's opinion first.
    if let Commands::Endpoint {
        action: EndpointAction::Set { url },
    } = &cli.command
    {
        return handle_endpoint_set(&store, url);
    }

    let origin = hydrate(&store, &config).await;

    match cli.command {
        Commands::Status => handle_status(&store, origin).await,
        Commands::Endpoint { action } => match action {
            EndpointAction::Show => handle_endpoint_show(&store, origin),
            EndpointAction::List => handle_endpoint_list(&store),
            EndpointAction::Set { .. } => Ok(()),
        },
        Commands::Agents => handle_catalog(&store, EntityType::Agent).await,
        Commands::Teams => handle_catalog(&store, EntityType::Team).await,
        Commands::Sessions { id, team } => {
            let kind = if team {
                EntityType::Team
            } else {
                EntityType::Agent
            };
            handle_sessions(&store, kind, &id).await
        }
    }
}

async fn hydrate(store: &PlaygroundStore, config: &Config) -> Option<EndpointOrigin> {
    let source = DefaultEndpointSource::new(config.app_url.clone());
    store.rehydrate(&source).await
}

fn describe_origin(origin: Option<EndpointOrigin>) -> String {
    match origin {
        Some(origin) => origin.to_string(),
        None => "already hydrated".to_string(),
    }
}

async fn handle_status(store: &PlaygroundStore, origin: Option<EndpointOrigin>) -> Result<()> {
    use playground_cli::agent::EntityDiscovery;

    let discovery = EntityDiscovery::for_store(store);
    if let Err(e) = discovery.refresh(store).await {
        log::debug!("Status refresh failed: {}", e);
    }

    let state = store.snapshot();
    println!(
        "Endpoint: {} ({})",
        state.selected_endpoint,
        describe_origin(origin)
    );
    println!(
        "Status: {}",
        if state.is_endpoint_active {
            "active"
        } else {
            "inactive"
        }
    );
    println!("Agents: {}", state.agents.len());
    println!("Teams: {}", state.teams.len());

    Ok(())
}

fn handle_endpoint_show(store: &PlaygroundStore, origin: Option<EndpointOrigin>) -> Result<()> {
    println!("{}", store.selected_endpoint());
    println!("Source: {}", describe_origin(origin));
    Ok(())
}

fn handle_endpoint_set(store: &PlaygroundStore, url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(anyhow::anyhow!("Endpoint URL cannot be empty."));
    }

    store.set_selected_endpoint(url.trim());
    println!("Selected endpoint: {}", store.selected_endpoint());
    Ok(())
}

fn handle_endpoint_list(store: &PlaygroundStore) -> Result<()> {
    store.with_state(|state| {
        if state.endpoints.is_empty() {
            println!("No endpoints configured.");
            println!("Selected: {}", state.selected_endpoint);
            return;
        }

        println!("Configured endpoints:");
        for endpoint in &state.endpoints {
            let marker = if endpoint.endpoint == state.selected_endpoint {
                "*"
            } else {
                " "
            };
            println!(
                "{} {}: {}",
                marker, endpoint.id_playground_endpoint, endpoint.endpoint
            );
        }
    });
    Ok(())
}

async fn handle_catalog(store: &PlaygroundStore, kind: EntityType) -> Result<()> {
    use playground_cli::agent::EntityDiscovery;

    EntityDiscovery::for_store(store).refresh(store).await?;

    let state = store.snapshot();
    let (title, entities) = match kind {
        EntityType::Agent => ("agents", &state.agents),
        EntityType::Team => ("teams", &state.teams),
    };

    if entities.is_empty() {
        println!("No {} available at {}", title, state.selected_endpoint);
        return Ok(());
    }

    println!("Available {}:", title);
    for entity in entities {
        let storage = if entity.storage.unwrap_or(false) {
            " (storage)"
        } else {
            ""
        };
        if entity.model.provider.is_empty() {
            println!("  - {}: {}{}", entity.value, entity.label, storage);
        } else {
            println!(
                "  - {}: {} [{}]{}",
                entity.value, entity.label, entity.model.provider, storage
            );
        }
    }

    Ok(())
}

async fn handle_sessions(store: &PlaygroundStore, kind: EntityType, id: &str) -> Result<()> {
    use playground_cli::agent::{select_entity, EntityDiscovery};

    let discovery = EntityDiscovery::for_store(store);
    if let Err(e) = discovery.refresh(store).await {
        log::warn!("Catalog unavailable, loading sessions directly: {}", e);
    }

    let entity = store.with_state(|state| {
        let catalog = match kind {
            EntityType::Agent => &state.agents,
            EntityType::Team => &state.teams,
        };
        catalog.iter().find(|e| e.value == id).cloned()
    });

    if let Some(entity) = &entity {
        select_entity(store, entity);
        if !store.with_state(|s| s.has_storage) {
            println!(
                "Note: {} '{}' does not keep session history.",
                kind, entity.label
            );
        }
    }

    discovery.load_sessions(store, kind, id).await?;

    let sessions = store.with_state(|s| s.sessions_data.clone().unwrap_or_default());
    if sessions.is_empty() {
        println!("No sessions found for {} '{}'", kind, id);
        return Ok(());
    }

    println!("Sessions for {} '{}':", kind, id);
    for session in sessions {
        let title = if session.title.is_empty() {
            "(untitled)"
        } else {
            session.title.as_str()
        };
        println!("  - {}: {}", session.session_id, title);
    }

    Ok(())
}
