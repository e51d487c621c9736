//! Client-side playground state: an observable store whose selected endpoint
//! survives restarts and is reconciled with the app's default endpoint on
//! startup, plus the playground API client that fills its catalogs.

pub mod agent;
pub mod config;
pub mod state;
pub mod utils;
