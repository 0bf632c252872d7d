use std::sync::Arc;

use common::storage::StorageBackend;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: Arc<dyn StorageBackend>,
    pub config: Arc<AppConfig>,
}
