use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::store::SeaOrmStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
}

impl AppState {
    /// Storage capability handed to the inspection pipeline.
    pub fn inspection_store(&self) -> SeaOrmStore {
        SeaOrmStore::new(self.db.clone(), self.config.database.max_bind_params)
    }
}
