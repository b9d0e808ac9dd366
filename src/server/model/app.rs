use sea_orm::DatabaseConnection;

use crate::server::config::ApiConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: ApiConfig,
}

impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self {
            db,
            config: ApiConfig::default(),
        }
    }
}
