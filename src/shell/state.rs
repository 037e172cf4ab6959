use crate::shared::infrastructure::database::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub database: Arc<Database>,
}

impl AppState {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }
}
