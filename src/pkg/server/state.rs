use std::sync::Arc;

use crate::{
    conf::settings,
    pkg::internal::{ai::client::Client as AIClient, records::store::RecordStore},
    prelude::Result,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub ai_client: Arc<AIClient>,
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        Ok(AppState {
            ai_client: Arc::new(AIClient::from_settings()?),
            store: Arc::new(RecordStore::new(settings.store_path.as_str())),
        })
    }
}
