use std::sync::Arc;

use crate::{
    pkg::internal::{
        ai::{
            client::Client,
            parse::ParseOps,
            read::{Classification, classify, extract_document},
        },
        records::{spec::ResumeRecord, store::RecordStore},
    },
    prelude::{Error, Result},
};

/// Composes extraction, structured parsing and persistence into the two
/// operations callers see: ingest one document, search stored records.
pub struct Pipeline {
    ai_client: Arc<Client>,
    store: Arc<RecordStore>,
}

impl Pipeline {
    pub fn new(ai_client: Arc<Client>, store: Arc<RecordStore>) -> Self {
        Pipeline { ai_client, store }
    }

    pub async fn ingest(&self, data: &[u8], filename: &str) -> Result<ResumeRecord> {
        let kind = match classify(filename) {
            Classification::Known(kind) => kind,
            Classification::Unsupported(ext) => return Err(Error::UnsupportedFormat(ext)),
        };
        let text = extract_document(data, kind)?;
        tracing::debug!("extracted {} chars from {}", text.len(), filename);
        let mut record = self.ai_client.parse_resume(&text).await?;
        record.filename = filename.to_string();
        self.store.append(&record).await?;
        Ok(record)
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<ResumeRecord>> {
        self.store.search(keyword).await
    }
}
