use std::path::Path;

use axum::{
    Json,
    extract::{Multipart, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    conf::settings,
    pkg::{
        internal::{pipeline::Pipeline, records::spec::ResumeRecord},
        server::state::AppState,
    },
    prelude::{Error, Result},
};

#[derive(Serialize)]
pub struct IngestResponse {
    pub status: String,
    pub record: ResumeRecord,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub keyword: String,
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("");
        match field_name {
            "resume" => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::InvalidRequest(e.to_string()))?;
                upload = Some((filename, data.to_vec()));
            }
            _ => {
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| Error::InvalidRequest(e.to_string()))?;
            }
        }
    }
    let (filename, data) =
        upload.ok_or_else(|| Error::InvalidRequest("missing resume file field".into()))?;

    retain_upload(&filename, &data).await?;
    let record = Pipeline::new(state.ai_client.clone(), state.store.clone())
        .ingest(&data, &filename)
        .await?;
    Ok(Json(IngestResponse {
        status: format!("Parsed and saved: {}", record.display_name()),
        record,
    }))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ResumeRecord>>> {
    let results = Pipeline::new(state.ai_client.clone(), state.store.clone())
        .search(&params.keyword)
        .await?;
    Ok(Json(results))
}

// same-named uploads get distinct stored copies; the record keeps the
// original filename
async fn retain_upload(original_filename: &str, data: &[u8]) -> Result<()> {
    let file_id = Uuid::new_v4();
    let file_extension = Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");
    let filename = format!("{}-{}.{}", original_filename, file_id, file_extension);
    tokio::fs::create_dir_all(&settings.upload_dir).await?;
    tokio::fs::write(Path::new(&settings.upload_dir).join(&filename), data).await?;
    tracing::debug!("retained upload as {}", &filename);
    Ok(())
}
