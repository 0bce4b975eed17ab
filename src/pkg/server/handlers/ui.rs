use askama::Template;
use axum::response::Html;

use crate::{conf::settings, pkg::server::uispec::Home, prelude::Result};

pub async fn home() -> Result<Html<String>> {
    let template = Home {
        service_name: &settings.service_name,
    };
    Ok(Html(template.render()?))
}
