//! Selector option handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use bizpub_common::errors::Result;
use bizpub_explore::ExploreMode;

/// Values offered by the page's selectors
#[derive(Serialize)]
pub struct OptionsResponse {
    pub modes: Vec<ModeOption>,
    pub journals: Vec<String>,
    pub years: Vec<i32>,
    pub records: usize,
    pub loaded_at: String,
}

#[derive(Serialize)]
pub struct ModeOption {
    pub value: ExploreMode,
    pub label: &'static str,
}

/// List modes, journals and years in the dataset
pub async fn options(State(state): State<AppState>) -> Result<Json<OptionsResponse>> {
    let dataset = state.datasets.get().await?;

    Ok(Json(OptionsResponse {
        modes: ExploreMode::ALL
            .iter()
            .map(|&mode| ModeOption {
                value: mode,
                label: mode.label(),
            })
            .collect(),
        journals: dataset.journals().into_iter().map(String::from).collect(),
        years: dataset.years(),
        records: dataset.len(),
        loaded_at: dataset.loaded_at().to_rfc3339(),
    }))
}
