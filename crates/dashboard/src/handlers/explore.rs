//! Exploration handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;
use validator::Validate;

use crate::render::{self, Chart};
use crate::AppState;
use bizpub_common::{
    errors::{AppError, Result},
    metrics::{self, RequestMetrics},
};
use bizpub_explore::{explore as run_exploration, Exploration, ExploreMode, ExploreRequest};

/// Selector values from the page
#[derive(Debug, Deserialize, Validate)]
pub struct ExploreQuery {
    #[serde(default = "default_mode")]
    pub mode: String,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 300))]
    pub journal: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 1000, max = 3000))]
    pub year: Option<i32>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = 200))]
    pub author: Option<String>,
}

/// Query parameters `ExploreQuery` accepts
const QUERY_FIELDS: [&str; 4] = ["mode", "journal", "year", "author"];

type QueryResult = std::result::Result<Query<ExploreQuery>, QueryRejection>;

fn default_mode() -> String { ExploreMode::Length.as_str().to_string() }

/// Blank form fields mean "not selected"
fn empty_string_as_none<'de, D, T>(de: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(de)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

/// Malformed query values become a JSON validation error naming the field
fn rejected_query(rejection: QueryRejection) -> AppError {
    let message = rejection.body_text();
    let field = QUERY_FIELDS
        .iter()
        .find(|field| message.contains(&format!("{}: ", field)))
        .map(|field| field.to_string());
    AppError::Validation { message, field }
}

impl ExploreQuery {
    fn into_request(self) -> Result<ExploreRequest> {
        self.validate()?;
        let mode: ExploreMode = self.mode.parse()?;
        Ok(ExploreRequest {
            mode,
            journal: self.journal,
            year: self.year,
            author: self.author,
        })
    }
}

/// Exploration response
#[derive(Serialize)]
pub struct ExploreResponse {
    pub mode: ExploreMode,
    pub title: &'static str,
    /// Markdown summary
    pub summary: String,
    pub no_data: bool,
    pub charts: Vec<Chart>,
    pub report: Exploration,
}

/// Compute and render one exploration
pub async fn explore(
    State(state): State<AppState>,
    query: QueryResult,
) -> Result<Json<ExploreResponse>> {
    let request_metrics = RequestMetrics::start("GET", "/api/explore");
    let result = build_response(&state, query).await;
    request_metrics.finish(status_of(&result));
    result.map(Json)
}

/// Primary chart of one exploration as a raw SVG document
pub async fn chart_svg(
    State(state): State<AppState>,
    query: QueryResult,
) -> Result<impl IntoResponse> {
    let request_metrics = RequestMetrics::start("GET", "/api/explore/chart.svg");
    let result = build_response(&state, query).await.and_then(|response| {
        match (response.charts.into_iter().next(), response.report) {
            (Some(chart), _) => Ok(chart.svg),
            (None, Exploration::NoData { message, .. }) => Err(AppError::NotFound {
                resource_type: "chart".to_string(),
                id: message,
            }),
            (None, _) => Err(AppError::Internal {
                message: "exploration produced no chart".to_string(),
            }),
        }
    });
    request_metrics.finish(status_of(&result));

    let svg = result?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

fn status_of<T>(result: &Result<T>) -> u16 {
    match result {
        Ok(_) => 200,
        Err(e) => e.status_code().as_u16(),
    }
}

async fn build_response(state: &AppState, query: QueryResult) -> Result<ExploreResponse> {
    let Query(query) = query.map_err(rejected_query)?;
    let request = query.into_request()?;
    let dataset = state.datasets.get().await?;

    let start = Instant::now();
    let exploration = run_exploration(&dataset, &request, &state.options);
    let charts = render::render(&exploration, &state.config.charts)?;
    let elapsed = start.elapsed();

    metrics::record_exploration(elapsed.as_secs_f64(), request.mode.as_str(), exploration.has_data());
    info!(
        mode = %request.mode,
        journal = ?request.journal,
        year = ?request.year,
        author = ?request.author,
        has_data = exploration.has_data(),
        charts = charts.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Exploration rendered"
    );

    Ok(ExploreResponse {
        mode: request.mode,
        title: request.mode.label(),
        summary: exploration.summary_markdown(),
        no_data: !exploration.has_data(),
        charts,
        report: exploration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_router;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use bizpub_common::AppConfig;
    use std::io::Write;
    use tower::ServiceExt;

    const SAMPLE: &str = "\
Journal,Authors,Pages,Year,Volume,Issue
Journal of Finance,Alice Smith; Bob Jones,10-15,2019,74,1
Journal of Finance,Alice Smith; Bob Jones,1-20,2020,75,2
Management Science,Carol White; Bob Jones,101-130,2019,65,3
Management Science,Dan Brown,N/A,2020,66,1
";

    fn app() -> (Router, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        file.flush().unwrap();

        let mut config = AppConfig::default();
        config.dataset.path = file.path().to_path_buf();
        (create_router(AppState::new(config)), file)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = get(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_length_exploration() {
        let (app, _file) = app();
        let (status, body) = get_json(app, "/api/explore?mode=length&journal=Journal%20of%20Finance").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mode"], "length");
        assert_eq!(body["no_data"], false);
        assert_eq!(body["charts"].as_array().unwrap().len(), 2);
        assert_eq!(body["charts"][0]["kind"], "histogram");
        assert_eq!(body["report"]["kind"], "length");
        assert_eq!(body["report"]["stats"]["count"], 2);
        assert!(body["summary"].as_str().unwrap().contains("Journal of Finance"));
    }

    #[tokio::test]
    async fn test_blank_fields_use_defaults() {
        let (app, _file) = app();
        let (status, body) = get_json(app, "/api/explore?mode=yearly&journal=&year=&author=").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["year"], 2020);
    }

    #[tokio::test]
    async fn test_empty_year_has_no_chart() {
        let (app, _file) = app();
        let (status, body) = get_json(app, "/api/explore?mode=yearly&year=1999").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["no_data"], true);
        assert!(body["charts"].as_array().unwrap().is_empty());
        assert_eq!(body["summary"], "**No data available for 1999.**");
    }

    #[tokio::test]
    async fn test_unknown_mode_is_bad_request() {
        let (app, _file) = app();
        let (status, body) = get_json(app, "/api/explore?mode=pie").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNKNOWN_MODE");
    }

    #[tokio::test]
    async fn test_year_out_of_range_is_rejected() {
        let (app, _file) = app();
        let (status, body) = get_json(app, "/api/explore?mode=yearly&year=20").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "year");
    }

    #[tokio::test]
    async fn test_non_numeric_year_is_json_error() {
        let (app, _file) = app();
        let (status, body) = get_json(app, "/api/explore?mode=yearly&year=abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "year");

        let (app, _file) = self::app();
        let (status, body) = get(app, "/api/explore/chart.svg?mode=yearly&year=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(serde_json::from_slice::<serde_json::Value>(&body).is_ok());
    }

    #[tokio::test]
    async fn test_network_ego() {
        let (app, _file) = app();
        let (status, body) = get_json(app, "/api/explore?mode=network&author=Carol%20White").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["focus"], "Carol White");
        assert_eq!(body["report"]["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(body["charts"][0]["kind"], "network");
    }

    #[tokio::test]
    async fn test_chart_svg() {
        let (app, _file) = app();
        let (status, body) = get(app, "/api/explore/chart.svg?mode=yearly&year=2019").await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("<svg"));

        let (app, _file) = self::app();
        let (status, _) = get(app, "/api/explore/chart.svg?mode=yearly&year=1999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_options_and_health() {
        let (app, _file) = app();
        let (status, body) = get_json(app.clone(), "/api/options").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["journals"][0], "Journal of Finance");
        assert_eq!(body["years"], serde_json::json!([2019, 2020]));
        assert_eq!(body["modes"].as_array().unwrap().len(), 3);

        let (status, body) = get_json(app.clone(), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["dataset"]["rows"], 4);

        let (status, body) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("/api/explore"));
    }

    #[tokio::test]
    async fn test_missing_dataset_is_unavailable() {
        let mut config = AppConfig::default();
        config.dataset.path = "/no/such/bizpub.csv".into();
        let app = create_router(AppState::new(config));

        let (status, body) = get_json(app, "/api/options").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "DATASET_UNAVAILABLE");
    }
}
