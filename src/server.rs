// src/server.rs
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::task;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::data_provider::DataProvider;
use crate::data_types::Tab;
use crate::ui;
use crate::view::{Dashboard, Layout, Message};

/// Everything the handlers need, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    provider: Arc<DataProvider>,
}

impl AppContext {
    pub fn new(provider: DataProvider) -> Self {
        AppContext {
            provider: Arc::new(provider),
        }
    }
}

pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/tab-content", get(tab_content))
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}

async fn index(State(context): State<AppContext>) -> Html<String> {
    let active = Tab::default();
    let content = render_tab(&context, active.value().to_string()).await;
    Html(ui::render_page(active, &content))
}

async fn tab_content(
    State(context): State<AppContext>,
    Query(params): Query<Vec<(String, String)>>,
) -> Html<String> {
    Html(render_tab(&context, selected_tab(params)).await)
}

/// First `tab` value in the query, repeats are ignored.
fn selected_tab(params: Vec<(String, String)>) -> String {
    params
        .into_iter()
        .find(|(key, _)| key == "tab")
        .map(|(_, value)| value)
        .unwrap_or_else(|| Tab::default().value().to_string())
}

/// Renders one tab on a blocking thread, since it may read the spreadsheet.
async fn render_tab(context: &AppContext, tab: String) -> String {
    let provider = context.provider.clone();
    task::spawn_blocking(move || {
        let mut dashboard = Dashboard::new(provider);
        dashboard.update(Message::TabSelected(tab));
        dashboard.view().to_html()
    })
    .await
    .unwrap_or_else(|err| {
        error!(%err, "tab render failed");
        Layout::placeholder().to_html()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::DataSource;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::fs;
    use tower::ServiceExt;

    fn app_with(source: DataSource) -> Router {
        router(AppContext::new(DataProvider::new(source)))
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn missing() -> DataSource {
        DataSource::Workbook("missing/cost_data.xlsx".into())
    }

    #[tokio::test]
    async fn index_renders_csp_tab() {
        let (status, body) = get_body(app_with(missing()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Cloud Cost Dashboard</h1>"));
        assert!(body.contains("CSP Total Cost"));
        assert_eq!(body.matches("data-figure=").count(), 3);
    }

    #[tokio::test]
    async fn tab_content_switches_dataset() {
        let (status, body) = get_body(app_with(missing()), "/tab-content?tab=tab-apps").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Cost by Application"));
        assert!(!body.contains("<html"));
    }

    #[tokio::test]
    async fn unknown_tab_is_placeholder_not_error() {
        let (status, body) = get_body(app_with(missing()), "/tab-content?tab=tab-nope").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<div>No data available</div>");
    }

    #[tokio::test]
    async fn repeated_tab_parameter_uses_the_first() {
        let (status, body) = get_body(app_with(missing()), "/tab-content?tab=a&tab=b").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<div>No data available</div>");

        let (status, body) =
            get_body(app_with(missing()), "/tab-content?tab=tab-csp&tab=tab-apps").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("CSP Total Cost"));
        assert!(!body.contains("Cost by Application"));
    }

    #[tokio::test]
    async fn missing_tab_parameter_renders_initial_tab() {
        let (status, body) = get_body(app_with(missing()), "/tab-content?other=1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("CSP Total Cost"));
    }

    #[tokio::test]
    async fn reads_csv_exports_per_request() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with(DataSource::from_path(dir.path()));

        let (_, before) = get_body(app.clone(), "/tab-content?tab=tab-services").await;
        assert!(before.contains("Compute"));

        fs::write(dir.path().join("Services.csv"), "Service,Cost\nBackup,75\n").unwrap();
        let (_, after) = get_body(app, "/tab-content?tab=tab-services").await;
        assert!(after.contains("Backup"));
        assert!(after.contains("$75"));
        assert!(!after.contains("Compute"));
    }
}
