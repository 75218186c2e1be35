use std::{
    net::SocketAddr,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context as AnyhowContext;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, signal};
use uuid::Uuid;

use crate::{
    catalog::{self, ModelFamily},
    cli::CliArgs,
    error::Result,
    page::{self, GenerateForm, Outcome},
    resolver::{self, GenerationRequest, GenerationResult, ValidationError},
};

#[derive(Clone)]
struct ServerState {
    catalog: Arc<Value>,
}

pub async fn run_server(args: &CliArgs) -> Result<()> {
    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("parsing listen address `{}`", args.listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .context("binding demo server address")?;
    println!(
        "Unlearning demo listening on http://{}",
        listener.local_addr().unwrap_or(addr)
    );

    axum::serve(listener, router())
        .with_graceful_shutdown(async {
            if let Err(err) = signal::ctrl_c().await {
                tracing::warn!("failed to listen for shutdown signal: {err:?}");
            }
            println!("Shutdown signal received; stopping server...");
        })
        .await
        .context("running demo server")?;

    Ok(())
}

pub fn router() -> Router {
    let state = ServerState {
        catalog: Arc::new(catalog_document()),
    };

    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate_form))
        .route("/api/catalog", get(get_catalog))
        .route("/api/generate", post(generate_api))
        .with_state(state)
}

fn catalog_document() -> Value {
    let families: Vec<Value> = ModelFamily::available()
        .into_iter()
        .map(|family| {
            json!({
                "id": family.as_str(),
                "label": family.label(),
                "choices": family.choices(),
            })
        })
        .collect();

    json!({
        "original": catalog::original_display_name(),
        "families": families,
        "styles": catalog::list_styles(),
        "objects": catalog::list_objects(),
    })
}

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Serialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: String,
    code: Option<String>,
}

struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    fn validation(err: ValidationError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                error: ApiErrorDetail {
                    message: err.to_string(),
                    error_type: "invalid_request_error".to_owned(),
                    code: Some(err.code().to_owned()),
                },
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

async fn index() -> Html<String> {
    Html(page::render_page(&GenerateForm::initial(), None))
}

async fn generate_form(Form(form): Form<GenerateForm>) -> Response {
    let request = match form.to_request() {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!("rejecting form with unparseable seed: {err}");
            let outcome = Outcome::Rejected("Random seed must be a whole number.".to_owned());
            return (
                StatusCode::BAD_REQUEST,
                Html(page::render_page(&form, Some(&outcome))),
            )
                .into_response();
        }
    };

    let outcome = match resolver::resolve(&request) {
        Ok(result) => {
            tracing::info!("form resolved to {}", result.image_url);
            Outcome::Generated(result)
        }
        Err(err) => {
            tracing::info!("form rejected: {}", err.code());
            Outcome::Rejected(err.to_string())
        }
    };

    Html(page::render_page(&form, Some(&outcome))).into_response()
}

async fn get_catalog(State(state): State<ServerState>) -> Json<Value> {
    Json(state.catalog.as_ref().clone())
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    id: String,
    created: u64,
    #[serde(flatten)]
    result: GenerationResult,
    caption: String,
}

async fn generate_api(Json(request): Json<GenerationRequest>) -> ApiResult<Json<GenerateResponse>> {
    let result = resolver::resolve(&request).map_err(ApiError::validation)?;
    let id = format!("gen-{}", Uuid::new_v4());
    tracing::info!("{id} resolved to {}", result.image_url);

    Ok(Json(GenerateResponse {
        id,
        created: current_unix_time(),
        caption: result.caption(),
        result,
    }))
}

fn current_unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}
