use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use cabinet_cut::cabinet::Cabinet;
use cabinet_cut::packer::{PackError, Packer};
use cabinet_cut::sheet::Sheet;
use cabinet_cut::summary::{CutSummary, summarize};
use cabinet_cut::types::PieceSpec;

#[derive(Deserialize, Serialize)]
struct PackRequest {
    pieces: Vec<PieceSpec>,
    sheet_width: f64,
    sheet_height: f64,
    #[serde(default)]
    kerf: f64,
    #[serde(default)]
    price: f64,
}

#[derive(Deserialize, Serialize)]
struct CabinetRequest {
    width: f64,
    depth: f64,
    height: f64,
    thickness: f64,
    #[serde(default)]
    door_gap: f64,
    #[serde(default)]
    frame_width: Option<f64>,
    sheet_width: f64,
    sheet_height: f64,
    #[serde(default)]
    kerf: f64,
    #[serde(default)]
    price: f64,
}

#[derive(Serialize)]
struct PackResponse {
    sheets: Vec<Sheet>,
    summary: CutSummary,
}

#[derive(Serialize)]
struct CabinetResponse {
    pieces: Vec<PieceSpec>,
    sheets: Vec<Sheet>,
    summary: CutSummary,
}

fn check_inputs(
    pieces: &[PieceSpec],
    sheet_width: f64,
    sheet_height: f64,
    kerf: f64,
    price: f64,
) -> Result<(), String> {
    if !(sheet_width > 0.0 && sheet_width.is_finite())
        || !(sheet_height > 0.0 && sheet_height.is_finite())
    {
        return Err("sheet dimensions must be positive".to_string());
    }
    if !(kerf >= 0.0 && kerf.is_finite()) {
        return Err("kerf must not be negative".to_string());
    }
    if !(price >= 0.0 && price.is_finite()) {
        return Err("price must not be negative".to_string());
    }
    for p in pieces {
        if !(p.dim1 > 0.0 && p.dim1.is_finite()) || !(p.dim2 > 0.0 && p.dim2.is_finite()) {
            return Err(format!("piece {} dimensions must be positive", p.label));
        }
    }
    Ok(())
}

fn run_packer(
    pieces: Vec<PieceSpec>,
    sheet_width: f64,
    sheet_height: f64,
    kerf: f64,
    price: f64,
) -> Result<(Vec<Sheet>, CutSummary), (StatusCode, String)> {
    let sheets = Packer::new(pieces, sheet_width, sheet_height, kerf)
        .pack()
        .map_err(|e| match e {
            PackError::PieceTooLarge { .. } => (StatusCode::BAD_REQUEST, e.to_string()),
            PackError::Unplaceable { .. } => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;
    let summary = summarize(&sheets, sheet_width, sheet_height, price);
    Ok((sheets, summary))
}

async fn pack(Json(req): Json<PackRequest>) -> Result<Json<PackResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /pack"
    );

    check_inputs(&req.pieces, req.sheet_width, req.sheet_height, req.kerf, req.price)
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let (sheets, summary) =
        run_packer(req.pieces, req.sheet_width, req.sheet_height, req.kerf, req.price)?;
    Ok(Json(PackResponse { sheets, summary }))
}

async fn cabinet(
    Json(req): Json<CabinetRequest>,
) -> Result<Json<CabinetResponse>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /cabinet"
    );

    let cab = Cabinet {
        width: req.width,
        depth: req.depth,
        height: req.height,
        thickness: req.thickness,
        door_gap: req.door_gap,
        frame_width: req.frame_width,
    };
    let pieces = cab
        .pieces()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    check_inputs(&pieces, req.sheet_width, req.sheet_height, req.kerf, req.price)
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let (sheets, summary) = run_packer(
        pieces.clone(),
        req.sheet_width,
        req.sheet_height,
        req.kerf,
        req.price,
    )?;
    Ok(Json(CabinetResponse {
        pieces,
        sheets,
        summary,
    }))
}

async fn serve() {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/pack", post(pack))
        .route("/cabinet", post(cabinet))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}

fn main() {
    // Sentry wants to exist before the async runtime spins up; the DSN
    // comes from SENTRY_DSN in the environment.
    let _sentry = sentry::init(sentry::ClientOptions {
        release: sentry::release_name!(),
        ..Default::default()
    });

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
        .block_on(serve());
}
