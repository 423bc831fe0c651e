use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware, http::header};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::display::to_csv_string;
use crate::form::{export_file_name, TimetableRequest};
use crate::schedule::Allocator;
use crate::timetable::{generate_timetable, TimetableResponse};

// Latest result only; nothing is persisted
pub struct AppState {
    pub latest: Mutex<Option<TimetableResponse>>,
    pub allocator: Allocator,
}

impl AppState {
    pub fn new(allocator: Allocator) -> Self {
        Self {
            latest: Mutex::new(None),
            allocator,
        }
    }

    fn latest(&self) -> Result<MutexGuard<'_, Option<TimetableResponse>>> {
        self.latest
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("Timetable state is unavailable"))
    }
}

// Generate endpoint
async fn generate(
    req: web::Json<TimetableRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    match generate_timetable(&req, &state.allocator) {
        Ok(response) => {
            *state.latest()? = Some(response.clone());
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) if e.is_client_error() => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": e.to_string()
        }))),
        Err(e) => Err(actix_web::error::ErrorInternalServerError(e.to_string())),
    }
}

// Latest timetable as JSON
async fn get_latest(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state.latest()?;
    match latest.as_ref() {
        Some(response) => Ok(HttpResponse::Ok().json(response)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No timetable generated yet"}))),
    }
}

// Latest timetable as a CSV download
async fn get_latest_csv(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state.latest()?;
    let Some(response) = latest.as_ref() else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No timetable generated yet"})));
    };

    let csv = to_csv_string(&response.table)
        .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;
    let file_name = export_file_name(&response.school_name);

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(csv))
}

/// Registers the API routes; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/timetable", web::post().to(generate))
        .route("/api/timetable/latest", web::get().to(get_latest))
        .route("/api/timetable/latest/csv", web::get().to(get_latest_csv));
}

pub async fn start_server(port: u16, allocator: Allocator) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(allocator));

    info!("Listening on http://0.0.0.0:{}", port);
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
