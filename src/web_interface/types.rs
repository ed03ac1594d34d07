use serde::Serialize;

/// API error payload
#[derive(Serialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub time: String, // ISO8601
}
