//! `GET /`: a fixed descriptor naming the service.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

pub const SERVICE_NAME: &str = "User Management API";
pub const API_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceDescriptor {
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "User Management API")]
    pub service: &'static str,
    #[schema(example = "1.0.0")]
    pub version: &'static str,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service descriptor", body = ServiceDescriptor)
    )
)]
pub async fn descriptor() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        status: "ok",
        service: SERVICE_NAME,
        version: API_VERSION,
    })
}
