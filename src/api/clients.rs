use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::api::employees::Pagination;
use crate::error::PortalError;
use crate::payroll::clients::{self, ClientPatch, NewClient};
use crate::store::Store;
use crate::store::mysql::MySqlStore;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClientQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/clients",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("limit" = Option<u32>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Search by name")
    ),
    responses(
        (status = 200, description = "Paginated client list")
    ),
    tag = "Clients"
)]
pub async fn list_clients(
    store: web::Data<MySqlStore>,
    query: web::Query<ClientQuery>,
) -> actix_web::Result<impl Responder> {
    // Seed the fixed default on an empty registry so the admin screen
    // always has a selectable client. Non-fatal if it races or fails.
    if let Err(e) = clients::seed_default_if_empty(store.get_ref()).await {
        tracing::warn!(error = %e, "Failed to seed default client");
    }

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let search = query.search.as_deref().unwrap_or("");

    let (data, total) = store
        .list_clients(search, page, limit)
        .await
        .map_err(PortalError::from)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": data,
        "pagination": Pagination::new(total, page, limit),
    })))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = NewClient,
    responses(
        (status = 200, description = "Client created"),
        (status = 400, description = "Client name is required")
    ),
    tag = "Clients"
)]
pub async fn create_client(
    store: web::Data<MySqlStore>,
    payload: web::Json<NewClient>,
) -> actix_web::Result<impl Responder> {
    let client = clients::create_client(store.get_ref(), payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": client,
        "message": "Client created successfully",
    })))
}

#[utoipa::path(
    patch,
    path = "/api/clients/{id}",
    params(
        ("id" = String, Path, description = "Client id")
    ),
    request_body = ClientPatch,
    responses(
        (status = 200, description = "Client updated"),
        (status = 404, description = "Client not found")
    ),
    tag = "Clients"
)]
pub async fn update_client(
    store: web::Data<MySqlStore>,
    path: web::Path<String>,
    payload: web::Json<ClientPatch>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let client = clients::update_client(store.get_ref(), &id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": client,
        "message": "Client updated successfully",
    })))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(
        ("id" = String, Path, description = "Client id")
    ),
    responses(
        (status = 200, description = "Client deleted"),
        (status = 404, description = "Client not found")
    ),
    tag = "Clients"
)]
pub async fn delete_client(
    store: web::Data<MySqlStore>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    clients::delete_client(store.get_ref(), &id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Client deleted successfully",
    })))
}
