use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::customers::{
        CreateCustomerRequest, CustomerDeleteSummary, CustomerHistory, CustomerList,
        UpdateCustomerRequest,
    },
    dto::work_orders::DeleteConfirmQuery,
    error::AppResult,
    models::Customer,
    response::ApiResponse,
    routes::params::CustomerQuery,
    services::customer_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/{id}/history", get(customer_history))
}

#[utoipa::path(
    get,
    path = "/customers",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search name, phone or email")
    ),
    responses(
        (status = 200, description = "List customers", body = ApiResponse<CustomerList>),
    ),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    let resp = customer_service::list_customers(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 200, description = "Customer created", body = ApiResponse<Customer>),
        (status = 422, description = "Validation failed"),
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::create_customer(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Get customer", body = ApiResponse<Customer>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::get_customer(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<Customer>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::update_customer(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/customers/{id}/history",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Vehicles and work orders on file", body = ApiResponse<CustomerHistory>),
        (status = 404, description = "Not Found"),
    ),
    tag = "Customers"
)]
pub async fn customer_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CustomerHistory>>> {
    let resp = customer_service::customer_history(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/customers/{id}",
    params(
        ("id" = Uuid, Path, description = "Customer ID"),
        ("confirm" = Option<String>, Query, description = "Must be the literal DELETE")
    ),
    responses(
        (status = 200, description = "Customer and owned records deleted", body = ApiResponse<CustomerDeleteSummary>),
        (status = 400, description = "Missing confirmation"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Customers"
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteConfirmQuery>,
) -> AppResult<Json<ApiResponse<CustomerDeleteSummary>>> {
    let resp = customer_service::delete_customer(&state, id, query.confirm.as_deref()).await?;
    Ok(Json(resp))
}
