use axum::Router;

use crate::state::AppState;

pub mod backup;
pub mod catalog;
pub mod customers;
pub mod doc;
pub mod email;
pub mod health;
pub mod labor;
pub mod params;
pub mod parts;
pub mod reports;
pub mod settings;
pub mod vehicles;
pub mod work_orders;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/customers", customers::router())
        .nest("/vehicles", vehicles::router())
        .nest("/catalog", catalog::router())
        .nest("/parts", parts::router())
        .nest("/labor", labor::router())
        .nest("/work-orders", work_orders::router())
        .nest("/email", email::router())
        .nest("/backup", backup::router())
        .nest("/reports", reports::router())
        .nest("/settings", settings::router())
}
