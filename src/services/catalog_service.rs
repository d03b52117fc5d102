//! Pure lookups over the read-only make/model/year reference table.
//! Seeded once; never mutated by normal operation.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::{
    dto::catalog::{MakeList, ModelList, YearList},
    entity::vehicle_catalog::{Column, Entity as VehicleCatalog},
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn makes(state: &AppState) -> AppResult<ApiResponse<MakeList>> {
    let makes = VehicleCatalog::find()
        .select_only()
        .column(Column::Make)
        .distinct()
        .order_by_asc(Column::Make)
        .into_tuple::<String>()
        .all(&state.orm)
        .await?;
    Ok(ApiResponse::success(
        "Makes",
        MakeList { makes },
        Some(Meta::empty()),
    ))
}

pub async fn models_for(state: &AppState, make: &str) -> AppResult<ApiResponse<ModelList>> {
    let models = VehicleCatalog::find()
        .select_only()
        .column(Column::Model)
        .distinct()
        .filter(Column::Make.eq(make))
        .order_by_asc(Column::Model)
        .into_tuple::<String>()
        .all(&state.orm)
        .await?;
    Ok(ApiResponse::success(
        "Models",
        ModelList { models },
        Some(Meta::empty()),
    ))
}

pub async fn years_for(
    state: &AppState,
    make: &str,
    model: &str,
) -> AppResult<ApiResponse<YearList>> {
    let years = VehicleCatalog::find()
        .select_only()
        .column(Column::Year)
        .distinct()
        .filter(Column::Make.eq(make))
        .filter(Column::Model.eq(model))
        .order_by_desc(Column::Year)
        .into_tuple::<i32>()
        .all(&state.orm)
        .await?;
    Ok(ApiResponse::success(
        "Years",
        YearList { years },
        Some(Meta::empty()),
    ))
}

pub async fn combination_exists(
    state: &AppState,
    make: &str,
    model: &str,
    year: i32,
) -> AppResult<bool> {
    let count = VehicleCatalog::find()
        .filter(Column::Make.eq(make))
        .filter(Column::Model.eq(model))
        .filter(Column::Year.eq(year))
        .count(&state.orm)
        .await?;
    Ok(count > 0)
}
