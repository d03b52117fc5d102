use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::labor::{CreateLaborRequest, LaborList, UpdateLaborRequest},
    entity::labor::{ActiveModel, Column, Entity as LaborEntries, Model as LaborModel},
    error::{AppError, AppResult},
    models::Labor,
    response::{ApiResponse, Meta},
    routes::params::LaborQuery,
    state::AppState,
};

pub async fn list_labor(state: &AppState, query: LaborQuery) -> AppResult<ApiResponse<LaborList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }
    if let Some(category) = query.category.as_ref().filter(|c| !c.is_empty()) {
        condition = condition.add(Column::Category.eq(category.clone()));
    }

    let finder = LaborEntries::find()
        .filter(condition)
        .order_by_asc(Column::Name);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(labor_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Labor",
        LaborList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_labor(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Labor>> {
    let labor = LaborEntries::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Labor", labor_from_entity(labor), None))
}

pub async fn create_labor(
    state: &AppState,
    payload: CreateLaborRequest,
) -> AppResult<ApiResponse<Labor>> {
    if payload.cost_cents < 0 {
        return Err(AppError::validation("cost_cents", "Cost cannot be negative"));
    }
    if payload.estimated_hours < 0.0 {
        return Err(AppError::validation(
            "estimated_hours",
            "Estimated hours cannot be negative",
        ));
    }

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        cost_cents: Set(payload.cost_cents),
        category: Set(payload.category),
        description: Set(payload.description),
        estimated_hours: Set(payload.estimated_hours),
        created_at: NotSet,
    };
    let labor = active.insert(&state.orm).await?;

    Ok(ApiResponse::success(
        "Labor created",
        labor_from_entity(labor),
        Some(Meta::empty()),
    ))
}

pub async fn update_labor(
    state: &AppState,
    id: Uuid,
    payload: UpdateLaborRequest,
) -> AppResult<ApiResponse<Labor>> {
    let existing = LaborEntries::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(cost_cents) = payload.cost_cents {
        if cost_cents < 0 {
            return Err(AppError::validation("cost_cents", "Cost cannot be negative"));
        }
        active.cost_cents = Set(cost_cents);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(estimated_hours) = payload.estimated_hours {
        active.estimated_hours = Set(estimated_hours);
    }

    let labor = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Updated",
        labor_from_entity(labor),
        Some(Meta::empty()),
    ))
}

pub async fn delete_labor(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = LaborEntries::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "labor_id": id }),
        Some(Meta::empty()),
    ))
}

pub fn labor_from_entity(model: LaborModel) -> Labor {
    Labor {
        id: model.id,
        name: model.name,
        cost_cents: model.cost_cents,
        category: model.category,
        description: model.description,
        estimated_hours: model.estimated_hours,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
