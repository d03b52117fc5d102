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
    dto::parts::{CreatePartRequest, PartList, UpdatePartRequest},
    entity::parts::{ActiveModel, Column, Entity as Parts, Model as PartModel},
    error::{AppError, AppResult},
    models::Part,
    response::{ApiResponse, Meta},
    routes::params::PartQuery,
    state::AppState,
};

pub async fn list_parts(state: &AppState, query: PartQuery) -> AppResult<ApiResponse<PartList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::ItemName).ilike(pattern.clone()))
                .add(Expr::col(Column::PartNumber).ilike(pattern.clone()))
                .add(Expr::col(Column::Brand).ilike(pattern)),
        );
    }
    if let Some(category) = query.category.as_ref().filter(|c| !c.is_empty()) {
        condition = condition.add(Column::Category.eq(category.clone()));
    }

    let finder = Parts::find()
        .filter(condition)
        .order_by_asc(Column::ItemName);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(part_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Parts",
        PartList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_part(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Part>> {
    let part = Parts::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Part", part_from_entity(part), None))
}

pub async fn create_part(
    state: &AppState,
    payload: CreatePartRequest,
) -> AppResult<ApiResponse<Part>> {
    validate_costs(payload.cost_paid_cents, payload.cost_charged_cents)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        brand: Set(payload.brand),
        item_name: Set(payload.item_name),
        part_number: Set(payload.part_number),
        category: Set(payload.category),
        description: Set(payload.description),
        // New rows are always written in the two-cost shape.
        cost_cents: Set(None),
        cost_paid_cents: Set(Some(payload.cost_paid_cents)),
        cost_charged_cents: Set(Some(payload.cost_charged_cents)),
        in_stock: Set(None),
        quantity_on_hand: Set(payload.quantity_on_hand),
        created_at: NotSet,
    };
    let part = active.insert(&state.orm).await?;

    Ok(ApiResponse::success(
        "Part created",
        part_from_entity(part),
        Some(Meta::empty()),
    ))
}

pub async fn update_part(
    state: &AppState,
    id: Uuid,
    payload: UpdatePartRequest,
) -> AppResult<ApiResponse<Part>> {
    let existing = Parts::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    // Editing costs migrates a legacy row to the two-cost shape.
    let costs = existing.costs();
    let paid = payload.cost_paid_cents.unwrap_or(costs.paid_cents);
    let charged = payload.cost_charged_cents.unwrap_or(costs.charged_cents);
    validate_costs(paid, charged)?;

    let mut active: ActiveModel = existing.into();
    if let Some(brand) = payload.brand {
        active.brand = Set(brand);
    }
    if let Some(item_name) = payload.item_name {
        active.item_name = Set(item_name);
    }
    if let Some(part_number) = payload.part_number {
        active.part_number = Set(part_number);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if payload.cost_paid_cents.is_some() || payload.cost_charged_cents.is_some() {
        active.cost_cents = Set(None);
        active.cost_paid_cents = Set(Some(paid));
        active.cost_charged_cents = Set(Some(charged));
    }
    if let Some(quantity_on_hand) = payload.quantity_on_hand {
        active.quantity_on_hand = Set(quantity_on_hand);
    }

    let part = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Updated",
        part_from_entity(part),
        Some(Meta::empty()),
    ))
}

pub async fn delete_part(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Parts::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "part_id": id }),
        Some(Meta::empty()),
    ))
}

fn validate_costs(paid: i64, charged: i64) -> AppResult<()> {
    if paid < 0 {
        return Err(AppError::validation(
            "cost_paid_cents",
            "Paid cost cannot be negative",
        ));
    }
    if charged < 0 {
        return Err(AppError::validation(
            "cost_charged_cents",
            "Charged cost cannot be negative",
        ));
    }
    Ok(())
}

pub fn part_from_entity(model: PartModel) -> Part {
    let costs = model.costs();
    Part {
        id: model.id,
        brand: model.brand,
        item_name: model.item_name,
        part_number: model.part_number,
        category: model.category,
        description: model.description,
        cost_paid_cents: costs.paid_cents,
        cost_charged_cents: costs.charged_cents,
        profit_cents: costs.profit_cents(),
        quantity_on_hand: model.quantity_on_hand,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
