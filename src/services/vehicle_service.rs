use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    dto::vehicles::{CreateVehicleRequest, UpdateVehicleRequest, VehicleList},
    entity::{
        customers::Entity as Customers,
        vehicles::{ActiveModel, Column, Entity as Vehicles, Model as VehicleModel},
        work_orders::{Column as WorkOrderColumn, Entity as WorkOrders},
    },
    error::{AppError, AppResult},
    models::Vehicle,
    response::{ApiResponse, Meta},
    routes::params::VehicleQuery,
    services::catalog_service,
    state::AppState,
};

pub async fn list_vehicles(
    state: &AppState,
    query: VehicleQuery,
) -> AppResult<ApiResponse<VehicleList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();
    if let Some(customer_id) = query.customer_id {
        condition = condition.add(Column::CustomerId.eq(customer_id));
    }

    let finder = Vehicles::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(vehicle_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Vehicles",
        VehicleList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_vehicle(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Vehicle>> {
    let vehicle = Vehicles::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Vehicle",
        vehicle_from_entity(vehicle),
        None,
    ))
}

pub async fn create_vehicle(
    state: &AppState,
    payload: CreateVehicleRequest,
) -> AppResult<ApiResponse<Vehicle>> {
    Customers::find_by_id(payload.customer_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    // make/model/year must exist in the read-only reference catalog.
    if !catalog_service::combination_exists(state, &payload.make, &payload.model, payload.year)
        .await?
    {
        return Err(AppError::validation(
            "make",
            format!(
                "{} {} {} is not in the vehicle catalog",
                payload.year, payload.make, payload.model
            ),
        ));
    }

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(payload.customer_id),
        year: Set(payload.year),
        make: Set(payload.make),
        model: Set(payload.model),
        vin: Set(payload.vin),
        license_plate: Set(payload.license_plate),
        color: Set(payload.color),
        mileage: Set(payload.mileage),
        engine_size: Set(payload.engine_size),
        transmission: Set(payload.transmission),
        notes: Set(payload.notes),
        created_at: NotSet,
    };
    let vehicle = active.insert(&state.orm).await?;

    Ok(ApiResponse::success(
        "Vehicle created",
        vehicle_from_entity(vehicle),
        Some(Meta::empty()),
    ))
}

pub async fn update_vehicle(
    state: &AppState,
    id: Uuid,
    payload: UpdateVehicleRequest,
) -> AppResult<ApiResponse<Vehicle>> {
    let existing = Vehicles::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    if let Some(vin) = payload.vin {
        active.vin = Set(Some(vin));
    }
    if let Some(license_plate) = payload.license_plate {
        active.license_plate = Set(Some(license_plate));
    }
    if let Some(color) = payload.color {
        active.color = Set(Some(color));
    }
    if let Some(mileage) = payload.mileage {
        active.mileage = Set(Some(mileage));
    }
    if let Some(engine_size) = payload.engine_size {
        active.engine_size = Set(Some(engine_size));
    }
    if let Some(transmission) = payload.transmission {
        active.transmission = Set(Some(transmission));
    }
    if let Some(notes) = payload.notes {
        active.notes = Set(Some(notes));
    }

    let vehicle = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Updated",
        vehicle_from_entity(vehicle),
        Some(Meta::empty()),
    ))
}

pub async fn delete_vehicle(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    // Work orders keep their vehicle reference; deleting out from under
    // them is refused rather than surfaced as a raw FK violation.
    let attached = WorkOrders::find()
        .filter(WorkOrderColumn::VehicleId.eq(id))
        .count(&state.orm)
        .await?;
    if attached > 0 {
        return Err(AppError::BadRequest(format!(
            "Vehicle has {attached} work order(s); delete those first or delete the customer"
        )));
    }

    let result = Vehicles::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "vehicle_id": id }),
        Some(Meta::empty()),
    ))
}

pub fn vehicle_from_entity(model: VehicleModel) -> Vehicle {
    Vehicle {
        id: model.id,
        customer_id: model.customer_id,
        year: model.year,
        make: model.make,
        model: model.model,
        vin: model.vin,
        license_plate: model.license_plate,
        color: model.color,
        mileage: model.mileage,
        engine_size: model.engine_size,
        transmission: model.transmission,
        notes: model.notes,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
