use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::customers::{
        CreateCustomerRequest, CustomerDeleteSummary, CustomerHistory, CustomerList,
        UpdateCustomerRequest,
    },
    entity::{
        customers::{ActiveModel, Column, Entity as Customers, Model as CustomerModel},
        vehicles::{Column as VehicleCol, Entity as Vehicles},
        work_orders::{Column as OrderCol, Entity as WorkOrders},
        work_order_items::{Column as ItemCol, Entity as WorkOrderItems},
    },
    error::{AppError, AppResult, FieldError},
    models::Customer,
    response::{ApiResponse, Meta},
    routes::params::CustomerQuery,
    services::{email_service, vehicle_service, work_order_service},
    state::AppState,
};

pub async fn list_customers(
    state: &AppState,
    query: CustomerQuery,
) -> AppResult<ApiResponse<CustomerList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::FirstName).ilike(pattern.clone()))
                .add(Expr::col(Column::LastName).ilike(pattern.clone()))
                .add(Expr::col(Column::Phone).ilike(pattern.clone()))
                .add(Expr::col(Column::Email).ilike(pattern)),
        );
    }

    let finder = Customers::find()
        .filter(condition)
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(customer_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_customer(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Customer>> {
    let customer = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Customer",
        customer_from_entity(customer),
        None,
    ))
}

pub async fn create_customer(
    state: &AppState,
    payload: CreateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    validate_names(&payload.first_name, &payload.last_name)?;
    validate_email(payload.email.as_deref())?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        phone: Set(payload.phone),
        email: Set(payload.email),
        address: Set(payload.address),
        city: Set(payload.city),
        state: Set(payload.state),
        postal_code: Set(payload.postal_code),
        created_at: NotSet,
        updated_at: NotSet,
    };
    let customer = active.insert(&state.orm).await?;

    Ok(ApiResponse::success(
        "Customer created",
        customer_from_entity(customer),
        Some(Meta::empty()),
    ))
}

pub async fn update_customer(
    state: &AppState,
    id: Uuid,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let existing = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if let Some(email) = payload.email.as_deref() {
        validate_email(Some(email))?;
    }

    let mut active: ActiveModel = existing.into();
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name);
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name);
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }
    if let Some(city) = payload.city {
        active.city = Set(Some(city));
    }
    if let Some(state_field) = payload.state {
        active.state = Set(Some(state_field));
    }
    if let Some(postal_code) = payload.postal_code {
        active.postal_code = Set(Some(postal_code));
    }
    active.updated_at = Set(Utc::now().into());

    let customer = active.update(&state.orm).await?;
    Ok(ApiResponse::success(
        "Updated",
        customer_from_entity(customer),
        Some(Meta::empty()),
    ))
}

/// Everything the shop has on file for a customer; the operator reviews
/// this (and its counts) before a cascade delete.
pub async fn customer_history(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CustomerHistory>> {
    let customer = Customers::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let vehicles = Vehicles::find()
        .filter(VehicleCol::CustomerId.eq(id))
        .order_by_desc(VehicleCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(vehicle_service::vehicle_from_entity)
        .collect();

    let work_orders = WorkOrders::find()
        .filter(OrderCol::CustomerId.eq(id))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(work_order_service::work_order_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Customer history",
        CustomerHistory {
            customer: customer_from_entity(customer),
            vehicles,
            work_orders,
        },
        Some(Meta::empty()),
    ))
}

/// Hard delete with cascade to owned vehicles and work orders, all inside
/// one transaction. Returns exactly how many of each were removed.
pub async fn delete_customer(
    state: &AppState,
    id: Uuid,
    confirm: Option<&str>,
) -> AppResult<ApiResponse<CustomerDeleteSummary>> {
    if confirm != Some("DELETE") {
        return Err(AppError::BadRequest(
            "Deleting a customer requires confirm=DELETE".into(),
        ));
    }

    let txn = state.orm.begin().await?;

    let customer = Customers::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let order_ids: Vec<Uuid> = WorkOrders::find()
        .filter(OrderCol::CustomerId.eq(id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|order| order.id)
        .collect();

    if !order_ids.is_empty() {
        WorkOrderItems::delete_many()
            .filter(ItemCol::WorkOrderId.is_in(order_ids.clone()))
            .exec(&txn)
            .await?;
    }
    let work_orders_deleted = WorkOrders::delete_many()
        .filter(OrderCol::CustomerId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    let vehicles_deleted = Vehicles::delete_many()
        .filter(VehicleCol::CustomerId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;

    Customers::delete_by_id(customer.id).exec(&txn).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "customer_delete",
        Some("customers"),
        Some(serde_json::json!({
            "customer_id": id,
            "vehicles_deleted": vehicles_deleted,
            "work_orders_deleted": work_orders_deleted,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Customer deleted",
        CustomerDeleteSummary {
            vehicles_deleted,
            work_orders_deleted,
        },
        Some(Meta::empty()),
    ))
}

fn validate_names(first_name: &str, last_name: &str) -> AppResult<()> {
    let mut errors = Vec::new();
    if first_name.trim().is_empty() {
        errors.push(FieldError::new("first_name", "First name is required"));
    }
    if last_name.trim().is_empty() {
        errors.push(FieldError::new("last_name", "Last name is required"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn validate_email(email: Option<&str>) -> AppResult<()> {
    match email {
        Some(email) if !email.is_empty() && !email_service::is_usable_email(Some(email)) => Err(
            AppError::validation("email", format!("Malformed email address: {email}")),
        ),
        _ => Ok(()),
    }
}

pub fn customer_from_entity(model: CustomerModel) -> Customer {
    Customer {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        phone: model.phone,
        email: model.email,
        address: model.address,
        city: model.city,
        state: model.state,
        postal_code: model.postal_code,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
