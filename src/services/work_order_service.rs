use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    clock,
    dto::work_orders::{
        CreateWorkOrderRequest, LineItemRequest, LineKind, SignatureRequest, StatusUpdateResult,
        UpdateStatusRequest, WorkOrderList, WorkOrderWithItems,
    },
    entity::{
        customers::Entity as Customers,
        labor::Entity as LaborEntries,
        parts::Entity as Parts,
        vehicles::Entity as Vehicles,
        work_order_items::{
            ActiveModel as ItemActive, Column as ItemCol, Entity as WorkOrderItems,
            Model as ItemModel,
        },
        work_orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as WorkOrders,
            Model as OrderModel,
        },
    },
    error::{AppError, AppResult, FieldError},
    models::{Signature, SignatureKind, WorkOrder, WorkOrderItem, WorkOrderStatus},
    pricing::{self, LineItemInput},
    response::{ApiResponse, Meta},
    routes::params::{SortOrder, WorkOrderQuery},
    services::email_service,
    state::AppState,
};

pub async fn list_work_orders(
    state: &AppState,
    query: WorkOrderQuery,
) -> AppResult<ApiResponse<WorkOrderList>> {
    let (page, limit, offset) = query.pagination.normalize();
    let mut condition = Condition::all();
    if let Some(customer_id) = query.customer_id {
        condition = condition.add(OrderCol::CustomerId.eq(customer_id));
    }
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        if WorkOrderStatus::parse(status).is_none() {
            return Err(AppError::BadRequest(format!("Unknown status: {status}")));
        }
        condition = condition.add(OrderCol::Status.eq(status.clone()));
    }

    let mut finder = WorkOrders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(work_order_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Work orders",
        WorkOrderList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_work_order(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<WorkOrderWithItems>> {
    let order = WorkOrders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let items = items_for_order(state, order.id).await?;
    Ok(ApiResponse::success(
        "Work order",
        WorkOrderWithItems {
            order: work_order_from_entity(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// A resolved form row, ready to snapshot.
struct ResolvedLine {
    kind: LineKind,
    part_id: Option<Uuid>,
    labor_id: Option<Uuid>,
    description: String,
    quantity: f64,
    unit_cost_cents: i64,
}

/// Create a work order in `Estimate`. The order row and its line items are
/// inserted in one transaction; unit costs are snapshotted from the catalog
/// so later price edits never change an existing order.
pub async fn create_work_order(
    state: &AppState,
    payload: CreateWorkOrderRequest,
) -> AppResult<ApiResponse<WorkOrderWithItems>> {
    if !pricing::is_valid_tax_rate(payload.tax_rate) {
        return Err(AppError::validation(
            "tax_rate",
            format!("Tax rate must be a fraction in [0, 1): {}", payload.tax_rate),
        ));
    }

    Customers::find_by_id(payload.customer_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    if let Some(vehicle_id) = payload.vehicle_id {
        Vehicles::find_by_id(vehicle_id)
            .one(&state.orm)
            .await?
            .ok_or(AppError::NotFound)?;
    }

    let lines = resolve_lines(state, &payload.items).await?;
    let totals = pricing::compute_totals(
        &lines
            .iter()
            .map(|line| LineItemInput {
                unit_cost_cents: line.unit_cost_cents,
                quantity: line.quantity,
            })
            .collect::<Vec<_>>(),
        payload.tax_rate,
    );

    let settings = state.time_settings.read().await.clone();
    let created_at = clock::resolve_current_time(&settings)?;
    let created_in_dst = clock::dst_flag_for(created_at, &settings);

    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_id: Set(payload.customer_id),
        vehicle_id: Set(payload.vehicle_id),
        status: Set(WorkOrderStatus::Estimate.as_str().to_string()),
        tax_rate: Set(payload.tax_rate),
        subtotal_cents: Set(totals.subtotal_cents),
        tax_cents: Set(totals.tax_cents),
        total_cents: Set(totals.total_cents),
        notes: Set(payload.notes),
        signature_kind: Set(None),
        signature_image: Set(None),
        signature_typed_name: Set(None),
        signer_name: Set(None),
        signed_at: Set(None),
        created_in_dst: Set(created_in_dst),
        created_at: Set(created_at.into()),
        updated_at: Set(created_at.into()),
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for (position, line) in lines.into_iter().enumerate() {
        let item = ItemActive {
            id: Set(Uuid::new_v4()),
            work_order_id: Set(order.id),
            kind: Set(match line.kind {
                LineKind::Part => "part".to_string(),
                LineKind::Labor => "labor".to_string(),
            }),
            part_id: Set(line.part_id),
            labor_id: Set(line.labor_id),
            description: Set(line.description),
            quantity: Set(line.quantity),
            unit_cost_cents: Set(line.unit_cost_cents),
            position: Set(position as i32),
        }
        .insert(&txn)
        .await?;
        items.push(item_from_entity(item));
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "work_order_create",
        Some("work_orders"),
        Some(serde_json::json!({ "work_order_id": order.id, "total_cents": order.total_cents })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Work order created",
        WorkOrderWithItems {
            order: work_order_from_entity(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Operator-initiated status transition. On entry to Complete with a usable
/// customer email the caller is offered the completion notice; a failed send
/// is downgraded to a warning and never reverts the committed transition.
pub async fn update_status(
    state: &AppState,
    id: Uuid,
    payload: UpdateStatusRequest,
) -> AppResult<ApiResponse<StatusUpdateResult>> {
    let order = WorkOrders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let customer = Customers::find_by_id(order.customer_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = order.into();
    active.status = Set(payload.status.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        "work_order_status",
        Some("work_orders"),
        Some(serde_json::json!({ "work_order_id": order.id, "status": payload.status.as_str() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let has_email = email_service::is_usable_email(customer.email.as_deref());
    let email_prompt = email_service::should_prompt_for_email(payload.status, has_email);

    let mut email_sent = false;
    let mut email_warning = None;
    if email_prompt && payload.send_email == Some(true) {
        match send_completion_notice(state, order.id).await {
            Ok(()) => email_sent = true,
            Err(err) => {
                tracing::warn!(error = %err, work_order_id = %order.id, "completion email failed");
                email_warning = Some(format!("Status updated, but the email failed: {err}"));
            }
        }
    }

    Ok(ApiResponse::success(
        "Status updated",
        StatusUpdateResult {
            order: work_order_from_entity(order),
            email_prompt,
            email_sent,
            email_warning,
        },
        Some(Meta::empty()),
    ))
}

async fn send_completion_notice(state: &AppState, order_id: Uuid) -> AppResult<()> {
    let email =
        email_service::build_order_email(state, order_id, email_service::EmailBody::Completion)
            .await?;
    email_service::deliver(state, &email).await
}

/// One-time signature capture; the finalization hook of the async signing
/// flow. While the order is still an estimate, a recorded signature
/// advances it to Approved. Immutable once set.
pub async fn submit_signature(
    state: &AppState,
    id: Uuid,
    payload: SignatureRequest,
) -> AppResult<ApiResponse<WorkOrder>> {
    let order = WorkOrders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if order.signature_kind.is_some() {
        return Err(AppError::BadRequest(
            "Work order is already signed; signatures cannot be replaced".into(),
        ));
    }

    let image = payload.image.as_deref().unwrap_or("").trim();
    let typed_name = payload.typed_name.as_deref().unwrap_or("").trim();
    match payload.kind {
        SignatureKind::Drawn if image.is_empty() => {
            return Err(AppError::validation(
                "image",
                "A drawn signature requires image data",
            ));
        }
        SignatureKind::Typed if typed_name.is_empty() => {
            return Err(AppError::validation(
                "typed_name",
                "A typed signature requires a name",
            ));
        }
        _ => {}
    }

    let settings = state.time_settings.read().await.clone();
    let signed_at = clock::resolve_current_time(&settings)?;

    let status = order.status.clone();
    let mut active: OrderActive = order.into();
    active.signature_kind = Set(Some(payload.kind.as_str().to_string()));
    active.signature_image = Set(payload.image.filter(|i| !i.trim().is_empty()));
    active.signature_typed_name = Set(payload.typed_name.filter(|n| !n.trim().is_empty()));
    active.signer_name = Set(payload.signer_name);
    active.signed_at = Set(Some(signed_at.into()));
    if status == WorkOrderStatus::Estimate.as_str() {
        active.status = Set(WorkOrderStatus::Approved.as_str().to_string());
    }
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Signature recorded",
        work_order_from_entity(order),
        Some(Meta::empty()),
    ))
}

/// Hard delete, no undo. Amending an order is delete-and-recreate, so this
/// is also the only way to change line items.
pub async fn delete_work_order(
    state: &AppState,
    id: Uuid,
    confirm: Option<&str>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if confirm != Some("DELETE") {
        return Err(AppError::BadRequest(
            "Deleting a work order requires confirm=DELETE".into(),
        ));
    }

    let txn = state.orm.begin().await?;
    let order = WorkOrders::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let items_deleted = WorkOrderItems::delete_many()
        .filter(ItemCol::WorkOrderId.eq(order.id))
        .exec(&txn)
        .await?
        .rows_affected;
    WorkOrders::delete_by_id(order.id).exec(&txn).await?;
    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        "work_order_delete",
        Some("work_orders"),
        Some(serde_json::json!({ "work_order_id": id, "items_deleted": items_deleted })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Work order deleted",
        serde_json::json!({ "work_order_id": id, "items_deleted": items_deleted }),
        Some(Meta::empty()),
    ))
}

/// Resolve form rows against the catalog, snapshotting prices and names.
/// Rows without a selected part/labor, or with a zero quantity, are
/// incomplete: they are dropped rather than rejected.
async fn resolve_lines(
    state: &AppState,
    requests: &[LineItemRequest],
) -> AppResult<Vec<ResolvedLine>> {
    let mut lines = Vec::new();
    let mut errors: Vec<FieldError> = Vec::new();

    for (index, request) in requests.iter().enumerate() {
        match request.kind {
            LineKind::Part => {
                let Some(part_id) = request.part_id else {
                    continue;
                };
                if request.quantity <= 0.0 {
                    continue;
                }
                if !pricing::is_valid_part_quantity(request.quantity) {
                    errors.push(FieldError::new(
                        format!("items[{index}].quantity"),
                        "Part quantity must be a whole number",
                    ));
                    continue;
                }
                let part = Parts::find_by_id(part_id)
                    .one(&state.orm)
                    .await?
                    .ok_or(AppError::NotFound)?;
                let costs = part.costs();
                lines.push(ResolvedLine {
                    kind: LineKind::Part,
                    part_id: Some(part.id),
                    labor_id: None,
                    description: part.item_name,
                    quantity: request.quantity,
                    unit_cost_cents: costs.charged_cents,
                });
            }
            LineKind::Labor => {
                let Some(labor_id) = request.labor_id else {
                    continue;
                };
                if request.quantity <= 0.0 {
                    continue;
                }
                if !pricing::is_valid_labor_quantity(request.quantity) {
                    errors.push(FieldError::new(
                        format!("items[{index}].quantity"),
                        "Labor hours are booked in quarter-hour steps",
                    ));
                    continue;
                }
                let labor = LaborEntries::find_by_id(labor_id)
                    .one(&state.orm)
                    .await?
                    .ok_or(AppError::NotFound)?;
                lines.push(ResolvedLine {
                    kind: LineKind::Labor,
                    part_id: None,
                    labor_id: Some(labor.id),
                    description: labor.name,
                    quantity: request.quantity,
                    unit_cost_cents: labor.cost_cents,
                });
            }
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    Ok(lines)
}

pub async fn items_for_order(state: &AppState, order_id: Uuid) -> AppResult<Vec<WorkOrderItem>> {
    Ok(WorkOrderItems::find()
        .filter(ItemCol::WorkOrderId.eq(order_id))
        .order_by_asc(ItemCol::Position)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(item_from_entity)
        .collect())
}

pub fn work_order_from_entity(model: OrderModel) -> WorkOrder {
    let status = WorkOrderStatus::parse(&model.status).unwrap_or(WorkOrderStatus::Estimate);
    let signature = match (&model.signature_kind, model.signed_at) {
        (Some(kind), Some(signed_at)) => Some(Signature {
            kind: if kind == "typed" {
                SignatureKind::Typed
            } else {
                SignatureKind::Drawn
            },
            image: model.signature_image.clone(),
            typed_name: model.signature_typed_name.clone(),
            signer_name: model.signer_name.clone(),
            signed_at: signed_at.with_timezone(&Utc),
        }),
        _ => None,
    };
    WorkOrder {
        id: model.id,
        customer_id: model.customer_id,
        vehicle_id: model.vehicle_id,
        status,
        tax_rate: model.tax_rate,
        subtotal_cents: model.subtotal_cents,
        tax_cents: model.tax_cents,
        total_cents: model.total_cents,
        notes: model.notes,
        signature,
        created_in_dst: model.created_in_dst,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

pub fn item_from_entity(model: ItemModel) -> WorkOrderItem {
    WorkOrderItem {
        id: model.id,
        work_order_id: model.work_order_id,
        kind: model.kind,
        part_id: model.part_id,
        labor_id: model.labor_id,
        description: model.description,
        quantity: model.quantity,
        unit_cost_cents: model.unit_cost_cents,
        position: model.position,
    }
}
