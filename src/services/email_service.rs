//! Notification dispatch.
//!
//! The decision of *whether* to offer an email is pure and tested; the send
//! itself is delegated to the mailer collaborator. During a status
//! transition a failed send is downgraded to a warning and never unwinds
//! the committed change; the standalone `/email/*` endpoints surface the
//! failure verbatim instead.

use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    dto::email::{ConfigureEmailRequest, SendOutcome, TestEmailRequest},
    entity::{customers::Entity as Customers, vehicles::Entity as Vehicles, work_orders::Entity as WorkOrders},
    error::{AppError, AppResult},
    mailer::{EmailConfig, OutboundEmail},
    models::WorkOrderStatus,
    receipt,
    response::{ApiResponse, Meta},
    services::{customer_service, vehicle_service, work_order_service},
    state::AppState,
};

const SHOP_NAME: &str = "Main Street Auto";

/// True only when a completed order can actually reach somebody.
pub fn should_prompt_for_email(new_status: WorkOrderStatus, has_recipient_email: bool) -> bool {
    new_status == WorkOrderStatus::Complete && has_recipient_email
}

/// A minimal local@domain check; the relay does the real verification.
pub fn is_usable_email(email: Option<&str>) -> bool {
    match email {
        Some(email) => {
            let email = email.trim();
            match email.split_once('@') {
                Some((local, domain)) => {
                    !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
                }
                None => false,
            }
        }
        None => false,
    }
}

pub async fn configure(
    state: &AppState,
    payload: ConfigureEmailRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !is_usable_email(Some(&payload.from_address)) {
        return Err(AppError::validation(
            "from_address",
            "Malformed sender address",
        ));
    }
    if payload.relay_url.is_empty() {
        return Err(AppError::validation("relay_url", "Relay URL is required"));
    }

    let config = EmailConfig {
        relay_url: payload.relay_url,
        api_key: payload.api_key,
        from_address: payload.from_address,
        from_name: payload.from_name,
    };
    *state.email_config.write().await = Some(config);

    // Credentials stay in memory only; nothing is persisted.
    Ok(ApiResponse::success(
        "Email configured",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn send_test(
    state: &AppState,
    payload: TestEmailRequest,
) -> AppResult<ApiResponse<SendOutcome>> {
    if !is_usable_email(Some(&payload.to)) {
        return Err(AppError::validation("to", "Malformed recipient address"));
    }
    let email = OutboundEmail {
        to: payload.to.clone(),
        subject: format!("{SHOP_NAME} test message"),
        html_body: "<p>Email sending is configured correctly.</p>".to_string(),
    };
    deliver(state, &email).await?;
    Ok(ApiResponse::success(
        "Test email sent",
        SendOutcome {
            sent: true,
            recipient: payload.to,
        },
        Some(Meta::empty()),
    ))
}

pub async fn send_receipt(state: &AppState, order_id: Uuid) -> AppResult<ApiResponse<SendOutcome>> {
    let email = build_order_email(state, order_id, EmailBody::Receipt).await?;
    deliver(state, &email).await?;
    Ok(ApiResponse::success(
        "Receipt sent",
        SendOutcome {
            sent: true,
            recipient: email.to,
        },
        Some(Meta::empty()),
    ))
}

pub async fn send_completion(
    state: &AppState,
    order_id: Uuid,
) -> AppResult<ApiResponse<SendOutcome>> {
    let email = build_order_email(state, order_id, EmailBody::Completion).await?;
    deliver(state, &email).await?;
    Ok(ApiResponse::success(
        "Completion notice sent",
        SendOutcome {
            sent: true,
            recipient: email.to,
        },
        Some(Meta::empty()),
    ))
}

pub(crate) enum EmailBody {
    Receipt,
    Completion,
}

/// Render the receipt or completion body for a work order, addressed to its
/// customer. Fails when the customer has no usable email on file.
pub(crate) async fn build_order_email(
    state: &AppState,
    order_id: Uuid,
    body: EmailBody,
) -> AppResult<OutboundEmail> {
    let order = WorkOrders::find_by_id(order_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let customer = Customers::find_by_id(order.customer_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let vehicle = match order.vehicle_id {
        Some(vehicle_id) => Vehicles::find_by_id(vehicle_id).one(&state.orm).await?,
        None => None,
    };

    if !is_usable_email(customer.email.as_deref()) {
        return Err(AppError::BadRequest(
            "Customer has no usable email address".into(),
        ));
    }
    let to = customer.email.clone().unwrap_or_default();

    let items = work_order_service::items_for_order(state, order_id).await?;
    let order = work_order_service::work_order_from_entity(order);
    let customer = customer_service::customer_from_entity(customer);
    let vehicle = vehicle.map(vehicle_service::vehicle_from_entity);

    let settings = state.time_settings.read().await.clone();
    let tz = settings.effective_timezone()?;
    let timestamp = crate::clock::format_for_display(order.created_at, tz);

    let (subject, html_body) = match body {
        EmailBody::Receipt => (
            format!("{SHOP_NAME} receipt"),
            receipt::render_receipt(&order, &customer, vehicle.as_ref(), &items, SHOP_NAME, &timestamp),
        ),
        EmailBody::Completion => (
            format!("{SHOP_NAME}: your vehicle is ready"),
            receipt::render_completion_notice(&order, &customer, SHOP_NAME, &timestamp),
        ),
    };

    Ok(OutboundEmail {
        to,
        subject,
        html_body,
    })
}

/// Send through the collaborator using the in-memory config.
pub(crate) async fn deliver(state: &AppState, email: &OutboundEmail) -> AppResult<()> {
    let config = state
        .email_config
        .read()
        .await
        .clone()
        .ok_or_else(|| AppError::BadRequest("Email is not configured".into()))?;
    state
        .mailer
        .send(&config, email)
        .await
        .map_err(|err| AppError::Mail(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_only_for_complete_with_email() {
        assert!(should_prompt_for_email(WorkOrderStatus::Complete, true));
        assert!(!should_prompt_for_email(WorkOrderStatus::Complete, false));
        for status in [
            WorkOrderStatus::Estimate,
            WorkOrderStatus::Approved,
            WorkOrderStatus::Started,
            WorkOrderStatus::Cancelled,
        ] {
            assert!(!should_prompt_for_email(status, true));
            assert!(!should_prompt_for_email(status, false));
        }
    }

    #[test]
    fn usable_email_check() {
        assert!(is_usable_email(Some("rosa@example.com")));
        assert!(!is_usable_email(Some("")));
        assert!(!is_usable_email(Some("rosa")));
        assert!(!is_usable_email(Some("@example.com")));
        assert!(!is_usable_email(Some("rosa@localhost")));
        assert!(!is_usable_email(None));
    }
}
