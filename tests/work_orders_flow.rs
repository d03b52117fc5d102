use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_autoshop_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        customers::CreateCustomerRequest,
        email::ConfigureEmailRequest,
        vehicles::CreateVehicleRequest,
        work_orders::{CreateWorkOrderRequest, LineItemRequest, LineKind, SignatureRequest, UpdateStatusRequest},
    },
    entity::{labor::ActiveModel as LaborActive, parts::ActiveModel as PartActive, vehicle_catalog::ActiveModel as CatalogActive},
    error::AppError,
    mailer::{EmailConfig, Mailer, MailerError, OutboundEmail},
    models::{SignatureKind, WorkOrderStatus},
    services::{customer_service, email_service, vehicle_service, work_order_service},
    state::AppState,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

/// Mailer that records every message instead of delivering it.
struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, _config: &EmailConfig, email: &OutboundEmail) -> Result<(), MailerError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// Integration flow: customer and vehicle on file -> priced estimate ->
// signature approval -> completion with email -> cascade delete.
#[tokio::test]
async fn estimate_signature_completion_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let mailer = Arc::new(RecordingMailer::new());
    let state = setup_state(&database_url, mailer.clone()).await?;

    // Reference data the vehicle check needs
    CatalogActive {
        id: Set(Uuid::new_v4()),
        make: Set("Toyota".into()),
        model: Set("Camry".into()),
        year: Set(2018),
    }
    .insert(&state.orm)
    .await?;

    let part = PartActive {
        id: Set(Uuid::new_v4()),
        brand: Set("Wagner".into()),
        item_name: Set("Front Brake Pads".into()),
        part_number: Set("ZD1092".into()),
        category: Set("Brakes".into()),
        description: Set(None),
        cost_cents: Set(None),
        cost_paid_cents: Set(Some(2850)),
        cost_charged_cents: Set(Some(6000)),
        in_stock: Set(None),
        quantity_on_hand: Set(8),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    let labor = LaborActive {
        id: Set(Uuid::new_v4()),
        name: Set("Brake Inspection".into()),
        cost_cents: Set(3500),
        category: Set("Brakes".into()),
        description: Set(None),
        estimated_hours: Set(1.0),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    let customer = customer_service::create_customer(
        &state,
        CreateCustomerRequest {
            first_name: "Pat".into(),
            last_name: "Doe".into(),
            phone: Some("555-0100".into()),
            email: Some("pat@example.com".into()),
            address: None,
            city: None,
            state: None,
            postal_code: None,
        },
    )
    .await?
    .data
    .unwrap();

    let vehicle = vehicle_service::create_vehicle(
        &state,
        CreateVehicleRequest {
            customer_id: customer.id,
            year: 2018,
            make: "Toyota".into(),
            model: "Camry".into(),
            vin: None,
            license_plate: None,
            color: None,
            mileage: Some(64000),
            engine_size: None,
            transmission: None,
            notes: None,
        },
    )
    .await?
    .data
    .unwrap();

    // Priced estimate; the incomplete row must be dropped silently
    let created = work_order_service::create_work_order(
        &state,
        CreateWorkOrderRequest {
            customer_id: customer.id,
            vehicle_id: Some(vehicle.id),
            items: vec![
                LineItemRequest {
                    kind: LineKind::Part,
                    part_id: Some(part.id),
                    labor_id: None,
                    quantity: 1.0,
                },
                LineItemRequest {
                    kind: LineKind::Labor,
                    part_id: None,
                    labor_id: Some(labor.id),
                    quantity: 1.0,
                },
                LineItemRequest {
                    kind: LineKind::Part,
                    part_id: None,
                    labor_id: None,
                    quantity: 3.0,
                },
            ],
            tax_rate: 0.0825,
            notes: None,
        },
    )
    .await?
    .data
    .unwrap();

    let order = created.order;
    assert_eq!(order.status, WorkOrderStatus::Estimate);
    assert_eq!(order.subtotal_cents, 9500);
    assert_eq!(order.tax_cents, 784);
    assert_eq!(order.total_cents, 10284);
    assert_eq!(created.items.len(), 2);
    assert_eq!(created.items[0].description, "Front Brake Pads");
    assert_eq!(created.items[0].unit_cost_cents, 6000);

    // Typed signature approves the estimate
    let signed = work_order_service::submit_signature(
        &state,
        order.id,
        SignatureRequest {
            kind: SignatureKind::Typed,
            image: None,
            typed_name: Some("Pat Doe".into()),
            signer_name: Some("Pat Doe".into()),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(signed.status, WorkOrderStatus::Approved);
    assert!(signed.signature.is_some());

    // Second signature attempt is rejected
    let again = work_order_service::submit_signature(
        &state,
        order.id,
        SignatureRequest {
            kind: SignatureKind::Typed,
            image: None,
            typed_name: Some("Someone Else".into()),
            signer_name: None,
        },
    )
    .await;
    assert!(again.is_err());

    // Completion before email is configured: transition stands, send fails
    let result = work_order_service::update_status(
        &state,
        order.id,
        UpdateStatusRequest {
            status: WorkOrderStatus::Complete,
            send_email: Some(true),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(result.order.status, WorkOrderStatus::Complete);
    assert!(result.email_prompt);
    assert!(!result.email_sent);
    assert!(result.email_warning.is_some());

    // Configure the relay and resend
    email_service::configure(
        &state,
        ConfigureEmailRequest {
            relay_url: "https://relay.test/send".into(),
            api_key: "key".into(),
            from_address: "shop@example.com".into(),
            from_name: Some("Main Street Auto".into()),
        },
    )
    .await?;

    let outcome = email_service::send_completion(&state, order.id).await?.data.unwrap();
    assert!(outcome.sent);
    assert_eq!(outcome.recipient, "pat@example.com");

    let receipt = email_service::send_receipt(&state, order.id).await?.data.unwrap();
    assert!(receipt.sent);

    {
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].html_body.contains("$102.84"));
    }

    // Deleting the vehicle directly is refused while the order references it
    let blocked = vehicle_service::delete_vehicle(&state, vehicle.id).await;
    match blocked {
        Err(AppError::BadRequest(message)) => {
            assert!(message.contains("work order"), "{message}")
        }
        other => panic!("expected BadRequest, got {other:?}"),
    }

    // Cascade delete takes the vehicle and the order with it
    let summary = customer_service::delete_customer(&state, customer.id, Some("DELETE"))
        .await?
        .data
        .unwrap();
    assert_eq!(summary.vehicles_deleted, 1);
    assert_eq!(summary.work_orders_deleted, 1);

    Ok(())
}

async fn setup_state(database_url: &str, mailer: Arc<RecordingMailer>) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE work_order_items, work_orders, vehicles, vehicle_catalog, parts, labor, audit_logs, customers RESTART IDENTITY CASCADE",
    ))
    .await?;

    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        backup_dir: PathBuf::from("./backups"),
        backup_databases: Vec::new(),
    };

    Ok(AppState::new(pool, orm, config, mailer))
}
