use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    clock::TimeSettings,
    dto::{
        backup::{BackupFile, BackupList, CreateBackupRequest, DatabaseList, RestoreRequest, RestoreSummary},
        catalog::{MakeList, ModelList, YearList},
        customers::{
            CreateCustomerRequest, CustomerDeleteSummary, CustomerHistory, CustomerList,
            UpdateCustomerRequest,
        },
        email::{ConfigureEmailRequest, SendOutcome, TestEmailRequest},
        labor::{CreateLaborRequest, LaborList, UpdateLaborRequest},
        parts::{CreatePartRequest, PartList, UpdatePartRequest},
        reports::{EmailReportRequest, ReportRequest, ReportSummary, StatusCount},
        settings::TimePreview,
        vehicles::{CreateVehicleRequest, UpdateVehicleRequest, VehicleList},
        work_orders::{
            CreateWorkOrderRequest, LineItemRequest, LineKind, SignatureRequest,
            StatusUpdateResult, UpdateStatusRequest, WorkOrderList, WorkOrderWithItems,
        },
    },
    models::{
        Customer, Labor, Part, Signature, SignatureKind, Vehicle, WorkOrder, WorkOrderItem,
        WorkOrderStatus,
    },
    response::{ApiResponse, Meta},
    routes::{
        backup, catalog, customers, email, health, labor, params, parts, reports, settings,
        vehicles, work_orders,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        customers::list_customers,
        customers::create_customer,
        customers::get_customer,
        customers::update_customer,
        customers::customer_history,
        customers::delete_customer,
        vehicles::list_vehicles,
        vehicles::create_vehicle,
        vehicles::get_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        catalog::list_makes,
        catalog::list_models,
        catalog::list_years,
        parts::list_parts,
        parts::create_part,
        parts::get_part,
        parts::update_part,
        parts::delete_part,
        labor::list_labor,
        labor::create_labor,
        labor::get_labor,
        labor::update_labor,
        labor::delete_labor,
        work_orders::list_work_orders,
        work_orders::create_work_order,
        work_orders::get_work_order,
        work_orders::update_status,
        work_orders::submit_signature,
        work_orders::delete_work_order,
        email::configure_email,
        email::send_test_email,
        email::send_receipt,
        email::send_completion,
        backup::list_databases,
        backup::create_backup,
        backup::list_backups,
        backup::delete_backup,
        backup::restore_backup,
        reports::generate_report,
        reports::generate_report_query,
        reports::email_report,
        settings::get_time_settings,
        settings::update_time_settings,
        settings::preview_time
    ),
    components(
        schemas(
            Customer,
            Vehicle,
            Part,
            Labor,
            WorkOrder,
            WorkOrderItem,
            WorkOrderStatus,
            Signature,
            SignatureKind,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CustomerList,
            CustomerHistory,
            CustomerDeleteSummary,
            CreateVehicleRequest,
            UpdateVehicleRequest,
            VehicleList,
            MakeList,
            ModelList,
            YearList,
            CreatePartRequest,
            UpdatePartRequest,
            PartList,
            CreateLaborRequest,
            UpdateLaborRequest,
            LaborList,
            LineKind,
            LineItemRequest,
            CreateWorkOrderRequest,
            WorkOrderWithItems,
            WorkOrderList,
            UpdateStatusRequest,
            StatusUpdateResult,
            SignatureRequest,
            ConfigureEmailRequest,
            TestEmailRequest,
            SendOutcome,
            DatabaseList,
            CreateBackupRequest,
            BackupFile,
            BackupList,
            RestoreRequest,
            RestoreSummary,
            ReportRequest,
            EmailReportRequest,
            StatusCount,
            ReportSummary,
            TimeSettings,
            TimePreview,
            params::Pagination,
            Meta,
            ApiResponse<Customer>,
            ApiResponse<WorkOrderWithItems>,
            ApiResponse<WorkOrderList>,
            ApiResponse<ReportSummary>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Customers", description = "Customer records"),
        (name = "Vehicles", description = "Vehicles on file"),
        (name = "Catalog", description = "Vehicle make/model/year reference data"),
        (name = "Parts", description = "Parts catalog"),
        (name = "Labor", description = "Labor catalog"),
        (name = "Work Orders", description = "Estimates and work orders"),
        (name = "Email", description = "Customer notifications"),
        (name = "Backup", description = "Database backup and restore"),
        (name = "Reports", description = "Date-range summaries"),
        (name = "Settings", description = "Time override settings"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
