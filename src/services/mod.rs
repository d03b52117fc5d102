pub mod backup_service;
pub mod catalog_service;
pub mod customer_service;
pub mod email_service;
pub mod labor_service;
pub mod part_service;
pub mod report_service;
pub mod vehicle_service;
pub mod work_order_service;
