pub mod backup;
pub mod catalog;
pub mod customers;
pub mod email;
pub mod labor;
pub mod parts;
pub mod reports;
pub mod settings;
pub mod vehicles;
pub mod work_orders;
