pub mod customers;
pub mod labor;
pub mod parts;
pub mod vehicle_catalog;
pub mod vehicles;
pub mod work_order_items;
pub mod work_orders;

pub use customers::Entity as Customers;
pub use labor::Entity as Labor;
pub use parts::Entity as Parts;
pub use vehicle_catalog::Entity as VehicleCatalog;
pub use vehicles::Entity as Vehicles;
pub use work_order_items::Entity as WorkOrderItems;
pub use work_orders::Entity as WorkOrders;
