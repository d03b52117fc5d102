use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub customer_id: Uuid,
    /// NULL in estimate-only mode.
    pub vehicle_id: Option<Uuid>,
    pub status: String,
    pub tax_rate: f64,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub notes: Option<String>,
    pub signature_kind: Option<String>,
    pub signature_image: Option<String>,
    pub signature_typed_name: Option<String>,
    pub signer_name: Option<String>,
    pub signed_at: Option<DateTimeWithTimeZone>,
    /// Informational only; the stored instants are always absolute UTC.
    pub created_in_dst: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(
        belongs_to = "super::vehicles::Entity",
        from = "Column::VehicleId",
        to = "super::vehicles::Column::Id"
    )]
    Vehicles,
    #[sea_orm(has_many = "super::work_order_items::Entity")]
    WorkOrderItems,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::vehicles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicles.def()
    }
}

impl Related<super::work_order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
