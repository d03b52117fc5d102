use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub work_order_id: Uuid,
    /// "part" or "labor".
    pub kind: String,
    pub part_id: Option<Uuid>,
    pub labor_id: Option<Uuid>,
    /// Name snapshot taken at order creation.
    pub description: String,
    /// Fractional for labor hours, integral for parts.
    pub quantity: f64,
    /// Price snapshot; later catalog edits never touch it.
    pub unit_cost_cents: i64,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_orders::Entity",
        from = "Column::WorkOrderId",
        to = "super::work_orders::Column::Id"
    )]
    WorkOrders,
    #[sea_orm(
        belongs_to = "super::parts::Entity",
        from = "Column::PartId",
        to = "super::parts::Column::Id"
    )]
    Parts,
    #[sea_orm(
        belongs_to = "super::labor::Entity",
        from = "Column::LaborId",
        to = "super::labor::Column::Id"
    )]
    Labor,
}

impl Related<super::work_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrders.def()
    }
}

impl Related<super::parts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parts.def()
    }
}

impl Related<super::labor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Labor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
