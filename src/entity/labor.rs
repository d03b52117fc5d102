use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "labor")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub cost_cents: i64,
    pub category: String,
    pub description: Option<String>,
    pub estimated_hours: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::work_order_items::Entity")]
    WorkOrderItems,
}

impl Related<super::work_order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkOrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
