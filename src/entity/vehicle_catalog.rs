use sea_orm::entity::prelude::*;

/// Read-only make/model/year reference table, seeded once.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicle_catalog")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
