use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub brand: String,
    pub item_name: String,
    pub part_number: String,
    pub category: String,
    pub description: Option<String>,
    /// Legacy single-cost column; newer rows leave it NULL.
    pub cost_cents: Option<i64>,
    pub cost_paid_cents: Option<i64>,
    pub cost_charged_cents: Option<i64>,
    /// Legacy availability flag, superseded by `quantity_on_hand`.
    pub in_stock: Option<bool>,
    pub quantity_on_hand: i32,
    pub created_at: DateTimeWithTimeZone,
}

/// The normalized two-cost shape every caller sees, regardless of which
/// schema generation a row was written under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartCosts {
    pub paid_cents: i64,
    pub charged_cents: i64,
}

impl PartCosts {
    pub fn profit_cents(&self) -> i64 {
        self.charged_cents - self.paid_cents
    }
}

impl Model {
    /// Normalize the dual schema shapes at the data-access boundary.
    /// Legacy rows carry only `cost_cents`; for those, charged == paid.
    pub fn costs(&self) -> PartCosts {
        match (self.cost_paid_cents, self.cost_charged_cents) {
            (Some(paid), Some(charged)) => PartCosts {
                paid_cents: paid,
                charged_cents: charged,
            },
            (Some(paid), None) => PartCosts {
                paid_cents: paid,
                charged_cents: paid,
            },
            (None, Some(charged)) => PartCosts {
                paid_cents: charged,
                charged_cents: charged,
            },
            (None, None) => {
                let legacy = self.cost_cents.unwrap_or(0);
                PartCosts {
                    paid_cents: legacy,
                    charged_cents: legacy,
                }
            }
        }
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn part(cost: Option<i64>, paid: Option<i64>, charged: Option<i64>) -> Model {
        Model {
            id: Uuid::new_v4(),
            brand: "ACDelco".into(),
            item_name: "Oil Filter".into(),
            part_number: "PF63".into(),
            category: "Filters".into(),
            description: None,
            cost_cents: cost,
            cost_paid_cents: paid,
            cost_charged_cents: charged,
            in_stock: None,
            quantity_on_hand: 4,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn two_cost_rows_pass_through() {
        let costs = part(None, Some(450), Some(999)).costs();
        assert_eq!(costs.paid_cents, 450);
        assert_eq!(costs.charged_cents, 999);
        assert_eq!(costs.profit_cents(), 549);
    }

    #[test]
    fn legacy_rows_default_charged_to_paid() {
        let costs = part(Some(700), None, None).costs();
        assert_eq!(costs.paid_cents, 700);
        assert_eq!(costs.charged_cents, 700);
        assert_eq!(costs.profit_cents(), 0);
    }

    #[test]
    fn half_migrated_rows_never_panic() {
        assert_eq!(part(None, Some(500), None).costs().charged_cents, 500);
        assert_eq!(part(None, None, Some(800)).costs().paid_cents, 800);
        assert_eq!(part(None, None, None).costs().charged_cents, 0);
    }
}
