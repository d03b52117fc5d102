use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Matches against name, phone and email.
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VehicleQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PartQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Matches against item name, part number and brand.
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LaborQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WorkOrderQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub customer_id: Option<Uuid>,
    pub status: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_inputs() {
        let p = Pagination {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(p.normalize(), (1, 100, 0));

        let p = Pagination {
            page: Some(3),
            per_page: None,
        };
        assert_eq!(p.normalize(), (3, 20, 40));
    }
}
