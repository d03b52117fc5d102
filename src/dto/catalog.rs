use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct MakeList {
    pub makes: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ModelQuery {
    pub make: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelList {
    pub models: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct YearQuery {
    pub make: String,
    pub model: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct YearList {
    pub years: Vec<i32>,
}
