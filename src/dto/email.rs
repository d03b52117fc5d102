use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfigureEmailRequest {
    pub relay_url: String,
    pub api_key: String,
    pub from_address: String,
    pub from_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TestEmailRequest {
    pub to: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SendOutcome {
    pub sent: bool,
    pub recipient: String,
}
