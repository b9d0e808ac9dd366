use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// A single page of a paginated listing
#[derive(Serialize, Deserialize, ToSchema)]
pub struct PaginatedDto<T> {
    /// Total number of items across all pages
    pub count: u64,
    /// Link to the next page, if there is one
    pub next: Option<String>,
    /// Link to the previous page, if there is one
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Page-number pagination parameters shared by list endpoints
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// 1-based page number
    pub page: Option<u64>,
    /// Page size override, capped by the configured maximum
    pub limit: Option<u64>,
}
