use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLearningPathRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "At least one step is required"))]
    #[schema(value_type = Vec<Object>)]
    pub steps: Vec<serde_json::Value>,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Grade level is required"))]
    pub grade_level: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LearningPathQuery {
    /// Only return the path published under this code.
    pub share_code: Option<String>,
}
