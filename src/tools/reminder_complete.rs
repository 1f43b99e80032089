use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderCompleteParams {
    #[schemars(description = "Issue number of the reminder to complete")]
    pub issue_number: u64,

    #[schemars(description = "Optional completion comment posted on the issue")]
    pub comment: Option<String>,
}
