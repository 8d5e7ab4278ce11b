//! Intent 模块 - 展示层到控制器的统一分发
//!
//! The presentation layer never touches controller state directly; it sends
//! one of these intents and re-renders from the next snapshot.
//!
//! ```json
//! { "type": "ChangeField", "data": { "field": "hireDate", "value": "2024-01-02" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::form::FormField;
use crate::models::EmployeeId;

/// User intents the console core understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ConsoleIntent {
    /// Re-fetch the list
    Refresh,
    /// Open the form in create mode
    OpenCreate,
    /// Open the form seeded from an existing row
    OpenEdit { id: EmployeeId },
    /// Edit one draft field
    ChangeField { field: FormField, value: String },
    /// Submit the open form
    Submit,
    /// Close the form, discarding the draft
    Close,
    /// Remove a row (asks for confirmation first)
    Delete { id: EmployeeId },
    /// Dismiss the inline error banner
    DismissError,
}

/// 意图处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentResult {
    /// 是否成功
    pub success: bool,
    /// 操作消息
    pub message: String,
}

impl IntentResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
