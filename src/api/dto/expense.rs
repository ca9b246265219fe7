//! Expense DTOs for API requests and responses.

use bigdecimal::BigDecimal;
use jiff_diesel::ToDiesel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{CreateExpense, Expense, ExpenseChanges};

/// Request body for recording an expense.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "id_user": "u1",
    "category": "food",
    "uangmasuk": 0,
    "uangkeluar": 15000,
    "uangakhir": 85000,
    "description": "lunch",
    "transaction_date": "2024-01-01"
}))]
pub struct CreateExpenseRequest {
    /// Owner of the expense; defaults to the authenticated user
    #[validate(length(min = 1, max = 255, message = "id_user must not be empty"))]
    pub id_user: Option<String>,

    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: String,

    /// Money in
    #[serde(deserialize_with = "amount::deserialize")]
    #[schema(value_type = String, example = "0")]
    pub uangmasuk: BigDecimal,

    /// Money out
    #[serde(deserialize_with = "amount::deserialize")]
    #[schema(value_type = String, example = "15000")]
    pub uangkeluar: BigDecimal,

    /// Ending balance
    #[serde(deserialize_with = "amount::deserialize")]
    #[schema(value_type = String, example = "85000")]
    pub uangakhir: BigDecimal,

    #[serde(default)]
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub transaction_date: jiff::civil::Date,
}

impl CreateExpenseRequest {
    /// Builds the create command, owning it to `auth_user_id` unless the
    /// body names a user.
    pub fn into_command(self, auth_user_id: &str) -> CreateExpense {
        CreateExpense {
            id_user: self.id_user.unwrap_or_else(|| auth_user_id.to_string()),
            category: self.category,
            uangmasuk: self.uangmasuk,
            uangkeluar: self.uangkeluar,
            uangakhir: self.uangakhir,
            description: self.description,
            transaction_date: self.transaction_date,
        }
    }
}

/// Request body for replacing an expense's mutable fields.
///
/// `expenseid` and `id_user` are not accepted; unknown fields are ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateExpenseRequest {
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: String,

    #[serde(deserialize_with = "amount::deserialize")]
    #[schema(value_type = String, example = "0")]
    pub uangmasuk: BigDecimal,

    #[serde(deserialize_with = "amount::deserialize")]
    #[schema(value_type = String, example = "20000")]
    pub uangkeluar: BigDecimal,

    #[serde(deserialize_with = "amount::deserialize")]
    #[schema(value_type = String, example = "65000")]
    pub uangakhir: BigDecimal,

    /// Omitted or null clears the stored description
    #[serde(default)]
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[schema(value_type = String, format = Date, example = "2024-01-02")]
    pub transaction_date: jiff::civil::Date,
}

impl UpdateExpenseRequest {
    pub fn into_changes(self) -> ExpenseChanges {
        ExpenseChanges {
            category: self.category,
            uangmasuk: self.uangmasuk,
            uangkeluar: self.uangkeluar,
            uangakhir: self.uangakhir,
            description: self.description,
            transaction_date: self.transaction_date.to_diesel(),
        }
    }
}

/// Expense as returned to clients. Amounts are decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    #[schema(example = "V1StGXR8_Z5")]
    pub expenseid: String,
    pub id_user: String,
    pub category: String,
    #[schema(value_type = String, example = "0")]
    pub uangmasuk: BigDecimal,
    #[schema(value_type = String, example = "15000")]
    pub uangkeluar: BigDecimal,
    #[schema(value_type = String, example = "85000")]
    pub uangakhir: BigDecimal,
    pub description: Option<String>,
    #[schema(value_type = String, format = Date)]
    pub transaction_date: jiff::civil::Date,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            expenseid: expense.expenseid,
            id_user: expense.id_user,
            category: expense.category,
            uangmasuk: expense.uangmasuk,
            uangkeluar: expense.uangkeluar,
            uangakhir: expense.uangakhir,
            description: expense.description,
            transaction_date: expense.transaction_date.to_jiff(),
            created_at: expense.created_at.to_jiff(),
            updated_at: expense.updated_at.to_jiff(),
        }
    }
}

/// `data` of a successful create.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseCreated {
    pub expenseid: String,
}

/// `data` of a successful list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseList {
    pub expenses: Vec<ExpenseResponse>,
}

/// `data` of a successful get.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseDetail {
    pub expense: ExpenseResponse,
}

/// Amounts accept JSON numbers or numeric strings. Numbers are read through
/// their shortest decimal form, so `0.1` stays `0.1`.
mod amount {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, de::Error};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s,
            other => {
                return Err(D::Error::custom(format!(
                    "expected a number or numeric string, found {other}"
                )));
            }
        };

        BigDecimal::from_str(text.trim())
            .map_err(|_| D::Error::custom(format!("invalid amount '{text}'")))
    }
}
