//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `response` - The `{status, message?, data?}` envelope
//! - `expense` - Expense request/response DTOs
//! - `health` - Health check DTOs

mod expense;
mod health;
mod response;

pub use expense::{
    CreateExpenseRequest, ExpenseCreated, ExpenseDetail, ExpenseList, ExpenseResponse,
    UpdateExpenseRequest,
};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use response::{ApiResponse, ErrorDetails, ErrorResponse, MessageResponse, ResponseStatus};
