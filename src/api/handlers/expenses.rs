//! Expense CRUD request handlers.
//!
//! Handlers parse and validate the request, delegate to `ExpenseService`
//! and render the success envelope. Failures are `AppError`s rendered by
//! the error handler.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::EXPENSE_TAG;
use crate::api::dto::{
    ApiResponse, CreateExpenseRequest, ErrorResponse, ExpenseCreated, ExpenseDetail, ExpenseList,
    ExpenseResponse, MessageResponse, UpdateExpenseRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::services::messages;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates expense routes.
///
/// Routes:
/// - POST /                - Record an expense
/// - GET /                 - List the caller's expenses
/// - GET /{expenseid}      - Get expense by id
/// - PUT /{expenseid}      - Replace an expense's mutable fields
/// - PATCH /{expenseid}    - Same as PUT
/// - DELETE /{expenseid}   - Delete expense by id
///
/// All routes expect `auth_middleware` to have inserted `AuthUser`.
pub fn expense_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_expense, list_expenses))
        .routes(routes!(get_expense, update_expense, patch_expense, delete_expense))
}

/// POST /api/expenses - Record an expense
///
/// `id_user` defaults to the authenticated user when omitted.
#[utoipa::path(
    post,
    path = "/",
    tag = EXPENSE_TAG,
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense created", body = ApiResponse<ExpenseCreated>),
        (status = 400, description = "Malformed or invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn create_expense(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateExpenseRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ExpenseCreated>>)> {
    let command = payload.into_command(&auth_user.user_id);
    let expense = state.services.expenses.create_expense(command).await?;

    tracing::info!(expenseid = %expense.expenseid, id_user = %expense.id_user, "Expense created");

    let body = ApiResponse::success(ExpenseCreated {
        expenseid: expense.expenseid,
    })
    .with_message(messages::CREATED);
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /api/expenses - List the caller's expenses
///
/// Ordered by transaction date, then creation time. A user with no
/// expenses gets 404.
#[utoipa::path(
    get,
    path = "/",
    tag = EXPENSE_TAG,
    responses(
        (status = 200, description = "Expenses of the caller", body = ApiResponse<ExpenseList>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Caller has no expenses", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn list_expenses(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ApiResponse<ExpenseList>>> {
    let expenses = state
        .services
        .expenses
        .list_user_expenses(&auth_user.user_id)
        .await?;

    let expenses = expenses.into_iter().map(ExpenseResponse::from).collect();
    Ok(Json(ApiResponse::success(ExpenseList { expenses })))
}

/// GET /api/expenses/{expenseid} - Get expense by id
#[utoipa::path(
    get,
    path = "/{expenseid}",
    tag = EXPENSE_TAG,
    params(
        ("expenseid" = String, Path, description = "Expense id")
    ),
    responses(
        (status = 200, description = "Expense found", body = ApiResponse<ExpenseDetail>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn get_expense(
    State(state): State<AppState>,
    Path(expenseid): Path<String>,
) -> AppResult<Json<ApiResponse<ExpenseDetail>>> {
    let expense = state.services.expenses.get_expense(&expenseid).await?;
    Ok(Json(ApiResponse::success(ExpenseDetail {
        expense: ExpenseResponse::from(expense),
    })))
}

/// PUT /api/expenses/{expenseid} - Replace an expense's mutable fields
///
/// `expenseid` and `id_user` cannot be changed.
#[utoipa::path(
    put,
    path = "/{expenseid}",
    tag = EXPENSE_TAG,
    params(
        ("expenseid" = String, Path, description = "Expense id")
    ),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Expense updated", body = MessageResponse),
        (status = 400, description = "Malformed or invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn update_expense(
    State(state): State<AppState>,
    Path(expenseid): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateExpenseRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .expenses
        .update_expense(&expenseid, payload.into_changes())
        .await?;

    tracing::info!(expenseid = %expenseid, "Expense updated");
    Ok(Json(MessageResponse::success(messages::UPDATED)))
}

/// PATCH /api/expenses/{expenseid} - Alias of PUT
///
/// Applies the same full replacement as PUT.
#[utoipa::path(
    patch,
    path = "/{expenseid}",
    tag = EXPENSE_TAG,
    params(
        ("expenseid" = String, Path, description = "Expense id")
    ),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Expense updated", body = MessageResponse),
        (status = 400, description = "Malformed or invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn patch_expense(
    state: State<AppState>,
    expenseid: Path<String>,
    payload: ValidatedJson<UpdateExpenseRequest>,
) -> AppResult<Json<MessageResponse>> {
    update_expense(state, expenseid, payload).await
}

/// DELETE /api/expenses/{expenseid} - Delete expense by id
#[utoipa::path(
    delete,
    path = "/{expenseid}",
    tag = EXPENSE_TAG,
    params(
        ("expenseid" = String, Path, description = "Expense id")
    ),
    responses(
        (status = 200, description = "Expense deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    ),
    security(("bearerAuth" = []))
)]
async fn delete_expense(
    State(state): State<AppState>,
    Path(expenseid): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.expenses.delete_expense(&expenseid).await?;

    tracing::info!(expenseid = %expenseid, "Expense deleted");
    Ok(Json(MessageResponse::success(messages::DELETED)))
}
