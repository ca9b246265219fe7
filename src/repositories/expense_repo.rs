//! Expense repository for async database operations.
//!
//! Provides CRUD operations for the expenses table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Expense, ExpenseChanges, NewExpense};

/// Persistence operations needed by the expense service.
///
/// Every method performs exactly one query. Implementations report raw
/// failures (`Database`, `ConnectionPool`); classifying them for the client
/// is the caller's job.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Inserts a record and returns it as stored.
    async fn create(&self, new_expense: NewExpense) -> AppResult<Expense>;

    /// All records owned by `user_id`, oldest transaction first.
    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Expense>>;

    async fn find_by_id(&self, expense_id: &str) -> AppResult<Option<Expense>>;

    /// Replaces the mutable fields; returns the number of affected rows.
    async fn update(&self, expense_id: &str, changes: ExpenseChanges) -> AppResult<usize>;

    /// Hard-deletes the record; returns the number of deleted rows.
    async fn delete(&self, expense_id: &str) -> AppResult<usize>;

    /// Round-trips a trivial query to check connectivity.
    async fn ping(&self) -> AppResult<()>;
}

/// Expense repository holding an async connection pool.
///
/// `AsyncDbPool` (bb8::Pool) uses `Arc` internally, so cloning only bumps
/// a reference count.
#[derive(Clone)]
pub struct ExpenseRepository {
    pool: AsyncDbPool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseStore for ExpenseRepository {
    async fn create(&self, new_expense: NewExpense) -> AppResult<Expense> {
        use crate::schema::expenses::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(expenses)
            .values(&new_expense)
            .returning(Expense::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| AppError::database("insert expense", e))
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<Expense>> {
        use crate::schema::expenses::dsl::*;
        let mut conn = self.pool.get().await?;

        expenses
            .filter(id_user.eq(user_id))
            .order((transaction_date.asc(), created_at.asc()))
            .select(Expense::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| AppError::database("list expenses by user", e))
    }

    async fn find_by_id(&self, expense_id: &str) -> AppResult<Option<Expense>> {
        use crate::schema::expenses::dsl::*;
        let mut conn = self.pool.get().await?;

        expenses
            .find(expense_id)
            .select(Expense::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| AppError::database("find expense by id", e))
    }

    async fn update(&self, expense_id: &str, changes: ExpenseChanges) -> AppResult<usize> {
        use crate::schema::expenses::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::update(expenses.filter(expenseid.eq(expense_id)))
            .set((&changes, updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(|e| AppError::database("update expense", e))
    }

    async fn delete(&self, expense_id: &str) -> AppResult<usize> {
        use crate::schema::expenses::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(expenses.filter(expenseid.eq(expense_id)))
            .execute(&mut conn)
            .await
            .map_err(|e| AppError::database("delete expense", e))
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| AppError::database("ping", e))
    }
}
