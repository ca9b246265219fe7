//! Expense service for business logic operations.
//!
//! Each operation performs exactly one store call (plus one id generation for
//! create) and classifies the outcome: a domain "not found" passes through
//! unchanged, anything else is logged once and surfaced as `Internal` with a
//! client-safe message.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{CreateExpense, Expense, ExpenseChanges, NewExpense};
use crate::repositories::ExpenseStore;
use crate::utils::id::IdGenerator;

/// Client-facing messages for every expense outcome.
pub mod messages {
    pub const CREATED: &str = "Expense berhasil ditambahkan";
    pub const UPDATED: &str = "Expense berhasil diperbarui";
    pub const DELETED: &str = "Expense berhasil dihapus";

    pub const NONE_FOR_USER: &str = "Tidak ada data expense ditemukan";
    pub const NOT_FOUND: &str = "Expense tidak ditemukan";
    pub const UPDATE_NOT_FOUND: &str = "Expense gagal diperbarui. Id tidak ditemukan";
    pub const DELETE_NOT_FOUND: &str = "Expense gagal dihapus. Id tidak ditemukan";

    pub const CREATE_FAILED: &str = "Gagal menambahkan expense";
    pub const LIST_FAILED: &str = "Gagal mengambil data expenses";
    pub const GET_FAILED: &str = "Gagal mengambil data expense";
    pub const UPDATE_FAILED: &str = "Gagal memperbarui expense";
    pub const DELETE_FAILED: &str = "Gagal menghapus expense";
}

/// Expense service for handling expense-related business logic.
#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
    ids: Arc<dyn IdGenerator>,
}

impl ExpenseService {
    /// Creates a new ExpenseService over the given store and id source.
    pub fn new(store: Arc<dyn ExpenseStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// Records a new expense under a freshly generated id.
    ///
    /// # Returns
    /// The stored expense, including its `expenseid`
    pub async fn create_expense(&self, input: CreateExpense) -> AppResult<Expense> {
        let new_expense = NewExpense::new(self.ids.generate(), input);

        self.store
            .create(new_expense)
            .await
            .map_err(|e| classify(e, "Error adding expense", messages::CREATE_FAILED))
    }

    /// Lists every expense owned by `user_id`.
    ///
    /// An empty result is reported as `NotFound`, not as an empty list.
    pub async fn list_user_expenses(&self, user_id: &str) -> AppResult<Vec<Expense>> {
        let expenses = self
            .store
            .find_by_user(user_id)
            .await
            .map_err(|e| classify(e, "Error retrieving expenses", messages::LIST_FAILED))?;

        if expenses.is_empty() {
            return Err(AppError::not_found(messages::NONE_FOR_USER));
        }
        Ok(expenses)
    }

    /// Gets an expense by its id, or `NotFound`.
    pub async fn get_expense(&self, expense_id: &str) -> AppResult<Expense> {
        self.store
            .find_by_id(expense_id)
            .await
            .map_err(|e| classify(e, "Error retrieving expense by ID", messages::GET_FAILED))?
            .ok_or_else(|| AppError::not_found(messages::NOT_FOUND))
    }

    /// Replaces all mutable fields of an expense.
    ///
    /// `expenseid` and `id_user` are never touched.
    pub async fn update_expense(&self, expense_id: &str, changes: ExpenseChanges) -> AppResult<()> {
        let updated = self
            .store
            .update(expense_id, changes)
            .await
            .map_err(|e| classify(e, "Error updating expense", messages::UPDATE_FAILED))?;

        if updated == 0 {
            return Err(AppError::not_found(messages::UPDATE_NOT_FOUND));
        }
        Ok(())
    }

    /// Hard-deletes an expense.
    pub async fn delete_expense(&self, expense_id: &str) -> AppResult<()> {
        let deleted = self
            .store
            .delete(expense_id)
            .await
            .map_err(|e| classify(e, "Error deleting expense", messages::DELETE_FAILED))?;

        if deleted == 0 {
            return Err(AppError::not_found(messages::DELETE_NOT_FOUND));
        }
        Ok(())
    }

    /// Checks store connectivity for health probes. Not logged here; the
    /// health handler reports the failure itself.
    pub async fn check_store(&self) -> AppResult<()> {
        self.store.ping().await
    }
}

/// Lets classified not-found errors through; logs anything else once and
/// replaces it with a generic `Internal` error carrying `message`.
fn classify(error: AppError, context: &str, message: &str) -> AppError {
    if error.is_not_found() {
        return error;
    }

    tracing::error!(error = %error, cause = ?error, "{}", context);
    AppError::internal(message, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::{
        FailingExpenseStore, InMemoryExpenseStore, STORE_FAILURE_DETAIL,
    };
    use crate::utils::id::NanoIdGenerator;
    use bigdecimal::BigDecimal;
    use jiff_diesel::ToDiesel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Counts ERROR-level events emitted while installed.
    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_errors() -> (Arc<AtomicUsize>, tracing::subscriber::DefaultGuard) {
        let counter = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(counter.clone()));
        let guard = tracing::subscriber::set_default(subscriber);
        (counter, guard)
    }

    fn lunch(user: &str) -> CreateExpense {
        CreateExpense {
            id_user: user.to_string(),
            category: "food".to_string(),
            uangmasuk: BigDecimal::from(0),
            uangkeluar: BigDecimal::from(15000),
            uangakhir: BigDecimal::from(85000),
            description: Some("lunch".to_string()),
            transaction_date: jiff::civil::date(2024, 1, 1),
        }
    }

    fn service_with(store: Arc<dyn ExpenseStore>) -> ExpenseService {
        ExpenseService::new(store, Arc::new(NanoIdGenerator::default()))
    }

    fn memory_service() -> (Arc<InMemoryExpenseStore>, ExpenseService) {
        let store = Arc::new(InMemoryExpenseStore::new());
        let service = service_with(store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_create_assigns_eleven_char_id_and_is_retrievable() {
        let (_, service) = memory_service();

        let created = service.create_expense(lunch("u1")).await.unwrap();
        assert_eq!(created.expenseid.len(), 11);

        let fetched = service.get_expense(&created.expenseid).await.unwrap();
        assert_eq!(fetched.expenseid, created.expenseid);
        assert_eq!(fetched.id_user, "u1");
        assert_eq!(fetched.category, "food");
        assert_eq!(fetched.uangkeluar, BigDecimal::from(15000));
        assert_eq!(fetched.uangakhir, BigDecimal::from(85000));
        assert_eq!(fetched.description.as_deref(), Some("lunch"));
        assert_eq!(
            fetched.transaction_date.to_jiff(),
            jiff::civil::date(2024, 1, 1)
        );
    }

    #[tokio::test]
    async fn test_list_for_user_without_records_is_not_found() {
        let (_, service) = memory_service();
        service.create_expense(lunch("someone-else")).await.unwrap();

        let error = service.list_user_expenses("u1").await.unwrap_err();
        match error {
            AppError::NotFound { message } => assert_eq!(message, messages::NONE_FOR_USER),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_returns_all_and_only_the_users_records() {
        let (_, service) = memory_service();
        let mut mine = Vec::new();
        for _ in 0..3 {
            mine.push(service.create_expense(lunch("u1")).await.unwrap().expenseid);
        }
        service.create_expense(lunch("u2")).await.unwrap();

        let listed = service.list_user_expenses("u1").await.unwrap();
        let mut listed_ids: Vec<String> = listed.iter().map(|e| e.expenseid.clone()).collect();
        listed_ids.sort();
        mine.sort();

        assert_eq!(listed_ids, mine);
        assert!(listed.iter().all(|e| e.id_user == "u1"));
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let (_, service) = memory_service();

        let error = service.get_expense("doesnotexst").await.unwrap_err();
        match error {
            AppError::NotFound { message } => assert_eq!(message, messages::NOT_FOUND),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_replaces_mutable_fields_only() {
        let (store, service) = memory_service();
        let created = service.create_expense(lunch("u1")).await.unwrap();

        let changes = ExpenseChanges {
            category: "transport".to_string(),
            uangmasuk: BigDecimal::from(500),
            uangkeluar: BigDecimal::from(20000),
            uangakhir: BigDecimal::from(65500),
            description: None,
            transaction_date: jiff::civil::date(2024, 2, 3).to_diesel(),
        };
        service
            .update_expense(&created.expenseid, changes)
            .await
            .unwrap();

        let stored = store.get(&created.expenseid).unwrap();
        assert_eq!(stored.expenseid, created.expenseid);
        assert_eq!(stored.id_user, "u1");
        assert_eq!(stored.category, "transport");
        assert_eq!(stored.uangmasuk, BigDecimal::from(500));
        assert_eq!(stored.uangkeluar, BigDecimal::from(20000));
        assert_eq!(stored.uangakhir, BigDecimal::from(65500));
        assert_eq!(stored.description, None);
        assert_eq!(stored.transaction_date.to_jiff(), jiff::civil::date(2024, 2, 3));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found_and_mutates_nothing() {
        let (store, service) = memory_service();
        let created = service.create_expense(lunch("u1")).await.unwrap();

        let changes = ExpenseChanges {
            category: "other".to_string(),
            uangmasuk: BigDecimal::from(1),
            uangkeluar: BigDecimal::from(1),
            uangakhir: BigDecimal::from(1),
            description: None,
            transaction_date: jiff::civil::date(2024, 3, 1).to_diesel(),
        };
        let error = service.update_expense("doesnotexst", changes).await.unwrap_err();

        match error {
            AppError::NotFound { message } => assert_eq!(message, messages::UPDATE_NOT_FOUND),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&created.expenseid).unwrap().category, "food");
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let (store, service) = memory_service();
        let created = service.create_expense(lunch("u1")).await.unwrap();

        service.delete_expense(&created.expenseid).await.unwrap();

        assert_eq!(store.len(), 0);
        let error = service.get_expense(&created.expenseid).await.unwrap_err();
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let (_, service) = memory_service();

        let error = service.delete_expense("doesnotexst").await.unwrap_err();
        match error {
            AppError::NotFound { message } => assert_eq!(message, messages::DELETE_NOT_FOUND),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_outcomes_are_not_logged_as_errors() {
        let (counter, _guard) = count_errors();
        let (_, service) = memory_service();

        let _ = service.list_user_expenses("u1").await;
        let _ = service.get_expense("doesnotexst").await;
        let _ = service.delete_expense("doesnotexst").await;

        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    /// Asserts the failure is `Internal` with `expected` as its only
    /// client-visible text.
    fn assert_sanitized_internal(error: AppError, expected: &str) {
        let rendered = error.to_string();
        match error {
            AppError::Internal { message, .. } => assert_eq!(message, expected),
            other => panic!("Expected Internal, got {:?}", other),
        }
        assert!(!rendered.contains(STORE_FAILURE_DETAIL));
    }

    #[tokio::test]
    async fn test_store_failure_on_every_operation_is_internal_and_logged_once() {
        let store = Arc::new(FailingExpenseStore::new());
        let service = service_with(store.clone());
        let changes = || ExpenseChanges {
            category: "food".to_string(),
            uangmasuk: BigDecimal::from(0),
            uangkeluar: BigDecimal::from(0),
            uangakhir: BigDecimal::from(0),
            description: None,
            transaction_date: jiff::civil::date(2024, 1, 1).to_diesel(),
        };

        let (counter, _guard) = count_errors();

        let error = service.create_expense(lunch("u1")).await.unwrap_err();
        assert_sanitized_internal(error, messages::CREATE_FAILED);
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        let error = service.list_user_expenses("u1").await.unwrap_err();
        assert_sanitized_internal(error, messages::LIST_FAILED);
        assert_eq!(counter.load(Ordering::SeqCst), 2);

        let error = service.get_expense("abcdefghijk").await.unwrap_err();
        assert_sanitized_internal(error, messages::GET_FAILED);
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        let error = service
            .update_expense("abcdefghijk", changes())
            .await
            .unwrap_err();
        assert_sanitized_internal(error, messages::UPDATE_FAILED);
        assert_eq!(counter.load(Ordering::SeqCst), 4);

        let error = service.delete_expense("abcdefghijk").await.unwrap_err();
        assert_sanitized_internal(error, messages::DELETE_FAILED);
        assert_eq!(counter.load(Ordering::SeqCst), 5);

        assert_eq!(store.calls(), 5);
    }

    #[tokio::test]
    async fn test_internal_error_keeps_store_detail_as_source() {
        let service = service_with(Arc::new(FailingExpenseStore::new()));

        let error = service.get_expense("abcdefghijk").await.unwrap_err();
        let chain: Vec<String> = anyhow::Error::new(error)
            .chain()
            .map(|e| e.to_string())
            .collect();

        assert!(chain.iter().any(|e| e.contains(STORE_FAILURE_DETAIL)));
    }

    #[tokio::test]
    async fn test_check_store_reports_failure() {
        let service = service_with(Arc::new(FailingExpenseStore::new()));
        assert!(service.check_store().await.is_err());

        let (_, healthy) = memory_service();
        assert!(healthy.check_store().await.is_ok());
    }
}
