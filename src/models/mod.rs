mod expense;

pub use expense::{CreateExpense, Expense, ExpenseChanges, NewExpense};
