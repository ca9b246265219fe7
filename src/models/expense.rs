use bigdecimal::BigDecimal;
use diesel::prelude::*;
use jiff_diesel::{Date, Timestamp, ToDiesel};

/// Expense model for reading from database
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Expense {
    pub expenseid: String,
    pub id_user: String,
    pub category: String,
    pub uangmasuk: BigDecimal,
    pub uangkeluar: BigDecimal,
    pub uangakhir: BigDecimal,
    pub description: Option<String>,
    pub transaction_date: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields supplied by the caller when recording an expense.
///
/// The identifier is not part of the command; it is assigned once by the
/// service right before insertion.
#[derive(Debug, Clone)]
pub struct CreateExpense {
    pub id_user: String,
    pub category: String,
    pub uangmasuk: BigDecimal,
    pub uangkeluar: BigDecimal,
    pub uangakhir: BigDecimal,
    pub description: Option<String>,
    pub transaction_date: jiff::civil::Date,
}

/// NewExpense model for inserting new records
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::expenses)]
pub struct NewExpense {
    pub expenseid: String,
    pub id_user: String,
    pub category: String,
    pub uangmasuk: BigDecimal,
    pub uangkeluar: BigDecimal,
    pub uangakhir: BigDecimal,
    pub description: Option<String>,
    pub transaction_date: Date,
}

impl NewExpense {
    pub fn new(expenseid: String, input: CreateExpense) -> Self {
        Self {
            expenseid,
            id_user: input.id_user,
            category: input.category,
            uangmasuk: input.uangmasuk,
            uangkeluar: input.uangkeluar,
            uangakhir: input.uangakhir,
            description: input.description,
            transaction_date: input.transaction_date.to_diesel(),
        }
    }
}

/// Full replacement of the mutable expense fields.
///
/// `treat_none_as_null` makes an absent description clear the column
/// instead of leaving the previous value in place.
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(treat_none_as_null = true)]
pub struct ExpenseChanges {
    pub category: String,
    pub uangmasuk: BigDecimal,
    pub uangkeluar: BigDecimal,
    pub uangakhir: BigDecimal,
    pub description: Option<String>,
    pub transaction_date: Date,
}
