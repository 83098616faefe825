use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum TrackerError {
    #[error("Email is required")]
    MissingEmail,
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("User {0} not found")]
    UserNotFound(i64),
    #[error("Person {0} not found")]
    PersonNotFound(i64),
    #[error("Account {0} not found")]
    AccountNotFound(i64),
    #[error("Category {0} not found")]
    CategoryNotFound(i64),
    #[error("Transaction {0} not found")]
    TransactionNotFound(i64),
    #[error("Budget {0} not found")]
    BudgetNotFound(i64),
    #[error("FX rate {0} not found")]
    FxRateNotFound(i64),

    #[error("Person with name {0} already exists")]
    PersonAlreadyExists(String),
    #[error("A person flagged as me is already defined")]
    MePersonAlreadyExists,
    #[error("Account with name {0} already exists")]
    AccountAlreadyExists(String),
    #[error("Category with name {0} already exists")]
    CategoryAlreadyExists(String),
    #[error("Budget {0} for year {1} already exists")]
    BudgetAlreadyExists(String, i32),
    #[error("FX rate {0} already exists")]
    FxRateAlreadyExists(String),
    #[error("{0} is already active")]
    AlreadyActive(String),

    #[error("Cannot deactivate last active user")]
    CannotDeactivateLastUser,
    #[error("Person {0} is referenced by transactions")]
    PersonInUse(i64),
    #[error("Account {0} is referenced by transactions")]
    AccountInUse(i64),
    #[error("Category {0} is referenced by transactions or budgets")]
    CategoryInUse(i64),

    #[error("Category kind does not match transaction kind for category {0}")]
    CategoryKindMismatch(i64),
    #[error("Currency {found} does not match account currency {expected}")]
    CurrencyMismatch { expected: String, found: String },
    #[error("Forex transactions cannot have the same primary and counter currency")]
    SameCurrencyForex,
    #[error("Counter account is required for transfer and forex transactions")]
    MissingCounterAccount,
    #[error("Counter fields are only valid for transfer and forex transactions")]
    UnexpectedCounterField,

    #[error("Split amounts must equal transaction amount: expected {expected}, got {actual}")]
    SplitMismatch { expected: f64, actual: f64 },
    #[error("Person {0} appears more than once in splits")]
    DuplicateSplitPerson(i64),

    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("Cache error: {0}")]
    CacheError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}
