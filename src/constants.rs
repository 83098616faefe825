/// Splits must sum to the transaction total within one cent.
pub const SPLIT_TOLERANCE: f64 = 0.01;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_BUDGET_NAME_LENGTH: usize = 20;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_AMOUNT: f64 = 1_000_000.0;

pub const BALANCES_CACHE_TTL_SECS: u64 = 60;

// Audit action names
pub const USER_REGISTERED: &str = "user_registered";
pub const USER_UPDATED: &str = "user_updated";
pub const USER_DEACTIVATED: &str = "user_deactivated";
pub const USER_ACTIVATED: &str = "user_activated";
pub const PERSON_CREATED: &str = "person_created";
pub const PERSON_UPDATED: &str = "person_updated";
pub const PERSON_DEACTIVATED: &str = "person_deactivated";
pub const PERSON_ACTIVATED: &str = "person_activated";
pub const ACCOUNT_CREATED: &str = "account_created";
pub const ACCOUNT_UPDATED: &str = "account_updated";
pub const ACCOUNT_DEACTIVATED: &str = "account_deactivated";
pub const ACCOUNT_ACTIVATED: &str = "account_activated";
pub const CATEGORY_CREATED: &str = "category_created";
pub const CATEGORY_UPDATED: &str = "category_updated";
pub const CATEGORY_DELETED: &str = "category_deleted";
pub const TRANSACTION_CREATED: &str = "transaction_created";
pub const TRANSACTION_UPDATED: &str = "transaction_updated";
pub const TRANSACTION_DEACTIVATED: &str = "transaction_deactivated";
pub const TRANSACTION_ACTIVATED: &str = "transaction_activated";
pub const SPLITS_REPLACED: &str = "splits_replaced";
pub const SPLITS_CLEARED: &str = "splits_cleared";
pub const BUDGET_CREATED: &str = "budget_created";
pub const BUDGET_UPDATED: &str = "budget_updated";
pub const BUDGET_DELETED: &str = "budget_deleted";
pub const FX_RATE_CREATED: &str = "fx_rate_created";
pub const FX_RATE_UPDATED: &str = "fx_rate_updated";
pub const FX_RATE_DELETED: &str = "fx_rate_deleted";
