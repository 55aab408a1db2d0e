/// Decimal precision for stored and computed values
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display amounts
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for daily percentage changes
pub const CHANGE_DECIMAL_PRECISION: u32 = 4;

/// Earliest purchase date accepted by entry forms (year, month, day)
pub const MIN_PURCHASE_DATE: (i32, u32, u32) = (2000, 1, 1);

/// Date format used for persisted purchase dates
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default ledger file location
pub const DEFAULT_LEDGER_PATH: &str = "data/lancamentos.csv";

/// Default price history file location
pub const DEFAULT_PRICES_PATH: &str = "data/stocks.csv";
