pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEFAULT_ACCOUNT_COLOR: &str = "#6200EE";

pub const LIVRET_A_CEILING: f64 = 22_950.0;
pub const LIVRET_JEUNE_CEILING: f64 = 1_600.0;
pub const PEL_CEILING: f64 = 61_200.0;

pub const TRANSFER_CATEGORY_ID: i32 = 7;
pub const TRANSACTION_DATE_FORMAT: &str = "%Y-%m-%d";

pub const SAMPLE_DATA: &str = include_str!("../data/sample_data.json");

pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
pub const HEX_COLOR_PATTERN: &str = r"^#?(?P<rgb>[0-9a-fA-F]{6})$";
pub const AMOUNT_PATTERN: &str = r"^[+-]?\d+(\.\d{1,2})?$";
