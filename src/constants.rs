/// Fixed names shared by the loader, the transform rules and the CLI

// Source file names, in the order datasets are loaded and written
pub const CUSTOMERS_FILE: &str = "customers.csv";
pub const ORDER_ITEMS_FILE: &str = "order_items.csv";
pub const ORDERS_FILE: &str = "orders.csv";
pub const PAYMENT_FILE: &str = "payment.csv";
pub const PRODUCTS_FILE: &str = "products.csv";
pub const REVIEWS_FILE: &str = "reviews.csv";
pub const SHIPMENTS_FILE: &str = "shipments.csv";
pub const SUPPLIERS_FILE: &str = "suppliers.csv";

// Columns touched by the cleaning rules
pub const PHONE_NUMBER_COLUMN: &str = "phone_number";
pub const PRICE_AT_PURCHASE_COLUMN: &str = "price_at_purchase";
pub const TOTAL_PRICE_COLUMN: &str = "total_price";
pub const AMOUNT_COLUMN: &str = "amount";
pub const PRICE_COLUMN: &str = "price";
pub const ORDER_DATE_COLUMN: &str = "order_date";
pub const SHIPMENT_DATE_COLUMN: &str = "shipment_date";
pub const DELIVERY_DATE_COLUMN: &str = "delivery_date";

/// Prefix prepended to every member of a duplicate phone group
pub const DUPLICATE_PHONE_PREFIX: &str = "RP-";

/// Text written for a date that failed to parse
pub const UNPARSEABLE_MARKER: &str = "NaT";

// Defaults for the configuration layer
pub const DEFAULT_SOURCE_DIR: &str = "data";
pub const DEFAULT_DEST_SUBDIR: &str = "cleaned";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const LOG_FILE_NAME: &str = "cleaner.log";

/// Field values read as missing, matching the pandas default NA set
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];
