// Per-column cleaning operations and the table summary used by the report

pub mod dates;
pub mod duplicates;
pub mod numeric;
pub mod summary;

pub use dates::{parse_date, parse_date_column, DateParseSummary};
pub use duplicates::{flag_duplicates, group_rows_by_key, DuplicateResolution};
pub use numeric::{coerce_integer_column, parse_truncated, CoercionSummary};
pub use summary::{summarize, ColumnSummary, ColumnType, TableSummary};
