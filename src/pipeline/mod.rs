pub mod assemble;
pub mod csv;
pub mod error_table;
pub mod index;
pub mod report;
pub mod row;
pub mod sort;

pub use assemble::assemble_rows;
pub use csv::{parse_table, render_table, ParsedTable};
pub use error_table::ErrorReport;
pub use index::{AckSet, ProblemIndex};
pub use report::{collect_rows, render_response, CsvResponse, Fault};
pub use row::AlertRow;
pub use sort::sort_rows;
