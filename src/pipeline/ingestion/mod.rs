pub mod sheet_selector;
pub mod workbook;

pub use sheet_selector::{is_data_sheet_name, SheetOrdering, SheetSelector};
pub use workbook::{CalamineWorkbook, MemoryWorkbook, Workbook};
