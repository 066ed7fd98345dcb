pub mod employee_cache;
pub mod xlsx_template;
