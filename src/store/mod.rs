pub mod mysql;

#[cfg(test)]
pub mod mem;

use crate::error::StoreError;
use crate::model::{Client, Employee, Payslip};

pub type StoreResult<T> = Result<T, StoreError>;

/// Filter over the payslip collection. Empty lists leave that axis
/// unconstrained; a non-empty list matches any of its values.
#[derive(Debug, Default, Clone)]
pub struct PayslipFilter {
    pub employee_ids: Vec<String>,
    pub months: Vec<String>,
    pub years: Vec<String>,
}

impl PayslipFilter {
    pub fn for_employee(employee_id: &str) -> Self {
        PayslipFilter {
            employee_ids: vec![employee_id.to_string()],
            ..PayslipFilter::default()
        }
    }

    pub fn for_period(month: &str, year: &str) -> Self {
        PayslipFilter {
            months: vec![month.to_string()],
            years: vec![year.to_string()],
            ..PayslipFilter::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.employee_ids.is_empty() && self.months.is_empty() && self.years.is_empty()
    }
}

/// The four operation kinds the portal needs from its backing store —
/// upsert by key, find by filter with pagination, delete by filter, count
/// — over the three collections. `MySqlStore` is the production
/// implementation; tests run against an in-memory one.
#[allow(async_fn_in_trait)]
pub trait Store {
    // Employees, keyed by employee_id.
    async fn upsert_employee(&self, employee: &Employee) -> StoreResult<()>;
    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>>;
    async fn list_employees(
        &self,
        search: &str,
        page: u32,
        limit: u32,
    ) -> StoreResult<(Vec<Employee>, i64)>;
    async fn delete_employee(&self, employee_id: &str) -> StoreResult<u64>;

    // Payslips, keyed by (employee_id, month, year).
    async fn upsert_payslip(&self, payslip: &Payslip) -> StoreResult<()>;
    async fn find_payslip(
        &self,
        employee_id: &str,
        month: &str,
        year: &str,
    ) -> StoreResult<Option<Payslip>>;
    async fn list_payslips(
        &self,
        filter: &PayslipFilter,
        page: u32,
        limit: u32,
    ) -> StoreResult<(Vec<Payslip>, i64)>;
    async fn delete_payslips(&self, filter: &PayslipFilter) -> StoreResult<u64>;

    // Clients, keyed by generated id.
    async fn insert_client(&self, client: &Client) -> StoreResult<()>;
    async fn update_client(&self, client: &Client) -> StoreResult<u64>;
    async fn find_client(&self, id: &str) -> StoreResult<Option<Client>>;
    async fn list_clients(
        &self,
        search: &str,
        page: u32,
        limit: u32,
    ) -> StoreResult<(Vec<Client>, i64)>;
    async fn delete_client(&self, id: &str) -> StoreResult<u64>;
    async fn count_clients(&self) -> StoreResult<i64>;
    async fn default_client(&self) -> StoreResult<Option<Client>>;
    async fn any_client(&self) -> StoreResult<Option<Client>>;
    async fn clear_default_flags(&self) -> StoreResult<u64>;
    async fn set_default_flag(&self, id: &str) -> StoreResult<u64>;
}
