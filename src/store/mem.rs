//! In-memory store used as the test fixture. Mirrors the key and filter
//! semantics of the MySQL implementation.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::model::{Client, Employee, Payslip};
use crate::store::{PayslipFilter, Store, StoreResult};

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    employees: BTreeMap<String, Employee>,
    payslips: BTreeMap<(String, String, String), Payslip>,
    clients: Vec<Client>,
}

fn matches(filter: &PayslipFilter, payslip: &Payslip) -> bool {
    (filter.employee_ids.is_empty() || filter.employee_ids.contains(&payslip.employee_id))
        && (filter.months.is_empty() || filter.months.contains(&payslip.month))
        && (filter.years.is_empty() || filter.years.contains(&payslip.year))
}

fn paginate<T: Clone>(items: &[T], page: u32, limit: u32) -> Vec<T> {
    let start = ((page.max(1) - 1) * limit) as usize;
    items.iter().skip(start).take(limit as usize).cloned().collect()
}

impl Store for MemStore {
    async fn upsert_employee(&self, employee: &Employee) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let mut record = employee.clone();
        if let Some(existing) = inner.employees.get(&employee.employee_id) {
            record.created_at = existing.created_at;
        }
        inner.employees.insert(employee.employee_id.clone(), record);
        Ok(())
    }

    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.employees.get(employee_id).cloned())
    }

    async fn list_employees(
        &self,
        search: &str,
        page: u32,
        limit: u32,
    ) -> StoreResult<(Vec<Employee>, i64)> {
        let inner = self.inner.lock().unwrap();
        let needle = search.to_lowercase();
        let matched: Vec<Employee> = inner
            .employees
            .values()
            .filter(|e| {
                needle.is_empty()
                    || e.employee_id.to_lowercase().contains(&needle)
                    || e.employee_name.to_lowercase().contains(&needle)
                    || e.mobile_number.contains(&needle)
                    || e.department.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        let total = matched.len() as i64;
        Ok((paginate(&matched, page, limit), total))
    }

    async fn delete_employee(&self, employee_id: &str) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.employees.remove(employee_id).map(|_| 1).unwrap_or(0))
    }

    async fn upsert_payslip(&self, payslip: &Payslip) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let key = (
            payslip.employee_id.clone(),
            payslip.month.clone(),
            payslip.year.clone(),
        );
        let mut record = payslip.clone();
        if let Some(existing) = inner.payslips.get(&key) {
            record.created_at = existing.created_at;
        }
        inner.payslips.insert(key, record);
        Ok(())
    }

    async fn find_payslip(
        &self,
        employee_id: &str,
        month: &str,
        year: &str,
    ) -> StoreResult<Option<Payslip>> {
        let inner = self.inner.lock().unwrap();
        let key = (
            employee_id.to_string(),
            month.to_string(),
            year.to_string(),
        );
        Ok(inner.payslips.get(&key).cloned())
    }

    async fn list_payslips(
        &self,
        filter: &PayslipFilter,
        page: u32,
        limit: u32,
    ) -> StoreResult<(Vec<Payslip>, i64)> {
        let inner = self.inner.lock().unwrap();
        let mut matched: Vec<Payslip> = inner
            .payslips
            .values()
            .filter(|p| matches(filter, p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            (b.year.clone(), b.month.clone(), a.employee_id.clone())
                .cmp(&(a.year.clone(), a.month.clone(), b.employee_id.clone()))
        });
        let total = matched.len() as i64;
        Ok((paginate(&matched, page, limit), total))
    }

    async fn delete_payslips(&self, filter: &PayslipFilter) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.payslips.len();
        inner.payslips.retain(|_, p| !matches(filter, p));
        Ok((before - inner.payslips.len()) as u64)
    }

    async fn insert_client(&self, client: &Client) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.clients.push(client.clone());
        Ok(())
    }

    async fn update_client(&self, client: &Client) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        match inner.clients.iter_mut().find(|c| c.id == client.id) {
            Some(existing) => {
                *existing = client.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_client(&self, id: &str) -> StoreResult<Option<Client>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn list_clients(
        &self,
        search: &str,
        page: u32,
        limit: u32,
    ) -> StoreResult<(Vec<Client>, i64)> {
        let inner = self.inner.lock().unwrap();
        let needle = search.to_lowercase();
        let mut matched: Vec<Client> = inner
            .clients
            .iter()
            .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            b.is_default
                .cmp(&a.is_default)
                .then(b.created_at.cmp(&a.created_at))
        });
        let total = matched.len() as i64;
        Ok((paginate(&matched, page, limit), total))
    }

    async fn delete_client(&self, id: &str) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.clients.len();
        inner.clients.retain(|c| c.id != id);
        Ok((before - inner.clients.len()) as u64)
    }

    async fn count_clients(&self) -> StoreResult<i64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.clients.len() as i64)
    }

    async fn default_client(&self) -> StoreResult<Option<Client>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.clients.iter().find(|c| c.is_default).cloned())
    }

    async fn any_client(&self) -> StoreResult<Option<Client>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.clients.last().cloned())
    }

    async fn clear_default_flags(&self) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let mut cleared = 0;
        for c in inner.clients.iter_mut().filter(|c| c.is_default) {
            c.is_default = false;
            cleared += 1;
        }
        Ok(cleared)
    }

    async fn set_default_flag(&self, id: &str) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        match inner.clients.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.is_default = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
