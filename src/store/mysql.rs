//! MySQL-backed store. Queries are built at runtime with positional
//! binds; upserts lean on the unique keys (`employee_id` and
//! `(employee_id, month, year)`) via `ON DUPLICATE KEY UPDATE`.

use sqlx::MySqlPool;
use sqlx::mysql::MySqlArguments;
use sqlx::query::QueryAs;

use crate::error::StoreError;
use crate::model::{Client, Employee, Payslip};
use crate::store::{PayslipFilter, Store, StoreResult};

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlStore { pool }
    }
}

fn in_clause(column: &str, count: usize) -> String {
    let marks = vec!["?"; count].join(", ");
    format!("{} IN ({})", column, marks)
}

/// WHERE clause + bind values for a payslip filter.
fn filter_sql(filter: &PayslipFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut bindings = Vec::new();

    if !filter.employee_ids.is_empty() {
        conditions.push(in_clause("employee_id", filter.employee_ids.len()));
        bindings.extend(filter.employee_ids.iter().cloned());
    }
    if !filter.months.is_empty() {
        conditions.push(in_clause("month", filter.months.len()));
        bindings.extend(filter.months.iter().cloned());
    }
    if !filter.years.is_empty() {
        conditions.push(in_clause("year", filter.years.len()));
        bindings.extend(filter.years.iter().cloned());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, bindings)
}

fn bind_all<'q, T>(
    mut query: QueryAs<'q, sqlx::MySql, T, MySqlArguments>,
    bindings: &'q [String],
) -> QueryAs<'q, sqlx::MySql, T, MySqlArguments> {
    for b in bindings {
        query = query.bind(b);
    }
    query
}

impl Store for MySqlStore {
    async fn upsert_employee(&self, employee: &Employee) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employees
              (employee_id, employee_name, mobile_number, dob, doj, designation, department,
               bank_name, bank_account_no, ifsc_code, pan_no, pf_number, uan_no, esic_no, client_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
              employee_name = VALUES(employee_name),
              mobile_number = VALUES(mobile_number),
              dob = VALUES(dob),
              doj = VALUES(doj),
              designation = VALUES(designation),
              department = VALUES(department),
              bank_name = VALUES(bank_name),
              bank_account_no = VALUES(bank_account_no),
              ifsc_code = VALUES(ifsc_code),
              pan_no = VALUES(pan_no),
              pf_number = VALUES(pf_number),
              uan_no = VALUES(uan_no),
              esic_no = VALUES(esic_no),
              client_id = VALUES(client_id),
              updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.employee_name)
        .bind(&employee.mobile_number)
        .bind(&employee.dob)
        .bind(&employee.doj)
        .bind(&employee.designation)
        .bind(&employee.department)
        .bind(&employee.bank_name)
        .bind(&employee.bank_account_no)
        .bind(&employee.ifsc_code)
        .bind(&employee.pan_no)
        .bind(&employee.pf_number)
        .bind(&employee.uan_no)
        .bind(&employee.esic_no)
        .bind(&employee.client_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE employee_id = ?",
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    async fn list_employees(
        &self,
        search: &str,
        page: u32,
        limit: u32,
    ) -> StoreResult<(Vec<Employee>, i64)> {
        let mut where_clause = String::new();
        let mut bindings: Vec<String> = Vec::new();

        if !search.is_empty() {
            where_clause = "WHERE (employee_id LIKE ? OR employee_name LIKE ? \
                            OR mobile_number LIKE ? OR department LIKE ?)"
                .to_string();
            let like = format!("%{}%", search);
            bindings.extend([like.clone(), like.clone(), like.clone(), like]);
        }

        let count_sql = format!("SELECT COUNT(*) FROM employees {}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for b in &bindings {
            count_query = count_query.bind(b);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let data_sql = format!(
            "SELECT * FROM employees {} ORDER BY employee_id ASC LIMIT ? OFFSET ?",
            where_clause
        );
        let offset = (page.saturating_sub(1)) * limit;
        let employees = bind_all(sqlx::query_as::<_, Employee>(&data_sql), &bindings)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok((employees, total))
    }

    async fn delete_employee(&self, employee_id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
            .bind(employee_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn upsert_payslip(&self, payslip: &Payslip) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payslips
              (employee_id, month, year,
               working_days, extra_days, ot_hrs, arrears_days, lop,
               basic, hra, special_allowance, statutory_bonus, arrears_amount,
               ot_amount, extra_holiday_pay, attendance_incentive, performance_incentive,
               special_incentive, gross_earnings_total,
               profession_tax, pf_amount, esic, arrear_deduction, karma_life,
               gross_earnings, gross_deductions, net_pay, net_pay_words, client_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
              working_days = VALUES(working_days),
              extra_days = VALUES(extra_days),
              ot_hrs = VALUES(ot_hrs),
              arrears_days = VALUES(arrears_days),
              lop = VALUES(lop),
              basic = VALUES(basic),
              hra = VALUES(hra),
              special_allowance = VALUES(special_allowance),
              statutory_bonus = VALUES(statutory_bonus),
              arrears_amount = VALUES(arrears_amount),
              ot_amount = VALUES(ot_amount),
              extra_holiday_pay = VALUES(extra_holiday_pay),
              attendance_incentive = VALUES(attendance_incentive),
              performance_incentive = VALUES(performance_incentive),
              special_incentive = VALUES(special_incentive),
              gross_earnings_total = VALUES(gross_earnings_total),
              profession_tax = VALUES(profession_tax),
              pf_amount = VALUES(pf_amount),
              esic = VALUES(esic),
              arrear_deduction = VALUES(arrear_deduction),
              karma_life = VALUES(karma_life),
              gross_earnings = VALUES(gross_earnings),
              gross_deductions = VALUES(gross_deductions),
              net_pay = VALUES(net_pay),
              net_pay_words = VALUES(net_pay_words),
              client_id = VALUES(client_id),
              updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&payslip.employee_id)
        .bind(&payslip.month)
        .bind(&payslip.year)
        .bind(&payslip.working_days)
        .bind(&payslip.extra_days)
        .bind(&payslip.ot_hrs)
        .bind(&payslip.arrears_days)
        .bind(&payslip.lop)
        .bind(payslip.basic)
        .bind(payslip.hra)
        .bind(payslip.special_allowance)
        .bind(payslip.statutory_bonus)
        .bind(payslip.arrears_amount)
        .bind(payslip.ot_amount)
        .bind(payslip.extra_holiday_pay)
        .bind(payslip.attendance_incentive)
        .bind(payslip.performance_incentive)
        .bind(payslip.special_incentive)
        .bind(payslip.gross_earnings_total)
        .bind(payslip.profession_tax)
        .bind(payslip.pf_amount)
        .bind(payslip.esic)
        .bind(payslip.arrear_deduction)
        .bind(payslip.karma_life)
        .bind(payslip.gross_earnings)
        .bind(payslip.gross_deductions)
        .bind(payslip.net_pay)
        .bind(&payslip.net_pay_words)
        .bind(&payslip.client_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_payslip(
        &self,
        employee_id: &str,
        month: &str,
        year: &str,
    ) -> StoreResult<Option<Payslip>> {
        let payslip = sqlx::query_as::<_, Payslip>(
            "SELECT * FROM payslips WHERE employee_id = ? AND month = ? AND year = ?",
        )
        .bind(employee_id)
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;
        Ok(payslip)
    }

    async fn list_payslips(
        &self,
        filter: &PayslipFilter,
        page: u32,
        limit: u32,
    ) -> StoreResult<(Vec<Payslip>, i64)> {
        let (where_clause, bindings) = filter_sql(filter);

        let count_sql = format!("SELECT COUNT(*) FROM payslips {}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for b in &bindings {
            count_query = count_query.bind(b);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let data_sql = format!(
            "SELECT * FROM payslips {} ORDER BY year DESC, month DESC, employee_id ASC LIMIT ? OFFSET ?",
            where_clause
        );
        let offset = (page.saturating_sub(1)) * limit;
        let payslips = bind_all(sqlx::query_as::<_, Payslip>(&data_sql), &bindings)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok((payslips, total))
    }

    async fn delete_payslips(&self, filter: &PayslipFilter) -> StoreResult<u64> {
        if filter.is_empty() {
            // Refuse a blanket wipe; the caller validates, this is the backstop.
            return Err(StoreError("refusing unfiltered payslip delete".into()));
        }
        let (where_clause, bindings) = filter_sql(filter);
        let sql = format!("DELETE FROM payslips {}", where_clause);
        let mut query = sqlx::query(&sql);
        for b in &bindings {
            query = query.bind(b);
        }
        let result = query.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn insert_client(&self, client: &Client) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO clients (id, name, address, contact_person, email, phone, is_default)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.address)
        .bind(&client.contact_person)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(client.is_default)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_client(&self, client: &Client) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET name = ?, address = ?, contact_person = ?, email = ?, phone = ?,
                is_default = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&client.name)
        .bind(&client.address)
        .bind(&client.contact_person)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(client.is_default)
        .bind(&client.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn find_client(&self, id: &str) -> StoreResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    async fn list_clients(
        &self,
        search: &str,
        page: u32,
        limit: u32,
    ) -> StoreResult<(Vec<Client>, i64)> {
        let mut where_clause = String::new();
        let mut bindings: Vec<String> = Vec::new();

        if !search.is_empty() {
            where_clause = "WHERE name LIKE ?".to_string();
            bindings.push(format!("%{}%", search));
        }

        let count_sql = format!("SELECT COUNT(*) FROM clients {}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for b in &bindings {
            count_query = count_query.bind(b);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let data_sql = format!(
            "SELECT * FROM clients {} ORDER BY is_default DESC, created_at DESC LIMIT ? OFFSET ?",
            where_clause
        );
        let offset = (page.saturating_sub(1)) * limit;
        let clients = bind_all(sqlx::query_as::<_, Client>(&data_sql), &bindings)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok((clients, total))
    }

    async fn delete_client(&self, id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count_clients(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn default_client(&self) -> StoreResult<Option<Client>> {
        let client =
            sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE is_default = TRUE LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(client)
    }

    async fn any_client(&self) -> StoreResult<Option<Client>> {
        let client =
            sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY created_at DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(client)
    }

    async fn clear_default_flags(&self) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE clients SET is_default = FALSE WHERE is_default = TRUE")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn set_default_flag(&self, id: &str) -> StoreResult<u64> {
        let result = sqlx::query("UPDATE clients SET is_default = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
