pub mod client;
pub mod employee;
pub mod payslip;

pub use client::Client;
pub use employee::Employee;
pub use payslip::Payslip;
