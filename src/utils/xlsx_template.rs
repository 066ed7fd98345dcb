//! The downloadable upload template: one bold header row in the canonical
//! column order plus a single sample row.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::payroll::row::COLUMN_HEADERS;

const SAMPLE_ROW: [&str; 39] = [
    "NCS7582",
    "John Doe",
    "9876543210",
    "31/01/1990",
    "01-01-2023",
    "Software Engineer",
    "IT",
    "HDFC BANK",
    "50100684934908",
    "HDFC0005021",
    "ABCDE1234F",
    "101838775314",
    "101838775314",
    "5404019959",
    "31",
    "1",
    "10",
    "0",
    "0",
    "45000",
    "22500",
    "15000",
    "0",
    "0",
    "82500",
    "2500",
    "1500",
    "1000",
    "5000",
    "0",
    "200",
    "1800",
    "0",
    "0",
    "500",
    "92500",
    "2500",
    "90000",
    "ninety thousand only",
];

pub fn build_template() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in COLUMN_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (col, value) in SAMPLE_ROW.iter().enumerate() {
        sheet.write_string(1, col as u16, *value)?;
    }

    workbook.save_to_buffer()
}
