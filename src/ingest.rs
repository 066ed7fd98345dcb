//! Workbook ingestion: uploaded bytes to header-keyed rows.
//!
//! Only the first sheet is read; its first row is treated as the header
//! row. Cells are carried as display strings so the row mapper sees the
//! same shape regardless of how the sheet typed its columns.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::PortalError;

pub fn read_rows(bytes: &[u8]) -> Result<Vec<HashMap<String, String>>, PortalError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| PortalError::Validation(format!("Failed to read workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PortalError::Validation("Workbook has no sheets".into()))?
        .map_err(|e| PortalError::Validation(format!("Failed to read sheet: {e}")))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_to_string(cell).trim().to_string())
            .collect(),
        None => return Ok(Vec::new()),
    };

    let mut out = Vec::new();
    for row in rows {
        let mut mapped = HashMap::new();
        for (header, cell) in headers.iter().zip(row) {
            if header.is_empty() {
                continue;
            }
            mapped.insert(header.clone(), cell_to_string(cell));
        }
        // Trailing blank rows are common in hand-edited sheets; skip them.
        if mapped.values().all(|v| v.trim().is_empty()) {
            continue;
        }
        out.push(mapped);
    }
    Ok(out)
}

/// Render a cell the way it reads on screen. Whole-number float cells
/// drop the fraction so a numeric "13456" column survives as "13456".
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll::row::{RowContext, map_row};
    use crate::utils::xlsx_template;

    #[actix_web::test]
    async fn template_round_trips_through_ingestion() {
        let bytes = xlsx_template::build_template().unwrap();
        let rows = read_rows(&bytes).unwrap();
        assert_eq!(rows.len(), 1);

        let ctx = RowContext {
            month: "01".into(),
            year: "2026".into(),
            client_id: String::new(),
        };
        let record = map_row(&rows[0], &ctx);
        assert_eq!(record.employee_id, "NCS7582");
        assert_eq!(record.amounts.basic, 45000.0);
        assert_eq!(record.amounts.karma_life, 500.0);
        assert_eq!(record.working_days, "31");
    }

    #[test]
    fn garbage_bytes_are_a_validation_error() {
        assert!(read_rows(b"not a workbook").is_err());
    }

    #[test]
    fn numeric_cells_read_as_plain_strings() {
        assert_eq!(cell_to_string(&Data::Float(13456.0)), "13456");
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Int(-3)), "-3");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
