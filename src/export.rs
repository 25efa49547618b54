use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::table::{ComparisonTable, COLUMNS};

const SHEET_NAME: &str = "Comparisons";

/// Lay out comparisons as spreadsheet rows.
///
/// Each comparison becomes a block: a `Match N` label, the header row, the
/// home and away rows, and a blank separator.
pub fn comparison_rows(tables: &[ComparisonTable]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(tables.len() * 5);
    for (i, table) in tables.iter().enumerate() {
        rows.push(vec![format!("Match {}", i + 1)]);
        rows.push(COLUMNS.iter().map(|c| c.to_string()).collect());
        for row in table.rows() {
            rows.push(row.cells().iter().map(|c| c.to_string()).collect());
        }
        rows.push(Vec::new());
    }
    rows
}

/// Write comparisons to an `.xlsx` workbook at `path`.
#[instrument(skip(tables), fields(count = tables.len()))]
pub fn export_comparisons(path: &Path, tables: &[ComparisonTable]) -> Result<()> {
    let rows = comparison_rows(tables);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;
        write_rows(sheet, &rows)?;
    }
    workbook.save(path)?;

    debug!(path = %path.display(), rows = rows.len(), "exported comparisons");
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (row_idx, row) in rows.iter().enumerate() {
        // Label and header rows of a block.
        let is_heading = row.len() == 1 || row.first().is_some_and(|c| c == COLUMNS[0]);
        for (col_idx, value) in row.iter().enumerate() {
            if is_heading {
                worksheet.write_string_with_format(row_idx as u32, col_idx as u16, value, &bold)?;
            } else {
                worksheet.write_string(row_idx as u32, col_idx as u16, value)?;
            }
        }
    }
    worksheet.autofit();
    Ok(())
}
