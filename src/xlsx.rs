use rust_xlsxwriter::{Format, Workbook};

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::orders::OrderSheet;

/// The fixed output column headers. Any pass-through columns from the input
/// follow these, in input order.
pub const HEADERS: [&str; 5] = [
    "ITEM NUMBER",
    "ITEM QUANTITY",
    "ITEM PRICE",
    "TOTAL PRICE",
    "CUSTOMER NAME",
];

/// Fixed column widths by column index; columns beyond the table keep the
/// default width.
pub const COLUMN_WIDTHS: [f64; 9] = [11.0, 13.0, 15.0, 15.0, 15.0, 13.0, 13.0, 10.0, 30.0];

const ITEM_PRICE_COL: u16 = 2;
const TOTAL_PRICE_COL: u16 = 3;
const CUSTOMER_COL: u16 = 4;

/// Writes `sheet` as a single-worksheet workbook in `dir`, returning the
/// path of the file written.
///
/// The worksheet is named `Order <order-id>` and holds the header row, one
/// row per line item, and a trailer row whose item-price cell reads
/// `GRAND TOTAL:` and whose total-price cell holds the order's grand total.
/// Price cells carry a `$#,##0.00` currency format.
///
/// # Errors
///
/// Returns [`Error::Xlsx`] if the workbook cannot be built or saved.
pub fn write_sheet(sheet: &OrderSheet, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(sheet.file_name());
    let err = |source| Error::Xlsx {
        path: path.clone(),
        source,
    };
    let mut workbook = Workbook::new();
    let currency = Format::new().set_num_format("$#,##0.00");
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.sheet_name()).map_err(err)?;
    for (col, header) in HEADERS
        .iter()
        .copied()
        .chain(sheet.extra_columns.iter().map(String::as_str))
        .enumerate()
    {
        worksheet.write_string(0, col as u16, header).map_err(err)?;
    }
    let mut row: u32 = 1;
    for item in &sheet.items {
        worksheet
            .write_number(row, 0, f64::from(item.item_number))
            .map_err(err)?;
        worksheet
            .write_number(row, 1, f64::from(item.quantity))
            .map_err(err)?;
        worksheet
            .write_number_with_format(row, ITEM_PRICE_COL, item.unit_price.as_dollars_f64(), &currency)
            .map_err(err)?;
        worksheet
            .write_number_with_format(row, TOTAL_PRICE_COL, item.total_price.as_dollars_f64(), &currency)
            .map_err(err)?;
        worksheet
            .write_string(row, CUSTOMER_COL, &item.customer)
            .map_err(err)?;
        for (i, value) in item.extras.iter().enumerate() {
            worksheet
                .write_string(row, CUSTOMER_COL + 1 + i as u16, value)
                .map_err(err)?;
        }
        row += 1;
    }
    worksheet
        .write_string(row, ITEM_PRICE_COL, "GRAND TOTAL:")
        .map_err(err)?;
    worksheet
        .write_number_with_format(row, TOTAL_PRICE_COL, sheet.grand_total.as_dollars_f64(), &currency)
        .map_err(err)?;
    let columns = HEADERS.len() + sheet.extra_columns.len();
    for (col, width) in COLUMN_WIDTHS.iter().take(columns).enumerate() {
        worksheet.set_column_width(col as u16, *width).map_err(err)?;
    }
    workbook.save(&path).map_err(err)?;
    Ok(path)
}
