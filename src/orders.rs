use regex::Regex;
use serde::Deserialize;

use std::{collections::BTreeMap, path::Path, sync::OnceLock};

use crate::error::{Error, Result};
use crate::usd::Usd;

/// Columns the input CSV must contain. The location columns are required to
/// be present but are dropped from the output sheets.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "ORDER ID",
    "ITEM NUMBER",
    "ITEM QUANTITY",
    "ITEM PRICE",
    "CUSTOMER NAME",
    "ADDRESS",
    "CITY",
    "STATE",
    "POSTAL CODE",
    "COUNTRY",
];

/// Defines the CSV format for sales data.
///
/// Only the typed columns are deserialized here; columns outside
/// [`REQUIRED_COLUMNS`] are carried through untyped (see
/// [`Orders::read_csv`]), and the location columns are validated and then
/// dropped.
#[derive(Debug, Deserialize)]
struct Record {
    #[serde(rename = "ORDER ID")]
    order_id: String,
    #[serde(rename = "ITEM NUMBER")]
    item_number: u32,
    #[serde(rename = "ITEM QUANTITY")]
    quantity: u32,
    #[serde(rename = "ITEM PRICE")]
    unit_price: Usd,
    #[serde(rename = "CUSTOMER NAME")]
    customer: String,
}

/// One sales row, annotated with its computed line total.
///
/// `extras` holds the row's values for the pass-through columns, aligned
/// with [`Orders::extra_columns`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineItem {
    pub item_number: u32,
    pub quantity: u32,
    pub unit_price: Usd,
    pub total_price: Usd,
    pub customer: String,
    pub extras: Vec<String>,
}

/// Holds sales rows partitioned by order ID.
///
/// To create a new, empty `Orders`, use [`Orders::new`].
///
/// To add sales data, use [`Orders::read_csv`].
///
/// To turn the partitioned rows into writable order sheets, use
/// [`Orders::into_sheets`].
#[derive(Debug, Default)]
pub struct Orders {
    groups: BTreeMap<String, Vec<LineItem>>,
    extra_columns: Vec<String>,
}

impl Orders {
    /// Creates a new, empty collection with no sales data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads sales data from the CSV file at `path` and partitions its rows
    /// by order ID. Each row's total price (quantity times unit price) is
    /// computed in exact cents as it is read.
    ///
    /// Input columns outside [`REQUIRED_COLUMNS`] (an ORDER DATE or PRODUCT
    /// LINE column, say) are carried through to the order sheets untyped, in
    /// their input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if the header row is missing any of
    /// [`REQUIRED_COLUMNS`], naming every missing column, or [`Error::Csv`]
    /// if the file cannot be opened or a row cannot be parsed.
    pub fn read_csv(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let err = |source| Error::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut rdr = csv::Reader::from_path(path).map_err(err)?;
        let headers = rdr.headers().map_err(err)?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .copied()
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(Error::Schema(missing));
        }
        let extra_idx: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !REQUIRED_COLUMNS.contains(h))
            .map(|(i, _)| i)
            .collect();
        self.extra_columns = extra_idx
            .iter()
            .map(|&i| headers[i].to_string())
            .collect();
        for result in rdr.records() {
            let row = result.map_err(err)?;
            let record: Record = row.deserialize(Some(&headers)).map_err(err)?;
            let total_price = record.unit_price * record.quantity;
            let extras = extra_idx
                .iter()
                .map(|&i| row.get(i).unwrap_or_default().to_string())
                .collect();
            self.groups
                .entry(record.order_id)
                .or_default()
                .push(LineItem {
                    item_number: record.item_number,
                    quantity: record.quantity,
                    unit_price: record.unit_price,
                    total_price,
                    customer: record.customer,
                    extras,
                });
        }
        Ok(())
    }

    /// Returns the names of the pass-through columns, in input order.
    #[must_use]
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    /// Returns the number of distinct order IDs read so far.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the total number of sales rows read so far.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Consumes the partitioned rows and produces one [`OrderSheet`] per
    /// order ID, in ascending order ID order.
    ///
    /// Within each sheet, items are sorted by item number ascending; rows
    /// with equal item numbers keep their input order. The sheet's grand
    /// total is the exact sum of its line totals.
    #[must_use]
    pub fn into_sheets(self) -> Vec<OrderSheet> {
        let extra_columns = self.extra_columns;
        self.groups
            .into_iter()
            .map(|(order_id, mut items)| {
                items.sort_by_key(|item| item.item_number);
                let grand_total = items.iter().map(|item| item.total_price).sum();
                OrderSheet {
                    order_id,
                    items,
                    grand_total,
                    extra_columns: extra_columns.clone(),
                }
            })
            .collect()
    }
}

/// The sorted, totalled rows of a single order, ready to be written out.
#[derive(Debug)]
pub struct OrderSheet {
    pub order_id: String,
    pub items: Vec<LineItem>,
    pub grand_total: Usd,
    /// Names of the pass-through columns, written after CUSTOMER NAME.
    pub extra_columns: Vec<String>,
}

impl OrderSheet {
    /// Returns the worksheet name for this order, for example `Order 1001`.
    #[must_use]
    pub fn sheet_name(&self) -> String {
        format!("Order {}", self.order_id)
    }

    /// Returns the workbook file name for this order, for example
    /// `Order1001_JaneDoe.xlsx`.
    ///
    /// The customer part is the first item's customer name with every
    /// character that is not a letter, digit, or underscore removed. If
    /// nothing survives sanitization, the customer part is omitted and the
    /// name falls back to `Order<id>.xlsx`.
    #[must_use]
    pub fn file_name(&self) -> String {
        let token = self
            .items
            .first()
            .map(|item| customer_token(&item.customer))
            .unwrap_or_default();
        if token.is_empty() {
            format!("Order{}.xlsx", self.order_id)
        } else {
            format!("Order{}_{token}.xlsx", self.order_id)
        }
    }
}

fn customer_token(name: &str) -> String {
    static NON_WORD: OnceLock<Regex> = OnceLock::new();
    let re = NON_WORD.get_or_init(|| Regex::new(r"\W").expect("hardcoded regex"));
    re.replace_all(name, "").into_owned()
}
