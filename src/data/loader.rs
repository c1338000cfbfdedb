use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    COL_CATEGORY, COL_ORDER_DATE, COL_PROFIT, COL_SALES, COL_SUB_CATEGORY, OrderDataset,
    OrderRecord,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Schema and value failures. Any of these aborts the whole load.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: '{value}' is not a valid Order_Date")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: '{value}' in column {column} is not a number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an order dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one order per line (recommended)
/// * `.parquet` – flat columns, any Arrow type that renders as text
/// * `.json`    – `[{ "Category": "...", "Sales": 1.0, ... }, ...]`
pub fn load_file(path: &Path) -> Result<OrderDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// Row parsing shared by every format
// ---------------------------------------------------------------------------

/// Positions of the required columns within a header row.
struct ColumnIndex {
    category: usize,
    sub_category: usize,
    order_date: usize,
    sales: usize,
    profit: usize,
}

impl ColumnIndex {
    fn locate(headers: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            category: find(COL_CATEGORY)?,
            sub_category: find(COL_SUB_CATEGORY)?,
            order_date: find(COL_ORDER_DATE)?,
            sales: find(COL_SALES)?,
            profit: find(COL_PROFIT)?,
        })
    }

    /// Turn one row of text cells into a record. `row` is 1-based.
    fn parse(&self, row: usize, cells: Vec<String>) -> Result<OrderRecord, LoadError> {
        let cell = |idx: usize| cells.get(idx).map(|s| s.trim()).unwrap_or("");

        let order_date = parse_order_date(cell(self.order_date)).ok_or_else(|| {
            LoadError::InvalidDate {
                row,
                value: cell(self.order_date).to_string(),
            }
        })?;
        let sales = parse_amount(cell(self.sales), row, COL_SALES)?;
        let profit = parse_amount(cell(self.profit), row, COL_PROFIT)?;

        Ok(OrderRecord {
            category: cell(self.category).to_string(),
            sub_category: cell(self.sub_category).to_string(),
            order_date,
            sales,
            profit,
            cells,
        })
    }
}

/// A finite decimal amount. `NaN` and infinities are rejected.
fn parse_amount(s: &str, row: usize, column: &str) -> Result<f64, LoadError> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LoadError::InvalidNumber {
            row,
            column: column.to_string(),
            value: s.to_string(),
        })
}

/// Parse an order date, keeping only the calendar date.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, naive ISO date-times with a space or
/// `T` separator, and RFC 3339 timestamps (offset dropped, local date kept).
pub fn parse_order_date(s: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_local().date())
        })
}

fn build_dataset<I>(headers: Vec<String>, rows: I) -> Result<OrderDataset>
where
    I: IntoIterator<Item = Result<Vec<String>>>,
{
    let index = ColumnIndex::locate(&headers)?;
    let mut records = Vec::new();
    for (i, row) in rows.into_iter().enumerate() {
        let cells = row?;
        records.push(index.parse(i + 1, cells)?);
    }
    Ok(OrderDataset::from_records(headers, records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, at least the required columns.
/// Extra columns are kept as text for display.
fn load_csv(path: &Path) -> Result<OrderDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let rows = reader.records().enumerate().map(|(i, result)| -> Result<Vec<String>> {
        let record = result.with_context(|| format!("CSV row {}", i + 1))?;
        Ok(record.iter().map(|s| s.to_string()).collect())
    });

    build_dataset(headers, rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Category": "Furniture", "Sub_Category": "Chairs",
///     "Order_Date": "2024-01-15", "Sales": 100.0, "Profit": 20.0 },
///   ...
/// ]
/// ```
///
/// Columns are the union of all records' keys, in first-seen order. A record
/// missing a key gets an empty cell there.
fn load_json(path: &Path) -> Result<OrderDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {} is not a JSON object", i + 1))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records.iter().enumerate().map(|(i, rec)| -> Result<Vec<String>> {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {} is not a JSON object", i + 1))?;
        Ok(headers
            .iter()
            .map(|h| obj.get(h).map(json_to_text).unwrap_or_default())
            .collect())
    });

    build_dataset(headers.clone(), rows)
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of orders.
///
/// Each cell is rendered through Arrow's display formatter, so `Order_Date`
/// may be Utf8, Date32/Date64 or a Timestamp, and `Sales`/`Profit` any
/// numeric type. Nulls render empty and fail the required-column parse.
fn load_parquet(path: &Path) -> Result<OrderDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows: Vec<Result<Vec<String>>> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|col| {
                    if col.is_null(row) {
                        Ok(String::new())
                    } else {
                        array_value_to_string(col.as_ref(), row)
                            .with_context(|| format!("rendering parquet row {row}"))
                    }
                })
                .collect::<Result<Vec<String>>>();
            rows.push(cells);
        }
    }

    if headers.is_empty() {
        bail!("Parquet file has no columns");
    }
    build_dataset(headers, rows)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(ext: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn load_error(err: &anyhow::Error) -> &LoadError {
        err.downcast_ref::<LoadError>().expect("typed load error")
    }

    #[test]
    fn loads_csv_with_extra_columns() {
        let file = write_fixture(
            "csv",
            "Row_ID,Order_Date,Category,Sub_Category,Sales,Profit\n\
             1,11/8/2017,Furniture,Chairs,100.5,20\n\
             2,2017-12-01,Technology,Phones,50,-10.25\n",
        );
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns[0], "Row_ID");
        assert_eq!(ds.records[0].cells[0], "1");
        assert_eq!(
            ds.records[0].order_date,
            NaiveDate::from_ymd_opt(2017, 11, 8).unwrap()
        );
        assert_eq!(ds.records[1].profit, -10.25);
        assert_eq!(ds.category_names(), vec!["Furniture", "Technology"]);
    }

    #[test]
    fn missing_column_is_fatal() {
        let file = write_fixture(
            "csv",
            "Order_Date,Category,Sub_Category,Sales\n2017-01-01,A,a,1\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            load_error(&err),
            &LoadError::MissingColumn("Profit".to_string())
        );
    }

    #[test]
    fn bad_number_names_row_and_column() {
        let file = write_fixture(
            "csv",
            "Order_Date,Category,Sub_Category,Sales,Profit\n\
             2017-01-01,A,a,1,2\n\
             2017-01-02,A,a,lots,2\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            load_error(&err),
            &LoadError::InvalidNumber {
                row: 2,
                column: "Sales".to_string(),
                value: "lots".to_string(),
            }
        );
    }

    #[test]
    fn bad_date_is_fatal() {
        let file = write_fixture(
            "csv",
            "Order_Date,Category,Sub_Category,Sales,Profit\nsoon,A,a,1,2\n",
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(load_error(&err), LoadError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn loads_json_records() {
        let file = write_fixture(
            "json",
            r#"[
                {"Category": "Furniture", "Sub_Category": "Chairs",
                 "Order_Date": "2024-01-15T00:00:00", "Sales": 100, "Profit": 20.0},
                {"Category": "Furniture", "Sub_Category": "Chairs",
                 "Order_Date": "2024-02-10", "Sales": 50.0, "Profit": -10}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].sales, 100.0);
        assert_eq!(ds.records[1].profit, -10.0);
    }

    #[test]
    fn json_columns_keep_file_order() {
        let file = write_fixture(
            "json",
            r#"[
                {"Sub_Category": "Chairs", "Category": "Furniture", "Sales": 100,
                 "Profit": 20, "Order_Date": "2024-01-15"},
                {"Sub_Category": "Chairs", "Category": "Furniture", "Sales": 50,
                 "Profit": -10, "Order_Date": "2024-02-10", "Region": "West"}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(
            ds.columns,
            vec!["Sub_Category", "Category", "Sales", "Profit", "Order_Date", "Region"]
        );
        assert_eq!(ds.records[0].cells[5], "");
        assert_eq!(ds.records[1].cells[5], "West");
        assert_eq!(ds.records[1].cells[0], "Chairs");
    }

    #[test]
    fn non_finite_amounts_are_fatal() {
        for (sales, profit, column, value) in [
            ("NaN", "1", "Sales", "NaN"),
            ("100", "inf", "Profit", "inf"),
            ("-inf", "1", "Sales", "-inf"),
        ] {
            let file = write_fixture(
                "csv",
                &format!(
                    "Order_Date,Category,Sub_Category,Sales,Profit\n\
                     2017-01-01,A,a,100,10\n\
                     2017-01-02,A,a,{sales},{profit}\n"
                ),
            );
            let err = load_file(file.path()).unwrap_err();
            assert_eq!(
                load_error(&err),
                &LoadError::InvalidNumber {
                    row: 2,
                    column: column.to_string(),
                    value: value.to_string(),
                }
            );
        }
    }

    #[test]
    fn loads_parquet_with_typed_columns() {
        use std::sync::Arc;

        use arrow::array::{Date32Array, Float64Array, StringArray};
        use arrow::datatypes::{DataType, Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("Order_Date", DataType::Date32, false),
            Field::new("Category", DataType::Utf8, false),
            Field::new("Sub_Category", DataType::Utf8, false),
            Field::new("Sales", DataType::Float64, false),
            Field::new("Profit", DataType::Float64, false),
        ]));
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let jan15 = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let feb10 = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Date32Array::from(vec![
                    (jan15 - epoch).num_days() as i32,
                    (feb10 - epoch).num_days() as i32,
                ])),
                Arc::new(StringArray::from(vec!["Furniture", "Furniture"])),
                Arc::new(StringArray::from(vec!["Chairs", "Chairs"])),
                Arc::new(Float64Array::from(vec![100.5, 50.0])),
                Arc::new(Float64Array::from(vec![20.0, -10.25])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let out = file.as_file().try_clone().unwrap();
        let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(
            ds.columns,
            vec!["Order_Date", "Category", "Sub_Category", "Sales", "Profit"]
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].order_date, jan15);
        assert_eq!(ds.records[1].order_date, feb10);
        assert_eq!(ds.records[0].sales, 100.5);
        assert_eq!(ds.records[1].profit, -10.25);
        assert_eq!(ds.sub_categories_of("Furniture"), ["Chairs"]);
    }

    #[test]
    fn json_null_amount_is_fatal() {
        let file = write_fixture(
            "json",
            r#"[{"Category": "A", "Sub_Category": "a", "Order_Date": "2024-01-15",
                 "Sales": null, "Profit": 1}]"#,
        );
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(load_error(&err), LoadError::InvalidNumber { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = write_fixture("xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(
            load_error(&err),
            &LoadError::UnsupportedExtension("xlsx".to_string())
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("/nonexistent/orders.csv")).is_err());
    }

    #[test]
    fn order_date_formats() {
        let jan15 = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_order_date("2024-01-15"), jan15);
        assert_eq!(parse_order_date("01/15/2024"), jan15);
        assert_eq!(parse_order_date("1/15/2024"), jan15);
        assert_eq!(parse_order_date("2024-01-15 23:59:59"), jan15);
        assert_eq!(parse_order_date("2024-01-15T08:30:00.250"), jan15);
        assert_eq!(parse_order_date("2024-01-15T23:30:00-05:00"), jan15);
        assert_eq!(parse_order_date("15th of January"), None);
    }
}
