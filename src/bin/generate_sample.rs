use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// (category, sub-category, typical unit price, typical margin)
const CATALOGUE: &[(&str, &str, f64, f64)] = &[
    ("Furniture", "Bookcases", 220.0, -0.03),
    ("Furniture", "Chairs", 180.0, 0.08),
    ("Furniture", "Furnishings", 40.0, 0.14),
    ("Furniture", "Tables", 320.0, -0.09),
    ("Office Supplies", "Appliances", 120.0, 0.17),
    ("Office Supplies", "Binders", 25.0, 0.15),
    ("Office Supplies", "Paper", 18.0, 0.43),
    ("Office Supplies", "Storage", 70.0, 0.10),
    ("Technology", "Accessories", 65.0, 0.22),
    ("Technology", "Copiers", 900.0, 0.37),
    ("Technology", "Machines", 450.0, 0.02),
    ("Technology", "Phones", 230.0, 0.13),
];

struct Order {
    row_id: i64,
    order_id: String,
    order_date: NaiveDate,
    category: &'static str,
    sub_category: &'static str,
    quantity: i64,
    discount: f64,
    sales: f64,
    profit: f64,
}

fn generate_orders(rng: &mut SimpleRng, n: usize) -> Result<Vec<Order>> {
    let start = NaiveDate::from_ymd_opt(2014, 1, 1).context("start date")?;
    let days = 4 * 365;

    let mut orders = Vec::with_capacity(n);
    for _ in 0..n {
        let (category, sub_category, price, margin) = CATALOGUE[rng.below(CATALOGUE.len())];
        let quantity = 1 + rng.below(9) as i64;
        let discount = [0.0, 0.0, 0.1, 0.2, 0.3][rng.below(5)];
        let unit = price * (0.5 + rng.next_f64());
        let sales = (unit * quantity as f64 * (1.0 - discount) * 100.0).round() / 100.0;
        let noise = (rng.next_f64() - 0.5) * 0.2;
        let profit = (sales * (margin - discount + noise) * 100.0).round() / 100.0;

        orders.push(Order {
            row_id: 0,
            order_id: format!("US-{:05}", 10000 + rng.below(90000)),
            order_date: start + Duration::days(rng.below(days) as i64),
            category,
            sub_category,
            quantity,
            discount,
            sales,
            profit,
        });
    }
    orders.sort_by_key(|o| o.order_date);
    for (i, o) in orders.iter_mut().enumerate() {
        o.row_id = i as i64 + 1;
    }
    Ok(orders)
}

const HEADERS: [&str; 9] = [
    "Row_ID",
    "Order_ID",
    "Order_Date",
    "Category",
    "Sub_Category",
    "Sales",
    "Quantity",
    "Discount",
    "Profit",
];

fn write_csv(path: &str, orders: &[Order]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    wtr.write_record(HEADERS)?;
    for o in orders {
        wtr.write_record([
            o.row_id.to_string(),
            o.order_id.clone(),
            o.order_date.format("%m/%d/%Y").to_string(),
            o.category.to_string(),
            o.sub_category.to_string(),
            format!("{:.2}", o.sales),
            o.quantity.to_string(),
            format!("{:.1}", o.discount),
            format!("{:.2}", o.profit),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_parquet(path: &str, orders: &[Order]) -> Result<()> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("epoch")?;

    let schema = Arc::new(Schema::new(vec![
        Field::new(HEADERS[0], DataType::Int64, false),
        Field::new(HEADERS[1], DataType::Utf8, false),
        Field::new(HEADERS[2], DataType::Date32, false),
        Field::new(HEADERS[3], DataType::Utf8, false),
        Field::new(HEADERS[4], DataType::Utf8, false),
        Field::new(HEADERS[5], DataType::Float64, false),
        Field::new(HEADERS[6], DataType::Int64, false),
        Field::new(HEADERS[7], DataType::Float64, false),
        Field::new(HEADERS[8], DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(orders.iter().map(|o| o.row_id))),
            Arc::new(StringArray::from_iter_values(
                orders.iter().map(|o| o.order_id.as_str()),
            )),
            Arc::new(Date32Array::from_iter_values(
                orders
                    .iter()
                    .map(|o| (o.order_date - epoch).num_days() as i32),
            )),
            Arc::new(StringArray::from_iter_values(orders.iter().map(|o| o.category))),
            Arc::new(StringArray::from_iter_values(
                orders.iter().map(|o| o.sub_category),
            )),
            Arc::new(Float64Array::from_iter_values(orders.iter().map(|o| o.sales))),
            Arc::new(Int64Array::from_iter_values(orders.iter().map(|o| o.quantity))),
            Arc::new(Float64Array::from_iter_values(orders.iter().map(|o| o.discount))),
            Arc::new(Float64Array::from_iter_values(orders.iter().map(|o| o.profit))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let orders = generate_orders(&mut rng, 2000)?;

    write_csv("sample_orders.csv", &orders)?;
    write_parquet("sample_orders.parquet", &orders)?;

    println!(
        "Wrote {} orders ({} to {}) to sample_orders.csv and sample_orders.parquet",
        orders.len(),
        orders.first().map(|o| o.order_date.to_string()).unwrap_or_default(),
        orders.last().map(|o| o.order_date.to_string()).unwrap_or_default(),
    );
    Ok(())
}
