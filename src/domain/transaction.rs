//! Transaction formatting
//!
//! Pure per-row mapping from the raw query result to the external record
//! shape. All monetary fields are normalized to exactly two decimal digits;
//! the discount is either fixed at zero or derived from the accounting
//! identity `gross - net - tax - service_charge`, per configuration.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use sqlx::FromRow;

use crate::config::DiscountStrategy;

/// One row as returned by the transactions query.
///
/// Every column is nullable: the upstream store does not enforce presence,
/// and missing values are tolerated rather than rejected.
#[derive(Debug, Clone, FromRow)]
pub struct RawTransactionRow {
    /// Receipt/check identifier
    pub name: Option<String>,

    /// Unique transaction identifier
    pub id: Option<i64>,

    /// Order timestamp, store-local
    pub date_order: Option<NaiveDateTime>,

    /// Gross amount
    pub amount_total: Option<Decimal>,

    /// Tax amount
    pub amount_tax: Option<Decimal>,

    /// Net amount (`amount_total - amount_tax`, computed by the query)
    pub amount_net: Option<Decimal>,

    /// Placeholder, selected as a constant zero by the query
    pub service_charge: Option<Decimal>,
}

/// The external record shape, one per raw row, order-preserving.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedTransaction {
    #[serde(rename = "Receipt/Check_Number")]
    pub receipt_number: String,

    #[serde(rename = "Transaction_Unique_Id")]
    pub unique_id: String,

    /// `YYYY-MM-DD`, empty when the source timestamp is null
    #[serde(rename = "Transaction_Date")]
    pub date: String,

    /// `HH:MM:SS.sss`, no timezone suffix, empty when the source is null
    #[serde(rename = "Transaction_Time")]
    pub time: String,

    #[serde(rename = "Transaction_Gross")]
    pub gross: f64,

    #[serde(rename = "Transaction_Net")]
    pub net: f64,

    #[serde(rename = "Transaction_Tax")]
    pub tax: f64,

    #[serde(rename = "Transaction_Service_Charge")]
    pub service_charge: f64,

    #[serde(rename = "Transaction_Discount")]
    pub discount: f64,
}

/// Format one raw row. Null numeric inputs default to zero before rounding;
/// null strings become empty strings.
pub fn format_transaction(
    row: &RawTransactionRow,
    strategy: DiscountStrategy,
) -> FormattedTransaction {
    let gross = round2(row.amount_total);
    let net = round2(row.amount_net);
    let tax = round2(row.amount_tax);
    let service_charge = round2(row.service_charge);

    let discount = match strategy {
        DiscountStrategy::Fixed => Decimal::ZERO,
        DiscountStrategy::Derived => {
            (gross - net - tax - service_charge)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        }
    };

    let (date, time) = split_timestamp(row.date_order);

    FormattedTransaction {
        receipt_number: row.name.clone().unwrap_or_default(),
        unique_id: row.id.map(|id| id.to_string()).unwrap_or_default(),
        date,
        time,
        gross: to_number(gross),
        net: to_number(net),
        tax: to_number(tax),
        service_charge: to_number(service_charge),
        discount: to_number(discount),
    }
}

/// Format a whole result set, preserving count and order.
pub fn format_transactions(
    rows: &[RawTransactionRow],
    strategy: DiscountStrategy,
) -> Vec<FormattedTransaction> {
    rows.iter().map(|row| format_transaction(row, strategy)).collect()
}

/// Round to exactly two decimal digits, half away from zero. Null → 0.00.
fn round2(value: Option<Decimal>) -> Decimal {
    value
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// JSON-number representation of a rounded amount. The two-decimal nominal
/// precision survives even though `f64` may reintroduce representation
/// error.
fn to_number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Split a timestamp into date and time components by formatting it as an
/// ISO-8601 instant and splitting on the `T` separator. The time keeps
/// millisecond precision and carries no zone designator.
fn split_timestamp(ts: Option<NaiveDateTime>) -> (String, String) {
    let Some(dt) = ts else {
        return (String::new(), String::new());
    };

    let instant = dt.format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
    match instant.split_once('T') {
        Some((date, time)) => (date.to_string(), time.to_string()),
        None => (String::new(), String::new()),
    }
}
