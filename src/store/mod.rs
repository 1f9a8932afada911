//! Transaction store
//!
//! The single date-ranged query against the order table.

use sqlx::PgPool;

use crate::domain::RawTransactionRow;

/// Lifecycle states included in the report: everything else (draft,
/// cancelled, ...) is invisible to the endpoint.
///
/// The range bounds are asymmetric: the start bound compares the row's own
/// date cast, the end bound casts the parameter. Kept exactly as the
/// upstream report query has it.
const TRANSACTIONS_IN_RANGE_SQL: &str = r#"
SELECT
    name,
    id::bigint AS id,
    date_order,
    amount_total,
    amount_tax,
    amount_total - amount_tax AS amount_net,
    0::numeric AS service_charge
FROM pos_order
WHERE state IN ('paid', 'done', 'invoiced')
  AND date_order::date >= $1::date
  AND date_order <= CAST($2 AS DATE)
ORDER BY date_order ASC
"#;

/// Read access to point-of-sale order rows.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    pool: PgPool,
}

impl TransactionStore {
    /// Create a new TransactionStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch all matching rows for the inclusive `[start, end]` date range,
    /// ordered ascending by order timestamp.
    ///
    /// Both parameters are the validated `YYYY-MM-DD` strings, passed to
    /// the query unchanged. One pooled connection is held for the duration
    /// of the call; the `PoolConnection` guard returns it to the pool on
    /// every exit path.
    pub async fn fetch_in_range(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Vec<RawTransactionRow>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, RawTransactionRow>(TRANSACTIONS_IN_RANGE_SQL)
            .bind(start)
            .bind(end)
            .fetch_all(&mut *conn)
            .await?;

        tracing::debug!("Fetched {} transactions in [{}, {}]", rows.len(), start, end);

        Ok(rows)
    }
}
