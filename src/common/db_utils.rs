// src/common/db_utils.rs

use sqlx::{Postgres, QueryBuilder};

pub(crate) const ORDER_COLUMNS: &str =
    "o.id, o.customer_id, o.total_amount, o.cost_amount, o.order_date";

// ---
// Composable filter over the `orders` table (aliased `o`).
// ---
/// Repositories push these filters onto a `QueryBuilder`, either in front of a
/// plain listing (`push_filters`) or of a `GROUP BY` (`push_where`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub year: Option<i32>,
    pub customer_id: Option<i32>,
}

impl OrderQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn customer(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Appends `WHERE ...` when any filter is set.
    ///
    /// The year is a half-open date range so `idx_orders_order_date` applies.
    pub(crate) fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut has_where = false;

        if let Some(year) = self.year {
            qb.push(clause_keyword(&mut has_where));
            qb.push("o.order_date >= make_date(")
                .push_bind(year)
                .push(", 1, 1) AND o.order_date < make_date(")
                .push_bind(year.saturating_add(1))
                .push(", 1, 1)");
        }
        if let Some(customer_id) = self.customer_id {
            qb.push(clause_keyword(&mut has_where));
            qb.push("o.customer_id = ").push_bind(customer_id);
        }
    }

    /// `push_where` followed by a stable `ORDER BY o.id`.
    pub(crate) fn push_filters(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        self.push_where(qb);
        qb.push(" ORDER BY o.id");
    }
}

fn clause_keyword(has_where: &mut bool) -> &'static str {
    if std::mem::replace(has_where, true) {
        " AND "
    } else {
        " WHERE "
    }
}
