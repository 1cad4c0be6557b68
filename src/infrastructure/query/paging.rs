use sqlx::{QueryBuilder, Sqlite};

use crate::domain::member::{Direction, NullsOrder, PageRequest, SortField, SortOrder};

fn column(field: SortField) -> &'static str {
    match field {
        SortField::Id => "m.member_id",
        SortField::Username => "m.username",
        SortField::Age => "m.age",
        SortField::TeamName => "t.name",
    }
}

/// Appends ` ORDER BY ...` for the given orders
///
/// Member ID ascending is the whole ordering when `sort` is empty, and the
/// final tiebreak otherwise, so a window over the result is reproducible.
/// `SortField::TeamName` needs the team joined as `t`.
pub fn push_order_by<'args>(sort: &[SortOrder], qb: &mut QueryBuilder<'args, Sqlite>) {
    qb.push(" ORDER BY ");

    for order in sort {
        qb.push(column(order.field));
        qb.push(match order.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        });
        match order.nulls {
            NullsOrder::Default => {}
            NullsOrder::First => {
                qb.push(" NULLS FIRST");
            }
            NullsOrder::Last => {
                qb.push(" NULLS LAST");
            }
        }
        qb.push(", ");
    }

    qb.push("m.member_id ASC");
}

/// Appends ` LIMIT ? OFFSET ?`
pub fn push_window<'args>(page: &PageRequest, qb: &mut QueryBuilder<'args, Sqlite>) {
    qb.push(" LIMIT ")
        .push_bind(to_sql_int(page.limit))
        .push(" OFFSET ")
        .push_bind(to_sql_int(page.offset));
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
