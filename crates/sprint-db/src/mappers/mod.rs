//! Entity to model mappers
//!
//! Conversions from database rows to domain entities (sprint-core).
//! Rows carrying enum columns use `TryFrom`, since a stored name that no
//! longer parses is a data error rather than a panic.

mod audit_log;
mod comment;
mod project;
mod tag;
mod task;
mod time_entry;
mod user;

use sprint_core::error::DomainError;
use sprint_core::value_objects::Snowflake;

/// Raw ids for binding to a `BIGINT[]` column
pub fn raw_ids(ids: &[Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}

pub(crate) fn snowflakes(ids: Vec<i64>) -> Vec<Snowflake> {
    ids.into_iter().map(Snowflake::new).collect()
}

pub(crate) fn corrupt_column(table: &str, column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::DatabaseError(format!("invalid {table}.{column}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_array_conversion() {
        let ids = vec![Snowflake::new(3), Snowflake::new(1)];
        let raw = raw_ids(&ids);
        assert_eq!(raw, vec![3, 1]);
        assert_eq!(snowflakes(raw), ids);
    }
}
