//! Value objects - immutable types that represent domain concepts

mod audit;
mod snowflake;

pub use audit::{AuditAction, EntityType, ParseEnumError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
