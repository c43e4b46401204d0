use std::sync::Arc;

use chrono::NaiveDate;
use mysql::consts::ColumnType;
use mysql::prelude::Protocol;
use mysql::{Column, QueryResult, Value};

use crate::error::MysqlMiddlewareError;
use crate::results::ResultSet;
use crate::types::RowValues;

// Collation id MySQL uses for binary (non-textual) string data.
const BINARY_COLLATION: u16 = 63;

/// Column names from statement metadata, in declaration order.
pub(crate) fn extract_column_names(columns: &[Column]) -> Vec<String> {
    columns
        .iter()
        .map(|col| col.name_str().to_string())
        .collect()
}

/// Decode one driver value into a [`RowValues`], guided by column metadata.
///
/// JSON columns parse into `RowValues::JSON`, binary-collation blob columns
/// into `Blob`, temporal values into `Timestamp`. Anything textual that is
/// valid UTF-8 becomes `Text`; otherwise the raw bytes are kept as `Blob`.
#[must_use]
pub fn mysql_extract_value(column: &Column, value: Value) -> RowValues {
    match value {
        Value::NULL => RowValues::Null,
        Value::Int(i) => RowValues::Int(i),
        Value::UInt(u) => {
            // Values past i64::MAX survive as text rather than wrapping.
            i64::try_from(u).map_or_else(|_| RowValues::Text(u.to_string()), RowValues::Int)
        }
        Value::Float(f) => RowValues::Float(f64::from(f)),
        Value::Double(d) => RowValues::Float(d),
        Value::Date(year, month, day, hour, minute, second, micros) => {
            NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
                .and_then(|date| {
                    date.and_hms_micro_opt(
                        u32::from(hour),
                        u32::from(minute),
                        u32::from(second),
                        micros,
                    )
                })
                .map_or(RowValues::Null, RowValues::Timestamp)
        }
        Value::Time(is_negative, days, hours, minutes, seconds, micros) => {
            let sign = if is_negative { "-" } else { "" };
            let total_hours = days * 24 + u32::from(hours);
            let formatted = if micros > 0 {
                format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
            } else {
                format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}")
            };
            RowValues::Text(formatted)
        }
        Value::Bytes(bytes) => decode_bytes(column, bytes),
    }
}

fn decode_bytes(column: &Column, bytes: Vec<u8>) -> RowValues {
    if column.column_type() == ColumnType::MYSQL_TYPE_JSON {
        if let Ok(jval) = serde_json::from_slice(&bytes) {
            return RowValues::JSON(jval);
        }
    }

    let blob_typed = matches!(
        column.column_type(),
        ColumnType::MYSQL_TYPE_TINY_BLOB
            | ColumnType::MYSQL_TYPE_MEDIUM_BLOB
            | ColumnType::MYSQL_TYPE_LONG_BLOB
            | ColumnType::MYSQL_TYPE_BLOB
    );
    if blob_typed && column.character_set() == BINARY_COLLATION {
        return RowValues::Blob(bytes);
    }

    match String::from_utf8(bytes) {
        Ok(text) => RowValues::Text(text),
        Err(err) => RowValues::Blob(err.into_bytes()),
    }
}

/// Materialize an executed statement's rows into a [`ResultSet`].
///
/// Column names are registered before the first fetch, each fetched row is
/// snapshotted into an owned record, and fetch order is preserved.
pub(crate) fn build_result_set<P: Protocol>(
    column_names: Arc<Vec<String>>,
    result: &mut QueryResult<'_, '_, '_, P>,
) -> Result<ResultSet, MysqlMiddlewareError> {
    let column_count = column_names.len();
    let mut result_set = ResultSet::with_capacity(16);
    result_set.set_column_names(column_names);

    for row in result.by_ref() {
        let mut row = row
            .map_err(|e| MysqlMiddlewareError::ExecuteError(format!("row fetch failed: {e}")))?;
        let columns = row.columns();
        let mut row_values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            let value = row.take::<Value, _>(idx).unwrap_or(Value::NULL);
            row_values.push(mysql_extract_value(&columns[idx], value));
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}
