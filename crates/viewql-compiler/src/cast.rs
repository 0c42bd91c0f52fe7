// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;
use viewql_sql::{Column, SQLParamContainer};

/// Convert a caller supplied JSON value to a bound parameter (`None` for `null`).
///
/// Every value is sent as text and parsed by Postgres into the type of the column it is compared
/// with or written to. Objects and arrays are sent as their JSON text, so composite and array
/// columns go through the same mechanism as scalars.
pub fn cast_value(value: &Value) -> Option<SQLParamContainer> {
    match value {
        Value::Null => None,
        Value::String(v) => Some(SQLParamContainer::text(v.as_str())),
        Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            Some(SQLParamContainer::text(value.to_string()))
        }
    }
}

/// A literal usable in a predicate. `null` becomes the SQL `NULL` (so that comparisons against it
/// turn into `IS NULL`).
pub fn literal_column(value: &Value) -> Column {
    cast_value(value).map(Column::Param).unwrap_or(Column::Null)
}

/// A literal to be written to a column. `null` is bound as a (typed) NULL parameter.
pub fn value_column(value: &Value) -> Column {
    Column::Param(cast_value(value).unwrap_or_else(SQLParamContainer::null))
}
