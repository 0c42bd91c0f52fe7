// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Low level building blocks for the SQL statements produced by the query and mutation compilers.
//!
//! A statement is first assembled as a tree of [Select], [Insert], [Update] or [Delete] values
//! (whose leaves are [Column]s and [Predicate]s) and then rendered through [ExpressionBuilder]
//! into the SQL text and its ordered list of bound parameters.
//!
//! Two rules hold for everything rendered by this crate:
//! - Identifiers (view names, column names, aliases) are always double-quoted by
//!   [SQLBuilder::push_identifier].
//! - Literal values are never rendered inline. A [Column::Param] becomes a positional placeholder
//!   (`$1`, `$2`, ...) and its value is appended to the parameter list in the same order.

#[cfg(any(test, feature = "test-support"))]
#[macro_use]
mod test_util;

mod sql;

pub use sql::{
    ExpressionBuilder, SQLParam, SQLParamContainer, TextParam,
    column::Column,
    delete::Delete,
    insert::Insert,
    json_agg::JsonAgg,
    limit::Limit,
    offset::Offset,
    order::{OrderBy, OrderByElement, Ordering},
    predicate::Predicate,
    row_to_json::RowToJson,
    select::{AliasedColumn, Select},
    sql_builder::SQLBuilder,
    table::{Table, ViewName},
    update::Update,
};
