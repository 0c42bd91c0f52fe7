// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    ExpressionBuilder, column::Column, limit::Limit, offset::Offset, order::OrderBy,
    predicate::Predicate, sql_builder::SQLBuilder, table::Table,
};

/// A column in the select list, optionally named with `AS "<alias>"`
#[derive(Debug, PartialEq)]
pub struct AliasedColumn {
    pub column: Column,
    pub alias: Option<String>,
}

impl AliasedColumn {
    pub fn new(column: Column, alias: impl Into<String>) -> Self {
        Self {
            column,
            alias: Some(alias.into()),
        }
    }

    pub fn unnamed(column: Column) -> Self {
        Self {
            column,
            alias: None,
        }
    }
}

impl ExpressionBuilder for AliasedColumn {
    fn build(&self, builder: &mut SQLBuilder) {
        self.column.build(builder);
        if let Some(alias) = &self.alias {
            builder.push_str(" AS ");
            builder.push_identifier(alias);
        }
    }
}

/// A select statement
#[derive(Debug, PartialEq)]
pub struct Select {
    /// The columns to select
    pub columns: Vec<AliasedColumn>,
    /// The table to select from. A select without a table (`SELECT <expr>`) is used for the
    /// outermost statement, which only evaluates the top-level aggregation.
    pub table: Option<Table>,
    /// The predicate to filter the rows
    pub predicate: Predicate,
    /// The order by clause
    pub order_by: Option<OrderBy>,
    /// The limit clause
    pub limit: Option<Limit>,
    /// The offset clause
    pub offset: Option<Offset>,
}

impl Select {
    pub fn new(columns: Vec<AliasedColumn>, table: Table) -> Self {
        Self {
            columns,
            table: Some(table),
            predicate: Predicate::True,
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    /// `SELECT <columns>` without a `FROM` clause
    pub fn expression(columns: Vec<AliasedColumn>) -> Self {
        Self {
            columns,
            table: None,
            predicate: Predicate::True,
            order_by: None,
            limit: None,
            offset: None,
        }
    }
}

impl ExpressionBuilder for Select {
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("SELECT ");
        builder.push_elems(&self.columns, ", ");

        if let Some(table) = &self.table {
            builder.push_str(" FROM ");
            table.build(builder);
        }

        // Avoid correct, but inelegant "WHERE TRUE" clause
        if self.predicate != Predicate::True {
            builder.push_str(" WHERE ");
            self.predicate.build(builder);
        }
        if let Some(order_by) = &self.order_by {
            builder.push_space();
            order_by.build(builder);
        }
        if let Some(limit) = &self.limit {
            builder.push_space();
            limit.build(builder);
        }
        if let Some(offset) = &self.offset {
            builder.push_space();
            offset.build(builder);
        }
    }
}
