// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, select::Select, sql_builder::SQLBuilder};

/// A schema-qualified view (or table) name: `"schema"."name"`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewName {
    pub schema: String,
    pub name: String,
}

impl ViewName {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

impl ExpressionBuilder for ViewName {
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_identifier(&self.schema);
        builder.push('.');
        builder.push_identifier(&self.name);
    }
}

/// The source of rows in a `FROM` clause. Both variants are always aliased, since every column
/// reference in a compiled query goes through an alias.
#[derive(Debug, PartialEq)]
pub enum Table {
    /// `"schema"."view" AS "alias"`
    View { view: ViewName, alias: String },
    /// `(<select>) AS "alias"`
    SubSelect { select: Box<Select>, alias: String },
}

impl Table {
    pub fn view(view: ViewName, alias: impl Into<String>) -> Self {
        Self::View {
            view,
            alias: alias.into(),
        }
    }

    pub fn sub_select(select: Select, alias: impl Into<String>) -> Self {
        Self::SubSelect {
            select: Box::new(select),
            alias: alias.into(),
        }
    }

    pub fn alias(&self) -> &str {
        match self {
            Table::View { alias, .. } | Table::SubSelect { alias, .. } => alias,
        }
    }
}

impl ExpressionBuilder for Table {
    fn build(&self, builder: &mut SQLBuilder) {
        match self {
            Table::View { view, alias } => {
                view.build(builder);
                builder.push_str(" AS ");
                builder.push_identifier(alias);
            }
            Table::SubSelect { select, alias } => {
                builder.push('(');
                select.build(builder);
                builder.push_str(") AS ");
                builder.push_identifier(alias);
            }
        }
    }
}
