// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    ExpressionBuilder, SQLParamContainer, json_agg::JsonAgg, row_to_json::RowToJson,
    select::Select, sql_builder::SQLBuilder,
};

/// A column-like concept covering any usage where a view column could be used. For example, in a
/// predicate you can say `"title" = $1` or `"author_id" = "id"`. Here, all three operands serve as
/// columns from our perspective.
#[derive(Debug, PartialEq)]
pub enum Column {
    /// A column of a view (or sub-select) referenced through its alias: `"alias"."name"`
    Physical { table_alias: String, name: String },
    /// A literal value. This will be mapped to a placeholder to avoid SQL injection.
    Param(SQLParamContainer),
    /// `row_to_json("alias")`
    RowToJson(RowToJson),
    /// `COALESCE(json_agg(...), '[]'::json)`
    JsonAgg(JsonAgg),
    /// A parenthesized sub-select
    SubSelect(Box<Select>),
    /// A single element array literal with a cast: `ARRAY[<element>]::<element_type>[]`. The
    /// element type comes from the schema metadata.
    Array {
        element: Box<Column>,
        element_type: String,
    },
    /// A null value
    Null,
}

impl Column {
    pub fn physical(table_alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Physical {
            table_alias: table_alias.into(),
            name: name.into(),
        }
    }

    pub fn param(value: SQLParamContainer) -> Self {
        Self::Param(value)
    }

    pub fn sub_select(select: Select) -> Self {
        Self::SubSelect(Box::new(select))
    }
}

impl ExpressionBuilder for Column {
    fn build(&self, builder: &mut SQLBuilder) {
        match self {
            Column::Physical { table_alias, name } => {
                builder.push_column(table_alias, name);
            }
            Column::Param(value) => builder.push_param(value.clone()),
            Column::RowToJson(row) => row.build(builder),
            Column::JsonAgg(agg) => agg.build(builder),
            Column::SubSelect(select) => {
                builder.push('(');
                select.build(builder);
                builder.push(')');
            }
            Column::Array {
                element,
                element_type,
            } => {
                builder.push_str("ARRAY[");
                element.build(builder);
                builder.push_str("]::");
                builder.push_str(element_type);
                builder.push_str("[]");
            }
            Column::Null => {
                builder.push_str("NULL");
            }
        }
    }
}
