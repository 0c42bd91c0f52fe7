// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, column::Column, sql_builder::SQLBuilder, table::ViewName};

/// A single-row insert into a (mutation) view
#[derive(Debug, PartialEq)]
pub struct Insert {
    /// The view to insert into
    pub view: ViewName,
    /// The columns to insert into such as `("id", "title")`
    pub columns: Vec<String>,
    /// The values to insert, one per column
    pub values: Vec<Column>,
}

impl ExpressionBuilder for Insert {
    /// Build the insert statement of the form `INSERT INTO <view> (<columns>) VALUES (<values>)`.
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("INSERT INTO ");
        self.view.build(builder);

        builder.push_str(" (");
        builder.push_iter(self.columns.iter(), ", ", |builder, column| {
            builder.push_identifier(column);
        });
        builder.push_str(") VALUES (");
        builder.without_fully_qualified_column_names(|builder| {
            builder.push_elems(&self.values, ", ");
        });
        builder.push(')');
    }
}
