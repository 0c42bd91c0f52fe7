// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    ExpressionBuilder, column::Column, predicate::Predicate, sql_builder::SQLBuilder,
    table::ViewName,
};

#[derive(Debug, PartialEq)]
pub struct Update {
    /// The view to update
    pub view: ViewName,
    /// The columns to update and their values
    pub column_values: Vec<(String, Column)>,
    /// The predicate selecting the rows to update
    pub predicate: Predicate,
}

impl ExpressionBuilder for Update {
    /// Build the update statement of the form `UPDATE <view> SET <column = value, ...> WHERE
    /// <predicate>`. The `WHERE` is omitted if the predicate is `True`.
    ///
    /// Columns are rendered without the alias since an update statement does not introduce one.
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("UPDATE ");
        self.view.build(builder);

        builder.push_str(" SET ");
        builder.without_fully_qualified_column_names(|builder| {
            builder.push_iter(
                self.column_values.iter(),
                ", ",
                |builder, (column, value)| {
                    builder.push_identifier(column);
                    builder.push_str(" = ");
                    value.build(builder);
                },
            );

            if self.predicate != Predicate::True {
                builder.push_str(" WHERE ");
                self.predicate.build(builder);
            }
        });
    }
}
