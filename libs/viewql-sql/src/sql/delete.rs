// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{
    ExpressionBuilder, predicate::Predicate, sql_builder::SQLBuilder, table::ViewName,
};

#[derive(Debug, PartialEq)]
pub struct Delete {
    pub view: ViewName,
    pub predicate: Predicate,
}

impl ExpressionBuilder for Delete {
    /// Build the delete statement of the form `DELETE FROM <view> WHERE <predicate>`. The `WHERE`
    /// is omitted if the predicate is `True`.
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("DELETE FROM ");
        self.view.build(builder);

        if self.predicate != Predicate::True {
            builder.push_str(" WHERE ");
            builder.without_fully_qualified_column_names(|builder| {
                self.predicate.build(builder);
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Column, SQLParamContainer, TextParam};

    #[test]
    fn delete_by_id() {
        let delete = Delete {
            view: ViewName::new("_graphql", "Post_mutation"),
            predicate: Predicate::eq(
                Column::physical("Post_mutation", "id"),
                Column::param(SQLParamContainer::text("abc")),
            ),
        };

        assert_binding!(
            delete.to_sql(),
            r#"DELETE FROM "_graphql"."Post_mutation" WHERE "id" = $1"#,
            TextParam::from("abc")
        );
    }
}
