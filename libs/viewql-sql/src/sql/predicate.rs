// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, column::Column, sql_builder::SQLBuilder};

#[derive(Debug, PartialEq)]
pub enum Predicate {
    True,
    False,
    Eq(Column, Column),
    Neq(Column, Column),
    Lt(Column, Column),
    Lte(Column, Column),
    Gt(Column, Column),
    Gte(Column, Column),
    In(Column, Vec<Column>),
    IsNull(Column),
    IsNotNull(Column),
    /// Array containment: `<array> @> <elements>`
    ArrayContains(Column, Column),
    // Prefer Predicate::and(), which simplifies the clause, to construct an And expression
    And(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    pub fn eq(lhs: Column, rhs: Column) -> Predicate {
        if rhs == Column::Null {
            Predicate::IsNull(lhs)
        } else {
            Predicate::Eq(lhs, rhs)
        }
    }

    pub fn neq(lhs: Column, rhs: Column) -> Predicate {
        if rhs == Column::Null {
            Predicate::IsNotNull(lhs)
        } else {
            Predicate::Neq(lhs, rhs)
        }
    }

    /// `lhs IN (rhs...)`. An empty list matches nothing.
    pub fn in_list(lhs: Column, rhs: Vec<Column>) -> Predicate {
        if rhs.is_empty() {
            Predicate::False
        } else {
            Predicate::In(lhs, rhs)
        }
    }

    pub fn and(lhs: Predicate, rhs: Predicate) -> Predicate {
        match (lhs, rhs) {
            (Predicate::False, _) | (_, Predicate::False) => Predicate::False,
            (Predicate::True, rhs) => rhs,
            (lhs, Predicate::True) => lhs,
            (lhs, rhs) => Predicate::And(Box::new(lhs), Box::new(rhs)),
        }
    }

    /// Conjunction of all the given predicates (`TRUE` if there are none)
    pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
        predicates.into_iter().fold(Predicate::True, Predicate::and)
    }
}

impl ExpressionBuilder for Predicate {
    fn build(&self, builder: &mut SQLBuilder) {
        match &self {
            Predicate::True => builder.push_str("TRUE"),
            Predicate::False => builder.push_str("FALSE"),
            Predicate::Eq(column1, column2) => relational_combine(column1, column2, "=", builder),
            Predicate::Neq(column1, column2) => {
                relational_combine(column1, column2, "<>", builder)
            }
            Predicate::Lt(column1, column2) => relational_combine(column1, column2, "<", builder),
            Predicate::Lte(column1, column2) => {
                relational_combine(column1, column2, "<=", builder)
            }
            Predicate::Gt(column1, column2) => relational_combine(column1, column2, ">", builder),
            Predicate::Gte(column1, column2) => {
                relational_combine(column1, column2, ">=", builder)
            }
            Predicate::In(column, values) => {
                column.build(builder);
                builder.push_str(" IN (");
                builder.push_elems(values, ", ");
                builder.push(')');
            }
            Predicate::IsNull(column) => {
                column.build(builder);
                builder.push_str(" IS NULL");
            }
            Predicate::IsNotNull(column) => {
                column.build(builder);
                builder.push_str(" IS NOT NULL");
            }
            Predicate::ArrayContains(column1, column2) => {
                relational_combine(column1, column2, "@>", builder)
            }
            Predicate::And(predicate1, predicate2) => {
                logical_combine(predicate1, predicate2, "AND", builder)
            }
        }
    }
}

/// Combine two expressions with a relational operator.
fn relational_combine<E1: ExpressionBuilder, E2: ExpressionBuilder>(
    left: &E1,
    right: &E2,
    op: &'static str,
    builder: &mut SQLBuilder,
) {
    left.build(builder);
    builder.push_space();
    builder.push_str(op);
    builder.push_space();
    right.build(builder);
}

/// Combine two expressions with a logical binary operator.
fn logical_combine<E1: ExpressionBuilder, E2: ExpressionBuilder>(
    left: &E1,
    right: &E2,
    op: &'static str,
    builder: &mut SQLBuilder,
) {
    builder.push('(');
    left.build(builder);
    builder.push_space();
    builder.push_str(op);
    builder.push_space();
    right.build(builder);
    builder.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SQLParamContainer, TextParam};

    fn title() -> Column {
        Column::physical("_local_1_", "title")
    }

    #[test]
    fn null_comparisons_use_is_null() {
        assert_binding!(
            Predicate::eq(title(), Column::Null).to_sql(),
            r#""_local_1_"."title" IS NULL"#
        );
        assert_binding!(
            Predicate::neq(title(), Column::Null).to_sql(),
            r#""_local_1_"."title" IS NOT NULL"#
        );
    }

    #[test]
    fn and_simplifies_constants() {
        let eq = || Predicate::eq(title(), Column::param(SQLParamContainer::text("x")));

        assert_eq!(Predicate::and(Predicate::True, eq()), eq());
        assert_eq!(Predicate::and(eq(), Predicate::True), eq());
        assert_eq!(Predicate::and(eq(), Predicate::False), Predicate::False);
        assert_eq!(Predicate::all(vec![]), Predicate::True);
    }

    #[test]
    fn conjunction() {
        let predicate = Predicate::all(vec![
            Predicate::eq(
                Column::physical("_local_3_", "id"),
                Column::physical("_local_1_", "authorId"),
            ),
            Predicate::Gt(title(), Column::param(SQLParamContainer::text("a"))),
            Predicate::in_list(
                title(),
                vec![
                    Column::param(SQLParamContainer::text("b")),
                    Column::param(SQLParamContainer::text("c")),
                ],
            ),
        ]);

        assert_binding!(
            predicate.to_sql(),
            r#"(("_local_3_"."id" = "_local_1_"."authorId" AND "_local_1_"."title" > $1) AND "_local_1_"."title" IN ($2, $3))"#,
            TextParam::from("a"),
            TextParam::from("b"),
            TextParam::from("c")
        );
    }

    #[test]
    fn array_containment() {
        let predicate = Predicate::ArrayContains(
            Column::physical("_local_1_", "tagIds"),
            Column::Array {
                element: Box::new(Column::physical("_local_3_", "id")),
                element_type: "uuid".to_string(),
            },
        );

        assert_binding!(
            predicate.to_sql(),
            r#""_local_1_"."tagIds" @> ARRAY["_local_3_"."id"]::uuid[]"#
        );
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        assert_eq!(Predicate::in_list(title(), vec![]), Predicate::False);
    }
}
