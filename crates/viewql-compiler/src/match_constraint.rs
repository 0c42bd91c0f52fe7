// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;
use viewql_model::EntityMeta;
use viewql_sql::{Column, Predicate};

use crate::{cast::literal_column, error::CompileError};

/// A column of the matched (child) entity
#[derive(Debug, Clone, PartialEq)]
pub enum ChildColumn {
    PrimaryKey,
    /// A native column of the child entity (such as the foreign key of a one-to-many relation)
    Named(String),
}

/// A column of the parent row: `"<table_alias>"."<column_name>"`
#[derive(Debug, Clone, PartialEq)]
pub struct ParentColumn {
    pub table_alias: String,
    pub column_name: String,
}

impl ParentColumn {
    pub fn new(table_alias: impl Into<String>, column_name: impl Into<String>) -> Self {
        Self {
            table_alias: table_alias.into(),
            column_name: column_name.into(),
        }
    }

    fn column(&self) -> Column {
        Column::physical(&self.table_alias, &self.column_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParentOperand {
    /// Nested queries match against a column of the enclosing row
    Column(ParentColumn),
    /// Top-level queries may match against a caller supplied value (bound as a parameter)
    Value(Value),
}

/// Links the rows of a query to a parent row
#[derive(Debug, Clone, PartialEq)]
pub enum MatchConstraint {
    /// `child.<child_column> = <parent>`
    Simple {
        child_column: ChildColumn,
        parent: ParentOperand,
    },
    /// `<parent_array> @> ARRAY[child.<child_column>]::<element_type>[]` (many-to-many)
    Array {
        parent_array: ParentColumn,
        child_column: ChildColumn,
        element_type: String,
    },
}

impl MatchConstraint {
    /// Match the row with the given primary key value
    pub fn on_id(value: Value) -> Self {
        MatchConstraint::Simple {
            child_column: ChildColumn::PrimaryKey,
            parent: ParentOperand::Value(value),
        }
    }

    pub(crate) fn predicate(
        &self,
        type_name: &str,
        entity: &EntityMeta,
        child_alias: &str,
    ) -> Result<Predicate, CompileError> {
        match self {
            MatchConstraint::Simple {
                child_column,
                parent,
            } => {
                let child = child_column_expr(child_column, type_name, entity, child_alias)?;
                let parent = match parent {
                    ParentOperand::Column(column) => column.column(),
                    ParentOperand::Value(value) => literal_column(value),
                };
                Ok(Predicate::eq(child, parent))
            }
            MatchConstraint::Array {
                parent_array,
                child_column,
                element_type,
            } => {
                let child = child_column_expr(child_column, type_name, entity, child_alias)?;
                Ok(Predicate::ArrayContains(
                    parent_array.column(),
                    Column::Array {
                        element: Box::new(child),
                        element_type: element_type.clone(),
                    },
                ))
            }
        }
    }
}

fn child_column_expr(
    child_column: &ChildColumn,
    type_name: &str,
    entity: &EntityMeta,
    child_alias: &str,
) -> Result<Column, CompileError> {
    let column_name = match child_column {
        ChildColumn::PrimaryKey => &entity.id_column_name,
        ChildColumn::Named(name) => {
            let known = name == &entity.id_column_name
                || entity
                    .fields
                    .values()
                    .any(|field| field.native_column_name.as_ref() == Some(name));
            if !known {
                return Err(CompileError::Schema(format!(
                    "The type '{type_name}' has no column '{name}' to match on"
                )));
            }
            name
        }
    };

    Ok(Column::physical(child_alias, column_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::blog_schema;
    use serde_json::json;
    use viewql_sql::{ExpressionBuilder, TextParam, assert_binding};

    #[test]
    fn simple_against_parent_column() {
        let schema = blog_schema();
        let constraint = MatchConstraint::Simple {
            child_column: ChildColumn::Named("authorId".to_string()),
            parent: ParentOperand::Column(ParentColumn::new("_local_1_", "id")),
        };

        let predicate = constraint
            .predicate("Post", schema.entity("Post").unwrap(), "_local_3_")
            .unwrap();
        assert_binding!(
            predicate.to_sql(),
            r#""_local_3_"."authorId" = "_local_1_"."id""#
        );
    }

    #[test]
    fn simple_against_value() {
        let schema = blog_schema();
        let predicate = MatchConstraint::on_id(json!("abc"))
            .predicate("Post", schema.entity("Post").unwrap(), "_local_1_")
            .unwrap();

        assert_binding!(
            predicate.to_sql(),
            r#""_local_1_"."id" = $1"#,
            TextParam::from("abc")
        );
    }

    #[test]
    fn array_containment() {
        let schema = blog_schema();
        let constraint = MatchConstraint::Array {
            parent_array: ParentColumn::new("_local_1_", "tagIds"),
            child_column: ChildColumn::PrimaryKey,
            element_type: "uuid".to_string(),
        };

        let predicate = constraint
            .predicate("Tag", schema.entity("Tag").unwrap(), "_local_3_")
            .unwrap();
        assert_binding!(
            predicate.to_sql(),
            r#""_local_1_"."tagIds" @> ARRAY["_local_3_"."id"]::uuid[]"#
        );
    }

    #[test]
    fn unknown_child_column() {
        let schema = blog_schema();
        let constraint = MatchConstraint::Simple {
            child_column: ChildColumn::Named("ownerId".to_string()),
            parent: ParentOperand::Value(json!(1)),
        };

        assert!(matches!(
            constraint.predicate("Post", schema.entity("Post").unwrap(), "_local_1_"),
            Err(CompileError::Schema(_))
        ));
    }
}
