// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use viewql_model::{EntityMeta, FieldMeta};
use viewql_sql::Column;

use crate::{cost::FetchType, error::CompileError, match_constraint::MatchConstraint};

/// Position of an entity level in the request tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionLevel {
    /// The entry point of the request
    TopLevel,
    /// Reached through a relation of an enclosing level
    Nested,
}

/// Listing rows of an entity from the top level without anything to match them against.
///
/// Entities with `disallowGenericRootLevelAggregation` must be reached through a relation (or a
/// match constraint) instead.
pub fn is_generic_root_aggregation(
    level: SelectionLevel,
    fetch_type: FetchType,
    match_constraint: Option<&MatchConstraint>,
) -> bool {
    level == SelectionLevel::TopLevel
        && fetch_type == FetchType::Aggregation
        && match_constraint.is_none()
}

/// The entity being selected at one level along with the authorization needs of the fields
/// requested at that level (and only that level).
pub(crate) struct EntityLevel<'a> {
    pub type_name: &'a str,
    pub entity: &'a EntityMeta,
    pub alias: String,
    is_authenticated: bool,
    auth_required: bool,
}

impl<'a> EntityLevel<'a> {
    pub fn new(
        type_name: &'a str,
        entity: &'a EntityMeta,
        alias: String,
        is_authenticated: bool,
    ) -> Self {
        Self {
            type_name,
            entity,
            alias,
            is_authenticated,
            auth_required: false,
        }
    }

    /// Look up a field, enforcing its authorization requirement
    pub fn field(&mut self, field_name: &str) -> Result<&'a FieldMeta, CompileError> {
        let field = self.entity.field(field_name).ok_or_else(|| {
            CompileError::Schema(format!(
                "The field '{}.{}' is not available",
                self.type_name, field_name
            ))
        })?;

        if self.entity.requires_authorization(field_name, field) {
            self.auth_required = true;
            if !self.is_authenticated {
                return Err(CompileError::Authorization {
                    type_name: self.type_name.to_string(),
                    field_name: field_name.to_string(),
                });
            }
        }

        Ok(field)
    }

    /// The column of a plain field (for filtering and ordering)
    pub fn column(&mut self, field_name: &str) -> Result<Column, CompileError> {
        let field = self.field(field_name)?;

        match (&field.relation, &field.native_column_name) {
            (None, Some(column_name)) => Ok(Column::physical(&self.alias, column_name)),
            _ => Err(CompileError::Schema(format!(
                "The field '{}.{}' cannot be used to filter or order",
                self.type_name, field_name
            ))),
        }
    }

    /// Did any field requested at this level need the authorized view?
    pub fn auth_required(&self) -> bool {
        self.auth_required
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::blog_schema;
    use serde_json::json;

    #[test]
    fn root_aggregation_predicate() {
        let constraint = MatchConstraint::on_id(json!("abc"));

        assert!(is_generic_root_aggregation(
            SelectionLevel::TopLevel,
            FetchType::Aggregation,
            None
        ));
        assert!(!is_generic_root_aggregation(
            SelectionLevel::TopLevel,
            FetchType::Aggregation,
            Some(&constraint)
        ));
        assert!(!is_generic_root_aggregation(
            SelectionLevel::Nested,
            FetchType::Aggregation,
            None
        ));
        assert!(!is_generic_root_aggregation(
            SelectionLevel::TopLevel,
            FetchType::Row,
            None
        ));
    }

    #[test]
    fn non_public_field_marks_level() {
        let schema = blog_schema();
        let user = schema.entity("User").unwrap();

        let mut level = EntityLevel::new("User", user, "_local_1_".to_string(), true);
        level.field("name").unwrap();
        assert!(!level.auth_required());
        level.field("email").unwrap();
        assert!(level.auth_required());

        let mut anonymous = EntityLevel::new("User", user, "_local_1_".to_string(), false);
        assert_eq!(
            anonymous.field("email").unwrap_err(),
            CompileError::Authorization {
                type_name: "User".to_string(),
                field_name: "email".to_string()
            }
        );
    }

    #[test]
    fn relations_are_not_columns() {
        let schema = blog_schema();
        let mut level = EntityLevel::new(
            "Post",
            schema.entity("Post").unwrap(),
            "_local_1_".to_string(),
            false,
        );

        assert_eq!(
            level.column("title").unwrap(),
            Column::physical("_local_1_", "title")
        );
        assert!(matches!(
            level.column("author"),
            Err(CompileError::Schema(_))
        ));
        assert!(matches!(
            level.column("excerpt"),
            Err(CompileError::Schema(_))
        ));
        assert!(matches!(
            level.column("missing"),
            Err(CompileError::Schema(_))
        ));
    }
}
