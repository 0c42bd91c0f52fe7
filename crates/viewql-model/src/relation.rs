// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TableName {
    pub schema_name: String,
    pub table_name: String,
}

impl TableName {
    pub fn new(schema_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            schema_name: schema_name.into(),
            table_name: table_name.into(),
        }
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema_name, self.table_name)
    }
}

/// Cardinality of a relation as seen from one of its sides
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelationKind {
    One,
    Many,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReference {
    pub schema_name: String,
    pub table_name: String,
    pub column_name: String,
}

/// One endpoint of a relation.
///
/// For the `Post.author`/`User.posts` relation we will have:
/// - `{ blog.Post, ONE, columnName: authorId, reference: blog.User.id }`
/// - `{ blog.User, MANY }`
///
/// For the many-to-many `Post.tags`/`Tag.posts` relation both sides are `MANY` and each carries
/// the array column (of the linked ids) on its own table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RelationSide {
    pub schema_name: String,
    pub table_name: String,
    pub kind: RelationKind,
    /// The foreign key column on a `ONE` side, or the linking array column of a many-to-many side
    #[serde(default)]
    pub column_name: Option<String>,
    #[serde(default)]
    pub reference: Option<ColumnReference>,
    /// Element type of the linking array column
    #[serde(default = "default_array_element_type")]
    pub array_element_type: String,
}

fn default_array_element_type() -> String {
    "uuid".to_string()
}

impl RelationSide {
    pub fn is_table(&self, table: &TableName) -> bool {
        self.schema_name == table.schema_name && self.table_name == table.table_name
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RelationMeta {
    /// Filled from the key of the relation in [crate::SchemaMeta::relations] when absent
    #[serde(default)]
    pub name: String,
    pub sides: [RelationSide; 2],
}

/// The two sides of a relation, named from the perspective of the entity declaring the field
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRelation<'a> {
    pub own: &'a RelationSide,
    pub foreign: &'a RelationSide,
}

impl RelationMeta {
    /// Determine which side belongs to the table declaring the field.
    ///
    /// Sides are compared structurally against `owner`. If both sides are on the owner's table (a
    /// self-referential relation), the side whose cardinality agrees with the field wins (a list
    /// field is the `MANY` side, a non-list field the `ONE` side). Between two `MANY` sides (self
    /// many-to-many) the field's own linking column, `native_column`, picks the side, falling back
    /// to the first side.
    pub fn resolve(
        &self,
        owner: &TableName,
        is_list: bool,
        native_column: Option<&str>,
    ) -> Option<ResolvedRelation<'_>> {
        let [first, second] = &self.sides;

        let holds_column = |side: &RelationSide| {
            native_column.is_some() && side.column_name.as_deref() == native_column
        };

        let own_is_first = match (first.is_table(owner), second.is_table(owner)) {
            (true, false) => true,
            (false, true) => false,
            (false, false) => return None,
            (true, true) if first.kind != second.kind => {
                let expected_kind = if is_list {
                    RelationKind::Many
                } else {
                    RelationKind::One
                };
                first.kind == expected_kind
            }
            (true, true) => holds_column(first) || !holds_column(second),
        };

        Some(if own_is_first {
            ResolvedRelation {
                own: first,
                foreign: second,
            }
        } else {
            ResolvedRelation {
                own: second,
                foreign: first,
            }
        })
    }
}
