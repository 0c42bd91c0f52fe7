// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::relation::TableName;

/// A queryable entity along with the two views it can be read through
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EntityMeta {
    pub table_schema_name: String,
    pub table_name: String,
    /// Schema of the views. Falls back to [crate::SchemaMeta::view_schema_name] if absent.
    #[serde(default)]
    pub view_schema_name: Option<String>,
    /// View exposing only the public columns
    pub public_view_name: String,
    /// View exposing all columns (a superset of the public view)
    pub auth_view_name: String,
    #[serde(default = "default_id_column_name")]
    pub id_column_name: String,
    /// Fields in declaration order
    pub fields: IndexMap<String, FieldMeta>,
    pub public_field_names: IndexSet<String>,
    /// Forbid listing all rows of this entity from the top level (i.e. without a match constraint)
    #[serde(default)]
    pub disallow_generic_root_level_aggregation: bool,
}

fn default_id_column_name() -> String {
    "id".to_string()
}

impl EntityMeta {
    pub fn field(&self, name: &str) -> Option<&FieldMeta> {
        self.fields.get(name)
    }

    pub fn is_public(&self, field_name: &str) -> bool {
        self.public_field_names.contains(field_name)
    }

    /// Does reading this field require an authenticated caller? Only fields backed by a column
    /// are gated; relations are checked at the level they resolve to.
    pub fn requires_authorization(&self, field_name: &str, field: &FieldMeta) -> bool {
        field.native_column_name.is_some() && !self.is_public(field_name)
    }

    pub fn view_name(&self, authorized: bool) -> &str {
        if authorized {
            &self.auth_view_name
        } else {
            &self.public_view_name
        }
    }

    pub fn table(&self) -> TableName {
        TableName::new(&self.table_schema_name, &self.table_name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    /// The column backing this field. Absent for computed fields and for the "many" end of a
    /// one-to-many relation.
    #[serde(default)]
    pub native_column_name: Option<String>,
    #[serde(default)]
    pub relation: Option<FieldRelation>,
}

impl FieldMeta {
    /// Column to read for a plain field: the native column, or a view column named after the
    /// field for computed ones.
    pub fn column_name<'a>(&'a self, field_name: &'a str) -> &'a str {
        self.native_column_name.as_deref().unwrap_or(field_name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FieldRelation {
    pub relation_name: String,
    pub is_list_type: bool,
    /// The table declaring the field (used to tell the two sides of the relation apart)
    pub owner_table: TableName,
}
