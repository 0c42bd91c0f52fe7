// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::io::Read;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{EntityMeta, ModelLoadingError, MutationMeta, RelationMeta};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase", from = "SchemaMetaSerialized")]
pub struct SchemaMeta {
    /// Schema holding the public, authorized and mutation views
    pub view_schema_name: String,
    pub entities: IndexMap<String, EntityMeta>,
    pub relations: IndexMap<String, RelationMeta>,
    pub mutations: IndexMap<String, MutationMeta>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaMetaSerialized {
    #[serde(default = "default_view_schema_name")]
    view_schema_name: String,
    #[serde(default)]
    entities: IndexMap<String, EntityMeta>,
    #[serde(default)]
    relations: IndexMap<String, RelationMeta>,
    #[serde(default)]
    mutations: IndexMap<String, MutationMeta>,
}

fn default_view_schema_name() -> String {
    "_graphql".to_string()
}

impl From<SchemaMetaSerialized> for SchemaMeta {
    fn from(serialized: SchemaMetaSerialized) -> Self {
        let relations = serialized
            .relations
            .into_iter()
            .map(|(name, mut relation)| {
                if relation.name.is_empty() {
                    relation.name = name.clone();
                }
                (name, relation)
            })
            .collect();

        SchemaMeta {
            view_schema_name: serialized.view_schema_name,
            entities: serialized.entities,
            relations,
            mutations: serialized.mutations,
        }
    }
}

impl SchemaMeta {
    pub fn from_json_str(value: &str) -> Result<Self, ModelLoadingError> {
        Ok(serde_json::from_str(value)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, ModelLoadingError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn entity(&self, type_name: &str) -> Option<&EntityMeta> {
        self.entities.get(type_name)
    }

    pub fn relation(&self, name: &str) -> Option<&RelationMeta> {
        self.relations.get(name)
    }

    pub fn mutation(&self, name: &str) -> Option<&MutationMeta> {
        self.mutations.get(name)
    }

    /// The schema of the entity's views
    pub fn entity_view_schema<'a>(&'a self, entity: &'a EntityMeta) -> &'a str {
        entity
            .view_schema_name
            .as_deref()
            .unwrap_or(&self.view_schema_name)
    }

    /// The schema of the mutation's view
    pub fn mutation_view_schema<'a>(&'a self, mutation: &'a MutationMeta) -> &'a str {
        mutation
            .view_schema_name
            .as_deref()
            .unwrap_or(&self.view_schema_name)
    }
}
