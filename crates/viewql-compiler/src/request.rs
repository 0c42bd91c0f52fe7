// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A requested field along with its sub-selection, as decoded by the transport layer
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQueryNode {
    /// The field name
    pub name: String,
    /// The key under which the result is returned (defaults to the field name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Requested sub-fields grouped by concrete type name, keyed by result key
    #[serde(default)]
    pub fields_by_type_name: IndexMap<String, IndexMap<String, ParsedQueryNode>>,
    #[serde(default)]
    pub args: IndexMap<String, Value>,
}

impl ParsedQueryNode {
    pub fn result_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// The concrete type of this node along with its requested fields. For a polymorphic node, the
    /// first type is used.
    pub fn selection(&self) -> Option<(&str, &IndexMap<String, ParsedQueryNode>)> {
        self.fields_by_type_name
            .first()
            .map(|(type_name, fields)| (type_name.as_str(), fields))
    }
}

/// A mutation request such as `createPost(input: {...})`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MutationNode {
    /// The mutation name
    pub name: String,
    pub args: MutationArgs,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MutationArgs {
    #[serde(default)]
    pub input: IndexMap<String, Value>,
}
