// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;
use serde_json::Value;
use viewql_model::SchemaMeta;

use crate::request::ParsedQueryNode;

/// Users, posts, tags (many-to-many with posts), comments (not listable from the top level) and a
/// self-referential `User.manager`/`User.reports` relation
pub(crate) fn blog_schema() -> SchemaMeta {
    SchemaMeta::from_json_str(include_str!("../../../demos/blog-schema.json")).unwrap()
}

/// A plain field
pub(crate) fn leaf(name: &str) -> ParsedQueryNode {
    ParsedQueryNode {
        name: name.to_string(),
        alias: None,
        fields_by_type_name: IndexMap::new(),
        args: IndexMap::new(),
    }
}

/// A field selecting `fields` of `type_name`
pub(crate) fn node(name: &str, type_name: &str, fields: Vec<ParsedQueryNode>) -> ParsedQueryNode {
    let fields: IndexMap<String, ParsedQueryNode> = fields
        .into_iter()
        .map(|field| (field.result_key().to_string(), field))
        .collect();

    ParsedQueryNode {
        fields_by_type_name: IndexMap::from([(type_name.to_string(), fields)]),
        ..leaf(name)
    }
}

impl ParsedQueryNode {
    pub(crate) fn with_args(self, args: Value) -> Self {
        Self {
            args: serde_json::from_value(args).unwrap(),
            ..self
        }
    }
}
