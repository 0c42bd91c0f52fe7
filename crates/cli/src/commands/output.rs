// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The JSON document printed by the `query` and `mutation` commands.

use serde::Serialize;
use viewql_compiler::{CompiledMutation, CompiledQuery, CostTreeNode};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutput<'a> {
    pub sql: &'a str,
    pub values: Vec<String>,
    pub auth_required: bool,
    pub cost_tree: &'a CostTreeNode,
    pub max_depth: usize,
    pub potentially_high_cost: bool,
    pub cache_control: String,
}

impl<'a> From<&'a CompiledQuery> for QueryOutput<'a> {
    fn from(compiled: &'a CompiledQuery) -> Self {
        Self {
            sql: &compiled.sql,
            values: compiled.values.iter().map(|value| value.to_string()).collect(),
            auth_required: compiled.auth_required,
            cost_tree: &compiled.cost_tree,
            max_depth: compiled.max_depth,
            potentially_high_cost: compiled.potentially_high_cost,
            cache_control: compiled.cache_policy().header_value(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutput<'a> {
    pub mutation_name: &'a str,
    pub entity_type_name: &'a str,
    pub sql: &'a str,
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_entity_id: Option<&'a serde_json::Value>,
    pub cache_control: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<QueryOutput<'a>>,
}

impl<'a> MutationOutput<'a> {
    pub fn new(compiled: &'a CompiledMutation, response: Option<&'a CompiledQuery>) -> Self {
        Self {
            mutation_name: &compiled.mutation_name,
            entity_type_name: &compiled.entity_type_name,
            sql: &compiled.sql,
            values: compiled.values.iter().map(|value| value.to_string()).collect(),
            affected_entity_id: compiled.affected_entity_id.as_ref(),
            cache_control: compiled.cache_policy().header_value(),
            response: response.map(QueryOutput::from),
        }
    }
}

pub fn print_json<T: Serialize>(output: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use viewql_compiler::{
        CompilerConfig, MutationCompiler, MutationNode, ParsedQueryNode, QueryCompiler,
    };
    use viewql_model::SchemaMeta;

    use super::*;

    fn blog_schema() -> SchemaMeta {
        SchemaMeta::from_json_str(include_str!("../../../../demos/blog-schema.json")).unwrap()
    }

    fn titles_query() -> ParsedQueryNode {
        serde_json::from_value(json!({
            "name": "posts",
            "fieldsByTypeName": {
                "Post": { "title": { "name": "title" } }
            },
            "args": { "limit": 5 }
        }))
        .unwrap()
    }

    #[test]
    fn query_output() {
        let schema = blog_schema();
        let config = CompilerConfig::default();
        let compiled = QueryCompiler::new(&schema, &config)
            .compile(&titles_query(), false, None)
            .unwrap();

        let output = serde_json::to_value(QueryOutput::from(&compiled)).unwrap();

        assert_eq!(output["sql"], json!(compiled.sql));
        assert_eq!(output["values"], json!(["5"]));
        assert_eq!(output["authRequired"], json!(false));
        assert_eq!(output["maxDepth"], json!(1));
        assert_eq!(output["potentiallyHighCost"], json!(false));
        assert_eq!(output["cacheControl"], json!("public, max-age=600"));
        assert_eq!(
            output["costTree"]["meta"],
            json!({
                "limit": 5,
                "tableName": "Post",
                "tableSchemaName": "blog",
                "type": "aggregation"
            })
        );
    }

    #[test]
    fn mutation_output_with_response() {
        let schema = blog_schema();
        let config = CompilerConfig::default();

        let node: MutationNode = serde_json::from_value(json!({
            "name": "deletePost",
            "args": { "input": { "id": "p1" } }
        }))
        .unwrap();
        let compiled = MutationCompiler::new(&schema).compile(&node).unwrap();
        let response_match = compiled.response_match().unwrap();
        let response = QueryCompiler::new(&schema, &config)
            .compile(&titles_query(), false, Some(&response_match))
            .unwrap();

        let output = serde_json::to_value(MutationOutput::new(&compiled, Some(&response))).unwrap();

        assert_eq!(output["mutationName"], json!("deletePost"));
        assert_eq!(output["entityTypeName"], json!("Post"));
        assert_eq!(output["values"], json!([r#""p1""#]));
        assert_eq!(output["affectedEntityId"], json!("p1"));
        assert_eq!(output["cacheControl"], json!("no-store"));
        assert_eq!(output["response"]["values"], json!([r#""p1""#, "5"]));
    }
}
