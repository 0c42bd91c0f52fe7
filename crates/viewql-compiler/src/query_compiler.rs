// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Compiles a field-selection tree into a single SELECT returning JSON.
//!
//! Each entity level becomes a SELECT over the entity's public or authorized view (chosen by the
//! fields requested at that level only). A relation becomes a scalar sub-select nested in the
//! column list of its parent, matched against the parent row and wrapped either as a single JSON
//! object (`row_to_json`) or as a JSON array (`json_agg`). The top level is always an array.
//!
//! For `{ posts { title author { name } } }`, we generate:
//!
//! ```sql
//! SELECT (SELECT COALESCE(json_agg(row_to_json("_local_0_")), '[]'::json) FROM (
//!     SELECT "_local_1_"."title" AS "title", (SELECT row_to_json("_local_2_") FROM (
//!         SELECT "_local_3_"."name" AS "name" FROM "_graphql"."User_public" AS "_local_3_"
//!         WHERE "_local_3_"."id" = "_local_1_"."authorId"
//!     ) AS "_local_2_") AS "author"
//!     FROM "_graphql"."Post_public" AS "_local_1_"
//! ) AS "_local_0_") AS "posts"
//! ```

use tracing::{debug, instrument};
use viewql_model::{FieldMeta, FieldRelation, RelationKind, SchemaMeta};
use viewql_sql::{
    AliasedColumn, Column, ExpressionBuilder, JsonAgg, Predicate, RowToJson, SQLParamContainer,
    Select, Table, ViewName,
};

use crate::{
    cache::CachePolicy,
    clauses::QueryClauses,
    config::CompilerConfig,
    cost::{CostMeta, CostTreeNode, FetchType},
    error::{CompileError, WithContext},
    match_constraint::{ChildColumn, MatchConstraint, ParentColumn, ParentOperand},
    request::ParsedQueryNode,
    selection_level::{EntityLevel, SelectionLevel, is_generic_root_aggregation},
};

#[derive(Debug)]
pub struct CompiledQuery {
    pub sql: String,
    /// Parameters in placeholder order (`values[0]` binds `$1`)
    pub values: Vec<SQLParamContainer>,
    /// Did any level of the query need the authorized view?
    pub auth_required: bool,
    pub cost_tree: CostTreeNode,
    pub max_depth: usize,
    pub potentially_high_cost: bool,
}

impl CompiledQuery {
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy::for_query(self.auth_required)
    }
}

pub struct QueryCompiler<'a> {
    schema: &'a SchemaMeta,
    config: &'a CompilerConfig,
}

/// State threaded through one compilation
struct CompilationContext {
    alias_counter: usize,
    is_authenticated: bool,
}

impl CompilationContext {
    fn new(is_authenticated: bool) -> Self {
        Self {
            alias_counter: 0,
            is_authenticated,
        }
    }

    fn next_alias(&mut self) -> String {
        let alias = format!("_local_{}_", self.alias_counter);
        self.alias_counter += 1;
        alias
    }
}

/// A compiled fragment along with what we learned while compiling it
struct Resolved<T> {
    expression: T,
    cost: CostTreeNode,
    /// Set if this level or any level below it needed the authorized view
    auth_required: bool,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(schema: &'a SchemaMeta, config: &'a CompilerConfig) -> Self {
        Self { schema, config }
    }

    /// Compile a top-level request.
    ///
    /// The result is always a JSON array (keyed by the node's result key). A `match_constraint`
    /// restricts the rows (for example to the row affected by a mutation).
    #[instrument(
        name = "QueryCompiler::compile"
        skip(self, node, match_constraint)
        fields(query = node.result_key())
        )]
    pub fn compile(
        &self,
        node: &ParsedQueryNode,
        is_authenticated: bool,
        match_constraint: Option<&MatchConstraint>,
    ) -> Result<CompiledQuery, CompileError> {
        let mut context = CompilationContext::new(is_authenticated);

        let resolved = self.resolve_wrapped(
            &mut context,
            node,
            FetchType::Aggregation,
            SelectionLevel::TopLevel,
            match_constraint,
        )?;

        let (sql, values) = Select::expression(vec![resolved.expression]).to_sql();

        let max_depth = resolved.cost.max_depth();
        let potentially_high_cost = max_depth >= self.config.min_query_depth_to_check_cost_limit;

        debug!(
            sql = %sql,
            params = values.len(),
            max_depth,
            potentially_high_cost,
            "Compiled query"
        );

        Ok(CompiledQuery {
            sql,
            values,
            auth_required: resolved.auth_required,
            cost_tree: resolved.cost,
            max_depth,
            potentially_high_cost,
        })
    }

    /// Compile the entity select of `node` and wrap it into a single JSON value:
    /// - row: `(SELECT row_to_json("w") FROM (<select>) AS "w") AS "<key>"`
    /// - aggregation: `(SELECT COALESCE(json_agg(row_to_json("w")), '[]'::json) FROM (<select>) AS "w") AS "<key>"`
    fn resolve_wrapped(
        &self,
        context: &mut CompilationContext,
        node: &ParsedQueryNode,
        fetch_type: FetchType,
        level: SelectionLevel,
        match_constraint: Option<&MatchConstraint>,
    ) -> Result<Resolved<AliasedColumn>, CompileError> {
        let wrapper_alias = context.next_alias();

        let entity_select =
            self.resolve_entity(context, node, fetch_type, level, match_constraint)?;

        let row = Column::RowToJson(RowToJson::new(&wrapper_alias));
        let wrapped = match fetch_type {
            FetchType::Row => row,
            FetchType::Aggregation => Column::JsonAgg(JsonAgg::new(row)),
        };

        let select = Select::new(
            vec![AliasedColumn::unnamed(wrapped)],
            Table::sub_select(entity_select.expression, wrapper_alias),
        );

        Ok(Resolved {
            expression: AliasedColumn::new(Column::sub_select(select), node.result_key()),
            cost: entity_select.cost,
            auth_required: entity_select.auth_required,
        })
    }

    /// The select over the entity's view for one level of the request
    fn resolve_entity(
        &self,
        context: &mut CompilationContext,
        node: &ParsedQueryNode,
        fetch_type: FetchType,
        selection_level: SelectionLevel,
        match_constraint: Option<&MatchConstraint>,
    ) -> Result<Resolved<Select>, CompileError> {
        let (type_name, fields) = node.selection().ok_or_else(|| {
            CompileError::Schema(format!("No type selected for '{}'", node.name))
        })?;
        let (type_name, entity) = self
            .schema
            .entities
            .get_key_value(type_name)
            .ok_or_else(|| CompileError::Schema(format!("The type '{type_name}' is unknown")))?;

        if is_generic_root_aggregation(selection_level, fetch_type, match_constraint)
            && entity.disallow_generic_root_level_aggregation
        {
            return Err(CompileError::Policy(format!(
                "The type '{type_name}' cannot be accessed by a root level aggregation"
            )));
        }

        if fields.is_empty() {
            return Err(CompileError::Schema(format!(
                "No fields selected for '{type_name}'"
            )));
        }

        let mut level = EntityLevel::new(
            type_name,
            entity,
            context.next_alias(),
            context.is_authenticated,
        );
        let mut cost = CostTreeNode::new(CostMeta {
            fetch_type,
            table_name: entity.table_name.clone(),
            table_schema_name: entity.table_schema_name.clone(),
            limit: None,
        });
        let mut descendants_auth_required = false;
        let mut columns = Vec::with_capacity(fields.len());

        for field_node in fields.values() {
            let field = level.field(&field_node.name)?;

            match &field.relation {
                Some(relation) => {
                    let resolved =
                        self.resolve_relation(context, &level, field_node, field, relation)?;
                    descendants_auth_required |= resolved.auth_required;
                    cost.children
                        .insert(field_node.result_key().to_string(), resolved.cost);
                    columns.push(resolved.expression);
                }
                None => columns.push(AliasedColumn::new(
                    Column::physical(&level.alias, field.column_name(&field_node.name)),
                    field_node.result_key(),
                )),
            }
        }

        let clauses = QueryClauses::from_args(&node.args, &mut level)?;
        cost.meta.limit = clauses.limit.as_ref().map(|limit| limit.0);

        let match_predicate = match match_constraint {
            Some(constraint) => constraint.predicate(type_name, entity, &level.alias)?,
            None => Predicate::True,
        };

        let view = ViewName::new(
            self.schema.entity_view_schema(entity),
            entity.view_name(level.auth_required()),
        );
        debug!(
            type_name = %type_name,
            view = %view.name,
            alias = %level.alias,
            "Selected view"
        );

        let select = Select {
            predicate: Predicate::and(match_predicate, clauses.predicate),
            order_by: clauses.order_by,
            limit: clauses.limit,
            offset: clauses.offset,
            ..Select::new(columns, Table::view(view, level.alias.clone()))
        };

        Ok(Resolved {
            expression: select,
            cost,
            auth_required: level.auth_required() || descendants_auth_required,
        })
    }

    /// A nested sub-select for a relation field of `parent`
    fn resolve_relation(
        &self,
        context: &mut CompilationContext,
        parent: &EntityLevel,
        node: &ParsedQueryNode,
        field: &FieldMeta,
        field_relation: &FieldRelation,
    ) -> Result<Resolved<AliasedColumn>, CompileError> {
        let relation = self
            .schema
            .relation(&field_relation.relation_name)
            .ok_or_else(|| {
                CompileError::Schema(format!(
                    "The relation '{}' of '{}.{}' is unknown",
                    field_relation.relation_name, parent.type_name, node.name
                ))
            })?;

        let sides = relation
            .resolve(
                &field_relation.owner_table,
                field_relation.is_list_type,
                field.native_column_name.as_deref(),
            )
            .ok_or_else(|| {
                CompileError::Schema(format!(
                    "The relation '{}' has no side for '{}'",
                    relation.name, field_relation.owner_table
                ))
            })?;

        let missing_column = || {
            CompileError::Schema(format!(
                "The relation '{}' has no column to match '{}.{}'",
                relation.name, parent.type_name, node.name
            ))
        };

        let (fetch_type, match_constraint) = match (sides.own.kind, sides.foreign.kind) {
            // The parent holds the foreign key
            (RelationKind::One, _) => {
                let foreign_key = sides
                    .own
                    .column_name
                    .as_deref()
                    .or(field.native_column_name.as_deref())
                    .ok_or_else(missing_column)?;

                (
                    FetchType::Row,
                    MatchConstraint::Simple {
                        child_column: ChildColumn::PrimaryKey,
                        parent: ParentOperand::Column(ParentColumn::new(
                            &parent.alias,
                            foreign_key,
                        )),
                    },
                )
            }
            // Many-to-many: the parent holds an array of the children's ids
            (RelationKind::Many, RelationKind::Many) => {
                let array_column = sides
                    .own
                    .column_name
                    .as_deref()
                    .or(field.native_column_name.as_deref())
                    .ok_or_else(missing_column)?;

                (
                    FetchType::Aggregation,
                    MatchConstraint::Array {
                        parent_array: ParentColumn::new(&parent.alias, array_column),
                        child_column: ChildColumn::PrimaryKey,
                        element_type: sides.own.array_element_type.clone(),
                    },
                )
            }
            // The children hold the foreign key
            (RelationKind::Many, RelationKind::One) => {
                let foreign_key = sides
                    .foreign
                    .column_name
                    .as_deref()
                    .ok_or_else(missing_column)?;

                (
                    FetchType::Aggregation,
                    MatchConstraint::Simple {
                        child_column: ChildColumn::Named(foreign_key.to_string()),
                        parent: ParentOperand::Column(ParentColumn::new(
                            &parent.alias,
                            &parent.entity.id_column_name,
                        )),
                    },
                )
            }
        };

        self.resolve_wrapped(
            context,
            node,
            fetch_type,
            SelectionLevel::Nested,
            Some(&match_constraint),
        )
        .with_context(format!(
            "while resolving '{}.{}'",
            parent.type_name, node.name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{blog_schema, leaf, node};
    use serde_json::json;
    use viewql_sql::{TextParam, assert_params};

    fn compile(
        query: &ParsedQueryNode,
        is_authenticated: bool,
    ) -> Result<CompiledQuery, CompileError> {
        let schema = blog_schema();
        let config = CompilerConfig::default();
        QueryCompiler::new(&schema, &config).compile(query, is_authenticated, None)
    }

    #[test_log::test]
    fn posts_with_author() {
        let query = node(
            "posts",
            "Post",
            vec![leaf("title"), node("author", "User", vec![leaf("name")])],
        );

        let compiled = compile(&query, false).unwrap();

        insta::assert_snapshot!(
            compiled.sql,
            @r#"SELECT (SELECT COALESCE(json_agg(row_to_json("_local_0_")), '[]'::json) FROM (SELECT "_local_1_"."title" AS "title", (SELECT row_to_json("_local_2_") FROM (SELECT "_local_3_"."name" AS "name" FROM "_graphql"."User_public" AS "_local_3_" WHERE "_local_3_"."id" = "_local_1_"."authorId") AS "_local_2_") AS "author" FROM "_graphql"."Post_public" AS "_local_1_") AS "_local_0_") AS "posts""#
        );
        assert!(compiled.values.is_empty());
        assert!(!compiled.auth_required);
        assert_eq!(compiled.max_depth, 2);
        assert!(!compiled.potentially_high_cost);
        assert_eq!(compiled.cache_policy(), CachePolicy::Public);
    }

    #[test]
    fn one_to_many_matches_on_child_foreign_key() {
        let query = node("users", "User", vec![node("posts", "Post", vec![leaf("id")])]);

        let compiled = compile(&query, false).unwrap();

        assert_eq!(
            compiled.sql,
            r#"SELECT (SELECT COALESCE(json_agg(row_to_json("_local_0_")), '[]'::json) FROM (SELECT (SELECT COALESCE(json_agg(row_to_json("_local_2_")), '[]'::json) FROM (SELECT "_local_3_"."id" AS "id" FROM "_graphql"."Post_public" AS "_local_3_" WHERE "_local_3_"."authorId" = "_local_1_"."id") AS "_local_2_") AS "posts" FROM "_graphql"."User_public" AS "_local_1_") AS "_local_0_") AS "users""#
        );
    }

    #[test]
    fn many_to_many_in_both_directions() {
        let post_tags = node("posts", "Post", vec![node("tags", "Tag", vec![leaf("name")])]);
        let compiled = compile(&post_tags, false).unwrap();
        assert!(compiled.sql.contains(
            r#"(SELECT COALESCE(json_agg(row_to_json("_local_2_")), '[]'::json) FROM (SELECT "_local_3_"."name" AS "name" FROM "_graphql"."Tag_public" AS "_local_3_" WHERE "_local_1_"."tagIds" @> ARRAY["_local_3_"."id"]::uuid[]) AS "_local_2_") AS "tags""#
        ));

        let tag_posts = node("tags", "Tag", vec![node("posts", "Post", vec![leaf("title")])]);
        let compiled = compile(&tag_posts, false).unwrap();
        assert!(compiled.sql.contains(
            r#"(SELECT COALESCE(json_agg(row_to_json("_local_2_")), '[]'::json) FROM (SELECT "_local_3_"."title" AS "title" FROM "_graphql"."Post_public" AS "_local_3_" WHERE "_local_1_"."postIds" @> ARRAY["_local_3_"."id"]::uuid[]) AS "_local_2_") AS "posts""#
        ));
    }

    #[test]
    fn self_referential_relations() {
        let query = node(
            "users",
            "User",
            vec![
                node("manager", "User", vec![leaf("name")]),
                node("reports", "User", vec![leaf("name")]),
            ],
        );

        let compiled = compile(&query, false).unwrap();

        assert!(compiled.sql.contains(
            r#"(SELECT row_to_json("_local_2_") FROM (SELECT "_local_3_"."name" AS "name" FROM "_graphql"."User_public" AS "_local_3_" WHERE "_local_3_"."id" = "_local_1_"."managerId") AS "_local_2_") AS "manager""#
        ));
        assert!(compiled.sql.contains(
            r#"(SELECT COALESCE(json_agg(row_to_json("_local_4_")), '[]'::json) FROM (SELECT "_local_5_"."name" AS "name" FROM "_graphql"."User_public" AS "_local_5_" WHERE "_local_5_"."managerId" = "_local_1_"."id") AS "_local_4_") AS "reports""#
        ));
    }

    #[test]
    fn self_many_to_many_follows_each_fields_column() {
        let schema = SchemaMeta::from_json_str(
            r#"{
                "entities": {
                    "Person": {
                        "tableSchemaName": "social",
                        "tableName": "Person",
                        "publicViewName": "Person_public",
                        "authViewName": "Person_auth",
                        "fields": {
                            "name": { "nativeColumnName": "name" },
                            "friends": {
                                "nativeColumnName": "friendIds",
                                "relation": {
                                    "relationName": "Friendship",
                                    "isListType": true,
                                    "ownerTable": { "schemaName": "social", "tableName": "Person" }
                                }
                            },
                            "friendOf": {
                                "nativeColumnName": "friendOfIds",
                                "relation": {
                                    "relationName": "Friendship",
                                    "isListType": true,
                                    "ownerTable": { "schemaName": "social", "tableName": "Person" }
                                }
                            }
                        },
                        "publicFieldNames": ["name", "friends", "friendOf"]
                    }
                },
                "relations": {
                    "Friendship": {
                        "sides": [
                            { "schemaName": "social", "tableName": "Person", "kind": "MANY", "columnName": "friendIds" },
                            { "schemaName": "social", "tableName": "Person", "kind": "MANY", "columnName": "friendOfIds" }
                        ]
                    }
                }
            }"#,
        )
        .unwrap();
        let config = CompilerConfig::default();
        let compiler = QueryCompiler::new(&schema, &config);

        let nested_match = |field: &str| {
            let query = node("people", "Person", vec![node(field, "Person", vec![leaf("name")])]);
            let compiled = compiler.compile(&query, false, None).unwrap();
            let start = compiled.sql.find("WHERE").unwrap();
            compiled.sql[start..].to_string()
        };

        assert!(nested_match("friends").starts_with(
            r#"WHERE "_local_1_"."friendIds" @> ARRAY["_local_3_"."id"]::uuid[]"#
        ));
        assert!(nested_match("friendOf").starts_with(
            r#"WHERE "_local_1_"."friendOfIds" @> ARRAY["_local_3_"."id"]::uuid[]"#
        ));
    }

    #[test]
    fn non_public_fields_need_authentication() {
        let query = node("users", "User", vec![leaf("name"), leaf("email")]);

        assert_eq!(
            compile(&query, false).unwrap_err(),
            CompileError::Authorization {
                type_name: "User".to_string(),
                field_name: "email".to_string()
            }
        );

        let compiled = compile(&query, true).unwrap();
        assert!(compiled.auth_required);
        assert!(compiled.sql.contains(r#"FROM "_graphql"."User_auth" AS "_local_1_""#));
        assert_eq!(compiled.cache_policy(), CachePolicy::Private);
    }

    #[test]
    fn view_choice_is_per_level() {
        // Only the nested level requests a non-public field
        let query = node(
            "posts",
            "Post",
            vec![leaf("title"), node("author", "User", vec![leaf("email")])],
        );

        let compiled = compile(&query, true).unwrap();

        assert!(compiled.auth_required);
        assert!(compiled.sql.contains(r#"FROM "_graphql"."User_auth" AS "_local_3_""#));
        assert!(compiled.sql.contains(r#"FROM "_graphql"."Post_public" AS "_local_1_""#));

        let error = compile(&query, false).unwrap_err();
        assert_eq!(
            error,
            CompileError::WithContext(
                "while resolving 'Post.author'".to_string(),
                Box::new(CompileError::Authorization {
                    type_name: "User".to_string(),
                    field_name: "email".to_string()
                })
            )
        );
        assert_eq!(
            error.user_error_message(),
            "The field 'User.email' is not available without authentication"
        );
    }

    #[test]
    fn nested_errors_name_the_relation() {
        let query = node(
            "posts",
            "Post",
            vec![node("author", "User", vec![node("posts", "Post", vec![leaf("rating")])])],
        );

        let error = compile(&query, true).unwrap_err();

        assert!(matches!(error.root_cause(), CompileError::Schema(_)));
        assert_eq!(
            error.user_error_message(),
            "The field 'Post.rating' is not available: while resolving 'User.posts': while resolving 'Post.author'"
        );
    }

    #[test]
    fn unknown_type_and_field() {
        let unknown_field = node("posts", "Post", vec![leaf("rating")]);
        assert!(matches!(
            compile(&unknown_field, true),
            Err(CompileError::Schema(_))
        ));

        let unknown_type = node("articles", "Article", vec![leaf("title")]);
        assert!(matches!(
            compile(&unknown_type, true),
            Err(CompileError::Schema(_))
        ));
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert!(matches!(
            compile(&node("posts", "Post", vec![]), false),
            Err(CompileError::Schema(_))
        ));
        assert!(matches!(
            compile(&leaf("posts"), false),
            Err(CompileError::Schema(_))
        ));
    }

    #[test]
    fn root_level_aggregation_policy() {
        let comments = node("comments", "Comment", vec![leaf("body")]);
        assert!(matches!(
            compile(&comments, false),
            Err(CompileError::Policy(_))
        ));

        // Reachable through a relation
        let post_comments = node("posts", "Post", vec![comments.clone()]);
        assert!(compile(&post_comments, false).is_ok());

        // ...or with a match constraint
        let schema = blog_schema();
        let config = CompilerConfig::default();
        let constraint = MatchConstraint::on_id(json!("c1"));
        let compiled = QueryCompiler::new(&schema, &config)
            .compile(&comments, false, Some(&constraint))
            .unwrap();
        assert!(compiled.sql.ends_with(
            r#"FROM "_graphql"."Comment_public" AS "_local_1_" WHERE "_local_1_"."id" = $1) AS "_local_0_") AS "comments""#
        ));
        assert_params!(compiled.values, TextParam::from("c1"));
    }

    #[test]
    fn arguments_become_parameters() {
        let query = node(
            "posts",
            "Post",
            vec![
                leaf("title"),
                node("comments", "Comment", vec![leaf("body")])
                    .with_args(json!({ "where": { "body": "Nice'; DROP TABLE x; --" }, "limit": 3 })),
            ],
        )
        .with_args(json!({ "where": { "title": "Hello" }, "orderBy": "title_DESC", "limit": 10, "offset": 5 }));

        let compiled = compile(&query, false).unwrap();

        assert!(compiled.sql.contains(
            r#"WHERE ("_local_3_"."postId" = "_local_1_"."id" AND "_local_3_"."body" = $1) LIMIT $2"#
        ));
        assert!(compiled.sql.ends_with(
            r#"FROM "_graphql"."Post_public" AS "_local_1_" WHERE "_local_1_"."title" = $3 ORDER BY "_local_1_"."title" DESC LIMIT $4 OFFSET $5) AS "_local_0_") AS "posts""#
        ));
        assert!(!compiled.sql.contains("DROP TABLE"));
        assert_params!(
            compiled.values,
            TextParam::from("Nice'; DROP TABLE x; --"),
            3i64,
            TextParam::from("Hello"),
            10i64,
            5i64
        );

        assert_eq!(compiled.cost_tree.meta.limit, Some(10));
        assert_eq!(compiled.cost_tree.children["comments"].meta.limit, Some(3));
    }

    #[test]
    fn aliases_are_result_keys() {
        let mut title = leaf("title");
        title.alias = Some("headline".to_string());
        let mut query = node("posts", "Post", vec![title]);
        query.alias = Some("latest".to_string());

        let compiled = compile(&query, false).unwrap();

        assert!(compiled.sql.contains(r#""_local_1_"."title" AS "headline""#));
        assert!(compiled.sql.ends_with(r#"AS "latest""#));
    }

    #[test]
    fn computed_fields_read_the_view_column_named_after_the_field() {
        let query = node("posts", "Post", vec![leaf("excerpt")]);
        let compiled = compile(&query, false).unwrap();
        assert!(compiled.sql.contains(r#""_local_1_"."excerpt" AS "excerpt""#));
    }

    #[test]
    fn cost_tree_and_depth() {
        let query = node(
            "posts",
            "Post",
            vec![
                node("author", "User", vec![node("manager", "User", vec![leaf("name")])]),
                node("tags", "Tag", vec![leaf("name")]),
            ],
        );

        let compiled = compile(&query, false).unwrap();
        let tree = &compiled.cost_tree;

        assert_eq!(tree.meta.fetch_type, FetchType::Aggregation);
        assert_eq!(tree.meta.table_name, "Post");
        assert_eq!(tree.children["author"].meta.fetch_type, FetchType::Row);
        assert_eq!(tree.children["tags"].meta.fetch_type, FetchType::Aggregation);
        assert_eq!(
            tree.children["author"].children["manager"].meta.table_name,
            "User"
        );
        assert_eq!(compiled.max_depth, 3);
        assert!(!compiled.potentially_high_cost);
    }

    #[test]
    fn deep_queries_are_flagged() {
        // posts > author > posts > author > posts > author
        let mut query = node("author", "User", vec![leaf("name")]);
        for depth in 0..5 {
            query = if depth % 2 == 0 {
                node("posts", "Post", vec![query])
            } else {
                node("author", "User", vec![query])
            };
        }

        let compiled = compile(&query, false).unwrap();
        assert_eq!(compiled.max_depth, 6);
        assert!(compiled.potentially_high_cost);

        let relaxed = CompilerConfig {
            min_query_depth_to_check_cost_limit: 7,
        };
        let schema = blog_schema();
        let compiled = QueryCompiler::new(&schema, &relaxed)
            .compile(&query, false, None)
            .unwrap();
        assert!(!compiled.potentially_high_cost);
    }

    #[test]
    fn compilation_is_deterministic() {
        let query = node(
            "posts",
            "Post",
            vec![leaf("title"), node("tags", "Tag", vec![leaf("name")])],
        )
        .with_args(json!({ "where": { "views": { "gt": 3 } } }));

        let first = compile(&query, false).unwrap();
        let second = compile(&query, false).unwrap();

        assert_eq!(first.sql, second.sql);
        assert_eq!(first.values, second.values);
        assert_eq!(first.cost_tree, second.cost_tree);
    }
}
