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
use tracing::{debug, instrument};
use viewql_model::{EntityMeta, MutationKind, MutationMeta, SchemaMeta};
use viewql_sql::{
    Column, Delete, ExpressionBuilder, Insert, Predicate, SQLParamContainer, Update, ViewName,
};

use crate::{
    cache::CachePolicy, cast::value_column, error::CompileError,
    match_constraint::MatchConstraint, request::MutationNode,
};

#[derive(Debug)]
pub struct CompiledMutation {
    pub sql: String,
    /// Parameters in placeholder order (`values[0]` binds `$1`)
    pub values: Vec<SQLParamContainer>,
    /// The id supplied with the input, if any
    pub affected_entity_id: Option<Value>,
    pub mutation_name: String,
    /// The type of the mutated entity (to compile the response query against)
    pub entity_type_name: String,
}

impl CompiledMutation {
    /// Constraint selecting the affected row, to build the mutation's response with the query
    /// compiler
    pub fn response_match(&self) -> Option<MatchConstraint> {
        self.affected_entity_id
            .clone()
            .map(MatchConstraint::on_id)
    }

    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy::NoStore
    }
}

/// Compiles a mutation into one statement against the entity's mutation view. Any row level
/// authorization and side effects (versioning, soft deletes and such) are left to the view.
pub struct MutationCompiler<'a> {
    schema: &'a SchemaMeta,
}

/// The mutation being compiled along with the entity it targets
struct MutationTarget<'a> {
    mutation_name: &'a str,
    type_name: &'a str,
    entity: &'a EntityMeta,
    view: ViewName,
}

impl<'a> MutationCompiler<'a> {
    pub fn new(schema: &'a SchemaMeta) -> Self {
        Self { schema }
    }

    #[instrument(
        name = "MutationCompiler::compile"
        skip(self, node)
        fields(mutation = %node.name)
        )]
    pub fn compile(&self, node: &MutationNode) -> Result<CompiledMutation, CompileError> {
        let (mutation_name, mutation) = self
            .schema
            .mutations
            .get_key_value(&node.name)
            .ok_or_else(|| {
                CompileError::Schema(format!("The mutation '{}' is unknown", node.name))
            })?;
        let target = self.target(mutation_name, mutation)?;
        let input = &node.args.input;

        let (sql, values) = match mutation.kind {
            MutationKind::Create => create(&target, input)?.to_sql(),
            MutationKind::Update => update(&target, input)?.to_sql(),
            MutationKind::Delete => delete(&target, input)?.to_sql(),
            MutationKind::Unsupported => {
                return Err(CompileError::Policy(format!(
                    "The mutation '{mutation_name}' is of an unsupported type"
                )));
            }
        };

        debug!(sql = %sql, params = values.len(), "Compiled mutation");

        Ok(CompiledMutation {
            sql,
            values,
            affected_entity_id: input
                .get(id_field_name(target.entity))
                .filter(|id| !id.is_null())
                .cloned(),
            mutation_name: mutation_name.clone(),
            entity_type_name: target.type_name.to_string(),
        })
    }

    fn target(
        &self,
        mutation_name: &'a str,
        mutation: &'a MutationMeta,
    ) -> Result<MutationTarget<'a>, CompileError> {
        let (type_name, entity) = self
            .schema
            .entities
            .get_key_value(&mutation.type_name)
            .ok_or_else(|| {
                CompileError::Schema(format!(
                    "The type '{}' of mutation '{mutation_name}' is unknown",
                    mutation.type_name
                ))
            })?;

        Ok(MutationTarget {
            mutation_name,
            type_name,
            entity,
            view: ViewName::new(
                self.schema.mutation_view_schema(mutation),
                &mutation.view_name,
            ),
        })
    }
}

/// `INSERT INTO <view> (<columns>) VALUES (<values>)`
fn create(target: &MutationTarget, input: &IndexMap<String, Value>) -> Result<Insert, CompileError> {
    if input.is_empty() {
        return Err(CompileError::Validation(format!(
            "The mutation '{}' requires at least one input field",
            target.mutation_name
        )));
    }

    let (columns, values): (Vec<String>, Vec<Column>) = input
        .iter()
        .map(|(field_name, value)| -> Result<(String, Column), CompileError> {
            Ok((
                input_column(target, field_name)?.to_string(),
                value_column(value),
            ))
        })
        .collect::<Result<Vec<_>, CompileError>>()?
        .into_iter()
        .unzip();

    Ok(Insert {
        view: target.view.clone(),
        columns,
        values,
    })
}

/// `UPDATE <view> SET <column> = <value>, ... WHERE <id column> = <id>`
fn update(target: &MutationTarget, input: &IndexMap<String, Value>) -> Result<Update, CompileError> {
    let id_field = id_field_name(target.entity);
    let id = required_id(target, input)?;

    let column_values = input
        .iter()
        .filter(|(field_name, _)| field_name.as_str() != id_field)
        .map(|(field_name, value)| -> Result<(String, Column), CompileError> {
            Ok((
                input_column(target, field_name)?.to_string(),
                value_column(value),
            ))
        })
        .collect::<Result<Vec<_>, CompileError>>()?;

    if column_values.is_empty() {
        return Err(CompileError::Validation(format!(
            "The mutation '{}' requires at least one field to update",
            target.mutation_name
        )));
    }

    Ok(Update {
        view: target.view.clone(),
        column_values,
        predicate: id_predicate(target, id),
    })
}

/// `DELETE FROM <view> WHERE <id column> = <id>`
fn delete(target: &MutationTarget, input: &IndexMap<String, Value>) -> Result<Delete, CompileError> {
    let id = required_id(target, input)?;

    Ok(Delete {
        view: target.view.clone(),
        predicate: id_predicate(target, id),
    })
}

fn id_predicate(target: &MutationTarget, id: &Value) -> Predicate {
    Predicate::eq(
        Column::physical(&target.view.name, &target.entity.id_column_name),
        value_column(id),
    )
}

fn required_id<'i>(
    target: &MutationTarget,
    input: &'i IndexMap<String, Value>,
) -> Result<&'i Value, CompileError> {
    let id_field = id_field_name(target.entity);

    input
        .get(id_field)
        .filter(|id| !id.is_null())
        .ok_or_else(|| {
            CompileError::Validation(format!(
                "The mutation '{}' requires '{id_field}'",
                target.mutation_name
            ))
        })
}

/// The input field carrying the primary key (the field backed by the id column)
fn id_field_name(entity: &EntityMeta) -> &str {
    entity
        .fields
        .iter()
        .find(|(_, field)| {
            field.relation.is_none()
                && field.native_column_name.as_ref() == Some(&entity.id_column_name)
        })
        .map(|(field_name, _)| field_name.as_str())
        .unwrap_or(entity.id_column_name.as_str())
}

/// The column written for an input field. Only the metadata's column name ever reaches the SQL.
fn input_column<'a>(target: &MutationTarget<'a>, field_name: &str) -> Result<&'a str, CompileError> {
    target
        .entity
        .field(field_name)
        .and_then(|field| field.native_column_name.as_deref())
        .ok_or_else(|| {
            CompileError::Schema(format!(
                "The field '{}.{}' cannot be set by '{}'",
                target.type_name, field_name, target.mutation_name
            ))
        })
}
