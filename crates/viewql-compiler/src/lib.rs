// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Compiles field-selection trees into PostgreSQL statements.
//!
//! - [QueryCompiler] turns a (nested) selection into a single SELECT returning a JSON array,
//!   reading each entity through its public or authorized view.
//! - [MutationCompiler] turns a create, update or delete request into a single statement against
//!   the entity's mutation view.
//!
//! Compilation is a pure function of the request, the [viewql_model::SchemaMeta] and the
//! authentication flag. Identifiers come only from the metadata and every caller supplied value
//! is bound as a parameter.

mod cache;
mod cast;
mod clauses;
mod config;
mod cost;
mod error;
mod match_constraint;
mod mutation_compiler;
mod query_compiler;
mod request;
mod selection_level;

#[cfg(test)]
mod test_utils;

pub use cache::{CACHE_MAX_AGE_SECONDS, CachePolicy};
pub use config::{CompilerConfig, VIEWQL_MIN_QUERY_DEPTH_TO_CHECK_COST_LIMIT};
pub use cost::{CostMeta, CostTreeNode, FetchType};
pub use error::{CompileError, ConfigError, WithContext};
pub use match_constraint::{ChildColumn, MatchConstraint, ParentColumn, ParentOperand};
pub use mutation_compiler::{CompiledMutation, MutationCompiler};
pub use query_compiler::{CompiledQuery, QueryCompiler};
pub use request::{MutationArgs, MutationNode, ParsedQueryNode};
pub use selection_level::{SelectionLevel, is_generic_root_aggregation};
