// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The read-only description of everything that can be queried or mutated.
//!
//! A [SchemaMeta] is produced by an external schema build step and loaded from its JSON form. It
//! is immutable once loaded and can be shared (typically behind an `Arc`) by any number of
//! concurrent compilations.

mod entity;
mod error;
mod mutation;
mod relation;
mod schema;

pub use entity::{EntityMeta, FieldMeta, FieldRelation};
pub use error::ModelLoadingError;
pub use mutation::{MutationKind, MutationMeta};
pub use relation::{
    ColumnReference, RelationKind, RelationMeta, RelationSide, ResolvedRelation, TableName,
};
pub use schema::SchemaMeta;
