// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    /// Any kind this version doesn't know how to compile
    #[serde(other)]
    Unsupported,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MutationMeta {
    #[serde(rename = "type")]
    pub kind: MutationKind,
    /// The entity type being mutated
    pub type_name: String,
    #[serde(default)]
    pub view_schema_name: Option<String>,
    /// The dedicated (insertable/updatable) mutation view
    pub view_name: String,
}
