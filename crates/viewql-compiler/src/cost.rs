// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;
use serde::Serialize;

/// How the rows of a level are fetched
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FetchType {
    /// A single (possibly absent) row, returned as a JSON object or `null`
    Row,
    /// Any number of rows, returned as a JSON array
    Aggregation,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostMeta {
    #[serde(rename = "type")]
    pub fetch_type: FetchType,
    pub table_name: String,
    pub table_schema_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// The shape of a compiled query: one node per nesting level, keyed by result key
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CostTreeNode {
    pub meta: CostMeta,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, CostTreeNode>,
}

impl CostTreeNode {
    pub fn new(meta: CostMeta) -> Self {
        Self {
            meta,
            children: IndexMap::new(),
        }
    }

    /// Number of nodes on the longest path from this node to a leaf (a lone node has depth 1)
    pub fn max_depth(&self) -> usize {
        1 + self
            .children
            .values()
            .map(CostTreeNode::max_depth)
            .max()
            .unwrap_or(0)
    }
}
