// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use viewql_env::Environment;

use crate::error::ConfigError;

pub const VIEWQL_MIN_QUERY_DEPTH_TO_CHECK_COST_LIMIT: &str =
    "VIEWQL_MIN_QUERY_DEPTH_TO_CHECK_COST_LIMIT";

const DEFAULT_MIN_QUERY_DEPTH_TO_CHECK_COST_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Queries nesting at least this many levels are flagged as potentially high cost
    pub min_query_depth_to_check_cost_limit: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            min_query_depth_to_check_cost_limit: DEFAULT_MIN_QUERY_DEPTH_TO_CHECK_COST_LIMIT,
        }
    }
}

impl CompilerConfig {
    pub fn from_env(env: &dyn Environment) -> Result<Self, ConfigError> {
        let min_query_depth_to_check_cost_limit = env.get_usize(
            VIEWQL_MIN_QUERY_DEPTH_TO_CHECK_COST_LIMIT,
            DEFAULT_MIN_QUERY_DEPTH_TO_CHECK_COST_LIMIT,
        )?;

        Ok(Self {
            min_query_depth_to_check_cost_limit,
        })
    }
}
