// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, column::Column, sql_builder::SQLBuilder};

/// A JSON aggregation corresponding to the Postgres' `json_agg` function.
#[derive(Debug, PartialEq)]
pub struct JsonAgg(pub Box<Column>);

impl JsonAgg {
    pub fn new(column: Column) -> Self {
        Self(Box::new(column))
    }
}

impl ExpressionBuilder for JsonAgg {
    /// Build expression of the form `COALESCE(json_agg(<column>), '[]'::json)`. The COALESCE
    /// wrapper ensures that we return an empty array (and never NULL) if there are no matching rows.
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("COALESCE(json_agg(");
        self.0.build(builder);
        builder.push_str("), '[]'::json)");
    }
}
