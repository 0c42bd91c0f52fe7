// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{ExpressionBuilder, sql_builder::SQLBuilder};

/// The whole row of an aliased relation as a JSON object (Postgres' `row_to_json`). Every column
/// of the aliased relation becomes a key of the object.
#[derive(Debug, PartialEq)]
pub struct RowToJson(pub String);

impl RowToJson {
    pub fn new(table_alias: impl Into<String>) -> Self {
        Self(table_alias.into())
    }
}

impl ExpressionBuilder for RowToJson {
    fn build(&self, builder: &mut SQLBuilder) {
        builder.push_str("row_to_json(");
        builder.push_identifier(&self.0);
        builder.push(')');
    }
}
