// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::any::Any;

use tokio_postgres::types::ToSql;

pub mod column;
pub mod delete;
pub mod insert;
pub mod json_agg;
pub mod limit;
pub mod offset;
pub mod order;
pub mod predicate;
pub mod row_to_json;
pub mod select;
pub mod sql_builder;
pub mod table;
pub mod update;

mod expression_builder;
mod sql_param_container;
mod text_param;

pub use expression_builder::ExpressionBuilder;
pub use sql_param_container::SQLParamContainer;
pub use text_param::TextParam;

/// A value that can be bound to a positional placeholder of a prepared statement.
///
/// Any `ToSql` type that can be compared for equality qualifies (the blanket implementation below
/// takes care of it). Equality is needed so that compiled statements can be compared in tests.
pub trait SQLParam: ToSql + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn eq(&self, other: &dyn SQLParam) -> bool;

    fn as_pg(&self) -> &(dyn ToSql + Sync);
}

impl<T: ToSql + Send + Sync + Any + PartialEq> SQLParam for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq(&self, other: &dyn SQLParam) -> bool {
        if let Some(other) = other.as_any().downcast_ref::<T>() {
            self == other
        } else {
            false
        }
    }

    fn as_pg(&self) -> &(dyn ToSql + Sync) {
        self
    }
}

impl PartialEq for dyn SQLParam {
    fn eq(&self, other: &Self) -> bool {
        SQLParam::eq(self, other)
    }
}
