// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Debug;

use tokio_postgres::types::{Format, IsNull, ToSql, Type, to_sql_checked};

/// A parameter sent in the text format with an unspecified type.
///
/// Postgres parses the text into whatever type the placeholder has (`uuid`, `int4`, `jsonb` and so
/// on), the same way it would parse a quoted literal. Caller supplied values are bound this way,
/// since the metadata does not carry column types.
#[derive(Clone, PartialEq, Eq)]
pub struct TextParam(Option<String>);

impl TextParam {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    pub fn null() -> Self {
        Self(None)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<&str> for TextParam {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TextParam {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl ToSql for TextParam {
    fn to_sql(
        &self,
        _ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match &self.0 {
            Some(value) => {
                out.extend_from_slice(value.as_bytes());
                Ok(IsNull::No)
            }
            None => Ok(IsNull::Yes),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn encode_format(&self, _ty: &Type) -> Format {
        Format::Text
    }

    to_sql_checked!();
}

impl Debug for TextParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(value) => write!(f, "{value:?}"),
            None => write!(f, "NULL"),
        }
    }
}
