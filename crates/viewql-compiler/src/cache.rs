// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// How long a cacheable response may be reused
pub const CACHE_MAX_AGE_SECONDS: u32 = 600;

/// The caching allowed for the response to a compiled operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// The response only contains public fields
    Public,
    /// The response depends on the caller being authenticated
    Private,
    /// Mutation responses must never be cached
    NoStore,
}

impl CachePolicy {
    pub fn for_query(auth_required: bool) -> Self {
        if auth_required {
            CachePolicy::Private
        } else {
            CachePolicy::Public
        }
    }

    /// Value of the `Cache-Control` header
    pub fn header_value(&self) -> String {
        match self {
            CachePolicy::Public => format!("public, max-age={CACHE_MAX_AGE_SECONDS}"),
            CachePolicy::Private => format!("private, max-age={CACHE_MAX_AGE_SECONDS}"),
            CachePolicy::NoStore => "no-store".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_values() {
        assert_eq!(
            CachePolicy::for_query(false).header_value(),
            "public, max-age=600"
        );
        assert_eq!(
            CachePolicy::for_query(true).header_value(),
            "private, max-age=600"
        );
        assert_eq!(CachePolicy::NoStore.header_value(), "no-store");
    }
}
