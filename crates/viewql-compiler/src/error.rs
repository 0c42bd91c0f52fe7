// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

/// Reasons a request cannot be compiled. Every variant is caused by the request (never by the
/// environment), so retrying the same request will fail the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The request references a type, field, relation or mutation unknown to the metadata
    #[error("Schema: {0}")]
    Schema(String),

    #[error("The field '{type_name}.{field_name}' is not available without authentication")]
    Authorization {
        type_name: String,
        field_name: String,
    },

    /// The operation is structurally forbidden by the metadata
    #[error("Policy: {0}")]
    Policy(String),

    /// Malformed argument or input values
    #[error("Validation: {0}")]
    Validation(String),

    /// An error raised while compiling a nested part of the request
    #[error("{1} ({0})")]
    WithContext(String, #[source] Box<CompileError>),
}

impl CompileError {
    pub fn with_context(self, context: String) -> CompileError {
        CompileError::WithContext(context, Box::new(self))
    }

    /// A message that can be shown to the caller. An authorization failure names only the
    /// offending field (wherever it was found).
    pub fn user_error_message(&self) -> String {
        match self {
            CompileError::Authorization { .. } => self.to_string(),
            CompileError::Schema(message)
            | CompileError::Policy(message)
            | CompileError::Validation(message) => message.clone(),
            CompileError::WithContext(context, e) => match e.root_cause() {
                CompileError::Authorization { .. } => e.user_error_message(),
                _ => format!("{}: {}", e.user_error_message(), context),
            },
        }
    }

    /// The innermost error (skipping any context)
    pub fn root_cause(&self) -> &CompileError {
        match self {
            CompileError::WithContext(_, e) => e.root_cause(),
            _ => self,
        }
    }
}

pub trait WithContext {
    fn with_context(self, context: String) -> Self;
}

impl<T> WithContext for Result<T, CompileError> {
    fn with_context(self, context: String) -> Result<T, CompileError> {
        self.map_err(|e| e.with_context(context))
    }
}

/// Failure to read the compiler configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Env(#[from] viewql_env::EnvError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_message_names_only_the_field() {
        let error = CompileError::Authorization {
            type_name: "User".to_string(),
            field_name: "email".to_string(),
        };

        assert_eq!(
            error.user_error_message(),
            "The field 'User.email' is not available without authentication"
        );

        let nested = error.clone().with_context("while resolving 'Post.author'".to_string());
        assert_eq!(nested.user_error_message(), error.user_error_message());
        assert_eq!(nested.root_cause(), &error);
    }

    #[test]
    fn context_is_appended_to_the_user_message() {
        let error: Result<(), CompileError> =
            Err(CompileError::Validation("'limit' must be a non-negative integer".to_string()));
        let error = error.with_context("in 'posts'".to_string()).unwrap_err();

        assert_eq!(
            error.user_error_message(),
            "'limit' must be a non-negative integer: in 'posts'"
        );
        assert!(matches!(error.root_cause(), CompileError::Validation(_)));
    }
}
