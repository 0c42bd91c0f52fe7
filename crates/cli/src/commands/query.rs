// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgMatches, Command};
use tracing::debug;
use viewql_compiler::{CompilerConfig, ParsedQueryNode, QueryCompiler};
use viewql_env::SystemEnvironment;

use super::{
    command::{
        CommandDefinition, authenticated_arg, get_required, load_schema, read_json, request_arg,
        schema_arg,
    },
    output::{QueryOutput, print_json},
};

pub struct QueryCommandDefinition {}

impl CommandDefinition for QueryCommandDefinition {
    fn command(&self) -> Command {
        Command::new("query")
            .about("Compile a query request into a SELECT statement")
            .arg(schema_arg())
            .arg(authenticated_arg())
            .arg(request_arg("The path to the query request (JSON)"))
    }

    fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let schema = load_schema(matches)?;
        let request_path: PathBuf = get_required(matches, "request")?;
        let request: ParsedQueryNode = read_json(&request_path)?;
        let is_authenticated = matches.get_flag("authenticated");

        let config = CompilerConfig::from_env(&SystemEnvironment)?;
        debug!(
            min_query_depth_to_check_cost_limit = config.min_query_depth_to_check_cost_limit,
            "Loaded compiler configuration"
        );

        let compiled = QueryCompiler::new(&schema, &config).compile(&request, is_authenticated, None)?;

        print_json(&QueryOutput::from(&compiled))
    }
}
