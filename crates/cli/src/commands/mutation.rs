// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Arg, ArgMatches, Command};
use viewql_compiler::{
    CompiledQuery, CompilerConfig, MutationCompiler, MutationNode, ParsedQueryNode, QueryCompiler,
};
use viewql_env::SystemEnvironment;

use super::{
    command::{
        CommandDefinition, authenticated_arg, get, get_required, load_schema, read_json,
        request_arg, schema_arg,
    },
    output::{MutationOutput, print_json},
};

pub struct MutationCommandDefinition {}

impl CommandDefinition for MutationCommandDefinition {
    fn command(&self) -> Command {
        Command::new("mutation")
            .about("Compile a mutation request into an INSERT, UPDATE or DELETE statement")
            .arg(schema_arg())
            .arg(authenticated_arg())
            .arg(
                Arg::new("response")
                    .help("The path to a query request (JSON) selecting the mutation's response")
                    .short('r')
                    .long("response")
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(request_arg("The path to the mutation request (JSON)"))
    }

    fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let schema = load_schema(matches)?;
        let request_path: PathBuf = get_required(matches, "request")?;
        let request: MutationNode = read_json(&request_path)?;

        let compiled = MutationCompiler::new(&schema).compile(&request)?;

        let response: Option<CompiledQuery> = match get::<PathBuf>(matches, "response") {
            Some(response_path) => {
                let response_request: ParsedQueryNode = read_json(&response_path)?;
                let response_match = compiled.response_match().ok_or_else(|| {
                    anyhow!(
                        "The mutation input has no id, so the response of '{}' cannot be selected",
                        compiled.mutation_name
                    )
                })?;

                let config = CompilerConfig::from_env(&SystemEnvironment)?;
                Some(QueryCompiler::new(&schema, &config).compile(
                    &response_request,
                    matches.get_flag("authenticated"),
                    Some(&response_match),
                )?)
            }
            None => None,
        };

        print_json(&MutationOutput::new(&compiled, response.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_is_optional() {
        let command = MutationCommandDefinition {}.command();

        let matches = command
            .clone()
            .try_get_matches_from(["mutation", "create-post.json"])
            .unwrap();
        assert_eq!(get::<PathBuf>(&matches, "response"), None);

        let matches = command
            .try_get_matches_from(["mutation", "--response", "post.json", "create-post.json"])
            .unwrap();
        assert_eq!(
            get::<PathBuf>(&matches, "response"),
            Some(PathBuf::from("post.json"))
        );
    }

    #[test]
    fn request_is_required() {
        assert!(
            MutationCommandDefinition {}
                .command()
                .try_get_matches_from(["mutation"])
                .is_err()
        );
    }
}
