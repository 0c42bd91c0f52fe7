// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::de::DeserializeOwned;
use viewql_model::SchemaMeta;

pub trait CommandDefinition {
    fn command(&self) -> Command;

    fn execute(&self, matches: &ArgMatches) -> Result<()>;
}

pub struct SubcommandDefinition {
    pub name: &'static str,
    pub about: &'static str,
    pub command_definitions: Vec<Box<dyn CommandDefinition>>,
}

impl SubcommandDefinition {
    pub fn new(
        name: &'static str,
        about: &'static str,
        command_definitions: Vec<Box<dyn CommandDefinition>>,
    ) -> Self {
        Self {
            name,
            about,
            command_definitions,
        }
    }
}

impl CommandDefinition for SubcommandDefinition {
    fn command(&self) -> Command {
        Command::new(self.name)
            .about(self.about)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .disable_help_subcommand(true)
            .subcommands(
                self.command_definitions
                    .iter()
                    .map(|command_definition| command_definition.command()),
            )
    }

    fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| anyhow!("Missing subcommand"))?;

        for command_definition in &self.command_definitions {
            if command_definition.command().get_name() == name {
                return command_definition.execute(sub_matches);
            }
        }

        Err(anyhow!("Unknown subcommand: {}", name))
    }
}

pub fn get_required<T: Clone + Send + Sync + 'static>(
    matches: &ArgMatches,
    arg_id: &str,
) -> Result<T> {
    get(matches, arg_id).ok_or_else(|| anyhow!("Required argument `{}` is not present", arg_id))
}

pub fn get<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, arg_id: &str) -> Option<T> {
    matches.get_one::<T>(arg_id).cloned()
}

const DEFAULT_SCHEMA_FILE: &str = "schema.json";

pub fn schema_arg() -> Arg {
    Arg::new("schema")
        .help("The path to the schema metadata (JSON)")
        .short('s')
        .long("schema")
        .hide_default_value(false)
        .value_parser(clap::value_parser!(PathBuf))
        .default_value(DEFAULT_SCHEMA_FILE)
}

pub fn request_arg(help: &'static str) -> Arg {
    Arg::new("request")
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .index(1)
}

pub fn authenticated_arg() -> Arg {
    Arg::new("authenticated")
        .help("Compile as an authenticated caller")
        .long_help("Compile as an authenticated caller, allowing fields outside the public view.")
        .short('a')
        .long("authenticated")
        .action(ArgAction::SetTrue)
}

pub fn load_schema(matches: &ArgMatches) -> Result<SchemaMeta> {
    let path: PathBuf = get_required(matches, "schema")?;
    let file = File::open(&path)
        .with_context(|| format!("Unable to open schema file {}", path.display()))?;

    SchemaMeta::from_reader(BufReader::new(file))
        .with_context(|| format!("Unable to load schema from {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &PathBuf) -> Result<T> {
    let file =
        File::open(path).with_context(|| format!("Unable to open {}", path.display()))?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Unable to parse {}", path.display()))
}
