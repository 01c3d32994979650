//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn vocabulary_arg() -> Arg {
    Arg::new("vocabulary")
        .long("vocabulary")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Expanded JSON-LD file with the SHACL vocabulary")
}

fn subject_args() -> [Arg; 4] {
    [
        Arg::new("metadata")
            .long("metadata")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Expanded JSON-LD file with the metadata"),
        Arg::new("meta-vocabulary")
            .long("meta-vocabulary")
            .value_parser(value_parser!(PathBuf))
            .help("Shapes for vocabulary subjects, used with --context vocabulary"),
        Arg::new("context")
            .long("context")
            .default_value("metadata")
            .value_parser(["metadata", "vocabulary"])
            .help("Graph the subject lives in"),
        Arg::new("subject")
            .required(true)
            .help("IRI of the subject"),
    ]
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

/// The `ldm` command
pub(crate) fn command() -> Command {
    Command::new("ldm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Describe and validate linked-data subjects against a SHACL vocabulary")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with form settings"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Write logs as JSON"),
        )
        .subcommand(
            Command::new("describe")
                .about("List the properties of a subject in display order")
                .arg(vocabulary_arg())
                .args(subject_args())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("validate")
                .about("Check a subject against its shapes; exits non-zero on violations")
                .arg(vocabulary_arg())
                .args(subject_args()),
        )
        .subcommand(
            Command::new("namespaces")
                .about("List the namespace prefixes declared by a vocabulary")
                .arg(vocabulary_arg())
                .arg(json_arg()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn context_is_restricted() {
        let result = command().try_get_matches_from([
            "ldm", "validate", "--vocabulary", "v.json", "--metadata", "m.json", "--context", "files", "http://x/s",
        ]);
        assert!(result.is_err());
    }
}
