//! usage-check: validate a command line against an interface definition.
//!
//! Loads a JSON or YAML interface definition, parses the given arguments
//! with it, and prints the resulting bindings as JSON. Usage errors exit
//! 1, configuration errors exit 2.
//!
//! The binary's own argument handling is deliberately minimal: the first
//! argument is the definition file, everything after it is the candidate
//! invocation (without the script name, which the definition supplies).

use std::env;
use std::process::ExitCode;

use usage_pattern_cli::{CliError, Interface, InterfaceSpec};
use usage_pattern_core::TypeRegistry;

const OWN_USAGE: &str = "\
usage-check <definition-file> [arguments...]

Validates the given arguments against a JSON or YAML interface
definition and prints the resulting bindings as JSON. Pass --help
after the definition file to see that interface's help text.
";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let Some(definition) = args.first() else {
        eprint!("{OWN_USAGE}");
        return ExitCode::from(2);
    };
    if definition == "-h" || definition == "--help" {
        print!("{OWN_USAGE}");
        return ExitCode::SUCCESS;
    }

    let interface = match load_interface(definition) {
        Ok(interface) => interface,
        Err(error) => {
            eprintln!("usage-check: {error}");
            return ExitCode::from(error.exit_code());
        }
    };

    let candidate = &args[1..];
    if candidate.first().map(String::as_str) == Some("--help") {
        print!("{}", interface.help());
        return ExitCode::SUCCESS;
    }

    // The definition's script name stands in for the invocation token.
    let mut tokens = vec![interface.name().to_string()];
    tokens.extend_from_slice(candidate);

    match interface.parse(&tokens) {
        Ok(bindings) => match serde_json::to_string_pretty(&bindings) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("usage-check: {error}");
                ExitCode::from(2)
            }
        },
        Err(error) => {
            let error = CliError::from(error);
            interface.display_error(&error);
            ExitCode::from(error.exit_code())
        }
    }
}

fn load_interface(path: &str) -> Result<Interface, CliError> {
    let spec = InterfaceSpec::from_path(path)?;
    Interface::new(spec, TypeRegistry::new())
}
