use asmident::{parse_assembly_name_with, AssemblyNameComponents, Error, ParseOptions};
use serde::Serialize;

use crate::app::ParseArgs;

/// Serializable view of a parse failure.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub message: String,
}

impl From<&Error> for ErrorInfo {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind().to_string(),
            position: error.position(),
            message: error.to_string(),
        }
    }
}

/// Parse `name` with the options selected on the command line.
pub fn parse_name(
    name: &str,
    args: &ParseArgs,
) -> asmident::Result<(AssemblyNameComponents, usize)> {
    let options = if args.reject_unknown {
        ParseOptions::new().reject_unknown_components()
    } else {
        ParseOptions::new()
    };

    let result = parse_assembly_name_with(name, args.start, args.generic_argument, options);
    if let Err(error) = &result {
        log::debug!("{:?} rejected: {}", name, error);
    }
    result
}

/// Fail the command if any input was rejected.
pub fn check_failures(failed: usize, total: usize) -> anyhow::Result<()> {
    if failed > 0 {
        anyhow::bail!("{failed} of {total} names could not be parsed");
    }
    Ok(())
}
