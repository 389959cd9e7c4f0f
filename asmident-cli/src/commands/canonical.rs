use serde::Serialize;

use crate::{
    app::{GlobalOptions, ParseArgs},
    commands::common::{check_failures, parse_name, ErrorInfo},
    output::print_output,
};

#[derive(Debug, Serialize)]
pub struct CanonicalName {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

pub fn run(names: &[String], args: &ParseArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let results: Vec<CanonicalName> = names
        .iter()
        .map(|name| {
            let (canonical, error) = match parse_name(name, args) {
                Ok((components, _)) => (Some(components.full_name()), None),
                Err(error) => (None, Some(ErrorInfo::from(&error))),
            };
            CanonicalName {
                input: name.clone(),
                canonical,
                error,
            }
        })
        .collect();

    print_output(&results, opts, |results| {
        for result in results {
            match (&result.canonical, &result.error) {
                (Some(canonical), _) => println!("{canonical}"),
                (None, Some(error)) => eprintln!("{}: {}", result.input, error.message),
                (None, None) => {}
            }
        }
    })?;

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    check_failures(failed, results.len())
}
