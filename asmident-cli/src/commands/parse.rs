use asmident::AssemblyNameComponents;
use serde::Serialize;

use crate::{
    app::{GlobalOptions, ParseArgs},
    commands::common::{check_failures, parse_name, ErrorInfo},
    output::{print_output, FieldWriter},
};

#[derive(Debug, Serialize)]
pub struct ComponentsInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retargetable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor_architecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub strong_named: bool,
    pub canonical: String,
}

impl From<&AssemblyNameComponents> for ComponentsInfo {
    fn from(components: &AssemblyNameComponents) -> Self {
        Self {
            name: components.name().to_string(),
            version: components.version().map(ToString::to_string),
            culture: components.culture().map(str::to_string),
            public_key_token: components.public_key_token().map(ToString::to_string),
            public_key: components.public_key().map(str::to_string),
            retargetable: components.retargetable().map(str::to_string),
            processor_architecture: components.processor_architecture().map(str::to_string),
            content_type: components.content_type().map(str::to_string),
            strong_named: components.is_strong_named(),
            canonical: components.full_name(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParseReport {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentsInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

pub fn run(names: &[String], args: &ParseArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let reports: Vec<ParseReport> = names
        .iter()
        .map(|name| match parse_name(name, args) {
            Ok((components, end)) => ParseReport {
                input: name.clone(),
                end: Some(end),
                components: Some(ComponentsInfo::from(&components)),
                error: None,
            },
            Err(error) => ParseReport {
                input: name.clone(),
                end: None,
                components: None,
                error: Some(ErrorInfo::from(&error)),
            },
        })
        .collect();

    print_output(&reports, opts, |reports| {
        for (i, report) in reports.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", report.input);

            if let Some(error) = &report.error {
                println!("  error: {}", error.message);
                continue;
            }

            let mut fields = FieldWriter::new().indent("  ");
            if let Some(info) = &report.components {
                fields.field("Name", Some(&info.name));
                fields.field("Version", info.version.as_ref());
                fields.field("Culture", info.culture.as_ref());
                fields.field("PublicKeyToken", info.public_key_token.as_ref());
                fields.field("PublicKey", info.public_key.as_ref());
                fields.field("Retargetable", info.retargetable.as_ref());
                fields.field("ProcessorArchitecture", info.processor_architecture.as_ref());
                fields.field("ContentType", info.content_type.as_ref());
                fields.field("Strong named", Some(if info.strong_named { "yes" } else { "no" }));
                fields.field("Canonical", Some(&info.canonical));
            }
            fields.field("End", report.end);
            fields.print();
        }
    })?;

    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    check_failures(failed, reports.len())
}
