//! Types command implementation

use std::process::ExitCode;

use serde::Serialize;

use crate::property::PropertyKind;
use crate::registry::ElementType;
use crate::value::PropValue;

use super::{Context, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Serialize)]
struct PropertyInfo<'a> {
    name: &'a str,
    kind: PropertyKind,
    default: PropValue,
}

#[derive(Serialize)]
struct TypeInfo<'a> {
    name: &'a str,
    has_widget: bool,
    primary: Option<&'a str>,
    default_active: &'a [String],
    properties: Vec<PropertyInfo<'a>>,
}

impl<'a> TypeInfo<'a> {
    fn new(ty: &'a ElementType) -> Self {
        Self {
            name: ty.name(),
            has_widget: ty.has_widget(),
            primary: ty.primary(),
            default_active: ty.default_active(),
            properties: ty
                .properties()
                .iter()
                .map(|p| PropertyInfo { name: p.name(), kind: p.kind(), default: p.default_value() })
                .collect(),
        }
    }
}

/// Execute the types command
pub fn run_types(ctx: &Context, json: bool) -> ExitCode {
    let infos: Vec<TypeInfo> = ctx.registry.iter().map(|ty| TypeInfo::new(ty)).collect();

    if json {
        return match serde_json::to_string_pretty(&infos) {
            Ok(out) => {
                println!("{}", out);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    for info in &infos {
        match info.primary {
            Some(primary) => println!("{} (primary: {})", info.name, primary),
            None => println!("{}", info.name),
        }
        for property in &info.properties {
            let marker =
                if info.default_active.iter().any(|n| n == property.name) { " *" } else { "" };
            println!(
                "  {:<14} {:<13} {}{}",
                property.name,
                property.kind.to_string(),
                property.default,
                marker
            );
        }
    }
    ExitCode::from(EXIT_SUCCESS)
}
