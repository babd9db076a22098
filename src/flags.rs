//! Typed, named command flags.
//!
//! Accepted forms: `-flag value`, `-flag=value`, and the same with a leading
//! `--`. Boolean flags take no separate value (`-prerelease`) but accept an
//! inline one (`-prerelease=false`). Parsing stops at `--` or at the first
//! argument that is not a flag; everything after that is positional.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::error::UsageError;

/// Value of a flag: the declared default until the command line sets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Str(String),
    Bool(bool),
}

#[derive(Debug, Clone)]
struct FlagDef {
    name: &'static str,
    default: FlagValue,
    usage: &'static str,
}

/// The declared flags of one command, with their defaults.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    defs: Vec<FlagDef>,
}

/// Result of [`FlagSet::parse`]: every declared flag has a value.
#[derive(Debug, Clone, Default)]
pub struct ParsedFlags {
    values: HashMap<&'static str, FlagValue>,
    positional: Vec<String>,
}

impl FlagSet {
    /// An empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a string flag (builder).
    pub fn string(mut self, name: &'static str, default: &str, usage: &'static str) -> Self {
        self.defs.push(FlagDef {
            name,
            default: FlagValue::Str(default.to_owned()),
            usage,
        });
        self
    }

    /// Declare a boolean flag (builder).
    pub fn bool(mut self, name: &'static str, default: bool, usage: &'static str) -> Self {
        self.defs.push(FlagDef {
            name,
            default: FlagValue::Bool(default),
            usage,
        });
        self
    }

    /// True when no flag has been declared.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    fn lookup(&self, name: &str) -> Option<&FlagDef> {
        self.defs.iter().find(|def| def.name == name)
    }

    /// Bind `args` to the declared flags, filling in defaults for the rest.
    pub fn parse(&self, args: &[String]) -> Result<ParsedFlags, UsageError> {
        let mut values: HashMap<&'static str, FlagValue> = self
            .defs
            .iter()
            .map(|def| (def.name, def.default.clone()))
            .collect();

        let mut rest = args.iter();
        let mut positional = Vec::new();

        while let Some(arg) = rest.next() {
            if arg.len() < 2 || !arg.starts_with('-') {
                positional.push(arg.clone());
                break;
            }

            let mut body = &arg[1..];
            if let Some(stripped) = body.strip_prefix('-') {
                if stripped.is_empty() {
                    // "--" terminates the flags
                    break;
                }
                body = stripped;
            }
            if body.starts_with('-') || body.starts_with('=') {
                return Err(UsageError::BadFlagSyntax(arg.clone()));
            }

            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };

            let Some(def) = self.lookup(name) else {
                if name == "h" || name == "help" {
                    return Err(UsageError::HelpRequested);
                }
                return Err(UsageError::UnknownFlag(name.to_owned()));
            };

            let value = match def.default {
                FlagValue::Bool(_) => match inline {
                    Some(raw) => FlagValue::Bool(parse_bool(raw).ok_or_else(|| {
                        UsageError::InvalidBool {
                            flag: name.to_owned(),
                            value: raw.to_owned(),
                        }
                    })?),
                    None => FlagValue::Bool(true),
                },
                FlagValue::Str(_) => match inline {
                    Some(raw) => FlagValue::Str(raw.to_owned()),
                    None => FlagValue::Str(
                        rest.next()
                            .ok_or_else(|| UsageError::MissingValue(name.to_owned()))?
                            .clone(),
                    ),
                },
            };
            values.insert(def.name, value);
        }

        positional.extend(rest.cloned());
        Ok(ParsedFlags { values, positional })
    }

    /// One entry per flag: `-name type`, then the description and default.
    pub fn usage(&self) -> String {
        let mut out = String::new();
        for def in &self.defs {
            let _ = match &def.default {
                FlagValue::Str(_) => writeln!(out, "  -{} string", def.name),
                FlagValue::Bool(_) => writeln!(out, "  -{}", def.name),
            };
            let _ = match &def.default {
                FlagValue::Str(d) if !d.is_empty() => {
                    writeln!(out, "        {} (default {:?})", def.usage, d)
                }
                FlagValue::Bool(true) => writeln!(out, "        {} (default true)", def.usage),
                _ => writeln!(out, "        {}", def.usage),
            };
        }
        out
    }
}

impl ParsedFlags {
    /// Value of a string flag; empty for names that were never declared.
    pub fn string(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(FlagValue::Str(value)) => value,
            _ => "",
        }
    }

    /// Value of a boolean flag; `false` for names that were never declared.
    pub fn bool(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FlagValue::Bool(true)))
    }

    /// Arguments left over after the flags.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
