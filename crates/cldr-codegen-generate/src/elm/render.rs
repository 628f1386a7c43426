//! Small Elm source builders, laid out the way elm-format prints them.

use std::fmt::Write as _;

use cldr_codegen_core::Error;

/// Derive an Elm module name from a locale code (`en-US-POSIX` -> `EnUsPosix`).
pub fn module_name(locale: &str) -> Result<String, Error> {
    let mut name = String::new();
    for part in locale.split(['-', '_']) {
        let mut chars = part.chars().filter(char::is_ascii_alphanumeric);
        if let Some(first) = chars.next() {
            name.push(first.to_ascii_uppercase());
            name.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }

    match name.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => Ok(name),
        _ => Err(Error::InvalidLocaleCode(locale.to_string())),
    }
}

/// Elm string literal with control characters escaped.
pub fn string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:04X}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn maybe_string(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("Just {}", string(value)),
        None => "Nothing".to_string(),
    }
}

/// Multi-line record literal or type, `{ a = x\n, b = y\n}`.
pub fn record(fields: &[(&str, String)], separator: &str) -> String {
    if fields.is_empty() {
        return "{}".to_string();
    }
    let mut out = String::new();
    for (index, (name, value)) in fields.iter().enumerate() {
        let lead = if index == 0 { "{ " } else { ", " };
        let _ = writeln!(out, "{lead}{name} {separator} {value}");
    }
    out.push('}');
    out
}

/// Multi-line list literal.
pub fn list(items: &[String]) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        let lead = if index == 0 { "[ " } else { ", " };
        let _ = writeln!(out, "{lead}{item}");
    }
    out.push(']');
    out
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// An Elm module assembled declaration by declaration.
#[derive(Debug, Clone)]
pub struct ElmModule {
    name: String,
    doc: String,
    exposing: Vec<String>,
    declarations: Vec<String>,
}

impl ElmModule {
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
            exposing: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn type_alias(&mut self, name: &str, fields: &[(&str, String)]) {
        self.exposing.push(name.to_string());
        self.declarations.push(format!(
            "type alias {name} =\n{}",
            indent(&record(fields, ":"))
        ));
    }

    /// Exposed top-level value.
    pub fn value(&mut self, name: &str, annotation: &str, body: &str) {
        self.function(name, annotation, &[], body);
    }

    /// Exposed top-level function.
    pub fn function(&mut self, name: &str, annotation: &str, params: &[&str], body: &str) {
        self.exposing.push(name.to_string());
        self.helper(name, annotation, params, body);
    }

    /// Top-level declaration that is not exposed.
    pub fn helper(&mut self, name: &str, annotation: &str, params: &[&str], body: &str) {
        let head = if params.is_empty() {
            name.to_string()
        } else {
            format!("{name} {}", params.join(" "))
        };
        self.declarations
            .push(format!("{name} : {annotation}\n{head} =\n{}", indent(body)));
    }

    pub fn render(&self) -> String {
        let mut exposing = self.exposing.clone();
        exposing.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));

        let mut out = String::new();
        let _ = writeln!(out, "module {} exposing", self.name);
        let _ = writeln!(out, "{}", indent(&list_inline(&exposing)));
        let _ = writeln!(out);
        let _ = writeln!(out, "{{-| {}", self.doc);
        let _ = writeln!(out, "-}}");
        for declaration in &self.declarations {
            let _ = writeln!(out);
            let _ = writeln!(out);
            let _ = writeln!(out, "{declaration}");
        }
        out
    }
}

/// Exposing list, one name per line.
fn list_inline(names: &[String]) -> String {
    if names.is_empty() {
        return "(..)".to_string();
    }
    let mut out = String::new();
    for (index, name) in names.iter().enumerate() {
        let lead = if index == 0 { "( " } else { ", " };
        let _ = writeln!(out, "{lead}{name}");
    }
    out.push(')');
    out
}
