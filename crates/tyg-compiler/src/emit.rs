//! TypeScript declaration emitter.
//!
//! Walks a parsed schema document and builds declaration source text. The
//! walk is purely structural: property order follows the document (the
//! `preserve_order` feature keeps `serde_json::Map` in insertion order), so
//! the same input always produces byte-identical output.

use crate::error::{CompileError, Result};
use serde_json::{Map, Value};

/// Banner prepended to every generated module.
///
/// Generated files are overwritten on every recompilation, so the banner
/// warns readers away from hand edits.
pub(crate) const GENERATED_BANNER: &str = "/* eslint-disable */\n\
/**\n\
 * This file was automatically generated from a JSON Schema source.\n\
 * DO NOT MODIFY IT BY HAND. Edit the corresponding *_schema.json file\n\
 * instead and re-run the generator to rebuild this module.\n\
 */\n";

/// A schema named under `definitions` or `$defs`, emitted as its own
/// top-level declaration and addressable via local `$ref`.
struct NamedSchema<'a> {
    raw: &'a str,
    ts_name: String,
    schema: &'a Value,
    pointer: String,
}

struct Emitter<'a> {
    named: Vec<NamedSchema<'a>>,
}

/// Emit a full module: banner, root declaration, then one declaration per
/// named definition in document order.
pub(crate) fn emit_module(root: &Value, fallback_name: &str) -> Result<String> {
    let emitter = Emitter {
        named: collect_named(root),
    };

    let root_name = root
        .get("title")
        .and_then(Value::as_str)
        .map(type_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| type_name(fallback_name));
    if root_name.is_empty() {
        return Err(CompileError::UnsupportedSchema {
            pointer: String::new(),
            message: "schema has no usable title and no root name was provided".to_string(),
        });
    }

    let mut out = String::from(GENERATED_BANNER);
    out.push('\n');
    out.push_str(&emitter.declaration(&root_name, root, "")?);

    for named in &emitter.named {
        out.push('\n');
        out.push_str(&emitter.declaration(&named.ts_name, named.schema, &named.pointer)?);
    }

    Ok(out)
}

fn collect_named(root: &Value) -> Vec<NamedSchema<'_>> {
    let mut named = Vec::new();
    for section in ["definitions", "$defs"] {
        if let Some(defs) = root.get(section).and_then(Value::as_object) {
            for (raw, schema) in defs {
                named.push(NamedSchema {
                    raw,
                    ts_name: type_name(raw),
                    schema,
                    pointer: format!("/{section}/{raw}"),
                });
            }
        }
    }
    named
}

impl Emitter<'_> {
    /// Emit one exported declaration. Plain object schemas become
    /// `export interface`, everything else `export type`.
    fn declaration(&self, name: &str, schema: &Value, pointer: &str) -> Result<String> {
        let mut decl = String::new();
        if let Some(desc) = schema.get("description").and_then(Value::as_str) {
            decl.push_str(&jsdoc(desc, 0));
        }
        match schema.as_object() {
            Some(obj) if is_plain_object(obj) => {
                let body = self.object_literal(obj, pointer, 0)?;
                decl.push_str(&format!("export interface {name} {body}\n"));
            }
            _ => {
                let expr = self.type_expr(schema, pointer, 0)?;
                decl.push_str(&format!("export type {name} = {expr};\n"));
            }
        }
        Ok(decl)
    }

    fn type_expr(&self, schema: &Value, pointer: &str, indent: usize) -> Result<String> {
        match schema {
            // Boolean schemas: `true` accepts anything, `false` accepts nothing.
            Value::Bool(true) => Ok("unknown".to_string()),
            Value::Bool(false) => Ok("never".to_string()),
            Value::Object(obj) => self.object_schema_expr(obj, pointer, indent),
            _ => Err(CompileError::UnsupportedSchema {
                pointer: pointer.to_string(),
                message: "schema must be an object or boolean".to_string(),
            }),
        }
    }

    fn object_schema_expr(
        &self,
        obj: &Map<String, Value>,
        pointer: &str,
        indent: usize,
    ) -> Result<String> {
        if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
            return match self.resolve_ref(reference) {
                Some(name) => Ok(name.to_string()),
                None => Err(CompileError::UnresolvedRef {
                    reference: reference.to_string(),
                }),
            };
        }

        if let Some(value) = obj.get("const") {
            return json_literal(value, &format!("{pointer}/const"));
        }

        if let Some(values) = obj.get("enum").and_then(Value::as_array) {
            if values.is_empty() {
                return Ok("never".to_string());
            }
            let literals = values
                .iter()
                .map(|v| json_literal(v, &format!("{pointer}/enum")))
                .collect::<Result<Vec<_>>>()?;
            return Ok(literals.join(" | "));
        }

        for keyword in ["oneOf", "anyOf"] {
            if let Some(variants) = obj.get(keyword).and_then(Value::as_array) {
                if variants.is_empty() {
                    return Ok("never".to_string());
                }
                let exprs = variants
                    .iter()
                    .enumerate()
                    .map(|(i, v)| self.type_expr(v, &format!("{pointer}/{keyword}/{i}"), indent))
                    .collect::<Result<Vec<_>>>()?;
                return Ok(exprs.join(" | "));
            }
        }

        if let Some(parts) = obj.get("allOf").and_then(Value::as_array) {
            if parts.is_empty() {
                return Ok("unknown".to_string());
            }
            let exprs = parts
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    self.type_expr(v, &format!("{pointer}/allOf/{i}"), indent)
                        .map(|e| if e.contains(" | ") { format!("({e})") } else { e })
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(exprs.join(" & "));
        }

        match obj.get("type") {
            Some(Value::String(ty)) => self.single_type(ty, obj, pointer, indent),
            Some(Value::Array(types)) => {
                if types.is_empty() {
                    return Ok("never".to_string());
                }
                let exprs = types
                    .iter()
                    .map(|t| match t.as_str() {
                        Some(ty) => self.single_type(ty, obj, pointer, indent),
                        None => Err(CompileError::UnsupportedSchema {
                            pointer: format!("{pointer}/type"),
                            message: "type array entries must be strings".to_string(),
                        }),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(exprs.join(" | "))
            }
            Some(other) => Err(CompileError::UnsupportedSchema {
                pointer: format!("{pointer}/type"),
                message: format!("unexpected value for 'type': {other}"),
            }),
            None => {
                // Untyped schemas with object-shaped keywords still describe objects.
                if obj.contains_key("properties")
                    || obj.contains_key("required")
                    || obj.contains_key("additionalProperties")
                {
                    self.object_literal(obj, pointer, indent)
                } else {
                    Ok("unknown".to_string())
                }
            }
        }
    }

    fn single_type(
        &self,
        ty: &str,
        obj: &Map<String, Value>,
        pointer: &str,
        indent: usize,
    ) -> Result<String> {
        match ty {
            "string" => Ok("string".to_string()),
            // JSON Schema distinguishes integers; TypeScript does not.
            "number" | "integer" => Ok("number".to_string()),
            "boolean" => Ok("boolean".to_string()),
            "null" => Ok("null".to_string()),
            "object" => self.object_literal(obj, pointer, indent),
            "array" => match obj.get("items") {
                Some(Value::Array(tuple)) => {
                    let exprs = tuple
                        .iter()
                        .enumerate()
                        .map(|(i, v)| self.type_expr(v, &format!("{pointer}/items/{i}"), indent))
                        .collect::<Result<Vec<_>>>()?;
                    Ok(format!("[{}]", exprs.join(", ")))
                }
                Some(items) => {
                    let expr = self.type_expr(items, &format!("{pointer}/items"), indent)?;
                    if expr.contains(' ') {
                        Ok(format!("({expr})[]"))
                    } else {
                        Ok(format!("{expr}[]"))
                    }
                }
                None => Ok("unknown[]".to_string()),
            },
            other => Err(CompileError::UnsupportedSchema {
                pointer: format!("{pointer}/type"),
                message: format!("unknown type keyword '{other}'"),
            }),
        }
    }

    fn object_literal(
        &self,
        obj: &Map<String, Value>,
        pointer: &str,
        indent: usize,
    ) -> Result<String> {
        let pad = "  ".repeat(indent + 1);
        let close_pad = "  ".repeat(indent);

        let required: Vec<&str> = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut members: Vec<String> = Vec::new();

        if let Some(props) = obj.get("properties").and_then(Value::as_object) {
            for (name, prop) in props {
                let prop_pointer = format!("{pointer}/properties/{name}");
                let expr = self.type_expr(prop, &prop_pointer, indent + 1)?;
                let marker = if required.contains(&name.as_str()) { "" } else { "?" };

                let mut member = String::new();
                if let Some(desc) = prop.get("description").and_then(Value::as_str) {
                    member.push_str(&jsdoc(desc, indent + 1));
                }
                member.push_str(&format!("{pad}{}{marker}: {expr};", member_key(name)));
                members.push(member);
            }
        }

        match obj.get("additionalProperties") {
            Some(Value::Bool(true)) => {
                members.push(format!("{pad}[k: string]: unknown;"));
            }
            Some(extra @ Value::Object(_)) => {
                let expr =
                    self.type_expr(extra, &format!("{pointer}/additionalProperties"), indent + 1)?;
                members.push(format!("{pad}[k: string]: {expr};"));
            }
            _ => {}
        }

        if members.is_empty() {
            return Ok("{}".to_string());
        }
        Ok(format!("{{\n{}\n{close_pad}}}", members.join("\n")))
    }

    fn resolve_ref(&self, reference: &str) -> Option<&str> {
        let raw = reference
            .strip_prefix("#/definitions/")
            .or_else(|| reference.strip_prefix("#/$defs/"))?;
        self.named
            .iter()
            .find(|n| n.raw == raw)
            .map(|n| n.ts_name.as_str())
    }
}

/// A schema that can be rendered as `export interface` rather than a type
/// alias: object-shaped, with no combinator or reference keywords.
fn is_plain_object(obj: &Map<String, Value>) -> bool {
    let combinator = ["$ref", "enum", "const", "oneOf", "anyOf", "allOf"]
        .iter()
        .any(|k| obj.contains_key(*k));
    if combinator {
        return false;
    }
    match obj.get("type") {
        Some(Value::String(ty)) => ty == "object",
        None => obj.contains_key("properties"),
        _ => false,
    }
}

/// Convert an arbitrary name into a TypeScript type identifier.
///
/// Non-alphanumeric characters act as word boundaries; each word is
/// capitalized. A leading digit gets an underscore prefix.
pub(crate) fn type_name(raw: &str) -> String {
    let mut out = String::new();
    let mut upper_next = true;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if upper_next {
                out.extend(c.to_uppercase());
                upper_next = false;
            } else {
                out.push(c);
            }
        } else {
            upper_next = true;
        }
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Render a scalar JSON value as a TypeScript literal type.
fn json_literal(value: &Value, pointer: &str) -> Result<String> {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {
            Ok(value.to_string())
        }
        _ => Err(CompileError::UnsupportedSchema {
            pointer: pointer.to_string(),
            message: "enum and const values must be scalars".to_string(),
        }),
    }
}

/// Quote a property name when it is not a valid identifier.
fn member_key(name: &str) -> String {
    let mut chars = name.chars();
    let ident_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    let ident_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if ident_start && ident_rest {
        name.to_string()
    } else {
        Value::String(name.to_string()).to_string()
    }
}

/// Render a description as a JSDoc block, one line per source line.
fn jsdoc(description: &str, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let mut out = format!("{pad}/**\n");
    for line in description.lines() {
        if line.is_empty() {
            out.push_str(&format!("{pad} *\n"));
        } else {
            out.push_str(&format!("{pad} * {line}\n"));
        }
    }
    out.push_str(&format!("{pad} */\n"));
    out
}
