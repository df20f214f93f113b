//! Type declaration inference from example JSON.
//!
//! [`JsonToTs`] reflects a JSON value into TypeScript declarations: objects
//! become interfaces, arrays of objects are merged into one interface with
//! optional keys, and everything else maps onto a primitive or union type.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::constants::ROOT_TYPE_NAME;

/// Turns a JSON payload into one text block per declaration
pub trait TypeInferrer: Send {
    fn infer(&self, value: &Value) -> Vec<String>;
}

/// TypeScript interface generator
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonToTs;

impl TypeInferrer for JsonToTs {
    fn infer(&self, value: &Value) -> Vec<String> {
        json_to_ts(value)
    }
}

/// Inferred structure of a JSON value
#[derive(Clone, Debug, PartialEq)]
enum Ty {
    Any,
    String,
    Number,
    Boolean,
    Object(ObjectShape),
    Array(Box<Ty>),
    Union(Vec<Ty>),
}

#[derive(Clone, Debug, PartialEq)]
struct ObjectShape {
    fields: Vec<FieldShape>,
}

#[derive(Clone, Debug, PartialEq)]
struct FieldShape {
    key: String,
    ty: Ty,
    optional: bool,
}

/// Infer declarations for `value`, root declaration first
pub fn json_to_ts(value: &Value) -> Vec<String> {
    let mut emitter = Emitter::default();

    match shape_of(value) {
        Ty::Object(shape) => {
            emitter.declare(ROOT_TYPE_NAME, &shape);
        }
        Ty::Array(inner) => match *inner {
            Ty::Object(shape) => {
                emitter.declare(ROOT_TYPE_NAME, &shape);
            }
            inner => emitter.alias(ROOT_TYPE_NAME, &Ty::Array(Box::new(inner))),
        },
        other => emitter.alias(ROOT_TYPE_NAME, &other),
    }

    emitter.output
}

fn shape_of(value: &Value) -> Ty {
    match value {
        Value::Null => Ty::Any,
        Value::Bool(_) => Ty::Boolean,
        Value::Number(_) => Ty::Number,
        Value::String(_) => Ty::String,
        Value::Array(items) => Ty::Array(Box::new(unify(items))),
        Value::Object(map) => Ty::Object(merge_objects(&[map])),
    }
}

/// One type covering every non-null value given.
///
/// Objects merge into a single shape, arrays merge their elements, and
/// distinct leftovers form a union in first-seen order.
fn unify<'a>(values: impl IntoIterator<Item = &'a Value>) -> Ty {
    let mut objects: Vec<&Map<String, Value>> = Vec::new();
    let mut array_items: Vec<&Value> = Vec::new();
    let mut saw_array = false;
    let mut scalars: Vec<Ty> = Vec::new();

    for value in values {
        match value {
            Value::Null => {}
            Value::Object(map) => objects.push(map),
            Value::Array(items) => {
                saw_array = true;
                array_items.extend(items);
            }
            scalar => {
                let ty = shape_of(scalar);
                if !scalars.contains(&ty) {
                    scalars.push(ty);
                }
            }
        }
    }

    let mut members = Vec::new();
    if !objects.is_empty() {
        members.push(Ty::Object(merge_objects(&objects)));
    }
    if saw_array {
        members.push(Ty::Array(Box::new(unify(array_items))));
    }
    members.extend(scalars);

    match members.len() {
        0 => Ty::Any,
        1 => members.remove(0),
        _ => Ty::Union(members),
    }
}

/// Merge sibling objects; keys missing or null in some of them are optional
fn merge_objects(maps: &[&Map<String, Value>]) -> ObjectShape {
    let mut seen = HashSet::new();
    let mut keys: Vec<&String> = Vec::new();
    for map in maps {
        for key in map.keys() {
            if seen.insert(key) {
                keys.push(key);
            }
        }
    }

    let fields = keys
        .into_iter()
        .map(|key| {
            let present: Vec<&Value> = maps.iter().filter_map(|m| m.get(key)).collect();
            let non_null = present.iter().filter(|v| !v.is_null()).count();
            let optional = if non_null == 0 {
                present.len() < maps.len()
            } else {
                non_null < maps.len()
            };
            FieldShape {
                key: key.clone(),
                ty: unify(present),
                optional,
            }
        })
        .collect();

    ObjectShape { fields }
}

#[derive(Default)]
struct Emitter {
    interfaces: Vec<(String, ObjectShape)>,
    taken: HashSet<String>,
    output: Vec<String>,
}

impl Emitter {
    /// Declare an interface for `shape`, reusing an identical one if present
    fn declare(&mut self, hint: &str, shape: &ObjectShape) -> String {
        if let Some((name, _)) = self.interfaces.iter().find(|(_, s)| s == shape) {
            return name.clone();
        }

        let name = self.unique_name(hint);
        self.interfaces.push((name.clone(), shape.clone()));
        // Reserve the slot so parents come before their children
        let slot = self.output.len();
        self.output.push(String::new());

        let mut text = format!("interface {} {{\n", name);
        for field in &shape.fields {
            let ty = self.render(&field.ty, &pascal_case(&field.key));
            let marker = if field.optional { "?" } else { "" };
            text.push_str(&format!("  {}{}: {};\n", render_key(&field.key), marker, ty));
        }
        text.push('}');

        self.output[slot] = text;
        name
    }

    fn alias(&mut self, name: &str, ty: &Ty) {
        self.taken.insert(name.to_string());
        let slot = self.output.len();
        self.output.push(String::new());
        let rendered = self.render(ty, name);
        self.output[slot] = format!("type {} = {};", name, rendered);
    }

    fn render(&mut self, ty: &Ty, hint: &str) -> String {
        match ty {
            Ty::Any => "any".to_string(),
            Ty::String => "string".to_string(),
            Ty::Number => "number".to_string(),
            Ty::Boolean => "boolean".to_string(),
            Ty::Object(shape) => self.declare(hint, shape),
            Ty::Array(inner) => {
                let element = self.render(inner, &singular(hint));
                if matches!(**inner, Ty::Union(_)) {
                    format!("({})[]", element)
                } else {
                    format!("{}[]", element)
                }
            }
            Ty::Union(members) => members
                .iter()
                .map(|m| self.render(m, hint))
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    fn unique_name(&mut self, hint: &str) -> String {
        let mut name = hint.to_string();
        let mut n = 2;
        while self.taken.contains(&name) {
            name = format!("{}{}", hint, n);
            n += 1;
        }
        self.taken.insert(name.clone());
        name
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn render_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        format!("'{}'", key.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// `first_name` / `first-name` / `firstName` -> `FirstName`
fn pascal_case(key: &str) -> String {
    let mut out = String::new();
    for part in key.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }

    if out.is_empty() {
        "Item".to_string()
    } else if out.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Type{}", out)
    } else {
        out
    }
}

fn singular(name: &str) -> String {
    if name.len() > 3 && name.ends_with("ies") {
        format!("{}y", &name[..name.len() - 3])
    } else if name.len() > 1
        && name.ends_with('s')
        && !name.ends_with("ss")
        && !name.ends_with("us")
        && !name.ends_with("is")
    {
        name[..name.len() - 1].to_string()
    } else {
        name.to_string()
    }
}
