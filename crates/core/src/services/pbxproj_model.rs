//! Project model backed by `project.pbxproj`

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::interfaces::ProjectModel;
use crate::types::BuildTarget;

const PROJECT_FILE: &str = "project.pbxproj";

/// Nesting depth of the fields of an entry in the `objects` dictionary
const OBJECT_FIELD_DEPTH: i32 = 3;

static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9_]+)\s*=\s*(.*?)\s*;\s*$").expect("field pattern is valid")
});

/// Reads native targets out of the OpenStep property list inside a `.xcodeproj`
#[derive(Debug, Default)]
pub struct PbxprojModel;

impl PbxprojModel {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectModel for PbxprojModel {
    fn targets(&self, project: &Path) -> Result<Vec<BuildTarget>> {
        let path = project.join(PROJECT_FILE);
        let contents = fs::read_to_string(&path).map_err(|e| Error::ProjectError {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let targets = parse_native_targets(&contents);
        tracing::debug!(
            "Found {} native targets in {}",
            targets.len(),
            project.display()
        );
        Ok(targets)
    }
}

/// Every `PBXNativeTarget` object, in file order
pub fn parse_native_targets(contents: &str) -> Vec<BuildTarget> {
    let mut depth = 0;
    let mut in_comment = false;
    let mut object: Option<Vec<(String, String)>> = None;
    let mut targets = Vec::new();

    for line in contents.lines() {
        let (code, delta) = scan_line(line, &mut in_comment);
        let depth_before = depth;
        depth += delta;

        if depth_before == OBJECT_FIELD_DEPTH - 1 && depth == OBJECT_FIELD_DEPTH {
            object = Some(Vec::new());
            continue;
        }

        if let Some(fields) = object.as_mut() {
            if depth_before == OBJECT_FIELD_DEPTH {
                if let Some(caps) = FIELD.captures(&code) {
                    fields.push((caps[1].to_string(), unquote(&caps[2])));
                }
            }
            if depth < OBJECT_FIELD_DEPTH {
                if let Some(target) = object.take().and_then(native_target) {
                    targets.push(target);
                }
            }
        }
    }

    targets
}

fn native_target(fields: Vec<(String, String)>) -> Option<BuildTarget> {
    let field = |key: &str| {
        fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };

    if field("isa").as_deref() != Some("PBXNativeTarget") {
        return None;
    }
    let name = field("name").or_else(|| field("productName"))?;
    Some(BuildTarget {
        name,
        product_type: field("productType"),
    })
}

/// Strip comments from a line and count its net bracket nesting, ignoring quoted text
fn scan_line(line: &str, in_comment: &mut bool) -> (String, i32) {
    let mut code = String::with_capacity(line.len());
    let mut delta = 0;
    let mut in_string = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if *in_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_comment = false;
            }
            continue;
        }
        if in_string {
            code.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    code.push(escaped);
                }
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                code.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                *in_comment = true;
            }
            '/' if chars.peek() == Some(&'/') => break,
            '{' | '(' => {
                delta += 1;
                code.push(c);
            }
            '}' | ')' => {
                delta -= 1;
                code.push(c);
            }
            _ => code.push(c),
        }
    }

    (code, delta)
}

fn unquote(value: &str) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => value.to_string(),
    }
}
