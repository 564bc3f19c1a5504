//! Path patterns: `/`-delimited literals and `{name}` segments, compiled once into an anchored regex.

use regex::Regex;

use crate::CoreError;

/// Strip query and fragment, then trailing slashes. The empty path becomes `/`.
///
/// Accepts origin-form (`/photos?page=2`) and absolute-form (`http://host/photos`) request targets.
pub fn normalize_path(raw: &str) -> &str {
    let end = raw.find(|c: char| c == '?' || c == '#').unwrap_or(raw.len());
    let mut path = &raw[..end];
    if let Some(after_scheme) = strip_scheme(path) {
        path = after_scheme
            .find('/')
            .map(|i| &after_scheme[i..])
            .unwrap_or("");
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// A compiled route pattern.
#[derive(Clone, Debug)]
pub struct PathPattern {
    source: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compile `pattern`. Literal segments are regex-escaped; each `{name}` captures one non-`/` segment.
    pub fn parse(pattern: &str) -> Result<Self, CoreError> {
        let invalid = |reason: &str| CoreError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: reason.to_owned(),
        };

        let normalized = normalize_path(pattern);
        let source = if normalized.starts_with('/') {
            normalized.to_owned()
        } else {
            format!("/{}", normalized)
        };

        let mut expr = String::from("^");
        let mut param_names: Vec<String> = Vec::new();
        let segments = match source.as_str() {
            "/" => {
                expr.push('/');
                None
            }
            s => Some(s.split('/').skip(1)),
        };
        for segment in segments.into_iter().flatten() {
            expr.push('/');
            match param_name(segment) {
                Some(name) => {
                    if name.is_empty() {
                        return Err(invalid("parameter segments must be named"));
                    }
                    if name.contains(['{', '}']) {
                        return Err(invalid("nested braces in parameter segment"));
                    }
                    if param_names.iter().any(|n| n == name) {
                        return Err(invalid(&format!("duplicate parameter name `{}`", name)));
                    }
                    param_names.push(name.to_owned());
                    expr.push_str("([^/]+)");
                }
                None => {
                    if segment.contains(['{', '}']) {
                        return Err(invalid("a parameter must span a whole segment"));
                    }
                    expr.push_str(&regex::escape(segment));
                }
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self {
            source,
            regex,
            param_names,
        })
    }

    /// Normalized pattern string, e.g. `/photos/{id}`.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Parameter names in the order they appear.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Match a normalized request path. Returns captured segment values left to right.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(path)?;
        Some(
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_owned())
                .collect(),
        )
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Authority and path of an absolute-form target (`scheme://...`). Origin-form paths
/// (leading `/`) are never absolute, even when they contain `://`.
fn strip_scheme(target: &str) -> Option<&str> {
    let (scheme, rest) = target.split_once("://")?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(rest)
}

fn param_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
