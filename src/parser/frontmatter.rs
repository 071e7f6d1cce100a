use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};

const DELIMITER: &str = "---";

/// The four recognised frontmatter fields, trimmed. Everything else in the
/// YAML block is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub authors: Option<String>,
    pub conference: Option<String>,
    pub tldr: Option<String>,
    pub abstract_: Option<String>,
}

impl Frontmatter {
    /// Set fields as `(column, value)` pairs, in column order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("authors", &self.authors),
            ("conference", &self.conference),
            ("tldr", &self.tldr),
            ("abstract", &self.abstract_),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }
}

/// Split a leading `---` block off `raw`.
///
/// Returns `(None, raw)` untouched when `raw` does not start with `---`.
/// The closing delimiter is the next `---` anywhere after the opening one;
/// the body after it is trimmed.
pub fn split(raw: &str) -> Result<(Option<&str>, &str)> {
    let Some(rest) = raw.strip_prefix(DELIMITER) else {
        return Ok((None, raw));
    };
    let end = rest.find(DELIMITER).ok_or(Error::MalformedFrontmatter)?;
    let block = &rest[..end];
    let body = rest[end + DELIMITER.len()..].trim();
    Ok((Some(block), body))
}

/// Parse a frontmatter block with the YAML loader. Blank blocks yield `None`.
pub fn parse(block: &str) -> Result<Option<Value>> {
    if block.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_yaml::from_str(block)?;
    Ok(match value {
        Value::Null => None,
        v => Some(v),
    })
}

/// Project a parsed YAML value onto [`Frontmatter`].
pub fn normalize(raw: Option<&Value>) -> Result<Frontmatter> {
    let mapping = match raw {
        None | Some(Value::Null) => return Ok(Frontmatter::default()),
        Some(Value::Mapping(m)) => m,
        Some(_) => return Err(Error::FrontmatterNotMapping),
    };

    Ok(Frontmatter {
        authors: authors(mapping)?,
        conference: string_field(mapping, "conference")?,
        tldr: string_field(mapping, "tldr")?,
        abstract_: string_field(mapping, "abstract")?,
    })
}

/// Elements are joined with `,` as-is; only the joined string is trimmed.
fn authors(mapping: &Mapping) -> Result<Option<String>> {
    let schema_err = Error::FrontmatterSchema {
        field: "authors",
        expected: "a list of strings",
    };
    let items = match mapping.get("authors") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Sequence(items)) => items,
        Some(_) => return Err(schema_err),
    };

    let mut names = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(name) => names.push(name.as_str()),
            _ => return Err(schema_err),
        }
    }
    Ok(Some(names.join(",").trim().to_string()))
}

fn string_field(mapping: &Mapping, field: &'static str) -> Result<Option<String>> {
    match mapping.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(_) => Err(Error::FrontmatterSchema {
            field,
            expected: "a string",
        }),
    }
}

// ── Tests ──
