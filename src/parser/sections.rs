use std::sync::LazyLock;

use regex::Regex;

use crate::record::FieldMap;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());

/// Split a body into `## ` sections, title → trimmed body.
///
/// Text before the first heading is dropped. A repeated title keeps its
/// first position but takes the later body.
pub fn extract_sections(body: &str) -> FieldMap {
    let headings: Vec<(usize, usize, &str)> = HEADING_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let line = caps.get(0)?;
            let title = caps.get(1)?;
            Some((line.start(), line.end(), title.as_str()))
        })
        .collect();

    let mut sections = FieldMap::new();
    for (i, &(_, content_start, title)) in headings.iter().enumerate() {
        let content_end = headings
            .get(i + 1)
            .map(|&(next_start, _, _)| next_start)
            .unwrap_or(body.len());
        sections.insert(title.trim(), body[content_start..content_end].trim());
    }
    sections
}

// ── Tests ──
