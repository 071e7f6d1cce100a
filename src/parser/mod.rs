pub mod frontmatter;
pub mod sections;

use tracing::debug;

use crate::corpus::Document;
use crate::error::Result;
use crate::record::{build_record, Record};

/// Four-stage pipeline: split frontmatter → normalize → sections → record.
pub fn parse_document(doc: &Document) -> Result<Record> {
    let (block, body) = frontmatter::split(&doc.raw_text)?;
    let raw = match block {
        Some(b) => frontmatter::parse(b)?,
        None => None,
    };
    let fm = frontmatter::normalize(raw.as_ref())?;
    let sections = sections::extract_sections(body);

    if block.is_some() && fm.is_empty() {
        debug!(title = %doc.title, "frontmatter has none of the recognised fields");
    }
    if sections.is_empty() {
        debug!(title = %doc.title, "no ## sections");
    }
    debug!(
        title = %doc.title,
        has_frontmatter = block.is_some(),
        fields = fm.fields().count(),
        sections = sections.len(),
        "parsed document"
    );

    Ok(build_record(&doc.title, &fm, &sections))
}

// ── Tests ──
