//! Splits a cleaned doc-comment body into description and `@tag` sections

/// One `@marker body` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocSection {
    pub marker: String,
    /// Text after the marker, continuation lines included
    pub body: String,
    /// Line of the marker relative to the comment start
    pub line_offset: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedComment {
    /// Text before the first tag
    pub description: Option<String>,
    pub sections: Vec<DocSection>,
}

/// Scan a comment body.
///
/// A section starts at any line whose first non-blank character is `@`
/// followed by a word; inline `{@link ...}` references stay in the text.
pub fn scan_doc_comment(text: &str) -> ScannedComment {
    let mut description: Vec<&str> = Vec::new();
    let mut sections: Vec<DocSection> = Vec::new();

    for (offset, line) in text.lines().enumerate() {
        if let Some((marker, rest)) = tag_start(line) {
            sections.push(DocSection {
                marker: marker.to_string(),
                body: rest.trim().to_string(),
                line_offset: offset,
            });
            continue;
        }

        match sections.last_mut() {
            Some(section) => {
                if !section.body.is_empty() || !line.trim().is_empty() {
                    section.body.push('\n');
                }
                section.body.push_str(line.trim_end());
            }
            None => description.push(line.trim_end()),
        }
    }

    for section in &mut sections {
        let trimmed = section.body.trim_end().to_string();
        section.body = trimmed;
    }

    let description = description.join("\n").trim().to_string();
    ScannedComment {
        description: (!description.is_empty()).then_some(description),
        sections,
    }
}

fn tag_start(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix('@')?;
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some((&rest[..end], &rest[end..]))
}
