//! PDF text extraction.
//!
//! Pages are extracted individually so running page numbers can be dropped
//! and words hyphenated across a page break rejoined before the pages are
//! stitched back together in order.

use lexbrief_core::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static PAGE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:page\s+)?[-–]?\s*\d{1,4}\s*[-–]?(?:\s+of\s+\d{1,4})?$").unwrap()
});

/// Extract the text of every page, in page order.
pub fn extract_pdf(bytes: &[u8]) -> Result<String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| Error::Pdf(format!("{:?}", e)))?;
    debug!("PDF has {} pages", pages.len());
    Ok(join_pages(&pages))
}

/// Drop a trailing line that is only a page number ("12", "- 12 -", "Page 3 of 9").
fn strip_trailing_page_number(page: &str) -> &str {
    let trimmed = page.trim_end();
    let (head, last_line) = match trimmed.rfind('\n') {
        Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
        None => ("", trimmed),
    };
    if PAGE_NUMBER_RE.is_match(last_line.trim()) {
        head
    } else {
        trimmed
    }
}

/// Stitch pages together; pages with no text contribute nothing.
pub(crate) fn join_pages(pages: &[String]) -> String {
    let mut out = String::new();

    for page in pages {
        let page = strip_trailing_page_number(page);
        if page.trim().is_empty() {
            continue;
        }
        if out.is_empty() {
            out.push_str(page.trim_start_matches('\n'));
            continue;
        }

        let next = page.trim_start();
        let hyphenated = out.ends_with('-')
            && out[..out.len() - 1].ends_with(|c: char| c.is_alphabetic())
            && next.starts_with(|c: char| c.is_lowercase());

        if hyphenated {
            out.pop();
            out.push_str(next);
        } else {
            out.push('\n');
            out.push_str(page.trim_start_matches('\n'));
        }
    }

    out
}
