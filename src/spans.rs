//! BIO tag merging.
//!
//! Turns the tagger's per-offset label sequence into typed, non-overlapping
//! entity spans. The tagger cannot be trusted to emit strictly valid BIO
//! sequences, so a type change acts as an implicit boundary even without a
//! `B-` prefix.

use log::debug;

use crate::model::{EntityLabel, EntitySpan, TokenTag};

/// Merge a BIO-tagged offset sequence into entity spans.
///
/// Offsets are byte offsets into `text`. Zero-width entries (placeholder
/// positions) are skipped; spans whose trimmed text is empty, whose label
/// type is unknown, or whose offsets do not land on character boundaries are
/// dropped. Output is sorted by start because offsets are scanned in order.
pub fn merge_tags(text: &str, tags: &[TokenTag]) -> Vec<EntitySpan> {
    let mut spans: Vec<EntitySpan> = Vec::new();
    let mut current_label: Option<&str> = None;
    let mut current_start = 0usize;
    let mut prev_end = 0usize;

    for token in tags {
        if token.start == token.end {
            continue; // placeholder position
        }
        if token.tag == "O" {
            if let Some(label) = current_label.take() {
                push_span(&mut spans, text, label, current_start, prev_end);
            }
        } else {
            let (prefix, ty) = token.tag.split_once('-').unwrap_or(("B", token.tag.as_str()));
            if prefix == "B" || current_label != Some(ty) {
                if let Some(label) = current_label.take() {
                    push_span(&mut spans, text, label, current_start, prev_end);
                }
                current_label = Some(ty);
                current_start = token.start;
            }
        }
        prev_end = token.end;
    }

    if let Some(label) = current_label {
        if prev_end >= current_start {
            push_span(&mut spans, text, label, current_start, prev_end);
        }
    }

    debug!("merged {} tags into {} spans", tags.len(), spans.len());
    spans
}

fn push_span(spans: &mut Vec<EntitySpan>, text: &str, tag_type: &str, start: usize, end: usize) {
    let Some(label) = EntityLabel::from_tag_type(tag_type) else {
        debug!("dropping span with unknown label type {tag_type:?}");
        return;
    };
    // invalid byte boundaries drop the span rather than panicking
    let Some(slice) = text.get(start..end) else {
        debug!("dropping span with invalid offsets {start}..{end}");
        return;
    };
    if slice.trim().is_empty() {
        return;
    }
    spans.push(EntitySpan {
        label,
        start,
        end,
        text: slice.to_string(),
    });
}
