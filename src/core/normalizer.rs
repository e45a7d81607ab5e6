use crate::core::document::ParsedDocument;
use crate::domain::model::{NormalizeReport, SliceModeProfile};

/// 解析不了的內容一律視為 0，確保會被覆寫
pub fn parse_slice_mode(text: &str) -> i32 {
    text.trim().parse().unwrap_or(0)
}

pub fn normalize_slice_mode(
    doc: &mut ParsedDocument,
    tag: &str,
    profile: SliceModeProfile,
) -> NormalizeReport {
    let target = profile.code();
    let replacement = target.to_string();

    let mut spans = doc.elements_by_tag(tag);
    let mut report = NormalizeReport {
        elements_found: spans.len(),
        elements_rewritten: 0,
    };

    // 從最後一個元素往前改，前面元素的起點不受影響
    while let Some(span) = spans.pop() {
        let current = doc.inner_text(&span);
        if parse_slice_mode(&current) == target {
            continue;
        }

        tracing::debug!("Rewriting <{}> '{}' -> {}", tag, current.trim(), replacement);
        let delta = doc.replace_inner_text(&span, &replacement);
        report.elements_rewritten += 1;

        for outer in spans.iter_mut().filter(|outer| outer.end > span.end) {
            outer.end = (outer.end as isize + delta) as usize;
        }
    }

    report
}
