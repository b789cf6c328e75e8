use crate::constant::NO_DIFF_PLACEHOLDER;
use crate::diff::{DiffResult, Segment};
use crate::style::diff_text_format;
use egui::text::LayoutJob;
use egui::{RichText, Ui, Visuals};

/// Lay the segments out as one wrapped job; `None` when there is nothing to show.
pub fn layout_segments(segments: &[Segment], visuals: &Visuals, wrap_width: f32) -> Option<LayoutJob> {
    let mut job = LayoutJob::default();
    for segment in segments.iter().filter(|s| !s.text.is_empty()) {
        job.append(&segment.text, 0.0, diff_text_format(segment.style, visuals));
    }
    if job.sections.is_empty() {
        return None;
    }
    job.wrap.max_width = wrap_width;
    Some(job)
}

/// Segments worth drawing for a loaded change.
///
/// # Returns
/// `None` when the result holds no text, so the placeholder is shown instead.
pub fn result_segments(result: &DiffResult) -> Option<Vec<Segment>> {
    if result.is_empty() {
        None
    } else {
        Some(result.segments())
    }
}

/// Draw a change's diff result.
pub fn render_result(ui: &mut Ui, result: &DiffResult) {
    match result_segments(result) {
        Some(segments) => render_segments(ui, &segments),
        None => show_placeholder(ui),
    }
}

/// Draw segments as wrapped rich text, or the placeholder if all are empty.
pub fn render_segments(ui: &mut Ui, segments: &[Segment]) {
    let width = ui.available_width();
    match layout_segments(segments, ui.visuals(), width) {
        Some(job) => {
            ui.add(egui::Label::new(job).wrap());
        }
        None => show_placeholder(ui),
    }
}

fn show_placeholder(ui: &mut Ui) {
    ui.label(RichText::new(NO_DIFF_PLACEHOLDER).italics());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{DiffStyle, build};

    #[test]
    fn empty_segments_use_placeholder() {
        let visuals = Visuals::light();
        assert!(layout_segments(&[], &visuals, 400.0).is_none());
        assert!(layout_segments(&[Segment::plain("")], &visuals, 400.0).is_none());
    }

    #[test]
    fn empty_results_render_nothing() {
        assert!(result_segments(&DiffResult::TextDiff(Vec::new())).is_none());
        assert!(result_segments(&DiffResult::TextDiff(vec![Segment::plain("")])).is_none());
        assert!(result_segments(&DiffResult::MetadataNote(String::new())).is_none());

        let note = result_segments(&DiffResult::status_change(200, 500)).unwrap();
        assert_eq!(note[0].style, DiffStyle::Replaced);
    }

    #[test]
    fn empty_text_segments_are_skipped() {
        let segments = vec![
            Segment::plain("a "),
            Segment::new("", DiffStyle::Inserted),
            Segment::new("b", DiffStyle::Deleted),
        ];
        let job = layout_segments(&segments, &Visuals::light(), 400.0).unwrap();
        assert_eq!(job.sections.len(), 2);
        assert_eq!(job.text, "a b");
        assert_eq!(job.wrap.max_width, 400.0);
    }

    #[test]
    fn built_diff_lays_out_every_segment() {
        let segments = build(Some("one two three"), Some("one 2 three"));
        let job = layout_segments(&segments, &Visuals::light(), 300.0).unwrap();
        assert_eq!(job.sections.len(), segments.len());
    }
}
