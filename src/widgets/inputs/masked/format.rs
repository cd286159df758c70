use super::provider::MaskedTextProvider;
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use unicode_width::UnicodeWidthChar;

/// Display string as spans, unfilled positions dimmed.
pub(super) fn render_spans(provider: &MaskedTextProvider) -> Vec<Span> {
    let display: Vec<char> = provider.to_display_string().chars().collect();
    let mut spans = Vec::<Span>::new();
    let mut run = String::new();
    let mut run_is_prompt = false;

    for (pos, ch) in display.into_iter().enumerate() {
        let is_prompt = provider.is_edit_position(pos) && !provider.is_assigned(pos);
        if is_prompt != run_is_prompt && !run.is_empty() {
            spans.push(styled_run(std::mem::take(&mut run), run_is_prompt));
        }
        run_is_prompt = is_prompt;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(styled_run(run, run_is_prompt));
    }
    spans
}

/// Terminal columns taken by the first `caret` characters of `text`.
pub(super) fn caret_column(text: &str, caret: usize) -> usize {
    text.chars()
        .take(caret)
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

fn styled_run(text: String, is_prompt: bool) -> Span {
    if is_prompt {
        Span::styled(text, Style::new().color(Color::DarkGrey))
    } else {
        Span::new(text)
    }
}
