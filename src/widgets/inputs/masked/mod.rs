//! Text box that keeps its content inside an input mask and a value filter.
//!
//! Every edit goes through a [`MaskedTextProvider`] rebuilt from the current
//! (mask, prompt char) pair; the filter chosen by [`FilterKind`] screens the
//! prospective text of each typed character.

mod cache;
mod format;
mod model;
mod parser;
mod provider;

pub use model::{CaseConversion, CharClass, EditSlot, MaskElement};
pub use provider::MaskedTextProvider;

use crate::config::MaskedInputConfig;
use crate::error::{MaskError, MaskedInputError};
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::InputBase;
use crate::widgets::filters::{FilterKind, FilterRegistry};
use crate::widgets::inputs::text_edit;
use crate::widgets::traits::{
    DrawOutput, Drawable, EditCommand, InteractionResult, Interactive, RenderContext,
};
use cache::ProviderCache;
use std::fmt;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// Keys the mask intercepts before any text is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Delete,
    Backspace,
    Space,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyChange {
    Mask(String),
    PromptChar(char),
    FilterKind(FilterKind),
    Text { text: String, caret: usize },
}

pub type ChangeListener = Box<dyn FnMut(&PropertyChange) + Send>;

pub struct MaskedTextBox {
    base: InputBase,
    text: String,
    caret: usize,
    mask: String,
    prompt_char: char,
    filter_kind: FilterKind,
    read_only: bool,
    overwrite: bool,
    registry: Arc<FilterRegistry>,
    cache: ProviderCache,
    listeners: Vec<ChangeListener>,
}

impl MaskedTextBox {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(id, label),
            text: String::new(),
            caret: 0,
            mask: String::new(),
            prompt_char: ' ',
            filter_kind: FilterKind::Any,
            read_only: false,
            overwrite: false,
            registry: Arc::new(FilterRegistry::standard()),
            cache: ProviderCache::default(),
            listeners: Vec::new(),
        }
    }

    pub fn from_config(
        id: impl Into<String>,
        label: impl Into<String>,
        config: &MaskedInputConfig,
        registry: Arc<FilterRegistry>,
    ) -> Result<Self, MaskedInputError> {
        let mut input = Self::new(id, label)
            .with_registry(registry)
            .with_read_only(config.read_only)
            .with_overwrite(config.overwrite);
        input.set_prompt_char(config.prompt_char)?;
        input.set_filter_kind(config.filter)?;
        input.set_mask(config.mask.as_str())?;
        input.set_text(config.text.as_str())?;
        input.caret = 0;
        Ok(input)
    }

    pub fn with_registry(mut self, registry: Arc<FilterRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    pub fn prompt_char(&self) -> char {
        self.prompt_char
    }

    pub fn filter_kind(&self) -> FilterKind {
        self.filter_kind
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    /// Entered characters without literals or prompts.
    pub fn raw_value(&self) -> String {
        match self.cache.current() {
            Some(provider) => provider.to_text(false, false),
            None => self.text.clone(),
        }
    }

    /// All required mask positions are filled. Always true without a mask.
    pub fn is_complete(&self) -> bool {
        self.cache
            .current()
            .is_none_or(MaskedTextProvider::mask_completed)
    }

    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn set_overwrite(&mut self, overwrite: bool) {
        self.overwrite = overwrite;
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = text_edit::clamp_cursor(caret, &self.text);
    }

    pub fn set_mask(&mut self, mask: impl Into<String>) -> Result<(), MaskedInputError> {
        let mask = mask.into();
        if mask == self.mask {
            return Ok(());
        }
        self.cache.provider(&mask, self.prompt_char, &self.text)?;
        tracing::debug!(id = self.base.id(), mask = %mask, "mask changed");
        self.mask = mask;
        self.notify(PropertyChange::Mask(self.mask.clone()));
        self.rerender()
    }

    pub fn set_prompt_char(&mut self, prompt_char: char) -> Result<(), MaskedInputError> {
        if prompt_char == self.prompt_char {
            return Ok(());
        }
        if prompt_char.is_control() {
            return Err(MaskError::InvalidPromptChar(prompt_char).into());
        }
        self.cache.provider(&self.mask, prompt_char, &self.text)?;
        tracing::debug!(id = self.base.id(), prompt_char = %prompt_char, "prompt changed");
        self.prompt_char = prompt_char;
        self.notify(PropertyChange::PromptChar(prompt_char));
        self.rerender()
    }

    pub fn set_filter_kind(&mut self, filter_kind: FilterKind) -> Result<(), MaskedInputError> {
        if filter_kind == self.filter_kind {
            return Ok(());
        }
        tracing::debug!(id = self.base.id(), filter = %filter_kind, "filter changed");
        self.filter_kind = filter_kind;
        self.notify(PropertyChange::FilterKind(filter_kind));
        self.rerender()
    }

    /// Replaces the content. With a mask the text is pushed through it and
    /// text the mask cannot take leaves the previous content in place.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), MaskedInputError> {
        let text = text.into();
        let coerced = match self.cache.provider(&self.mask, self.prompt_char, &self.text)? {
            Some(provider) => {
                if !provider.set(&text) {
                    tracing::debug!(id = self.base.id(), text = %text, "text rejected by mask");
                }
                provider.to_display_string()
            }
            None => text,
        };
        let caret = self.caret;
        self.refresh_text(coerced, caret);
        Ok(())
    }

    pub fn can_execute(&self, command: EditCommand) -> bool {
        !matches!(command, EditCommand::Paste | EditCommand::Cut)
    }

    /// Runs a typed character (or composed string) through the mask and the
    /// filter. Returns `true` when the host must not insert `input` itself.
    ///
    /// With a mask the event is always handled by the mask, so a later filter
    /// rejection cannot undo what the mask already applied.
    pub fn preview_text_input(&mut self, input: &str) -> Result<bool, MaskedInputError> {
        if self.read_only {
            tracing::trace!(id = self.base.id(), "read-only input rejected");
            return Ok(true);
        }

        let mut pos = self.caret;
        let was_middle = pos < text_edit::char_count(&self.text);
        let mut handled = false;

        if let Some(provider) = self.cache.provider(&self.mask, self.prompt_char, &self.text)? {
            if was_middle {
                pos = provider.find_edit_position_from(pos, true).unwrap_or(pos);
                let applied = if self.overwrite {
                    provider.replace(input, pos)
                } else {
                    provider.insert_at(input, pos)
                };
                if applied {
                    pos += 1;
                } else {
                    tracing::trace!(id = self.base.id(), input, pos, "mask rejected input");
                }
                pos = provider.find_edit_position_from(pos, true).unwrap_or(pos);
            }
            let display = provider.to_display_string();
            self.refresh_text(display, pos);
            handled = true;
        }

        let candidate = if was_middle {
            text_edit::inserted(&self.text, pos, input)
        } else {
            format!("{}{input}", self.text)
        };
        let filter = self.registry.filter_for(self.filter_kind);
        if !filter.is_valid(&candidate)? {
            tracing::trace!(id = self.base.id(), candidate = %candidate, "filter rejected input");
            handled = true;
        }
        Ok(handled)
    }

    /// Typed input including the host's default insertion when neither the
    /// mask nor the filter claimed it.
    pub fn text_input(&mut self, input: &str) -> Result<InteractionResult, MaskedInputError> {
        let before = self.snapshot();
        if !self.preview_text_input(input)? {
            let mut text = self.text.clone();
            let mut caret = self.caret;
            text_edit::insert_str(&mut text, &mut caret, input);
            self.refresh_text(text, caret);
        }
        Ok(self.result_since(before))
    }

    /// Mask handling of Delete, Backspace and Space. Returns `false` when no
    /// mask is active and the host should apply its default behaviour.
    ///
    /// A masked read-only box swallows these keys without editing, the same
    /// way it swallows typed characters. A provider operation that fails
    /// still counts as handled.
    pub fn preview_edit_key(&mut self, key: EditKey) -> Result<bool, MaskedInputError> {
        let len = text_edit::char_count(&self.text);
        let pos = self.caret;
        let read_only = self.read_only;

        let Some(provider) = self.cache.provider(&self.mask, self.prompt_char, &self.text)? else {
            return Ok(false);
        };
        if read_only {
            return Ok(true);
        }

        let refresh_at = match key {
            EditKey::Delete => {
                if pos >= len {
                    return Ok(false);
                }
                provider.remove_at(pos).then_some(pos)
            }
            EditKey::Space => provider.insert_at(" ", pos).then_some(pos),
            EditKey::Backspace => pos
                .checked_sub(1)
                .filter(|&prev| provider.remove_at(prev)),
        };

        if let Some(caret) = refresh_at {
            let display = provider.to_display_string();
            self.refresh_text(display, caret);
        } else {
            tracing::trace!(id = self.base.id(), ?key, pos, "mask rejected key");
        }
        Ok(true)
    }

    fn edit_key(&mut self, key: EditKey) -> Result<InteractionResult, MaskedInputError> {
        let before = self.snapshot();
        if self.preview_edit_key(key)? {
            return Ok(self.result_since(before));
        }
        if self.read_only {
            return Ok(InteractionResult::consumed());
        }

        let mut text = self.text.clone();
        let mut caret = self.caret;
        let changed = match key {
            EditKey::Delete => text_edit::delete_char(&mut text, &mut caret),
            EditKey::Backspace => text_edit::backspace_char(&mut text, &mut caret),
            EditKey::Space => return self.text_input(" "),
        };
        if changed {
            self.refresh_text(text, caret);
        }
        Ok(self.result_since(before))
    }

    fn move_caret(&mut self, step: fn(&mut usize, &str) -> bool) -> InteractionResult {
        let mut caret = self.caret;
        if step(&mut caret, &self.text) {
            self.caret = caret;
            return InteractionResult::handled();
        }
        InteractionResult::ignored()
    }

    fn rerender(&mut self) -> Result<(), MaskedInputError> {
        let Some(provider) = self.cache.provider(&self.mask, self.prompt_char, &self.text)? else {
            return Ok(());
        };
        let display = provider.to_display_string();
        self.refresh_text(display, 0);
        Ok(())
    }

    fn refresh_text(&mut self, text: String, caret: usize) {
        self.caret = text_edit::clamp_cursor(caret, &text);
        self.text = text;
        self.notify(PropertyChange::Text {
            text: self.text.clone(),
            caret: self.caret,
        });
    }

    fn notify(&mut self, change: PropertyChange) {
        for listener in &mut self.listeners {
            listener(&change);
        }
    }

    fn snapshot(&self) -> (String, usize) {
        (self.text.clone(), self.caret)
    }

    fn result_since(&self, before: (String, usize)) -> InteractionResult {
        if before.0 != self.text || before.1 != self.caret {
            InteractionResult::handled()
        } else {
            InteractionResult::consumed()
        }
    }
}

impl fmt::Debug for MaskedTextBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskedTextBox")
            .field("id", &self.base.id())
            .field("text", &self.text)
            .field("caret", &self.caret)
            .field("mask", &self.mask)
            .field("prompt_char", &self.prompt_char)
            .field("filter_kind", &self.filter_kind)
            .field("read_only", &self.read_only)
            .field("overwrite", &self.overwrite)
            .finish_non_exhaustive()
    }
}

impl Drawable for MaskedTextBox {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let mut line = vec![Span::styled(
            self.base.prefixed_label(focused),
            Style::new().bold(),
        )];
        match self.cache.current() {
            Some(provider) => line.extend(format::render_spans(provider)),
            None => line.push(Span::new(self.text.clone())),
        }
        if self.read_only {
            line.push(Span::styled(
                "  (read-only)",
                Style::new().color(Color::DarkGrey),
            ));
        } else if self.overwrite {
            line.push(Span::styled("  [OVR]", Style::new().color(Color::Yellow)));
        }
        DrawOutput { lines: vec![line] }
    }
}

impl Interactive for MaskedTextBox {
    fn on_key(&mut self, key: KeyEvent) -> Result<InteractionResult, MaskedInputError> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            let command = match key.code {
                KeyCode::Char('v' | 'V') => Some(EditCommand::Paste),
                KeyCode::Char('x' | 'X') => Some(EditCommand::Cut),
                KeyCode::Char('c' | 'C') => Some(EditCommand::Copy),
                _ => None,
            };
            return Ok(match command {
                Some(command) if !self.can_execute(command) => {
                    tracing::debug!(id = self.base.id(), ?command, "command disabled");
                    InteractionResult::consumed()
                }
                _ => InteractionResult::ignored(),
            });
        }

        match key.code {
            KeyCode::Char(' ') if !self.mask.is_empty() => self.edit_key(EditKey::Space),
            KeyCode::Char(ch) => {
                let mut buf = [0u8; 4];
                self.text_input(ch.encode_utf8(&mut buf))
            }
            KeyCode::Delete => self.edit_key(EditKey::Delete),
            KeyCode::Backspace => self.edit_key(EditKey::Backspace),
            KeyCode::Insert => {
                self.overwrite = !self.overwrite;
                Ok(InteractionResult::handled())
            }
            KeyCode::Left => Ok(self.move_caret(text_edit::move_left)),
            KeyCode::Right => Ok(self.move_caret(text_edit::move_right)),
            KeyCode::Home => {
                self.caret = 0;
                Ok(InteractionResult::handled())
            }
            KeyCode::End => {
                self.caret = text_edit::char_count(&self.text);
                Ok(InteractionResult::handled())
            }
            _ => Ok(InteractionResult::ignored()),
        }
    }

    fn can_execute(&self, command: EditCommand) -> bool {
        MaskedTextBox::can_execute(self, command)
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let prefix = UnicodeWidthStr::width(self.base.prefixed_label(true).as_str());
        let col = prefix + format::caret_column(&self.text, self.caret);
        Some(CursorPos {
            col: col.min(u16::MAX as usize) as u16,
            row: 0,
        })
    }

    fn value(&self) -> String {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{EditKey, MaskedTextBox, PropertyChange};
    use crate::config::MaskedInputConfig;
    use crate::error::{FilterError, MaskError, MaskedInputError};
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::filters::{FilterChain, FilterKind, FilterRegistry, predicate};
    use crate::widgets::traits::{EditCommand, Interactive};
    use std::sync::{Arc, Mutex};

    fn date_box() -> MaskedTextBox {
        let mut input = MaskedTextBox::new("date", "Date");
        input.set_prompt_char('_').expect("prompt");
        input.set_mask("00/00/0000").expect("mask");
        input
    }

    fn type_chars(input: &mut MaskedTextBox, chars: &str) {
        for ch in chars.chars() {
            input
                .on_key(KeyEvent::plain(KeyCode::Char(ch)))
                .expect("built-in filters never fail");
        }
    }

    #[test]
    fn mask_change_renders_prompts_with_caret_at_start() {
        let input = date_box();
        assert_eq!(input.text(), "__/__/____");
        assert_eq!(input.caret(), 0);
    }

    #[test]
    fn typing_fills_slot_and_advances_caret() {
        let mut input = date_box();
        assert!(input.preview_text_input("1").expect("no error"));
        assert_eq!(input.text(), "1_/__/____");
        assert_eq!(input.caret(), 1);
    }

    #[test]
    fn caret_skips_literals_after_a_slot_is_filled() {
        let mut input = date_box();
        type_chars(&mut input, "12");
        assert_eq!(input.text(), "12/__/____");
        assert_eq!(input.caret(), 3);

        type_chars(&mut input, "0320245");
        assert_eq!(input.text(), "12/03/2024");
        assert_eq!(input.caret(), 10);
        assert!(input.is_complete());
        assert_eq!(input.raw_value(), "12032024");
    }

    #[test]
    fn rejected_character_is_swallowed() {
        let mut input = date_box();
        assert!(input.preview_text_input("x").expect("no error"));
        assert_eq!(input.text(), "__/__/____");
        assert_eq!(input.caret(), 0);
    }

    #[test]
    fn typing_in_the_middle_inserts_and_shifts() {
        let mut input = date_box();
        type_chars(&mut input, "1234");
        input.set_caret(0);
        type_chars(&mut input, "9");
        assert_eq!(input.text(), "91/23/4___");
        assert_eq!(input.caret(), 1);
    }

    #[test]
    fn overwrite_mode_replaces_in_place() {
        let mut input = date_box();
        type_chars(&mut input, "1234");
        input.set_caret(0);
        input.on_key(KeyEvent::plain(KeyCode::Insert)).expect("toggle");
        assert!(input.is_overwrite());
        type_chars(&mut input, "9");
        assert_eq!(input.text(), "92/34/____");
    }

    #[test]
    fn filter_blocks_input_without_mask() {
        let mut input = MaskedTextBox::new("n", "N");
        input.set_filter_kind(FilterKind::Number).expect("filter");
        input.set_text("12").expect("text");
        input.set_caret(2);

        assert!(input.preview_text_input("a").expect("no error"));
        assert_eq!(input.text(), "12");
        assert_eq!(input.caret(), 2);

        let result = input.text_input("3").expect("no error");
        assert!(result.handled);
        assert_eq!(input.text(), "123");
        assert_eq!(input.caret(), 3);
    }

    #[test]
    fn filter_checks_insertion_at_caret_without_mask() {
        let mut input = MaskedTextBox::new("n", "N");
        input.set_filter_kind(FilterKind::Number).expect("filter");
        input.set_text("12").expect("text");
        input.set_caret(1);

        assert!(input.preview_text_input("-").expect("no error"));
        input.set_caret(0);
        assert!(!input.preview_text_input("-").expect("no error"));
    }

    #[test]
    fn filter_cannot_undo_a_masked_edit() {
        let mut input = date_box();
        input.set_filter_kind(FilterKind::UNumber).expect("filter");
        type_chars(&mut input, "1");
        assert_eq!(input.text(), "1_/__/____");
    }

    #[test]
    fn read_only_rejects_everything() {
        let mut input = date_box();
        type_chars(&mut input, "12");
        input.set_read_only(true);

        assert!(input.preview_text_input("3").expect("no error"));
        assert!(input.preview_edit_key(EditKey::Backspace).expect("no error"));
        assert!(input.preview_edit_key(EditKey::Delete).expect("no error"));
        assert_eq!(input.text(), "12/__/____");
    }

    #[test]
    fn backspace_removes_previous_slot() {
        let mut input = date_box();
        type_chars(&mut input, "12");
        input.set_caret(2);
        assert!(input.preview_edit_key(EditKey::Backspace).expect("no error"));
        assert_eq!(input.text(), "1_/__/____");
        assert_eq!(input.caret(), 1);

        input.set_caret(0);
        assert!(input.preview_edit_key(EditKey::Backspace).expect("no error"));
        assert_eq!(input.text(), "1_/__/____");
    }

    #[test]
    fn backspace_onto_literal_changes_nothing() {
        let mut input = date_box();
        type_chars(&mut input, "123");
        input.set_caret(3);
        assert!(input.preview_edit_key(EditKey::Backspace).expect("no error"));
        assert_eq!(input.text(), "12/3_/____");
        assert_eq!(input.caret(), 3);
    }

    #[test]
    fn delete_pulls_content_left() {
        let mut input = date_box();
        type_chars(&mut input, "1234");
        input.set_caret(0);
        assert!(input.preview_edit_key(EditKey::Delete).expect("no error"));
        assert_eq!(input.text(), "23/4_/____");
        assert_eq!(input.caret(), 0);

        input.set_caret(10);
        assert!(!input.preview_edit_key(EditKey::Delete).expect("no error"));
    }

    #[test]
    fn space_opens_a_gap_and_keeps_caret() {
        let mut input = date_box();
        type_chars(&mut input, "12");
        input.set_caret(0);
        input
            .on_key(KeyEvent::plain(KeyCode::Char(' ')))
            .expect("no error");
        assert_eq!(input.text(), "_1/2_/____");
        assert_eq!(input.caret(), 0);
    }

    #[test]
    fn failed_edit_keys_are_still_handled() {
        let mut input = date_box();
        type_chars(&mut input, "11223333");
        assert_eq!(input.text(), "11/22/3333");

        input.set_caret(0);
        assert!(input.preview_edit_key(EditKey::Space).expect("no error"));
        assert_eq!(input.text(), "11/22/3333");
        assert_eq!(input.caret(), 0);

        input.set_caret(2);
        assert!(input.preview_edit_key(EditKey::Delete).expect("no error"));
        assert_eq!(input.text(), "11/22/3333");
        assert_eq!(input.caret(), 2);
    }

    #[test]
    fn filter_change_keeps_text_and_resets_caret() {
        let mut input = date_box();
        type_chars(&mut input, "12");
        assert_eq!(input.caret(), 3);

        input.set_filter_kind(FilterKind::Number).expect("filter");
        assert_eq!(input.text(), "12/__/____");
        assert_eq!(input.caret(), 0);
    }

    #[test]
    fn edit_keys_fall_back_to_plain_editing_without_mask() {
        let mut input = MaskedTextBox::new("t", "T");
        input.set_text("abc").expect("text");
        input.set_caret(3);
        assert!(!input.preview_edit_key(EditKey::Backspace).expect("no error"));

        input
            .on_key(KeyEvent::plain(KeyCode::Backspace))
            .expect("no error");
        assert_eq!(input.text(), "ab");
        input.set_caret(0);
        input.on_key(KeyEvent::plain(KeyCode::Delete)).expect("no error");
        assert_eq!(input.text(), "b");
    }

    #[test]
    fn paste_and_cut_are_disabled() {
        let mut input = date_box();
        assert!(!input.can_execute(EditCommand::Paste));
        assert!(!input.can_execute(EditCommand::Cut));
        assert!(input.can_execute(EditCommand::Copy));

        input.set_read_only(true);
        input.set_mask("").expect("mask");
        assert!(!input.can_execute(EditCommand::Paste));

        let result = input.on_key(KeyEvent::ctrl('v')).expect("no error");
        assert!(result.handled);
        assert!(!result.request_render);
    }

    #[test]
    fn set_text_is_coerced_through_the_mask() {
        let mut input = date_box();
        input.set_text("01022024").expect("text");
        assert_eq!(input.text(), "01/02/2024");

        input.set_text("not a date").expect("text");
        assert_eq!(input.text(), "01/02/2024");
    }

    #[test]
    fn prompt_change_rebuilds_the_display() {
        let mut input = date_box();
        type_chars(&mut input, "1");
        input.set_prompt_char('*').expect("prompt");
        assert_eq!(input.text(), "**/**/****");
        assert_eq!(input.caret(), 0);

        let err = input.set_prompt_char('\t').expect_err("control prompt");
        assert!(matches!(
            err,
            MaskedInputError::Mask(MaskError::InvalidPromptChar('\t'))
        ));
        assert_eq!(input.prompt_char(), '*');
    }

    #[test]
    fn invalid_mask_keeps_previous_configuration() {
        let mut input = date_box();
        let err = input.set_mask(r"00\").expect_err("trailing escape");
        assert!(matches!(err, MaskedInputError::Mask(MaskError::TrailingEscape)));
        assert_eq!(input.mask(), "00/00/0000");
        assert_eq!(input.text(), "__/__/____");
    }

    #[test]
    fn clearing_the_mask_disables_masking() {
        let mut input = date_box();
        type_chars(&mut input, "1");
        input.set_mask("").expect("mask");
        input.set_text("free text").expect("text");
        assert_eq!(input.text(), "free text");
        assert!(input.is_complete());
    }

    #[test]
    fn listeners_see_configuration_and_text_changes() {
        let seen = Arc::new(Mutex::new(Vec::<PropertyChange>::new()));
        let sink = seen.clone();
        let mut input = MaskedTextBox::new("d", "D");
        input.subscribe(Box::new(move |change: &PropertyChange| {
            sink.lock().expect("listener lock").push(change.clone());
        }));

        input.set_mask("00").expect("mask");
        input.set_filter_kind(FilterKind::Number).expect("filter");

        let seen = seen.lock().expect("listener lock");
        assert_eq!(seen[0], PropertyChange::Mask("00".to_string()));
        assert_eq!(
            seen[1],
            PropertyChange::Text {
                text: "  ".to_string(),
                caret: 0
            }
        );
        assert_eq!(seen[2], PropertyChange::FilterKind(FilterKind::Number));
    }

    #[test]
    fn predicate_errors_reach_the_caller() {
        let registry = FilterRegistry::standard().with_filter(
            FilterKind::Any,
            FilterChain::new().with_predicate(predicate(|_| Err(FilterError::predicate("boom")))),
        );
        let mut input = MaskedTextBox::new("t", "T").with_registry(Arc::new(registry));

        let err = input.preview_text_input("a").expect_err("predicate failure");
        assert!(matches!(err, MaskedInputError::Filter(FilterError::Predicate { .. })));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn from_config_applies_every_field() {
        let config = MaskedInputConfig {
            mask: "(000) 000-0000".to_string(),
            prompt_char: '_',
            filter: FilterKind::Any,
            read_only: false,
            overwrite: true,
            text: "5551234567".to_string(),
        };
        let input = MaskedTextBox::from_config(
            "phone",
            "Phone",
            &config,
            Arc::new(FilterRegistry::standard()),
        )
        .expect("valid config");

        assert_eq!(input.text(), "(555) 123-4567");
        assert_eq!(input.caret(), 0);
        assert!(input.is_overwrite());
        assert_eq!(input.value(), "(555) 123-4567");
    }

    #[test]
    fn caret_navigation_keys() {
        let mut input = date_box();
        input.on_key(KeyEvent::plain(KeyCode::End)).expect("end");
        assert_eq!(input.caret(), 10);
        input.on_key(KeyEvent::plain(KeyCode::Left)).expect("left");
        assert_eq!(input.caret(), 9);
        input.on_key(KeyEvent::plain(KeyCode::Home)).expect("home");
        let result = input.on_key(KeyEvent::plain(KeyCode::Left)).expect("left");
        assert!(!result.handled);
    }
}
