use super::model::{EditSlot, MaskElement, SlotInput};
use super::parser;
use crate::error::MaskError;

/// Buffer of literal and editable positions driven by a mask.
///
/// Positions are character offsets into the display string; every mask
/// element occupies exactly one of them.
#[derive(Debug, Clone)]
pub struct MaskedTextProvider {
    mask: String,
    prompt_char: char,
    elements: Vec<MaskElement>,
    values: Vec<Option<char>>,
}

impl MaskedTextProvider {
    pub fn new(mask: &str, prompt_char: char) -> Result<Self, MaskError> {
        if prompt_char.is_control() {
            return Err(MaskError::InvalidPromptChar(prompt_char));
        }
        let elements = parser::parse_mask(mask)?;
        let values = vec![None; elements.len()];
        Ok(Self {
            mask: mask.to_string(),
            prompt_char,
            elements,
            values,
        })
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    pub fn prompt_char(&self) -> char {
        self.prompt_char
    }

    /// Length of the display string.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_edit_position(&self, pos: usize) -> bool {
        self.slot(pos).is_some()
    }

    pub fn is_assigned(&self, pos: usize) -> bool {
        self.values.get(pos).is_some_and(Option::is_some)
    }

    pub fn edit_position_count(&self) -> usize {
        self.edit_positions_from(0).count()
    }

    pub fn assigned_edit_position_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    /// Every required position is filled.
    pub fn mask_completed(&self) -> bool {
        self.elements
            .iter()
            .zip(&self.values)
            .all(|(element, value)| match element {
                MaskElement::Edit(slot) => !slot.required || value.is_some(),
                MaskElement::Literal(_) => true,
            })
    }

    /// Every editable position is filled.
    pub fn mask_full(&self) -> bool {
        self.assigned_edit_position_count() == self.edit_position_count()
    }

    pub fn clear(&mut self) {
        self.values.fill(None);
    }

    /// Replaces the whole content with `text`. Literal characters in `text`
    /// that line up with the mask are skipped; everything else must fit the
    /// next editable position. Leaves the buffer untouched on failure.
    pub fn set(&mut self, text: &str) -> bool {
        let mut values = vec![None; self.len()];
        let mut pos = 0usize;

        for ch in text.chars() {
            if pos >= self.len() {
                return false;
            }
            if self.literal_at(pos) == Some(ch) {
                pos += 1;
                continue;
            }
            let Some((edit_pos, input)) = self.place(ch, pos) else {
                return false;
            };
            values[edit_pos] = fill_value(input);
            pos = edit_pos + 1;
        }

        self.values = values;
        true
    }

    /// Inserts `input` at the first editable position at or after `pos`,
    /// shifting the following content one editable position to the right.
    pub fn insert_at(&mut self, input: &str, pos: usize) -> bool {
        if pos >= self.len() {
            return false;
        }
        let mut values = self.values.clone();
        let mut pos = pos;

        for ch in input.chars() {
            if pos >= self.len() {
                return false;
            }
            if self.literal_at(pos) == Some(ch) {
                pos += 1;
                continue;
            }
            let Some((edit_pos, input)) = self.place(ch, pos) else {
                return false;
            };
            if !self.shift_right(&mut values, edit_pos) {
                return false;
            }
            values[edit_pos] = fill_value(input);
            pos = edit_pos + 1;
        }

        self.values = values;
        true
    }

    /// Overwrites content starting at the first editable position at or after `pos`.
    pub fn replace(&mut self, input: &str, pos: usize) -> bool {
        if pos >= self.len() {
            return false;
        }
        let mut values = self.values.clone();
        let mut pos = pos;

        for ch in input.chars() {
            if pos >= self.len() {
                return false;
            }
            if self.literal_at(pos) == Some(ch) {
                pos += 1;
                continue;
            }
            let Some((edit_pos, input)) = self.place(ch, pos) else {
                return false;
            };
            values[edit_pos] = fill_value(input);
            pos = edit_pos + 1;
        }

        self.values = values;
        true
    }

    /// Clears the editable position `pos` and pulls the following content
    /// one editable position to the left.
    pub fn remove_at(&mut self, pos: usize) -> bool {
        if !self.is_edit_position(pos) {
            return false;
        }
        let tail: Vec<usize> = self.edit_positions_from(pos).collect();
        let mut values = self.values.clone();

        for pair in tail.windows(2) {
            let (to, from) = (pair[0], pair[1]);
            let moved = self.values[from];
            if let Some(ch) = moved
                && !self.slot_accepts(to, ch)
            {
                return false;
            }
            values[to] = moved;
        }
        if let Some(&last) = tail.last() {
            values[last] = None;
        }

        self.values = values;
        true
    }

    pub fn find_edit_position_from(&self, pos: usize, forward: bool) -> Option<usize> {
        if forward {
            (pos..self.len()).find(|&idx| self.is_edit_position(idx))
        } else {
            if self.is_empty() {
                return None;
            }
            (0..=pos.min(self.len() - 1))
                .rev()
                .find(|&idx| self.is_edit_position(idx))
        }
    }

    /// Literals, filled characters, and the prompt for unfilled positions.
    pub fn to_display_string(&self) -> String {
        self.to_text(true, true)
    }

    pub fn to_text(&self, include_prompt: bool, include_literals: bool) -> String {
        let mut out = String::with_capacity(self.len());
        for (element, value) in self.elements.iter().zip(&self.values) {
            match (element, value) {
                (MaskElement::Literal(ch), _) => {
                    if include_literals {
                        out.push(*ch);
                    }
                }
                (MaskElement::Edit(_), Some(ch)) => out.push(*ch),
                (MaskElement::Edit(_), None) => {
                    if include_prompt {
                        out.push(self.prompt_char);
                    }
                }
            }
        }
        out
    }

    fn slot(&self, pos: usize) -> Option<&EditSlot> {
        match self.elements.get(pos) {
            Some(MaskElement::Edit(slot)) => Some(slot),
            _ => None,
        }
    }

    fn slot_accepts(&self, pos: usize, ch: char) -> bool {
        self.slot(pos).is_some_and(|slot| slot.accepts(ch))
    }

    fn literal_at(&self, pos: usize) -> Option<char> {
        match self.elements.get(pos) {
            Some(MaskElement::Literal(ch)) => Some(*ch),
            _ => None,
        }
    }

    fn edit_positions_from(&self, pos: usize) -> impl Iterator<Item = usize> + '_ {
        (pos..self.len()).filter(|&idx| self.is_edit_position(idx))
    }

    fn place(&self, ch: char, pos: usize) -> Option<(usize, SlotInput)> {
        let edit_pos = self.find_edit_position_from(pos, true)?;
        let input = self.slot(edit_pos)?.classify(ch, self.prompt_char)?;
        Some((edit_pos, input))
    }

    fn shift_right(&self, values: &mut [Option<char>], from: usize) -> bool {
        let tail: Vec<usize> = self.edit_positions_from(from).collect();
        let Some(last_assigned) = tail.iter().rposition(|&idx| values[idx].is_some()) else {
            return true;
        };
        if last_assigned + 1 >= tail.len() {
            return false;
        }

        for idx in (0..=last_assigned).rev() {
            let moved = values[tail[idx]];
            if let Some(ch) = moved
                && !self.slot_accepts(tail[idx + 1], ch)
            {
                return false;
            }
            values[tail[idx + 1]] = moved;
        }
        values[tail[0]] = None;
        true
    }
}

fn fill_value(input: SlotInput) -> Option<char> {
    match input {
        SlotInput::Reset => None,
        SlotInput::Fill(ch) => Some(ch),
    }
}
