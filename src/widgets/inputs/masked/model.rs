#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Digit,
    DigitOrSpace,
    DigitOrSign,
    Letter,
    Alnum,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseConversion {
    #[default]
    None,
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditSlot {
    pub class: CharClass,
    pub required: bool,
    pub case: CaseConversion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskElement {
    Literal(char),
    Edit(EditSlot),
}

/// What a single input character does to an editable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SlotInput {
    /// Leave the slot unfilled.
    Reset,
    Fill(char),
}

impl EditSlot {
    pub fn accepts(&self, ch: char) -> bool {
        match self.class {
            CharClass::Digit => ch.is_ascii_digit(),
            CharClass::DigitOrSpace => ch.is_ascii_digit() || ch == ' ',
            CharClass::DigitOrSign => ch.is_ascii_digit() || matches!(ch, ' ' | '+' | '-'),
            CharClass::Letter => ch.is_ascii_alphabetic(),
            CharClass::Alnum => ch.is_alphanumeric(),
            CharClass::Any => !ch.is_control(),
        }
    }

    pub(super) fn classify(&self, ch: char, prompt_char: char) -> Option<SlotInput> {
        if ch == prompt_char || ch == ' ' {
            return Some(SlotInput::Reset);
        }
        let ch = self.convert_case(ch);
        self.accepts(ch).then_some(SlotInput::Fill(ch))
    }

    fn convert_case(&self, ch: char) -> char {
        match self.case {
            CaseConversion::None => ch,
            CaseConversion::Upper => single_char(ch.to_uppercase()).unwrap_or(ch),
            CaseConversion::Lower => single_char(ch.to_lowercase()).unwrap_or(ch),
        }
    }
}

fn single_char(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let first = chars.next()?;
    chars.next().is_none().then_some(first)
}
