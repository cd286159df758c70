use super::model::{CaseConversion, CharClass, EditSlot, MaskElement};
use crate::error::MaskError;

pub(super) fn parse_mask(mask: &str) -> Result<Vec<MaskElement>, MaskError> {
    let mut elements = Vec::<MaskElement>::new();
    let mut case = CaseConversion::None;
    let mut chars = mask.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let escaped = chars.next().ok_or(MaskError::TrailingEscape)?;
                elements.push(MaskElement::Literal(escaped));
            }
            '<' => case = CaseConversion::Lower,
            '>' => case = CaseConversion::Upper,
            '|' => case = CaseConversion::None,
            _ => {
                let element = match edit_slot(ch) {
                    Some((class, required)) => MaskElement::Edit(EditSlot {
                        class,
                        required,
                        case,
                    }),
                    None => MaskElement::Literal(ch),
                };
                elements.push(element);
            }
        }
    }

    if elements.is_empty() {
        return Err(MaskError::Empty);
    }
    Ok(elements)
}

// `.`, `,`, `:`, `/` and `$` are culture placeholders; the invariant culture
// renders each as itself, so they fall through as literals.
fn edit_slot(ch: char) -> Option<(CharClass, bool)> {
    match ch {
        '0' => Some((CharClass::Digit, true)),
        '9' => Some((CharClass::DigitOrSpace, false)),
        '#' => Some((CharClass::DigitOrSign, false)),
        'L' => Some((CharClass::Letter, true)),
        '?' => Some((CharClass::Letter, false)),
        '&' => Some((CharClass::Any, true)),
        'C' => Some((CharClass::Any, false)),
        'A' => Some((CharClass::Alnum, true)),
        'a' => Some((CharClass::Alnum, false)),
        _ => None,
    }
}
