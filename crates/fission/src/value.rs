use std::borrow::Cow;

use crate::style::CssValue;

/// Whether a value terminates recursion and becomes a declaration of its own.
///
/// Non-finite numbers are not terminal; like booleans and null they fall
/// through every branch and are silently dropped.
pub(crate) fn is_terminal_value(value: &CssValue) -> bool {
  match value {
    CssValue::Text(_) | CssValue::Token(_) => true,
    CssValue::Number(number) => number.is_finite(),
    CssValue::Map(_) | CssValue::Seq(_) | CssValue::Bool(_) | CssValue::Null => false,
  }
}

/// The declaration text of a terminal value.
pub(crate) fn terminal_text(value: &CssValue) -> Option<Cow<'_, str>> {
  match value {
    CssValue::Text(text) => Some(Cow::Borrowed(text)),
    CssValue::Number(number) if number.is_finite() => Some(Cow::Owned(number.to_string())),
    CssValue::Token(definition) => Some(Cow::Borrowed(definition.name())),
    _ => None,
  }
}
