use crate::assemble::StyleRule;
use crate::config::Config;
use crate::error::Error;
use crate::style::CssValue;
use crate::text::css_to_string;

/// Serializes a whole global-style input into one rule that sorts ahead of
/// every atomic rule. Global blocks are emitted verbatim, carry no class, and
/// their key is the unprefixed hash of the finalized text.
///
/// Returns `None` when the input is inert or serializes to nothing.
pub(crate) fn render<Ctx>(
  config: &Config<Ctx>,
  input: &CssValue,
) -> Result<Option<StyleRule>, Error> {
  let code = css_to_string(config, input, true)?;
  if code.is_empty() {
    return Ok(None);
  }
  let css = config.post_process(code);
  Ok(Some(StyleRule {
    key: (config.hash_fn)(&css),
    precedence: -1,
    css,
  }))
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::config::Mode;
  use crate::css;

  fn config() -> Config<()> {
    Config::new(|text| text.len().to_string()).with_mode(Mode::Strict)
  }

  #[test]
  fn serializes_whole_blocks_below_everything() {
    let rule = render(
      &config(),
      &CssValue::Map(css! { body: { margin: 0, padding: 0 } }),
    )
    .unwrap()
    .unwrap();
    assert_eq!(rule.css, "body {margin:0;padding:0}");
    assert_eq!(rule.precedence, -1);
    // The key is unprefixed: global blocks live outside the class namespace.
    assert_eq!(rule.key, "25");
  }

  #[test]
  fn sequences_concatenate_into_one_rule() {
    let rule = render(
      &config(),
      &CssValue::Seq(vec![
        CssValue::Map(css! { body: { margin: 0 } }),
        CssValue::Map(css! { p: { color: "red" } }),
      ]),
    )
    .unwrap()
    .unwrap();
    assert_eq!(rule.css, "body {margin:0}p {color:red}");
  }

  #[test]
  fn inert_or_empty_input_renders_nothing() {
    assert_eq!(render(&config(), &CssValue::Null).unwrap(), None);
    assert_eq!(render(&config(), &CssValue::Bool(false)).unwrap(), None);
    assert_eq!(render(&config(), &CssValue::Map(css! {})).unwrap(), None);
  }

  #[test]
  fn post_processor_runs_before_hashing() {
    let upper = config().with_post_processor(|css| css.to_uppercase());
    let rule = render(&upper, &CssValue::Map(css! { body: { margin: 0 } }))
      .unwrap()
      .unwrap();
    assert_eq!(rule.css, "BODY {MARGIN:0}");
    assert_eq!(rule.key, "15");
  }
}
