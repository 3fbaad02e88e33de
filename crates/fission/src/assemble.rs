use std::collections::HashMap;

use serde::Serialize;

use crate::config::Config;
use crate::flatten::AtomicDeclaration;

/// One emittable CSS rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StyleRule {
  /// Stable identity for collect-once mounting.
  pub key: String,
  /// Cascade bucket: `-1` for global blocks, `0` for verbatim at-rules, then
  /// the per-group sequence number for atomic rules.
  pub precedence: i32,
  /// Finalized rule text.
  pub css: String,
}

/// Everything one render produced: the rules plus the class list selecting
/// them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderResult {
  pub rules: Vec<StyleRule>,
  /// Space-joined class names in declaration order; empty when no atomic
  /// rule was produced.
  pub class_name: String,
}

/// Numbers each declaration within its override group and mints the final
/// class names.
///
/// Group counters start at 1 and the sequence number is appended to the
/// content hash, so `x-13q2bts` becomes class `x-13q2bts1`. Within a group a
/// later (higher-numbered) class wins over an earlier one at equal selector
/// specificity by rule order. Verbatim `@` entries pass through unclassed at
/// precedence 0.
pub(crate) fn assemble<Ctx>(
  config: &Config<Ctx>,
  declarations: &[AtomicDeclaration],
) -> RenderResult {
  let mut sequence_by_group: HashMap<&str, i32> = HashMap::new();
  let mut rules = Vec::with_capacity(declarations.len());
  let mut class_names: Vec<String> = Vec::new();

  for declaration in declarations {
    if declaration.group == "@" {
      rules.push(StyleRule {
        key: declaration.hash.clone(),
        precedence: 0,
        css: config.post_process(declaration.code.clone()),
      });
      continue;
    }
    let sequence = *sequence_by_group
      .entry(declaration.group.as_str())
      .and_modify(|sequence| *sequence += 1)
      .or_insert(1);
    let class_name = format!("{}{}", declaration.hash, sequence);
    rules.push(StyleRule {
      key: class_name.clone(),
      precedence: sequence,
      css: config.post_process(format!(".{}{}", class_name, declaration.code)),
    });
    class_names.push(class_name);
  }

  RenderResult {
    rules,
    class_name: class_names.join(" "),
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::config::Mode;
  use crate::css;
  use crate::dedup::deduplicate;
  use crate::flatten::compile;
  use crate::style::CssValue;

  fn config() -> Config<()> {
    Config::new(|text| text.len().to_string()).with_mode(Mode::Strict)
  }

  fn render(config: &Config<()>, input: CssValue) -> RenderResult {
    assemble(config, &deduplicate(compile(config, &[], &input).unwrap()))
  }

  #[test]
  fn same_group_counts_up_across_chains() {
    let result = render(
      &config(),
      CssValue::Map(css! {
        color: "red",
        "&:hover": { color: "blue" },
      }),
    );
    assert_eq!(result.rules[0].css, ".x-91{color:red}");
    assert_eq!(result.rules[0].precedence, 1);
    assert_eq!(result.rules[1].css, ".x-192{&:hover{color:blue}}");
    assert_eq!(result.rules[1].precedence, 2);
    assert_eq!(result.class_name, "x-91 x-192");
  }

  #[test]
  fn different_groups_number_independently() {
    let result = render(
      &config(),
      CssValue::Map(css! { color: "red", background: "blue" }),
    );
    assert_eq!(result.rules[0].precedence, 1);
    assert_eq!(result.rules[1].precedence, 1);
    assert_eq!(result.class_name, "x-91 x-151");
  }

  #[test]
  fn verbatim_at_rules_have_no_class() {
    let result = render(
      &config(),
      CssValue::Map(css! { "@font-face": "{font-family:Blank}" }),
    );
    assert_eq!(result.rules.len(), 1);
    assert_eq!(result.rules[0].precedence, 0);
    assert!(result.rules[0].css.starts_with("@font-face"));
    assert_eq!(result.class_name, "");
  }

  #[test]
  fn post_processor_rewrites_rule_text_only() {
    let upper = config().with_post_processor(|css| css.to_uppercase());
    let result = render(&upper, CssValue::Map(css! { color: "red" }));
    assert_eq!(result.rules[0].css, ".X-91{COLOR:RED}");
    assert_eq!(result.rules[0].key, "x-91");
    assert_eq!(result.class_name, "x-91");
  }
}
