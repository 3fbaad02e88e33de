use indexmap::IndexMap;

use crate::assemble::StyleRule;
use crate::styled::Rendered;

/// Collects rules across many renders for one emission, e.g. a server-side
/// pass or a test snapshot.
///
/// The first rule mounted under a key wins; identical keys always carry
/// identical text for one compiler instance, so later arrivals are dropped.
#[derive(Debug, Default)]
pub struct StyleRegistry {
  rules: IndexMap<String, StyleRule>,
}

impl StyleRegistry {
  pub fn new() -> Self {
    StyleRegistry::default()
  }

  pub fn insert(&mut self, rule: StyleRule) {
    self.rules.entry(rule.key.clone()).or_insert(rule);
  }

  pub fn extend(&mut self, rules: impl IntoIterator<Item = StyleRule>) {
    for rule in rules {
      self.insert(rule);
    }
  }

  /// Collects everything a finished render mounted.
  pub fn add_rendered(&mut self, rendered: &Rendered) {
    self.extend(rendered.rules.iter().cloned());
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// Rules in mount order, before precedence sorting.
  pub fn rules(&self) -> impl Iterator<Item = &StyleRule> {
    self.rules.values()
  }

  /// Emits the collected rules as one stylesheet: globals first, then
  /// verbatim at-rules, then atomic rules by ascending override strength.
  /// Mount order breaks ties, so emission is stable across re-renders.
  pub fn to_css(&self) -> String {
    let mut ordered: Vec<&StyleRule> = self.rules.values().collect();
    ordered.sort_by_key(|rule| rule.precedence);
    ordered
      .iter()
      .map(|rule| rule.css.as_str())
      .collect::<Vec<_>>()
      .join("\n")
  }
}
