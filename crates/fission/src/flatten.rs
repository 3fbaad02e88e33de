use once_cell::sync::Lazy;
use regex::Regex;

use crate::code::encode;
use crate::config::Config;
use crate::definition::Definition;
use crate::error::{report_invalid, Error};
use crate::property::{normalize_property_name, property_group};
use crate::style::{Css, CssValue};
use crate::text::css_to_string;
use crate::value::{is_terminal_value, terminal_text};

/// A cascade-layer key holding exactly one (possibly dotted) layer name.
static LAYER_KEY: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^@layer\s+([\w-]+(?:\.[\w-]+)*)$").expect("valid pattern"));

/// At-rule kinds that nest around declarations like selectors do. Any other
/// at-rule key is emitted once, verbatim, outside the atomic cascade.
const NESTABLE_AT_RULES: [&str; 5] = ["media", "supports", "layer", "scope", "container"];

/// One flattened declaration, ready for deduplication and assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AtomicDeclaration {
  /// Override group: the first meaningful property-name segment,
  /// `#<layer>` for explicit layer blocks, or `@` for verbatim at-rules.
  pub group: String,
  /// Prefixed content hash of the unwrapped declaration text.
  pub hash: String,
  /// Emittable rule text, brace-wrapped unless the group is `@`.
  pub code: String,
  /// Trailing length of the encoded text. `None` marks a verbatim block,
  /// which deduplicates by hash identity instead of override key.
  pub value_length: Option<usize>,
}

/// Accumulates the declarations of one flattening pass.
#[derive(Debug, Default)]
pub(crate) struct Sheet {
  declarations: Vec<AtomicDeclaration>,
}

impl Sheet {
  pub(crate) fn new() -> Self {
    Sheet::default()
  }

  fn push(&mut self, declaration: AtomicDeclaration) {
    self.declarations.push(declaration);
  }

  pub(crate) fn into_declarations(self) -> Vec<AtomicDeclaration> {
    self.declarations
  }
}

/// Runs one full flattening pass over a style input.
pub(crate) fn compile<Ctx>(
  config: &Config<Ctx>,
  definitions: &[Definition],
  input: &CssValue,
) -> Result<Vec<AtomicDeclaration>, Error> {
  let mut sheet = Sheet::new();
  Flattener {
    config,
    definitions,
  }
  .flatten(input, &[], &mut sheet)?;
  Ok(sheet.into_declarations())
}

/// Walks a style input depth-first, emitting one atomic declaration per
/// property:value under its accumulated parent chain.
struct Flattener<'a, Ctx> {
  config: &'a Config<Ctx>,
  /// Definitions minted so far, matched against value text so a referenced
  /// `@keyframes` block travels with the declaration that uses it.
  definitions: &'a [Definition],
}

impl<Ctx> Flattener<'_, Ctx> {
  fn flatten(&self, value: &CssValue, parents: &[&str], sheet: &mut Sheet) -> Result<(), Error> {
    match value {
      CssValue::Seq(items) => {
        for item in items {
          self.flatten(item, parents, sheet)?;
        }
        Ok(())
      }
      CssValue::Map(css) => self.flatten_map(css, parents, sheet),
      // Inert inputs produce no styles, at any depth.
      CssValue::Null | CssValue::Bool(_) => Ok(()),
      other => report_invalid(self.config, other.shape()),
    }
  }

  fn flatten_map(&self, css: &Css, parents: &[&str], sheet: &mut Sheet) -> Result<(), Error> {
    for (key, value) in css.iter() {
      if let Some(layer) = parse_layer_name(key) {
        self.layer_block(key, layer, value, parents, sheet)?;
        continue;
      }
      if is_terminal_value(value) {
        self.declaration(key, value, parents, sheet)?;
        continue;
      }
      match value {
        CssValue::Seq(items) => {
          let mut nested: Vec<&str> = parents.to_vec();
          nested.push(key);
          for item in items {
            self.flatten(item, &nested, sheet)?;
          }
        }
        CssValue::Map(inner) => {
          let mut nested: Vec<&str> = parents.to_vec();
          nested.push(key);
          self.flatten_map(inner, &nested, sheet)?;
        }
        // Null, booleans and non-finite numbers are dropped silently.
        _ => {}
      }
    }
    Ok(())
  }

  fn declaration(
    &self,
    key: &str,
    value: &CssValue,
    parents: &[&str],
    sheet: &mut Sheet,
  ) -> Result<(), Error> {
    let name = normalize_property_name(key);
    let Some(text) = terminal_text(value) else {
      return Ok(());
    };

    // Referenced definitions land in the sheet ahead of the declaration that
    // uses them so their blocks sort before the atomic cascade.
    match value {
      CssValue::Token(definition) => register(definition, sheet),
      CssValue::Text(raw) => self.register_referenced(raw, sheet),
      _ => {}
    }

    let standalone = is_standalone_at_rule(&name);
    let synthetic = match (&self.config.default_layer, standalone) {
      (Some(layer), false) if !under_explicit_layer(parents) => Some(format!("@layer {layer}")),
      _ => None,
    };
    let mut chain: Vec<&str> = Vec::with_capacity(parents.len() + 1);
    if let Some(layer_key) = &synthetic {
      chain.push(layer_key);
    }
    chain.extend_from_slice(parents);

    let (code, trailing) = encode(&chain, &name, &text);
    let hash = self.config.hashed(&code);
    if standalone {
      sheet.push(AtomicDeclaration {
        group: "@".to_owned(),
        hash,
        code,
        value_length: None,
      });
    } else {
      sheet.push(AtomicDeclaration {
        group: property_group(&name),
        hash,
        code: format!("{{{code}}}"),
        value_length: Some(trailing),
      });
    }
    Ok(())
  }

  /// An explicitly layered block is serialized whole; its declarations keep
  /// their cascade relationship and never participate in atomic overrides.
  fn layer_block(
    &self,
    key: &str,
    layer: &str,
    value: &CssValue,
    parents: &[&str],
    sheet: &mut Sheet,
  ) -> Result<(), Error> {
    let body = css_to_string(self.config, value, false)?;
    if body.is_empty() {
      return Ok(());
    }
    let (code, _) = encode(parents, key, &body);
    let first_segment = layer.split('.').next().unwrap_or(layer);
    sheet.push(AtomicDeclaration {
      group: format!("#{first_segment}"),
      hash: self.config.hashed(&code),
      code: format!("{{{code}}}"),
      value_length: None,
    });
    Ok(())
  }

  fn register_referenced(&self, text: &str, sheet: &mut Sheet) {
    // Minted names always carry the class prefix; skip the scan when the
    // value cannot possibly reference one.
    if self.definitions.is_empty() || !text.contains(&self.config.class_prefix()) {
      return;
    }
    for definition in self.definitions {
      if references_name(text, definition.name()) {
        register(definition, sheet);
      }
    }
  }
}

/// Whole-token scan over value text. A minted name embedded in a longer
/// identifier is a different name, so `x-ab` never matches inside `x-ab1`.
fn references_name(text: &str, name: &str) -> bool {
  text.match_indices(name).any(|(at, _)| {
    let before = text[..at].chars().next_back();
    let after = text[at + name.len()..].chars().next();
    !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
  })
}

fn is_identifier_char(ch: char) -> bool {
  ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn register(definition: &Definition, sheet: &mut Sheet) {
  sheet.push(AtomicDeclaration {
    group: "@".to_owned(),
    hash: definition.name().to_owned(),
    code: definition.code().to_owned(),
    value_length: None,
  });
}

fn parse_layer_name(key: &str) -> Option<&str> {
  LAYER_KEY
    .captures(key)
    .and_then(|captures| captures.get(1))
    .map(|matched| matched.as_str())
}

fn under_explicit_layer(parents: &[&str]) -> bool {
  parents.iter().any(|parent| parent.starts_with("@layer"))
}

fn is_standalone_at_rule(name: &str) -> bool {
  let Some(rest) = name.strip_prefix('@') else {
    return false;
  };
  let end = rest
    .find(|ch: char| !ch.is_ascii_alphanumeric() && ch != '-')
    .unwrap_or(rest.len());
  !NESTABLE_AT_RULES.contains(&&rest[..end])
}
