use std::fmt;
use std::sync::Arc;

use crate::code::encode;
use crate::config::Config;
use crate::error::Error;
use crate::style::Css;
use crate::text::css_map_to_string;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefinitionKind {
  Keyframes,
  CounterStyle,
}

impl DefinitionKind {
  pub(crate) fn at_rule(self) -> &'static str {
    match self {
      DefinitionKind::Keyframes => "@keyframes",
      DefinitionKind::CounterStyle => "@counter-style",
    }
  }
}

/// A minted `@keyframes` or `@counter-style` block.
///
/// The name is a prefixed content hash of the serialized body, so equal
/// bodies mint interchangeable definitions. Minting produces no output by
/// itself; the block is emitted once a declaration references the definition,
/// either directly as a value or by name inside a longer value string
/// (`format!("{spin} 2s linear infinite")`).
#[derive(Clone)]
pub struct Definition {
  inner: Arc<DefinitionInner>,
}

struct DefinitionInner {
  kind: DefinitionKind,
  name: String,
  code: String,
}

impl Definition {
  pub(crate) fn mint<Ctx>(
    config: &Config<Ctx>,
    kind: DefinitionKind,
    body: &Css,
  ) -> Result<Self, Error> {
    let body = format!("{{{}}}", css_map_to_string(config, body, true)?);
    let name = config.hashed(&format!("{} {}", kind.at_rule(), body));
    let (code, _) = encode(&[], &format!("{} {}", kind.at_rule(), name), &body);
    Ok(Definition {
      inner: Arc::new(DefinitionInner { kind, name, code }),
    })
  }

  /// The minted name (`<prefix>-<hash>`) declarations refer to.
  pub fn name(&self) -> &str {
    &self.inner.name
  }

  /// The full at-rule block this definition stands for.
  pub(crate) fn code(&self) -> &str {
    &self.inner.code
  }

  pub fn kind(&self) -> DefinitionKind {
    self.inner.kind
  }
}

/// Writes the minted name, so definitions interpolate directly into value
/// strings.
impl fmt::Display for Definition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.inner.name)
  }
}

impl fmt::Debug for Definition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Definition")
      .field("kind", &self.inner.kind)
      .field("name", &self.inner.name)
      .finish_non_exhaustive()
  }
}

impl PartialEq for Definition {
  fn eq(&self, other: &Self) -> bool {
    self.inner.name == other.inner.name
  }
}

impl Eq for Definition {}
