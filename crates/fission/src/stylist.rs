use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::assemble::{assemble, RenderResult, StyleRule};
use crate::config::Config;
use crate::dedup::deduplicate;
use crate::definition::{Definition, DefinitionKind};
use crate::error::Error;
use crate::flatten::{compile, AtomicDeclaration};
use crate::global;
use crate::style::{Css, CssValue};
use crate::styled::{Element, Styled};

/// A style producer: reads the configured context, returns a style input.
pub type StyleProducer<Ctx = ()> = Arc<dyn Fn(&Ctx) -> CssValue + Send + Sync>;

/// A style input for rendering: either a fixed value or a producer evaluated
/// against the compiler's context.
pub enum StyleSource<Ctx = ()> {
  Value(CssValue),
  Producer(StyleProducer<Ctx>),
}

impl<Ctx> StyleSource<Ctx> {
  pub fn from_producer<S, F>(producer: F) -> Self
  where
    S: Into<CssValue>,
    F: Fn(&Ctx) -> S + Send + Sync + 'static,
  {
    StyleSource::Producer(Arc::new(move |context| producer(context).into()))
  }

  pub(crate) fn resolve(&self, context: &Ctx) -> CssValue {
    match self {
      StyleSource::Value(value) => value.clone(),
      StyleSource::Producer(producer) => producer(context),
    }
  }
}

impl<Ctx> Clone for StyleSource<Ctx> {
  fn clone(&self) -> Self {
    match self {
      StyleSource::Value(value) => StyleSource::Value(value.clone()),
      StyleSource::Producer(producer) => StyleSource::Producer(Arc::clone(producer)),
    }
  }
}

impl<Ctx> fmt::Debug for StyleSource<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StyleSource::Value(value) => f.debug_tuple("Value").field(value).finish(),
      StyleSource::Producer(_) => f.write_str("Producer"),
    }
  }
}

impl<Ctx> From<CssValue> for StyleSource<Ctx> {
  fn from(value: CssValue) -> Self {
    StyleSource::Value(value)
  }
}

impl<Ctx> From<Css> for StyleSource<Ctx> {
  fn from(css: Css) -> Self {
    StyleSource::Value(CssValue::Map(css))
  }
}

impl<Ctx> From<Vec<Css>> for StyleSource<Ctx> {
  fn from(layers: Vec<Css>) -> Self {
    StyleSource::Value(CssValue::Seq(
      layers.into_iter().map(CssValue::Map).collect(),
    ))
  }
}

pub(crate) struct StylistInner<Ctx> {
  pub(crate) config: Config<Ctx>,
  /// Definitions minted through this instance, in minting order. Flattening
  /// snapshots the list to resolve names referenced from value text.
  definitions: RwLock<Vec<Definition>>,
}

/// Handle to one style compiler instance.
///
/// Cheap to clone; clones share the configuration, the minted definitions and
/// nothing else. Two instances with different prefixes or hash functions
/// never produce colliding class names and their caches stay disjoint.
pub struct Stylist<Ctx = ()> {
  pub(crate) inner: Arc<StylistInner<Ctx>>,
}

impl<Ctx> Clone for Stylist<Ctx> {
  fn clone(&self) -> Self {
    Stylist {
      inner: Arc::clone(&self.inner),
    }
  }
}

impl<Ctx: fmt::Debug> fmt::Debug for Stylist<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Stylist")
      .field("config", &self.inner.config)
      .finish_non_exhaustive()
  }
}

impl<Ctx: 'static> Stylist<Ctx> {
  pub fn new(config: Config<Ctx>) -> Self {
    Stylist {
      inner: Arc::new(StylistInner {
        config,
        definitions: RwLock::new(Vec::new()),
      }),
    }
  }

  pub fn config(&self) -> &Config<Ctx> {
    &self.inner.config
  }

  /// Binds a style producer to an element.
  ///
  /// Wrapping an already styled unit re-wraps its underlying tag with both
  /// producers, the original first, so the new styles win deduplication.
  pub fn styled<S, F>(&self, base: impl Into<Element<Ctx>>, producer: F) -> Styled<Ctx>
  where
    S: Into<CssValue>,
    F: Fn(&Ctx) -> S + Send + Sync + 'static,
  {
    Styled::new(
      self.clone(),
      base.into(),
      Arc::new(move |context| producer(context).into()),
    )
  }

  /// Re-targets a styled unit onto a different tag, keeping its styles.
  ///
  /// Plain elements carry no style producer to re-target, so they are always
  /// rejected, in every mode.
  pub fn clone_as(
    &self,
    source: impl Into<Element<Ctx>>,
    tag: impl Into<Cow<'static, str>>,
  ) -> Result<Styled<Ctx>, Error> {
    Styled::clone_as(self, &source.into(), tag.into())
  }

  /// Mints a `@keyframes` definition from the producer's body.
  pub fn keyframes<F>(&self, producer: F) -> Result<Definition, Error>
  where
    F: FnOnce(&Ctx) -> Css,
  {
    self.define(DefinitionKind::Keyframes, producer)
  }

  /// Mints a `@counter-style` definition from the producer's body.
  pub fn counter_style<F>(&self, producer: F) -> Result<Definition, Error>
  where
    F: FnOnce(&Ctx) -> Css,
  {
    self.define(DefinitionKind::CounterStyle, producer)
  }

  fn define<F>(&self, kind: DefinitionKind, producer: F) -> Result<Definition, Error>
  where
    F: FnOnce(&Ctx) -> Css,
  {
    let body = producer(&self.inner.config.context);
    let definition = Definition::mint(&self.inner.config, kind, &body)?;
    let mut definitions = self.inner.definitions.write();
    if !definitions.contains(&definition) {
      definitions.push(definition.clone());
    }
    Ok(definition)
  }

  /// Serializes a global-style input into a single verbatim rule sorting
  /// ahead of all atomic rules. `None` when there is nothing to emit.
  pub fn render_global_style<S, F>(&self, producer: F) -> Result<Option<StyleRule>, Error>
  where
    S: Into<CssValue>,
    F: FnOnce(&Ctx) -> S,
  {
    let input = producer(&self.inner.config.context).into();
    global::render(&self.inner.config, &input)
  }

  /// Low-level entry: flattens, deduplicates and assembles an arbitrary
  /// style input without going through a styled unit.
  pub fn render_css(&self, source: impl Into<StyleSource<Ctx>>) -> Result<RenderResult, Error> {
    let declarations = self.compile_source(&source.into())?;
    Ok(self.finish(declarations))
  }

  pub(crate) fn compile_source(
    &self,
    source: &StyleSource<Ctx>,
  ) -> Result<Vec<AtomicDeclaration>, Error> {
    let input = source.resolve(&self.inner.config.context);
    let definitions = self.inner.definitions.read().clone();
    compile(&self.inner.config, &definitions, &input)
  }

  pub(crate) fn finish(&self, declarations: Vec<AtomicDeclaration>) -> RenderResult {
    assemble(&self.inner.config, &deduplicate(declarations))
  }

  /// Rejects caller class names that sit in the generated namespace. Strict
  /// mode raises; production logs and lets the class through.
  pub(crate) fn guard_class_name(&self, class_name: &str) -> Result<(), Error> {
    let reserved = self.inner.config.class_prefix();
    if class_name
      .split_whitespace()
      .any(|part| part.starts_with(&reserved))
    {
      let error = Error::ReservedClassNameCollision {
        class_name: class_name.to_owned(),
        reserved,
      };
      if self.inner.config.strict() {
        return Err(error);
      }
      tracing::warn!("{error}");
    }
    Ok(())
  }
}
