use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::assemble::{RenderResult, StyleRule};
use crate::error::Error;
use crate::flatten::AtomicDeclaration;
use crate::stylist::{StyleProducer, StyleSource, Stylist};
use crate::style::CssValue;

/// Anything styles can anchor to: a plain tag, or a unit that already went
/// through [`Stylist::styled`].
pub enum Element<Ctx = ()> {
  Tag(Cow<'static, str>),
  Styled(Styled<Ctx>),
}

impl<Ctx> Clone for Element<Ctx> {
  fn clone(&self) -> Self {
    match self {
      Element::Tag(tag) => Element::Tag(tag.clone()),
      Element::Styled(styled) => Element::Styled(styled.clone()),
    }
  }
}

impl<Ctx> fmt::Debug for Element<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Element::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
      Element::Styled(styled) => f.debug_tuple("Styled").field(&styled.tag).finish(),
    }
  }
}

impl<Ctx> From<&'static str> for Element<Ctx> {
  fn from(tag: &'static str) -> Self {
    Element::Tag(Cow::Borrowed(tag))
  }
}

impl<Ctx> From<String> for Element<Ctx> {
  fn from(tag: String) -> Self {
    Element::Tag(Cow::Owned(tag))
  }
}

impl<Ctx> From<Styled<Ctx>> for Element<Ctx> {
  fn from(styled: Styled<Ctx>) -> Self {
    Element::Styled(styled)
  }
}

impl<Ctx> From<&Styled<Ctx>> for Element<Ctx> {
  fn from(styled: &Styled<Ctx>) -> Self {
    Element::Styled(styled.clone())
  }
}

/// Per-render overrides for a styled unit.
pub struct Overrides<'a, Ctx = ()> {
  pub(crate) css: Option<StyleSource<Ctx>>,
  pub(crate) class_name: Option<&'a str>,
}

impl<'a, Ctx> Overrides<'a, Ctx> {
  pub fn new() -> Self {
    Overrides {
      css: None,
      class_name: None,
    }
  }

  /// Extra styles flattened after the unit's own, so they win deduplication.
  pub fn with_css(mut self, source: impl Into<StyleSource<Ctx>>) -> Self {
    self.css = Some(source.into());
    self
  }

  /// Class names appended after the generated ones. Names inside the
  /// generated namespace are rejected per the configured mode.
  pub fn with_class_name(mut self, class_name: &'a str) -> Self {
    self.class_name = Some(class_name);
    self
  }
}

impl<Ctx> Default for Overrides<'_, Ctx> {
  fn default() -> Self {
    Overrides::new()
  }
}

/// A finished render: the tag to emit, the merged class list, and every rule
/// the styles need mounted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rendered {
  pub tag: String,
  /// Space-joined classes, generated ones first; `None` when nothing
  /// applies.
  pub class_name: Option<String>,
  pub rules: Vec<StyleRule>,
}

/// A tag bound to a style producer.
///
/// Flattened declarations and the override-free render are computed once per
/// unit and shared by clones; producers are pure functions of the context, so
/// recomputation could only yield the same answer.
pub struct Styled<Ctx = ()> {
  stylist: Stylist<Ctx>,
  tag: Cow<'static, str>,
  pub(crate) producer: StyleProducer<Ctx>,
  declarations: OnceLock<Arc<Vec<AtomicDeclaration>>>,
  rendered: OnceLock<RenderResult>,
}

impl<Ctx> Clone for Styled<Ctx> {
  fn clone(&self) -> Self {
    Styled {
      stylist: self.stylist.clone(),
      tag: self.tag.clone(),
      producer: Arc::clone(&self.producer),
      declarations: self.declarations.clone(),
      rendered: self.rendered.clone(),
    }
  }
}

impl<Ctx> fmt::Debug for Styled<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Styled")
      .field("tag", &self.tag)
      .finish_non_exhaustive()
  }
}

impl<Ctx: 'static> Styled<Ctx> {
  pub(crate) fn new(stylist: Stylist<Ctx>, base: Element<Ctx>, producer: StyleProducer<Ctx>) -> Self {
    match base {
      Element::Tag(tag) => Styled {
        stylist,
        tag,
        producer,
        declarations: OnceLock::new(),
        rendered: OnceLock::new(),
      },
      // Composition re-wraps the base tag with both producers, base first,
      // so the wrapper's declarations win deduplication.
      Element::Styled(inner) => {
        let base_producer = Arc::clone(&inner.producer);
        let fused: StyleProducer<Ctx> = Arc::new(move |context| {
          CssValue::Seq(vec![base_producer(context), producer(context)])
        });
        Styled {
          stylist,
          tag: inner.tag,
          producer: fused,
          declarations: OnceLock::new(),
          rendered: OnceLock::new(),
        }
      }
    }
  }

  pub(crate) fn clone_as(
    stylist: &Stylist<Ctx>,
    source: &Element<Ctx>,
    tag: Cow<'static, str>,
  ) -> Result<Self, Error> {
    match source {
      Element::Styled(styled) => Ok(Styled {
        stylist: stylist.clone(),
        tag,
        producer: Arc::clone(&styled.producer),
        declarations: OnceLock::new(),
        rendered: OnceLock::new(),
      }),
      Element::Tag(_) => Err(Error::NotAStyledComponent),
    }
  }

  pub fn tag(&self) -> &str {
    &self.tag
  }

  /// Renders the unit's own styles.
  pub fn render(&self) -> Result<Rendered, Error> {
    let result = self.cached_render()?;
    Ok(self.finish(result, None))
  }

  /// Renders with per-call overrides. Override styles flatten after the
  /// unit's own declarations, so on any property collision the override
  /// value survives deduplication.
  pub fn render_with(&self, overrides: &Overrides<'_, Ctx>) -> Result<Rendered, Error> {
    if let Some(extra) = overrides.class_name {
      self.stylist.guard_class_name(extra)?;
    }
    let result = match &overrides.css {
      None => self.cached_render()?,
      Some(source) => {
        let mut declarations = (*self.declarations()?).clone();
        declarations.extend(self.stylist.compile_source(source)?);
        self.stylist.finish(declarations)
      }
    };
    Ok(self.finish(result, overrides.class_name))
  }

  fn cached_render(&self) -> Result<RenderResult, Error> {
    if let Some(result) = self.rendered.get() {
      return Ok(result.clone());
    }
    let declarations = self.declarations()?;
    let result = self.stylist.finish((*declarations).clone());
    Ok(self.rendered.get_or_init(|| result).clone())
  }

  fn declarations(&self) -> Result<Arc<Vec<AtomicDeclaration>>, Error> {
    if let Some(cached) = self.declarations.get() {
      return Ok(Arc::clone(cached));
    }
    let source = StyleSource::Producer(Arc::clone(&self.producer));
    let compiled = Arc::new(self.stylist.compile_source(&source)?);
    Ok(Arc::clone(self.declarations.get_or_init(|| compiled)))
  }

  fn finish(&self, result: RenderResult, extra: Option<&str>) -> Rendered {
    let class_name = match (result.class_name.is_empty(), extra) {
      (false, Some(extra)) => Some(format!("{} {}", result.class_name, extra)),
      (false, None) => Some(result.class_name),
      (true, Some(extra)) => Some(extra.to_owned()),
      (true, None) => None,
    };
    Rendered {
      tag: self.tag.to_string(),
      class_name,
      rules: result.rules,
    }
  }
}
