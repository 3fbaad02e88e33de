use std::fmt;
use std::sync::Arc;

/// Joins the prefix to hashes and group sequence numbers.
pub(crate) const DELIMITER: &str = "-";

pub(crate) const DEFAULT_PREFIX: &str = "x";

/// Produces a short identifier token for a piece of declaration text. The
/// function must be deterministic; everything else (alphabet, length) is up to
/// the caller.
pub type HashFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Rewrites finalized rule text before it is handed out, e.g. to run it
/// through a vendor prefixer.
pub type PostProcessor = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How contract violations in style inputs are reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
  /// Raise an error so the bad input is fixed at the source.
  Strict,
  /// Log the violation and keep rendering whatever else is valid.
  Production,
}

impl Default for Mode {
  fn default() -> Self {
    if cfg!(debug_assertions) {
      Mode::Strict
    } else {
      Mode::Production
    }
  }
}

/// Immutable settings for one compiler instance.
///
/// `Ctx` is an opaque value threaded into every style producer, typically a
/// theme. Instances with different prefixes or hash functions never share
/// generated class names.
pub struct Config<Ctx = ()> {
  pub(crate) hash_fn: HashFn,
  pub(crate) prefix: String,
  pub(crate) context: Ctx,
  pub(crate) default_layer: Option<String>,
  pub(crate) post_processor: Option<PostProcessor>,
  pub(crate) mode: Mode,
}

impl Config<()> {
  pub fn new(hash_fn: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
    Config {
      hash_fn: Arc::new(hash_fn),
      prefix: DEFAULT_PREFIX.to_owned(),
      context: (),
      default_layer: None,
      post_processor: None,
      mode: Mode::default(),
    }
  }
}

impl<Ctx> Config<Ctx> {
  /// Namespace for generated class names. Defaults to `"x"`.
  pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.prefix = prefix.into();
    self
  }

  /// Value passed to every style producer. Changing the context type yields a
  /// config for that context type; all other settings carry over.
  pub fn with_context<C>(self, context: C) -> Config<C> {
    Config {
      hash_fn: self.hash_fn,
      prefix: self.prefix,
      context,
      default_layer: self.default_layer,
      post_processor: self.post_processor,
      mode: self.mode,
    }
  }

  /// Cascade layer that wraps every declaration not already placed in an
  /// explicit layer.
  pub fn with_default_layer(mut self, layer: impl Into<String>) -> Self {
    self.default_layer = Some(layer.into());
    self
  }

  pub fn with_post_processor(
    mut self,
    post_processor: impl Fn(&str) -> String + Send + Sync + 'static,
  ) -> Self {
    self.post_processor = Some(Arc::new(post_processor));
    self
  }

  pub fn with_mode(mut self, mode: Mode) -> Self {
    self.mode = mode;
    self
  }

  pub(crate) fn strict(&self) -> bool {
    self.mode == Mode::Strict
  }

  /// The `"x-"` namespace manual class names must stay out of.
  pub(crate) fn class_prefix(&self) -> String {
    format!("{}{}", self.prefix, DELIMITER)
  }

  /// Prefixed identifier for a piece of declaration text.
  pub(crate) fn hashed(&self, text: &str) -> String {
    format!("{}{}{}", self.prefix, DELIMITER, (self.hash_fn)(text))
  }

  /// Runs the post processor over finalized rule text, if one is set.
  pub(crate) fn post_process(&self, css: String) -> String {
    match &self.post_processor {
      Some(post) => post(&css),
      None => css,
    }
  }
}

impl<Ctx: fmt::Debug> fmt::Debug for Config<Ctx> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Config")
      .field("prefix", &self.prefix)
      .field("context", &self.context)
      .field("default_layer", &self.default_layer)
      .field("mode", &self.mode)
      .finish_non_exhaustive()
  }
}
