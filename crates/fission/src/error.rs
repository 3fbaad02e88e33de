use thiserror::Error;

use crate::config::Config;

/// Failures surfaced by the public style operations.
///
/// In strict mode every variant except [`Error::NotAStyledComponent`] can also
/// be downgraded to a log line by running the compiler in production mode; see
/// [`crate::Mode`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A style producer returned something that is not a style mapping at a
  /// point where one was required, e.g. a bare string instead of an object.
  #[error("expected a style mapping, got {shape}")]
  InvalidStyleInput { shape: &'static str },

  /// `clone_as` was called on a plain element that never went through
  /// `styled`, so there is no style producer to carry over.
  #[error("element is not a styled unit")]
  NotAStyledComponent,

  /// A caller-supplied class name starts with the prefix reserved for
  /// generated classes. Manual classes in that namespace cannot compose with
  /// atomic deduplication; use the style override slot instead.
  #[error("class name `{class_name}` collides with the reserved `{reserved}` prefix")]
  ReservedClassNameCollision { class_name: String, reserved: String },
}

/// Reports a style-input contract violation per the configured mode: strict
/// raises, production logs and lets the caller skip the offending subtree.
pub(crate) fn report_invalid<Ctx>(config: &Config<Ctx>, shape: &'static str) -> Result<(), Error> {
  let error = Error::InvalidStyleInput { shape };
  if config.strict() {
    return Err(error);
  }
  tracing::error!("dropping invalid style input: {error}");
  Ok(())
}
