use crate::config::Config;
use crate::error::{report_invalid, Error};
use crate::style::{Css, CssValue};
use crate::value::terminal_text;

/// Serializes a style input into one whole CSS block, without atomization.
///
/// Definition bodies and global styles go through here. At the root no braces
/// are emitted and a sequence concatenates its elements; nested mappings wrap
/// themselves in braces and prefix their key. Inert values vanish. Anything
/// else is a contract violation reported per the configured mode.
pub(crate) fn css_to_string<Ctx>(
  config: &Config<Ctx>,
  value: &CssValue,
  root: bool,
) -> Result<String, Error> {
  let mut out = String::new();
  write_value(config, value, root, &mut out)?;
  Ok(out)
}

/// [`css_to_string`] for an input already known to be a mapping.
pub(crate) fn css_map_to_string<Ctx>(
  config: &Config<Ctx>,
  css: &Css,
  root: bool,
) -> Result<String, Error> {
  let mut out = String::new();
  write_map(config, css, root, &mut out)?;
  Ok(out)
}

fn write_value<Ctx>(
  config: &Config<Ctx>,
  value: &CssValue,
  root: bool,
  out: &mut String,
) -> Result<(), Error> {
  match value {
    CssValue::Map(css) => write_map(config, css, root, out),
    CssValue::Seq(items) if root => {
      for item in items {
        write_value(config, item, true, out)?;
      }
      Ok(())
    }
    CssValue::Null | CssValue::Bool(_) => Ok(()),
    other => report_invalid(config, other.shape()),
  }
}

fn write_map<Ctx>(
  config: &Config<Ctx>,
  css: &Css,
  root: bool,
  out: &mut String,
) -> Result<(), Error> {
  let last = css.len().saturating_sub(1);
  for (index, (key, value)) in css.iter().enumerate() {
    if index == 0 && !root {
      out.push('{');
    }
    if let Some(text) = terminal_text(value) {
      // Keys stay verbatim here; block serialization predates atomization's
      // property-name normalization and global styles rely on raw keys.
      out.push_str(key);
      out.push(':');
      out.push_str(&text);
      if index != last {
        out.push(';');
      }
    } else {
      match value {
        CssValue::Seq(items) => {
          for item in items {
            write_value(config, item, false, out)?;
          }
        }
        CssValue::Map(nested) => {
          out.push_str(key);
          out.push(' ');
          write_map(config, nested, false, out)?;
        }
        // Inert values emit nothing.
        _ => {}
      }
    }
    if index == last && !root {
      out.push('}');
    }
  }
  Ok(())
}
