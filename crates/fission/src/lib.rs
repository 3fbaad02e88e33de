//! Atomic CSS generation from nested style declarations.
//!
//! Style mappings (objects with properties, pseudo-selectors, at-rules and
//! cascade layers) flatten into single-declaration rules, deduplicated by
//! content hash, with per-element class lists assembled so that later styles
//! win collisions.
//!
//! ```
//! use fission::{css, Config, Stylist};
//!
//! let stylist = Stylist::new(Config::new(|text| fission_hash::hash(text, 0)));
//! let button = stylist.styled("button", |_| css! {
//!   color: "red",
//!   "&:hover": { color: "blue" },
//! });
//! let rendered = button.render()?;
//! assert_eq!(rendered.rules.len(), 2);
//! assert!(rendered.class_name.is_some());
//! # Ok::<(), fission::Error>(())
//! ```

mod assemble;
mod code;
mod config;
mod dedup;
mod definition;
mod error;
mod flatten;
mod global;
mod property;
mod registry;
mod style;
mod styled;
mod stylist;
mod text;
mod value;

pub use assemble::{RenderResult, StyleRule};
pub use config::{Config, HashFn, Mode, PostProcessor};
pub use definition::{Definition, DefinitionKind};
pub use error::Error;
pub use registry::StyleRegistry;
pub use style::{Css, CssValue};
pub use styled::{Element, Overrides, Rendered, Styled};
pub use stylist::{StyleProducer, StyleSource, Stylist};
