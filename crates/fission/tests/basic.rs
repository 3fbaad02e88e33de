use fission::{css, Config, Mode, Overrides, StyleRegistry, StyleRule, StyleSource, Stylist};
use pretty_assertions::assert_eq;

fn hash(text: &str) -> String {
  fission_hash::hash(text, 0)
}

fn class(code: &str, sequence: usize) -> String {
  format!("x-{}{}", hash(code), sequence)
}

fn stylist() -> Stylist {
  Stylist::new(Config::new(|text| fission_hash::hash(text, 0)).with_mode(Mode::Strict))
}

#[test]
fn renders_one_rule_per_declaration() {
  let stylist = stylist();
  let button = stylist.styled("button", |_| {
    css! {
      color: "red",
      background: "blue",
    }
  });

  let rendered = button.render().unwrap();
  let color = class("color:red", 1);
  let background = class("background:blue", 1);

  assert_eq!(rendered.tag, "button");
  assert_eq!(
    rendered.class_name.as_deref(),
    Some(format!("{color} {background}").as_str()),
  );
  assert_eq!(
    rendered.rules,
    vec![
      StyleRule {
        key: color.clone(),
        precedence: 1,
        css: format!(".{color}{{color:red}}"),
      },
      StyleRule {
        key: background.clone(),
        precedence: 1,
        css: format!(".{background}{{background:blue}}"),
      },
    ],
  );
}

#[test]
fn equal_declarations_share_rules_across_units() {
  let stylist = stylist();
  let button = stylist.styled("button", |_| {
    css! {
      color: "red",
      background: "blue",
    }
  });
  let link = stylist.styled("a", |_| {
    css! {
      color: "yellow",
      background: "blue",
    }
  });

  let mut registry = StyleRegistry::new();
  registry.add_rendered(&button.render().unwrap());
  registry.add_rendered(&link.render().unwrap());

  // Four declarations, three rules: the shared background mounts once.
  assert_eq!(registry.len(), 3);
}

#[test]
fn unitless_numbers_render_verbatim() {
  let rendered = stylist()
    .styled("div", |_| {
      css! {
        lineHeight: 1.5,
        zIndex: 10,
        opacity: 0.25,
      }
    })
    .render()
    .unwrap();

  let css_texts: Vec<&str> = rendered.rules.iter().map(|rule| rule.css.as_str()).collect();
  assert!(css_texts[0].ends_with("{line-height:1.5}"));
  assert!(css_texts[1].ends_with("{z-index:10}"));
  assert!(css_texts[2].ends_with("{opacity:0.25}"));
}

#[test]
fn custom_properties_keep_their_casing() {
  let rendered = stylist()
    .styled("div", |_| {
      css! {
        "--brandColor": "#36B37E",
        color: "var(--brandColor)",
      }
    })
    .render()
    .unwrap();

  assert_eq!(rendered.rules.len(), 2);
  assert!(rendered.rules[0].css.ends_with("{--brandColor:#36B37E}"));
}

#[test]
fn sibling_key_order_does_not_change_rule_content() {
  let stylist = stylist();
  let first_last = stylist.styled("span", |_| {
    css! {
      "&:first-child:after": { content: "\"First\"" },
      "&:last-child:after": { content: "\"Last\"" },
    }
  });
  let last_first = stylist.styled("span", |_| {
    css! {
      "&:last-child:after": { content: "\"Last\"" },
      "&:first-child:after": { content: "\"First\"" },
    }
  });

  let a = first_last.render().unwrap();
  let b = last_first.render().unwrap();

  // The same declarations hash to the same rules either way; only the group
  // sequence digit follows declaration order.
  let strip = |rules: &[StyleRule]| {
    let mut hashes: Vec<String> = rules
      .iter()
      .map(|rule| rule.key[..rule.key.len() - 1].to_owned())
      .collect();
    hashes.sort();
    hashes
  };
  assert_eq!(strip(&a.rules), strip(&b.rules));
  assert_eq!(a.class_name.unwrap().split(' ').count(), 2);
  assert_eq!(b.class_name.unwrap().split(' ').count(), 2);
}

#[test]
fn fallback_values_stay_one_declaration() {
  let rendered = stylist()
    .styled("span", |_| {
      vec![css! { color: "black;color:rgba(0,0,0,0.9)" }]
    })
    .render()
    .unwrap();

  let color = class("color:black;color:rgba(0,0,0,0.9)", 1);
  assert_eq!(
    rendered.rules,
    vec![StyleRule {
      key: color.clone(),
      precedence: 1,
      css: format!(".{color}{{color:black;color:rgba(0,0,0,0.9)}}"),
    }],
  );
  assert_eq!(rendered.class_name.as_deref(), Some(color.as_str()));
}

#[test]
fn composition_lets_the_wrapper_win() {
  let stylist = stylist();
  let button = stylist.styled("button", |_| {
    css! {
      color: "red",
      background: "#fff",
    }
  });
  let primary = stylist.styled(&button, |_| css! { background: "blue" });

  let rendered = primary.render().unwrap();
  let color = class("color:red", 1);
  let background = class("background:blue", 1);

  assert_eq!(rendered.tag, "button");
  assert_eq!(
    rendered.class_name.as_deref(),
    Some(format!("{color} {background}").as_str()),
  );
  assert!(rendered.rules.iter().all(|rule| !rule.css.contains("#fff")));

  // The base unit keeps rendering its own background.
  let base = button.render().unwrap();
  assert!(base.rules.iter().any(|rule| rule.css.contains("#fff")));
}

#[test]
fn override_styles_replace_base_styles() {
  let stylist = stylist();
  let button = stylist.styled("button", |_| css! { background: "white" });

  let red = button
    .render_with(
      &Overrides::new().with_css(StyleSource::from_producer(|_| css! { background: "red" })),
    )
    .unwrap();
  assert_eq!(red.rules.len(), 1);
  assert!(red.rules[0].css.ends_with("{background:red}"));

  let blue = button
    .render_with(&Overrides::new().with_css(vec![css! { background: "blue" }]))
    .unwrap();
  assert_eq!(blue.rules.len(), 1);
  assert!(blue.rules[0].css.ends_with("{background:blue}"));

  let plain = button.render().unwrap();
  assert_eq!(plain.rules.len(), 1);
  assert!(plain.rules[0].css.ends_with("{background:white}"));
}

#[test]
fn context_threads_into_producers() {
  struct Theme {
    primary: &'static str,
  }

  let stylist = Stylist::new(
    Config::new(|text| fission_hash::hash(text, 0))
      .with_mode(Mode::Strict)
      .with_context(Theme {
        primary: "rebeccapurple",
      }),
  );
  let button = stylist.styled("button", |theme: &Theme| css! { color: theme.primary });

  let rendered = button.render().unwrap();
  assert_eq!(rendered.rules.len(), 1);
  assert!(rendered.rules[0].css.ends_with("{color:rebeccapurple}"));
  assert_eq!(
    rendered.class_name.as_deref(),
    Some(class("color:rebeccapurple", 1).as_str()),
  );
}

#[test]
fn renders_are_deterministic() {
  let stylist = stylist();
  let unit = stylist.styled("div", |_| {
    css! {
      color: "red",
      "&:hover": { color: "blue" },
    }
  });

  assert_eq!(unit.render().unwrap(), unit.render().unwrap());

  let again = stylist.styled("div", |_| {
    css! {
      color: "red",
      "&:hover": { color: "blue" },
    }
  });
  assert_eq!(unit.render().unwrap(), again.render().unwrap());
}

#[test]
fn prefixes_keep_stylists_apart() {
  let plain = stylist();
  let themed = Stylist::new(
    Config::new(|text| fission_hash::hash(text, 0))
      .with_prefix("y")
      .with_mode(Mode::Strict),
  );

  let from_plain = plain.styled("div", |_| css! { color: "red" }).render().unwrap();
  let from_themed = themed.styled("div", |_| css! { color: "red" }).render().unwrap();

  assert!(from_plain.class_name.unwrap().starts_with("x-"));
  assert!(from_themed.class_name.unwrap().starts_with("y-"));
}

#[test]
fn render_css_flattens_arbitrary_input() {
  let result = stylist()
    .render_css(css! {
      color: "red",
      padding: 8,
    })
    .unwrap();

  assert_eq!(result.rules.len(), 2);
  assert_eq!(
    result.class_name,
    format!("{} {}", class("color:red", 1), class("padding:8", 1)),
  );
}
