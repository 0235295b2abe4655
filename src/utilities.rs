//! Static table of fluid utilities and the CSS rules they render to.
//!
//! Each utility maps a class prefix (`mt`, `px`, `space-y`, ...) to the
//! declarations its computed value is spliced into. Prefixes mirror the
//! corresponding Tailwind CSS sizing utilities.

use std::fmt::Write;

use Declaration::{Fixed, Value, Wrapped};

/// How a utility turns a computed value into declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityKind {
    /// Every listed property receives the value as-is
    Properties(&'static [&'static str]),
    /// Declarations on the class itself
    Composite(&'static [Declaration]),
    /// Declarations on every sibling after the first child
    Siblings(&'static [Declaration]),
}

/// One declaration of a composite or sibling utility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// `property: <value>`
    Value(&'static str),
    /// `property: <before><value><after>`
    Wrapped(&'static str, &'static str, &'static str),
    /// `property: <fixed>`, whatever the value
    Fixed(&'static str, &'static str),
}

impl Declaration {
    fn render(&self, value: &str) -> (String, String) {
        match *self {
            Declaration::Value(property) => (property.to_string(), value.to_string()),
            Declaration::Wrapped(property, before, after) => {
                (property.to_string(), format!("{before}{value}{after}"))
            }
            Declaration::Fixed(property, fixed) => (property.to_string(), fixed.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utility {
    /// Class prefix after `fluid-`
    pub prefix: &'static str,
    /// Key under which named values are configured, if any
    pub theme_key: Option<&'static str>,
    pub kind: UtilityKind,
}

const fn props(
    prefix: &'static str,
    theme_key: &'static str,
    properties: &'static [&'static str],
) -> Utility {
    Utility {
        prefix,
        theme_key: Some(theme_key),
        kind: UtilityKind::Properties(properties),
    }
}

const fn composite(
    prefix: &'static str,
    theme_key: &'static str,
    declarations: &'static [Declaration],
) -> Utility {
    Utility {
        prefix,
        theme_key: Some(theme_key),
        kind: UtilityKind::Composite(declarations),
    }
}

const fn siblings(
    prefix: &'static str,
    theme_key: &'static str,
    declarations: &'static [Declaration],
) -> Utility {
    Utility {
        prefix,
        theme_key: Some(theme_key),
        kind: UtilityKind::Siblings(declarations),
    }
}

const BORDER_SPACING: &str = "var(--tw-border-spacing-x) var(--tw-border-spacing-y)";

const TRANSFORM: &str = "translate(var(--tw-translate-x), var(--tw-translate-y)) \
rotate(var(--tw-rotate)) skewX(var(--tw-skew-x)) skewY(var(--tw-skew-y)) \
scaleX(var(--tw-scale-x)) scaleY(var(--tw-scale-y))";

const FILTER: &str = "var(--tw-blur) var(--tw-brightness) var(--tw-contrast) \
var(--tw-grayscale) var(--tw-hue-rotate) var(--tw-invert) var(--tw-saturate) \
var(--tw-sepia) var(--tw-drop-shadow)";

const BACKDROP_FILTER: &str = "var(--tw-backdrop-blur) var(--tw-backdrop-brightness) \
var(--tw-backdrop-contrast) var(--tw-backdrop-grayscale) var(--tw-backdrop-hue-rotate) \
var(--tw-backdrop-invert) var(--tw-backdrop-opacity) var(--tw-backdrop-saturate) \
var(--tw-backdrop-sepia)";

/// All supported utilities, in output order
pub static UTILITIES: &[Utility] = &[
    props("inset", "inset", &["inset"]),
    props("inset-x", "inset", &["left", "right"]),
    props("inset-y", "inset", &["top", "bottom"]),
    props("start", "inset", &["inset-inline-start"]),
    props("end", "inset", &["inset-inline-end"]),
    props("top", "inset", &["top"]),
    props("right", "inset", &["right"]),
    props("bottom", "inset", &["bottom"]),
    props("left", "inset", &["left"]),
    props("m", "margin", &["margin"]),
    props("mx", "margin", &["margin-left", "margin-right"]),
    props("my", "margin", &["margin-top", "margin-bottom"]),
    props("ms", "margin", &["margin-inline-start"]),
    props("me", "margin", &["margin-inline-end"]),
    props("mt", "margin", &["margin-top"]),
    props("mr", "margin", &["margin-right"]),
    props("mb", "margin", &["margin-bottom"]),
    props("ml", "margin", &["margin-left"]),
    props("size", "size", &["width", "height"]),
    props("h", "height", &["height"]),
    props("max-h", "maxHeight", &["max-height"]),
    props("min-h", "minHeight", &["min-height"]),
    props("w", "width", &["width"]),
    props("min-w", "minWidth", &["min-width"]),
    props("max-w", "maxWidth", &["max-width"]),
    props("basis", "flexBasis", &["flex-basis"]),
    composite(
        "border-spacing",
        "borderSpacing",
        &[
            Value("--tw-border-spacing-x"),
            Value("--tw-border-spacing-y"),
            Fixed("border-spacing", BORDER_SPACING),
        ],
    ),
    composite(
        "border-spacing-x",
        "borderSpacing",
        &[Value("--tw-border-spacing-x"), Fixed("border-spacing", BORDER_SPACING)],
    ),
    composite(
        "border-spacing-y",
        "borderSpacing",
        &[Value("--tw-border-spacing-y"), Fixed("border-spacing", BORDER_SPACING)],
    ),
    composite(
        "translate-x",
        "translate",
        &[Value("--tw-translate-x"), Fixed("transform", TRANSFORM)],
    ),
    composite(
        "translate-y",
        "translate",
        &[Value("--tw-translate-y"), Fixed("transform", TRANSFORM)],
    ),
    props("scroll-m", "scrollMargin", &["scroll-margin"]),
    props("scroll-mx", "scrollMargin", &["scroll-margin-left", "scroll-margin-right"]),
    props("scroll-my", "scrollMargin", &["scroll-margin-top", "scroll-margin-bottom"]),
    props("scroll-ms", "scrollMargin", &["scroll-margin-inline-start"]),
    props("scroll-me", "scrollMargin", &["scroll-margin-inline-end"]),
    props("scroll-mt", "scrollMargin", &["scroll-margin-top"]),
    props("scroll-mr", "scrollMargin", &["scroll-margin-right"]),
    props("scroll-mb", "scrollMargin", &["scroll-margin-bottom"]),
    props("scroll-ml", "scrollMargin", &["scroll-margin-left"]),
    props("scroll-p", "scrollPadding", &["scroll-padding"]),
    props("scroll-px", "scrollPadding", &["scroll-padding-left", "scroll-padding-right"]),
    props("scroll-py", "scrollPadding", &["scroll-padding-top", "scroll-padding-bottom"]),
    props("scroll-ps", "scrollPadding", &["scroll-padding-inline-start"]),
    props("scroll-pe", "scrollPadding", &["scroll-padding-inline-end"]),
    props("scroll-pt", "scrollPadding", &["scroll-padding-top"]),
    props("scroll-pr", "scrollPadding", &["scroll-padding-right"]),
    props("scroll-pb", "scrollPadding", &["scroll-padding-bottom"]),
    props("scroll-pl", "scrollPadding", &["scroll-padding-left"]),
    props("columns", "columns", &["columns"]),
    props("gap", "gap", &["gap"]),
    props("gap-x", "gap", &["column-gap"]),
    props("gap-y", "gap", &["row-gap"]),
    siblings(
        "space-x",
        "space",
        &[
            Fixed("--tw-space-x-reverse", "0"),
            Wrapped("margin-right", "calc(", " * var(--tw-space-x-reverse))"),
            Wrapped("margin-left", "calc(", " * calc(1 - var(--tw-space-x-reverse)))"),
        ],
    ),
    siblings(
        "space-y",
        "space",
        &[
            Fixed("--tw-space-y-reverse", "0"),
            Wrapped("margin-top", "calc(", " * calc(1 - var(--tw-space-y-reverse)))"),
            Wrapped("margin-bottom", "calc(", " * var(--tw-space-y-reverse))"),
        ],
    ),
    siblings(
        "divide-x",
        "divideWidth",
        &[
            Fixed("--tw-divide-x-reverse", "0"),
            Wrapped("border-right-width", "calc(", " * var(--tw-divide-x-reverse))"),
            Wrapped("border-left-width", "calc(", " * calc(1 - var(--tw-divide-x-reverse)))"),
        ],
    ),
    siblings(
        "divide-y",
        "divideWidth",
        &[
            Fixed("--tw-divide-y-reverse", "0"),
            Wrapped("border-top-width", "calc(", " * calc(1 - var(--tw-divide-y-reverse)))"),
            Wrapped("border-bottom-width", "calc(", " * var(--tw-divide-y-reverse))"),
        ],
    ),
    props("rounded", "borderRadius", &["border-radius"]),
    props("rounded-s", "borderRadius", &["border-start-start-radius", "border-end-start-radius"]),
    props("rounded-e", "borderRadius", &["border-start-end-radius", "border-end-end-radius"]),
    props("rounded-t", "borderRadius", &["border-top-left-radius", "border-top-right-radius"]),
    props("rounded-r", "borderRadius", &["border-top-right-radius", "border-bottom-right-radius"]),
    props(
        "rounded-b",
        "borderRadius",
        &["border-bottom-right-radius", "border-bottom-left-radius"],
    ),
    props("rounded-l", "borderRadius", &["border-top-left-radius", "border-bottom-left-radius"]),
    props("rounded-ss", "borderRadius", &["border-start-start-radius"]),
    props("rounded-se", "borderRadius", &["border-start-end-radius"]),
    props("rounded-ee", "borderRadius", &["border-end-end-radius"]),
    props("rounded-es", "borderRadius", &["border-end-start-radius"]),
    props("rounded-tl", "borderRadius", &["border-top-left-radius"]),
    props("rounded-tr", "borderRadius", &["border-top-right-radius"]),
    props("rounded-br", "borderRadius", &["border-bottom-right-radius"]),
    props("rounded-bl", "borderRadius", &["border-bottom-left-radius"]),
    props("border", "borderWidth", &["border-width"]),
    props("border-x", "borderWidth", &["border-left-width", "border-right-width"]),
    props("border-y", "borderWidth", &["border-top-width", "border-bottom-width"]),
    props("border-s", "borderWidth", &["border-inline-start-width"]),
    props("border-e", "borderWidth", &["border-inline-end-width"]),
    props("border-t", "borderWidth", &["border-top-width"]),
    props("border-r", "borderWidth", &["border-right-width"]),
    props("border-b", "borderWidth", &["border-bottom-width"]),
    props("border-l", "borderWidth", &["border-left-width"]),
    props("p", "padding", &["padding"]),
    props("px", "padding", &["padding-left", "padding-right"]),
    props("py", "padding", &["padding-top", "padding-bottom"]),
    props("ps", "padding", &["padding-inline-start"]),
    props("pe", "padding", &["padding-inline-end"]),
    props("pt", "padding", &["padding-top"]),
    props("pr", "padding", &["padding-right"]),
    props("pb", "padding", &["padding-bottom"]),
    props("pl", "padding", &["padding-left"]),
    props("indent", "textIndent", &["text-indent"]),
    Utility {
        prefix: "align",
        theme_key: None,
        kind: UtilityKind::Properties(&["vertical-align"]),
    },
    props("text", "fontSize", &["font-size"]),
    props("leading", "lineHeight", &["line-height"]),
    props("tracking", "letterSpacing", &["letter-spacing"]),
    props("decoration", "textDecorationThickness", &["text-decoration-thickness"]),
    props("underline-offset", "textUnderlineOffset", &["text-underline-offset"]),
    props("outline", "outlineWidth", &["outline-width"]),
    props("outline-offset", "outlineOffset", &["outline-offset"]),
    composite(
        "ring",
        "ringWidth",
        &[
            Fixed(
                "--tw-ring-offset-shadow",
                "var(--tw-ring-inset) 0 0 0 var(--tw-ring-offset-width) var(--tw-ring-offset-color)",
            ),
            Wrapped(
                "--tw-ring-shadow",
                "var(--tw-ring-inset) 0 0 0 calc(",
                " + var(--tw-ring-offset-width)) var(--tw-ring-color)",
            ),
            Fixed(
                "box-shadow",
                "var(--tw-ring-offset-shadow), var(--tw-ring-shadow), var(--tw-shadow, 0 0 #0000)",
            ),
        ],
    ),
    props("ring-offset", "ringOffsetWidth", &["--tw-ring-offset-width"]),
    composite(
        "blur",
        "blur",
        &[Wrapped("--tw-blur", "blur(", ")"), Fixed("filter", FILTER)],
    ),
    composite(
        "backdrop-blur",
        "backdropBlur",
        &[
            Wrapped("--tw-backdrop-blur", "blur(", ")"),
            Fixed("backdrop-filter", BACKDROP_FILTER),
        ],
    ),
];

/// Selector suffix targeting every sibling after the first
const SIBLING_SELECTOR: &str = " > :not([hidden]) ~ :not([hidden])";

/// Position of the utility with `prefix` in [`UTILITIES`]
pub fn utility_index(prefix: &str) -> Option<usize> {
    UTILITIES.iter().position(|utility| utility.prefix == prefix)
}

pub fn find_utility(prefix: &str) -> Option<&'static Utility> {
    UTILITIES.iter().find(|utility| utility.prefix == prefix)
}

/// A single generated CSS rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl Utility {
    /// Build the rule for `class_name` carrying `value`
    pub fn rule(&self, class_name: &str, value: &str) -> CssRule {
        let class_selector = format!(".{}", escape_class_name(class_name));

        match self.kind {
            UtilityKind::Properties(properties) => CssRule {
                selector: class_selector,
                declarations: properties
                    .iter()
                    .map(|property| (property.to_string(), value.to_string()))
                    .collect(),
            },
            UtilityKind::Composite(declarations) => CssRule {
                selector: class_selector,
                declarations: declarations.iter().map(|d| d.render(value)).collect(),
            },
            UtilityKind::Siblings(declarations) => CssRule {
                selector: format!("{class_selector}{SIBLING_SELECTOR}"),
                declarations: declarations.iter().map(|d| d.render(value)).collect(),
            },
        }
    }
}

impl CssRule {
    /// Render the rule, one declaration per line or all on one line
    pub fn render(&self, minify: bool) -> String {
        let mut out = String::new();
        if minify {
            out.push_str(&self.selector);
            out.push('{');
            let body: Vec<String> = self
                .declarations
                .iter()
                .map(|(property, value)| format!("{property}:{value}"))
                .collect();
            out.push_str(&body.join(";"));
            out.push('}');
        } else {
            let _ = writeln!(out, "{} {{", self.selector);
            let body: Vec<String> = self
                .declarations
                .iter()
                .map(|(property, value)| format!("    {property}: {value}"))
                .collect();
            out.push_str(&body.join(";\n"));
            out.push_str("\n}");
        }
        out
    }
}

/// Escape a class name for use in a selector.
///
/// Commas become the hex escape `\2c `; other characters outside
/// `[A-Za-z0-9_-]` get a backslash.
pub fn escape_class_name(class_name: &str) -> String {
    let mut escaped = String::with_capacity(class_name.len() + 8);
    for c in class_name.chars() {
        match c {
            ',' => escaped.push_str("\\2c "),
            c if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') || !c.is_ascii() => {
                escaped.push(c)
            }
            c => {
                escaped.push('\\');
                escaped.push(c);
            }
        }
    }
    escaped
}
