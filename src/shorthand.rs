use indexmap::IndexMap;

use crate::errors::ShorthandError;
use crate::unit_value::UnitValue;

/// Reserved table key holding the screen used when the "from" side omits one
pub const DEFAULT_FROM: &str = "DEFAULT_FROM";

/// Reserved table key holding the screen used when the "to" side omits one
pub const DEFAULT_TO: &str = "DEFAULT_TO";

/// One interpolation endpoint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub screen: UnitValue,
    pub size: UnitValue,
}

/// The two endpoints of a fluid size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPair {
    pub from: Anchor,
    pub to: Anchor,
}

/// Named breakpoints plus the fallback screens for omitted ones
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenTable {
    screens: IndexMap<String, String>,
    default_from: Option<String>,
    default_to: Option<String>,
}

impl ScreenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from raw configuration entries.
    ///
    /// `DEFAULT_FROM` and `DEFAULT_TO` become the defaults rather than
    /// breakpoint names; entries without a value are left out.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        let mut table = Self::new();
        for (name, raw) in entries {
            let name = name.into();
            let Some(raw) = raw else { continue };
            match name.as_str() {
                DEFAULT_FROM => table.default_from = Some(raw),
                DEFAULT_TO => table.default_to = Some(raw),
                _ => {
                    table.screens.insert(name, raw);
                }
            }
        }
        table
    }

    pub fn with_screen(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.screens.insert(name.into(), raw.into());
        self
    }

    pub fn with_defaults(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.default_from = Some(from.into());
        self.default_to = Some(to.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.screens.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.screens.contains_key(name)
    }

    pub fn default_from(&self) -> Option<&str> {
        self.default_from.as_deref()
    }

    pub fn default_to(&self) -> Option<&str> {
        self.default_to.as_deref()
    }
}

impl<K: Into<String>> FromIterator<(K, String)> for ScreenTable {
    fn from_iter<T: IntoIterator<Item = (K, String)>>(iter: T) -> Self {
        Self::from_entries(iter.into_iter().map(|(name, raw)| (name, Some(raw))))
    }
}

/// Parse `"<screen> <size>, <screen> <size>"` into an anchor pair.
///
/// Either screen may be omitted in favour of the table's defaults, and may
/// be a literal length or a breakpoint name from `screens`. Sizes must be
/// literal lengths.
pub fn parse_shorthand(input: &str, screens: &ScreenTable) -> Result<AnchorPair, ShorthandError> {
    let segments: Vec<&str> = input.split(',').collect();

    let [from_segment, to_segment] = segments[..] else {
        return Err(ShorthandError::ArgumentCount {
            input: input.to_string(),
            segments: segments.len(),
        });
    };

    let from = parse_anchor(from_segment, screens.default_from(), input, screens)?;
    let to = parse_anchor(to_segment, screens.default_to(), input, screens)?;

    Ok(AnchorPair { from, to })
}

fn parse_anchor(
    segment: &str,
    default_screen: Option<&str>,
    input: &str,
    screens: &ScreenTable,
) -> Result<Anchor, ShorthandError> {
    let tokens: Vec<&str> = segment.split_whitespace().collect();

    let (screen, size) = match tokens[..] {
        [size] => {
            let screen = default_screen.ok_or(ShorthandError::MissingDefaultScreen)?;
            (screen, size)
        }
        [screen, size] => (screen, size),
        _ => {
            return Err(ShorthandError::ValueCount {
                segment: tokens.join(" "),
                input: input.to_string(),
                tokens: tokens.len(),
            })
        }
    };

    let screen = resolve_screen(screen, screens)?;
    let size = UnitValue::parse(size).map_err(|_| ShorthandError::InvalidSize {
        size: size.to_string(),
        input: input.to_string(),
    })?;

    Ok(Anchor { screen, size })
}

/// A literal length wins, unless it is also spelled as a breakpoint name;
/// anything else must name a breakpoint whose value is a literal length.
fn resolve_screen(token: &str, screens: &ScreenTable) -> Result<UnitValue, ShorthandError> {
    match UnitValue::parse(token) {
        Ok(_) if screens.contains(token) => Err(ShorthandError::ScreenKeyCollision {
            screen: token.to_string(),
        }),
        Ok(screen) => Ok(screen),
        Err(_) => {
            let raw = screens.get(token).ok_or_else(|| ShorthandError::UnknownScreen {
                screen: token.to_string(),
            })?;

            UnitValue::parse(raw).map_err(|_| ShorthandError::InvalidScreenEntry {
                screen: token.to_string(),
                raw: raw.to_string(),
            })
        }
    }
}
