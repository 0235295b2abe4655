use indexmap::IndexMap;
use rayon::prelude::*;

use crate::calculator::FluidSizingCalculator;
use crate::config::FluidSizingConfig;
use crate::errors::Result;
use crate::shorthand::{parse_shorthand, ScreenTable};
use crate::utilities::{find_utility, utility_index, CssRule, Utility, UTILITIES};

/// Prefix every fluid utility class starts with
pub const CLASS_PREFIX: &str = "fluid-";

/// A class name split into its utility and raw value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub class_name: &'a str,
    pub utility: &'static Utility,
    pub value: CandidateValue<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateValue<'a> {
    /// `fluid-mt-[768px_32px,1280px_64px]`, `_` standing for a space
    Arbitrary(String),
    /// `fluid-mt-card`, looked up in the configured values
    Named(&'a str),
}

/// Split a class name into utility and value.
///
/// Returns `None` for classes that are not fluid utilities at all.
pub fn parse_candidate(class_name: &str) -> Option<Candidate<'_>> {
    let rest = class_name.strip_prefix(CLASS_PREFIX)?;

    if let Some(body) = rest.strip_suffix(']') {
        let (prefix, value) = body.split_once("-[")?;
        let utility = find_utility(prefix)?;
        return Some(Candidate {
            class_name,
            utility,
            value: CandidateValue::Arbitrary(value.replace('_', " ")),
        });
    }

    // Prefixes may themselves contain dashes (`max-h`, `space-y`), so take
    // the longest one that leaves a non-empty name.
    UTILITIES
        .iter()
        .filter_map(|utility| {
            let name = rest.strip_prefix(utility.prefix)?.strip_prefix('-')?;
            (!name.is_empty()).then_some((utility, name))
        })
        .max_by_key(|(utility, _)| utility.prefix.len())
        .map(|(utility, name)| Candidate {
            class_name,
            utility,
            value: CandidateValue::Named(name),
        })
}

/// Generates CSS rules for fluid utility classes
#[derive(Debug, Clone)]
pub struct FluidSizingGenerator {
    config: FluidSizingConfig,
    screens: ScreenTable,
    calculator: FluidSizingCalculator,
    rules: IndexMap<String, (usize, CssRule)>,
}

impl FluidSizingGenerator {
    /// Create a new generator with default configuration
    pub fn new() -> Self {
        Self::with_config(FluidSizingConfig::default())
    }

    /// Create a new generator with custom configuration
    pub fn with_config(config: FluidSizingConfig) -> Self {
        let screens = config.screen_table();
        let calculator = config.calculator();
        Self {
            config,
            screens,
            calculator,
            rules: IndexMap::new(),
        }
    }

    /// Resolve a class name to its rule.
    ///
    /// `Ok(None)` means the class is not a known fluid utility (or names a
    /// value that is not configured); `Err` means it is one but its value is
    /// invalid.
    pub fn resolve_class(&self, class_name: &str) -> Result<Option<CssRule>> {
        let Some(candidate) = parse_candidate(class_name) else {
            return Ok(None);
        };

        let shorthand = match &candidate.value {
            CandidateValue::Arbitrary(value) => value.clone(),
            CandidateValue::Named(name) => {
                let named = candidate
                    .utility
                    .theme_key
                    .and_then(|theme_key| self.config.named_value(theme_key, name));
                match named {
                    Some(shorthand) => shorthand,
                    None => return Ok(None),
                }
            }
        };

        let pair = parse_shorthand(&shorthand, &self.screens)?;
        let value = self.calculator.calculate(&pair)?;

        Ok(Some(candidate.utility.rule(class_name, &value)))
    }

    /// Add a class, logging and skipping it when its value is invalid.
    ///
    /// Returns whether a rule was generated.
    pub fn add_class(&mut self, class_name: &str) -> bool {
        let resolved = self.resolve_class(class_name);
        self.record(class_name, resolved)
    }

    /// Add multiple classes at once, resolving them in parallel
    pub fn add_classes(&mut self, classes: &[String]) -> usize {
        let resolved: Vec<_> = classes
            .par_iter()
            .map(|class_name| (class_name, self.resolve_class(class_name)))
            .collect();

        let mut generated = 0;
        for (class_name, result) in resolved {
            if self.record(class_name, result) {
                generated += 1;
            }
        }
        generated
    }

    fn record(&mut self, class_name: &str, resolved: Result<Option<CssRule>>) -> bool {
        match resolved {
            Ok(Some(rule)) => {
                let order = parse_candidate(class_name)
                    .and_then(|candidate| utility_index(candidate.utility.prefix))
                    .unwrap_or(usize::MAX);
                tracing::debug!(class = class_name, "generated fluid utility");
                self.rules.insert(class_name.to_string(), (order, rule));
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(
                    class = class_name,
                    "The utility `{}` contains an invalid value and was not generated. {}",
                    class_name,
                    e
                );
                false
            }
        }
    }

    /// Number of classes with a generated rule
    pub fn class_count(&self) -> usize {
        self.rules.len()
    }

    /// Rules ordered by utility, then by class name
    fn sorted(&self) -> Vec<&CssRule> {
        let mut entries: Vec<_> = self.rules.iter().collect();
        entries.sort_by(|(a_class, (a_order, _)), (b_class, (b_order, _))| {
            a_order.cmp(b_order).then_with(|| a_class.cmp(b_class))
        });
        entries.into_iter().map(|(_, (_, rule))| rule).collect()
    }

    /// Generate CSS from the collected classes
    pub fn generate_css(&self, minify: bool) -> String {
        let rendered: Vec<String> = self.sorted().iter().map(|rule| rule.render(minify)).collect();
        if rendered.is_empty() {
            return String::new();
        }
        if minify {
            rendered.concat()
        } else {
            let mut css = rendered.join("\n");
            css.push('\n');
            css
        }
    }
}

impl Default for FluidSizingGenerator {
    fn default() -> Self {
        Self::new()
    }
}
