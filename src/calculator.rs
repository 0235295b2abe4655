use crate::errors::{CalculateError, Side};
use crate::shorthand::AnchorPair;
use crate::unit_value::{format_number, round_decimal, Unit};

/// Root font size assumed when converting between `rem` and `px`
pub const DEFAULT_ROOT_FONT_SIZE_PIXEL: f64 = 16.0;

/// Decimal places kept for `px`/`rem` lengths in the output
const LENGTH_PRECISION: u32 = 3;

/// Decimal places kept for the `vw` slope
const SLOPE_PRECISION: u32 = 5;

/// Turns an anchor pair into a constant length or a `clamp()` expression
///
/// See <https://www.smashingmagazine.com/2022/01/modern-fluid-typography-css-clamp/>
/// for the underlying interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidSizingCalculator {
    root_font_size_pixel: f64,
}

impl Default for FluidSizingCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_FONT_SIZE_PIXEL)
    }
}

impl FluidSizingCalculator {
    pub fn new(root_font_size_pixel: f64) -> Self {
        Self {
            root_font_size_pixel,
        }
    }

    /// Compute the CSS value for `pair`.
    ///
    /// Equal sizes short-circuit to that size, whatever the screens are.
    /// Otherwise the size grows linearly with the viewport width between the
    /// two screens and is clamped to the smaller and larger size outside them.
    pub fn calculate(&self, pair: &AnchorPair) -> Result<String, CalculateError> {
        let AnchorPair { from, to } = pair;

        if from.screen.value <= 0.0 {
            return Err(CalculateError::NonPositiveScreen {
                side: Side::From,
                screen: from.screen,
            });
        }

        if to.screen.value <= 0.0 {
            return Err(CalculateError::NonPositiveScreen {
                side: Side::To,
                screen: to.screen,
            });
        }

        if from.screen.unit != to.screen.unit {
            return Err(CalculateError::MismatchedScreenUnits);
        }

        if from.size.unit != to.size.unit {
            return Err(CalculateError::MismatchedSizeUnits);
        }

        if from.size.value == to.size.value {
            return Ok(from.size.to_string());
        }

        if from.screen.value == to.screen.value {
            return Err(CalculateError::IdenticalScreens);
        }

        let root = self.root_font_size_pixel;
        let from_screen = from.screen.to_pixels(root);
        let to_screen = to.screen.to_pixels(root);
        let from_size = from.size.to_pixels(root);
        let to_size = to.size.to_pixels(root);

        let min = from_size.min(to_size);
        let max = from_size.max(to_size);

        let slope = 100.0 * (to_size - from_size) / (to_screen - from_screen);
        let intercept = (from_screen * to_size - to_screen * from_size) / (from_screen - to_screen);

        let unit = from.size.unit;
        let mut preferred = format!("{}vw", format_number(round_decimal(slope, SLOPE_PRECISION)));

        // the term is kept for any nonzero intercept, even one that rounds to 0
        if intercept != 0.0 {
            let sign = if intercept > 0.0 { '+' } else { '-' };
            let offset = self.to_size_unit(intercept.abs(), unit);
            preferred.push_str(&format!(" {sign} {}{unit}", format_number(offset)));
        }

        Ok(format!(
            "clamp({}, {preferred}, {})",
            self.render_length(min, unit),
            self.render_length(max, unit),
        ))
    }

    /// Convert a pixel magnitude back to `unit`, rounded for output.
    fn to_size_unit(&self, pixels: f64, unit: Unit) -> f64 {
        let value = match unit {
            Unit::Px => pixels,
            Unit::Rem => pixels / self.root_font_size_pixel,
        };
        round_decimal(value, LENGTH_PRECISION)
    }

    fn render_length(&self, pixels: f64, unit: Unit) -> String {
        format!("{}{unit}", format_number(self.to_size_unit(pixels, unit)))
    }
}

/// Compute the CSS value for `pair` with the given root font size.
pub fn calculate_fluid_sizing(
    pair: &AnchorPair,
    root_font_size_pixel: f64,
) -> Result<String, CalculateError> {
    FluidSizingCalculator::new(root_font_size_pixel).calculate(pair)
}
