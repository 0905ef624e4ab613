//! Parsing of `R,G,B[,A]` color strings

use crate::io::error::{Result, invalid_parameter};
use image::Rgba;

/// Parse a border/background color from comma-separated channel values
///
/// Accepts three or four integers in `0..=255`, with optional whitespace
/// around each component. A missing alpha component means fully opaque.
///
/// # Errors
///
/// Returns an error if the component count is not 3 or 4, or any
/// component is not an integer in range
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let components: Vec<&str> = value.split(',').map(str::trim).collect();
    if !(3..=4).contains(&components.len()) {
        return Err(invalid_parameter(
            "color",
            &value,
            &format!(
                "expected 3 or 4 comma-separated components, found {}",
                components.len()
            ),
        ));
    }

    let mut rgba = [0, 0, 0, u8::MAX];
    for (slot, component) in rgba.iter_mut().zip(&components) {
        *slot = component.parse::<u8>().map_err(|e| {
            invalid_parameter(
                "color",
                &value,
                &format!("component '{component}' is not an integer in 0..=255 ({e})"),
            )
        })?;
    }

    Ok(Rgba(rgba))
}
