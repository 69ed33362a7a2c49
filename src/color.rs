use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Named colours
// ---------------------------------------------------------------------------

/// Ngram line colours, in entry order.
pub const SERIES_COLORS: [&str; 5] = ["black", "blue", "green", "red", "indigo"];

/// Alternating colours of a timespan background.
pub const TIMESPAN_COLORS: [&str; 2] = ["red", "orange"];

/// Resolve a CSS/SVG colour name, grey when unknown.
pub fn named(name: &str) -> Color32 {
    palette::named::from_str(name)
        .map(|c: Srgb<u8>| Color32::from_rgb(c.red, c.green, c.blue))
        .unwrap_or(Color32::GRAY)
}

/// Same colour with the given opacity in `0.0..=1.0`.
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), a)
}

/// Colour of the `index`-th plotted ngram; wraps past the named colours.
pub fn series_color(index: usize) -> Color32 {
    named(SERIES_COLORS[index % SERIES_COLORS.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve() {
        assert_eq!(named("red"), Color32::from_rgb(255, 0, 0));
        assert_eq!(named("indigo"), Color32::from_rgb(75, 0, 130));
        assert_eq!(named("no-such-colour"), Color32::GRAY);
    }

    #[test]
    fn alpha_is_applied() {
        assert_eq!(with_alpha(Color32::WHITE, 0.0).a(), 0);
        assert_eq!(with_alpha(Color32::WHITE, 1.0), Color32::WHITE);
    }

    #[test]
    fn series_colors_follow_entry_order() {
        assert_eq!(series_color(0), Color32::BLACK);
        assert_eq!(series_color(1), named("blue"));
        assert_eq!(series_color(4), named("indigo"));
        assert_eq!(series_color(5), series_color(0));
    }
}
