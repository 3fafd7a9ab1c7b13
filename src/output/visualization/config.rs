//! Plot configuration shared by the profile plots

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust
/// use biotrickle_rs::output::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::profile("Ammonia column");
/// config.line_color = BLUE;
/// config.width = 1920;
/// config.height = 1080;
/// assert_eq!(config.ylabel, "Cg/Cg0");
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Gas Concentration Profile")
    pub title: String,

    /// X-axis label (default: "Height z (m)")
    pub xlabel: String,

    /// Y-axis label (default: "Cg/Cg0")
    pub ylabel: String,

    /// Line color for single-profile plots (default: RED)
    pub line_color: RGBColor,

    /// Optional colors for comparison plots (one per profile)
    ///
    /// If None, uses the default palette
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Gas Concentration Profile".to_string(),
            xlabel: "Height z (m)".to_string(),
            ylabel: "Cg/Cg0".to_string(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept `&str`, `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// No custom title, the default one is used
pub const NO_TITLE: Option<&str> = None;

const DEFAULT_PALETTE: [RGBColor; 8] = [
    RED,
    BLUE,
    GREEN,
    MAGENTA,
    CYAN,
    BLACK,
    RGBColor(255, 165, 0), // Orange
    RGBColor(128, 0, 128), // Purple
];

impl PlotConfig {
    /// Profile plot with optional custom title
    ///
    /// ```rust
    /// use biotrickle_rs::output::visualization::{PlotConfig, NO_TITLE};
    ///
    /// assert_eq!(PlotConfig::profile(NO_TITLE).title, "Gas Concentration Profile");
    /// assert_eq!(PlotConfig::profile(format!("δ = {} m", 0.002)).title, "δ = 0.002 m");
    /// ```
    pub fn profile(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        if let Some(title) = title.into_optional_title() {
            config.title = title;
        }
        config
    }

    /// Comparison plot with custom colors
    pub fn with_series_colors(mut self, colors: Vec<RGBColor>) -> Self {
        self.series_colors = Some(colors);
        self
    }

    /// Color of the series at `index`
    ///
    /// Uses custom colors if provided, otherwise falls back to the default palette
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(color) = self.series_colors.as_ref().and_then(|colors| colors.get(index)) {
            return *color;
        }
        DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_config_default() {
        let config = PlotConfig::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
        assert_eq!(config.xlabel, "Height z (m)");
        assert!(config.show_grid);
    }

    #[test]
    fn test_profile_config_titles() {
        assert_eq!(PlotConfig::profile(NO_TITLE).title, "Gas Concentration Profile");
        assert_eq!(PlotConfig::profile("Reference").title, "Reference");
        assert_eq!(PlotConfig::profile(String::from("Sweep")).title, "Sweep");
    }

    #[test]
    fn test_series_color_default_palette() {
        let config = PlotConfig::default();
        assert_eq!(config.series_color(0), RED);
        assert_eq!(config.series_color(1), BLUE);
        assert_eq!(config.series_color(8), RED); // Wraparound
    }

    #[test]
    fn test_series_color_custom_then_palette() {
        let config = PlotConfig::default().with_series_colors(vec![GREEN]);
        assert_eq!(config.series_color(0), GREEN);
        assert_eq!(config.series_color(1), BLUE);
    }
}
