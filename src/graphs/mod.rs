pub mod format;
pub mod line_chart;

use plotters::style::RGBColor;

use crate::errors::Result;
use crate::series::SeriesGroup;
use crate::surface::Surface;

pub use format::ValueFormat;
pub use line_chart::LineChart;

/// Capability of drawing a group of named series onto a surface
pub trait SeriesRenderer {
    fn render(&self, group: &SeriesGroup, surface: &mut Surface) -> Result<()>;
}

/// Fixed chart geometry; the plot width follows the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    pub height: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            height: 300,
            top: 10,
            right: 20,
            bottom: 40,
            left: 30,
        }
    }
}

impl GraphConfig {
    /// Plot area width for a surface `client_width` pixels wide
    pub fn plot_width(&self, client_width: u32) -> u32 {
        client_width.saturating_sub(self.left + self.right).max(1)
    }

    /// Full canvas size, margins included
    pub fn canvas_size(&self, client_width: u32) -> (u32, u32) {
        (
            self.plot_width(client_width) + self.left + self.right,
            self.height + self.top + self.bottom,
        )
    }
}

/// Ordinal colour assignment: the n-th series of a group gets the n-th colour,
/// wrapping around when the group is longer than the palette
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    colors: Vec<RGBColor>,
}

impl ColorScheme {
    pub fn new(colors: Vec<RGBColor>) -> Self {
        Self { colors }
    }

    pub fn color_for(&self, index: usize) -> RGBColor {
        if self.colors.is_empty() {
            return RGBColor(0, 0, 0);
        }
        self.colors[index % self.colors.len()]
    }

    pub fn temperature() -> Self {
        Self::new(vec![RGBColor(0xff, 0x00, 0x00), RGBColor(0x00, 0x99, 0x00)])
    }

    pub fn sky_cover() -> Self {
        Self::new(vec![RGBColor(0x00, 0x00, 0xcc), RGBColor(0x99, 0x66, 0x33)])
    }

    pub fn precipitation_amount() -> Self {
        Self::new(vec![RGBColor(0x99, 0x66, 0x33), RGBColor(0x00, 0x00, 0x00)])
    }
}
