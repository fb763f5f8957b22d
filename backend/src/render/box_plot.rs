//! Box-and-whisker chart renderer.
//!
//! Lays out one glyph per property type along a categorical x axis against a
//! linear or logarithmic y axis:
//!
//! ```text
//!        ┬   <- whisker cap (whisker_max)
//!        │
//!     ┌──┴──┐ <- q3
//!     │─────│ <- median
//!     └──┬──┘ <- q1
//!        │
//!        ┴   <- whisker cap (whisker_min)
//!        o   <- outlier
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::format::format_tick;
use super::scale::{BandScale, NumericScale};
use super::svg::Element;
use super::target::RenderTarget;
use super::tooltip::{box_tooltip, outlier_tooltip};
use crate::models::{ChartOptions, Listing};
use crate::services::{BoxPlotData, CategorySummary};

/// Pixel geometry of the chart.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    /// Approximate number of ticks on a linear axis.
    pub tick_count: usize,
    /// Fraction of each category slot left empty around the box.
    pub band_padding: f64,
    pub outlier_radius: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            margin_top: 50.0,
            margin_right: 30.0,
            margin_bottom: 60.0,
            margin_left: 90.0,
            tick_count: 6,
            band_padding: 0.4,
            outlier_radius: 3.5,
        }
    }
}

impl Layout {
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    fn plot_left(&self) -> f64 {
        self.margin_left
    }

    fn plot_right(&self) -> f64 {
        (self.width - self.margin_right).max(self.margin_left + 1.0)
    }

    fn plot_top(&self) -> f64 {
        self.margin_top
    }

    fn plot_bottom(&self) -> f64 {
        (self.height - self.margin_bottom).max(self.margin_top + 1.0)
    }
}

/// Pixel y positions of one box glyph.
#[derive(Debug, Copy, Clone, PartialEq)]
struct BoxPositions {
    q1: f64,
    median: f64,
    q3: f64,
    whisker_min: f64,
    whisker_max: f64,
}

impl BoxPositions {
    /// `None` when any statistic cannot be placed on `scale`.
    fn map(summary: &CategorySummary, scale: &NumericScale) -> Option<Self> {
        let stats = &summary.stats;
        Some(Self {
            q1: scale.map(stats.q1)?,
            median: scale.map(stats.median)?,
            q3: scale.map(stats.q3)?,
            whisker_min: scale.map(stats.whisker_min)?,
            whisker_max: scale.map(stats.whisker_max)?,
        })
    }
}

/// Kind of placeholder shown instead of a chart.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Loading,
    Error,
}

/// Renders [`BoxPlotData`] into a [`RenderTarget`].
#[derive(Debug, Clone, Default)]
pub struct BoxPlotRenderer {
    layout: Layout,
}

impl BoxPlotRenderer {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Draw the chart, replacing anything previously in `target`.
    ///
    /// `data` must have been computed for `options.metric`; `listings` is the
    /// dataset the observation indices point into and is only read for
    /// outlier tooltips.
    pub fn render(
        &self,
        target: &mut RenderTarget,
        data: &BoxPlotData,
        listings: &[Listing],
        options: &ChartOptions,
    ) {
        let layout = &self.layout;
        let scale = NumericScale::for_extent(
            options.scale,
            data.value_extent(),
            data.min_positive(),
            (layout.plot_bottom(), layout.plot_top()),
            layout.tick_count,
        );
        let drawable: Vec<(&CategorySummary, BoxPositions)> = data
            .categories
            .iter()
            .filter_map(|summary| match BoxPositions::map(summary, &scale) {
                Some(positions) => Some((summary, positions)),
                None => {
                    debug!(
                        "Skipping {} glyph: statistics fall outside the axis domain",
                        summary.property_type
                    );
                    None
                }
            })
            .collect();
        let band = BandScale::new(
            drawable.len(),
            (layout.plot_left(), layout.plot_right()),
            layout.band_padding,
        );

        let glyphs: Vec<Element> = drawable
            .iter()
            .enumerate()
            .map(|(i, (summary, positions))| {
                self.glyph(
                    target.element_id(),
                    summary,
                    positions,
                    i,
                    &band,
                    &scale,
                    listings,
                    options,
                )
            })
            .collect();

        let title = format!("{} by Property Type", options.metric.label());
        let root = self
            .root(target.element_id(), "box-plot")
            .attr("data-metric", options.metric.column())
            .attr(
                "data-scale",
                if options.scale.is_log() { "log" } else { "linear" },
            )
            .child(
                Element::new("text")
                    .attr("class", "chart-title")
                    .coord("x", layout.width / 2.0)
                    .coord("y", layout.margin_top / 2.0)
                    .attr("text-anchor", "middle")
                    .text(title),
            )
            .child(self.y_axis(&scale, options))
            .child(self.x_axis(&drawable, &band))
            .child(Element::new("g").attr("class", "boxes").children(glyphs));

        debug!(
            "Rendered {} box glyphs into #{} ({} elements)",
            drawable.len(),
            target.element_id(),
            root.element_count()
        );
        target.replace(root);
    }

    /// Draw a loading or error placeholder, replacing anything in `target`.
    pub fn render_message(&self, target: &mut RenderTarget, kind: MessageKind, message: &str) {
        let (class, role) = match kind {
            MessageKind::Loading => ("chart-message chart-loading", "status"),
            MessageKind::Error => ("chart-message chart-error", "alert"),
        };
        let root = self.root(target.element_id(), "box-plot").child(
            Element::new("text")
                .attr("class", class)
                .attr("role", role)
                .coord("x", self.layout.width / 2.0)
                .coord("y", self.layout.height / 2.0)
                .attr("text-anchor", "middle")
                .text(message),
        );
        target.replace(root);
    }

    fn root(&self, element_id: &str, class: &str) -> Element {
        Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("id", element_id)
            .attr("class", class)
            .attr("width", self.layout.width)
            .attr("height", self.layout.height)
            .attr(
                "viewBox",
                format!("0 0 {} {}", self.layout.width, self.layout.height),
            )
            .attr("role", "img")
    }

    fn y_axis(&self, scale: &NumericScale, options: &ChartOptions) -> Element {
        let layout = &self.layout;
        let x = layout.plot_left();
        let format = options.metric.format();

        let ticks = scale.ticks(layout.tick_count).into_iter().filter_map(|t| {
            let y = scale.map(t)?;
            Some(
                Element::new("g")
                    .attr("class", "tick")
                    .child(
                        Element::new("line")
                            .coord("x1", x - 6.0)
                            .coord("y1", y)
                            .coord("x2", x)
                            .coord("y2", y)
                            .attr("stroke", "#333"),
                    )
                    .child(
                        Element::new("text")
                            .coord("x", x - 9.0)
                            .coord("y", y + 4.0)
                            .attr("text-anchor", "end")
                            .text(format_tick(t, format)),
                    ),
            )
        });

        let label = if options.scale.is_log() {
            format!("{} (log scale)", options.metric.label())
        } else {
            options.metric.label().to_string()
        };
        let mid = (layout.plot_top() + layout.plot_bottom()) / 2.0;

        Element::new("g")
            .attr("class", "axis y-axis")
            .child(
                Element::new("line")
                    .attr("class", "domain")
                    .coord("x1", x)
                    .coord("y1", layout.plot_top())
                    .coord("x2", x)
                    .coord("y2", layout.plot_bottom())
                    .attr("stroke", "#333"),
            )
            .children(ticks)
            .child(
                Element::new("text")
                    .attr("class", "axis-label")
                    .attr("transform", "rotate(-90)")
                    .coord("x", -mid)
                    .coord("y", layout.margin_left / 4.0)
                    .attr("text-anchor", "middle")
                    .text(label),
            )
    }

    fn x_axis(&self, drawable: &[(&CategorySummary, BoxPositions)], band: &BandScale) -> Element {
        let layout = &self.layout;
        let y = layout.plot_bottom();

        let labels = drawable.iter().enumerate().map(|(i, (c, _))| {
            Element::new("text")
                .attr("class", "tick-label")
                .coord("x", band.center(i))
                .coord("y", y + 20.0)
                .attr("text-anchor", "middle")
                .text(c.property_type.label())
        });

        Element::new("g")
            .attr("class", "axis x-axis")
            .child(
                Element::new("line")
                    .attr("class", "domain")
                    .coord("x1", layout.plot_left())
                    .coord("y1", y)
                    .coord("x2", layout.plot_right())
                    .coord("y2", y)
                    .attr("stroke", "#333"),
            )
            .children(labels)
            .child(
                Element::new("text")
                    .attr("class", "axis-label")
                    .coord("x", (layout.plot_left() + layout.plot_right()) / 2.0)
                    .coord("y", layout.height - 15.0)
                    .attr("text-anchor", "middle")
                    .text("Property Type"),
            )
    }

    #[allow(clippy::too_many_arguments)]
    fn glyph(
        &self,
        element_id: &str,
        summary: &CategorySummary,
        positions: &BoxPositions,
        index: usize,
        band: &BandScale,
        scale: &NumericScale,
        listings: &[Listing],
        options: &ChartOptions,
    ) -> Element {
        let BoxPositions {
            q1: y_q1,
            median: y_median,
            q3: y_q3,
            whisker_min: y_lo,
            whisker_max: y_hi,
        } = *positions;

        let color = summary.property_type.color();
        let left = band.start(index);
        let width = band.bandwidth();
        let cx = band.center(index);
        let cap = width / 4.0;

        let whisker = |class: &str, from: f64, to: f64| {
            Element::new("line")
                .attr("class", format!("whisker {}", class))
                .coord("x1", cx)
                .coord("y1", from)
                .coord("x2", cx)
                .coord("y2", to)
                .attr("stroke", "#333")
        };
        let cap_line = |y: f64| {
            Element::new("line")
                .attr("class", "whisker-cap")
                .coord("x1", cx - cap)
                .coord("y1", y)
                .coord("x2", cx + cap)
                .coord("y2", y)
                .attr("stroke", "#333")
        };

        let tooltip = box_tooltip(summary, options.metric);
        let body = Element::new("rect")
            .attr("class", "box")
            .coord("x", left)
            .coord("y", y_q3.min(y_q1))
            .coord("width", width)
            .coord("height", (y_q1 - y_q3).abs())
            .attr("fill", color)
            .attr("fill-opacity", "0.6")
            .attr("stroke", color)
            .title(tooltip.to_text());

        let median = Element::new("line")
            .attr("class", "median")
            .coord("x1", left)
            .coord("y1", y_median)
            .coord("x2", left + width)
            .coord("y2", y_median)
            .attr("stroke", "#111")
            .attr("stroke-width", "2");

        let outliers = summary.outliers.iter().filter_map(|o| {
            let cy = scale.map(o.value)?;
            let mut point = Element::new("circle")
                .attr("class", "outlier")
                .attr("data-listing-index", o.listing_index)
                .coord("cx", cx)
                .coord("cy", cy)
                .attr("r", self.layout.outlier_radius)
                .attr("fill", color)
                .attr("fill-opacity", "0.7");
            if let Some(listing) = listings.get(o.listing_index) {
                point = point.title(outlier_tooltip(listing, o.value, options.metric).to_text());
            }
            Some(point)
        });

        Element::new("g")
            .attr("class", "box-glyph")
            .attr(
                "id",
                format!("{}-{}", element_id, summary.property_type.slug()),
            )
            .attr("data-category", summary.property_type.slug())
            .child(whisker("whisker-lower", y_lo, y_q1))
            .child(whisker("whisker-upper", y_q3, y_hi))
            .child(cap_line(y_lo))
            .child(cap_line(y_hi))
            .child(body)
            .child(median)
            .child(Element::new("g").attr("class", "outliers").children(outliers))
    }
}
