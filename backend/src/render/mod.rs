//! Chart rendering: scales, SVG element tree, tooltips and the box-plot renderer.
//!
//! Output is a self-contained SVG document. Hover details are embedded as
//! `<title>` children so any browser shows them without scripting, and the
//! same [`Tooltip`] values are available to callers through the controller.

pub mod box_plot;
pub mod format;
pub mod scale;
pub mod svg;
pub mod target;
pub mod tooltip;

pub use box_plot::{BoxPlotRenderer, Layout, MessageKind};
pub use scale::{BandScale, LinearScale, LogScale, NumericScale};
pub use svg::Element;
pub use target::RenderTarget;
pub use tooltip::{box_tooltip, outlier_tooltip, Tooltip};
