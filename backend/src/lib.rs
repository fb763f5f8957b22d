//! # housing-viz
//!
//! Box-and-whisker charts of Massachusetts housing metrics by property type.
//!
//! This crate loads the merged housing + census table, summarises a chosen
//! metric per property type (quartiles, IQR fences, whiskers and outliers),
//! and renders the result as a self-contained SVG chart with hover tooltips.
//! A town-level aggregation feeds the income, livability and risk rankings.
//!
//! ## Features
//!
//! - **Data Loading**: Parse the listings table from JSON, bounded by a fetch timeout
//! - **Statistics**: Type-7 quantiles, 1.5×IQR outlier fences, clamped whiskers
//! - **Rendering**: Linear and logarithmic axes, one glyph per category, tooltips
//! - **Interaction**: Metric selection and scale toggle with full redraw
//!
//! ## Architecture
//!
//! - [`models`]: Listings, property types, metrics and chart options
//! - [`data`]: Dataset sources, timeout-bounded loading and load errors
//! - [`services`]: Pure statistics, grouping and town aggregation
//! - [`render`]: Scales, SVG element tree, tooltips and the box-plot renderer
//! - [`controller`]: Interactive chart state over a loaded dataset
//! - [`config`]: TOML configuration with environment overrides
//! - [`api`]: Serializable report types

pub mod api;
pub mod config;
pub mod controller;
pub mod data;
pub mod models;
pub mod render;
pub mod services;
