//! Interactive chart state: dataset, current controls, and the render target.

use log::debug;
use std::sync::Arc;

use crate::data::{Dataset, DatasetState};
use crate::models::{ChartOptions, Listing, Metric, PropertyType, ScaleType};
use crate::render::{
    box_tooltip, outlier_tooltip, BoxPlotRenderer, MessageKind, RenderTarget, Tooltip,
};
use crate::services::{compute_box_plot_data, BoxPlotData};

pub const LOADING_MESSAGE: &str = "Loading housing data...";

/// Something the pointer can rest on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    /// The box of one category.
    Box(PropertyType),
    /// One outlier point, identified by its listing index.
    Outlier {
        property_type: PropertyType,
        listing_index: usize,
    },
}

/// Owns the dataset state, the current options and the render target.
///
/// Every control change recomputes the box-plot data and redraws the whole
/// chart.
#[derive(Debug)]
pub struct ChartController {
    state: DatasetState,
    options: ChartOptions,
    renderer: BoxPlotRenderer,
    target: RenderTarget,
    data: Option<BoxPlotData>,
}

impl ChartController {
    /// Create a controller and draw the initial state.
    pub fn new(
        state: DatasetState,
        options: ChartOptions,
        renderer: BoxPlotRenderer,
        target: RenderTarget,
    ) -> Self {
        let mut controller = Self {
            state,
            options,
            renderer,
            target,
            data: None,
        };
        controller.redraw();
        controller
    }

    /// Controller over an already-loaded dataset with default rendering.
    pub fn with_dataset(dataset: Dataset, options: ChartOptions, element_id: &str) -> Self {
        Self::new(
            DatasetState::Ready(Arc::new(dataset)),
            options,
            BoxPlotRenderer::default(),
            RenderTarget::new(element_id),
        )
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn state(&self) -> &DatasetState {
        &self.state
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Box-plot data for the current metric, once the dataset is ready.
    pub fn data(&self) -> Option<&BoxPlotData> {
        self.data.as_ref()
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.set_options(ChartOptions::new(metric, self.options.scale));
    }

    pub fn set_scale(&mut self, scale: ScaleType) {
        self.set_options(ChartOptions::new(self.options.metric, scale));
    }

    pub fn toggle_scale(&mut self) {
        self.set_scale(self.options.scale.toggled());
    }

    pub fn set_options(&mut self, options: ChartOptions) {
        self.options = options;
        self.redraw();
    }

    /// Replace the dataset state, e.g. when a pending load completes.
    pub fn set_state(&mut self, state: DatasetState) {
        self.state = state;
        self.redraw();
    }

    /// Recompute and redraw for the current state and options.
    pub fn redraw(&mut self) {
        match &self.state {
            DatasetState::Loading => {
                self.data = None;
                self.renderer
                    .render_message(&mut self.target, MessageKind::Loading, LOADING_MESSAGE);
            }
            DatasetState::Failed { message } => {
                self.data = None;
                self.renderer
                    .render_message(&mut self.target, MessageKind::Error, message);
            }
            DatasetState::Ready(dataset) => {
                let data = compute_box_plot_data(dataset.listings(), self.options.metric);
                debug!(
                    "Redrawing {} with {} categories ({:?} scale)",
                    self.options.metric,
                    data.categories.len(),
                    self.options.scale
                );
                self.renderer
                    .render(&mut self.target, &data, dataset.listings(), &self.options);
                self.data = Some(data);
            }
        }
    }

    /// Tooltip for the hovered element, if it is currently drawn.
    pub fn hover(&self, hovered: HoverTarget) -> Option<Tooltip> {
        let data = self.data.as_ref()?;
        match hovered {
            HoverTarget::Box(property_type) => data
                .category(property_type)
                .map(|summary| box_tooltip(summary, self.options.metric)),
            HoverTarget::Outlier {
                property_type,
                listing_index,
            } => {
                let summary = data.category(property_type)?;
                let observation = summary
                    .outliers
                    .iter()
                    .find(|o| o.listing_index == listing_index)?;
                if self.options.scale.is_log() && observation.value <= 0.0 {
                    return None;
                }
                let listing = self.listing(listing_index)?;
                Some(outlier_tooltip(
                    listing,
                    observation.value,
                    self.options.metric,
                ))
            }
        }
    }

    fn listing(&self, index: usize) -> Option<&Listing> {
        self.state.dataset()?.listings().get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let mut listings: Vec<Listing> = [10.0, 20.0, 30.0, 40.0, 1000.0]
            .into_iter()
            .map(|p| Listing::new("Quincy", PropertyType::Condo, Some(p)))
            .collect();
        listings.push(Listing::new("Dover", PropertyType::SingleFamily, Some(500.0)));
        Dataset::new(listings, "test")
    }

    #[test]
    fn test_initial_render() {
        let controller = ChartController::with_dataset(dataset(), ChartOptions::default(), "chart");
        assert_eq!(controller.target().render_count(), 1);
        assert_eq!(controller.data().unwrap().categories.len(), 2);
    }

    #[test]
    fn test_toggle_scale_redraws() {
        let mut controller =
            ChartController::with_dataset(dataset(), ChartOptions::default(), "chart");
        controller.toggle_scale();
        assert_eq!(controller.options().scale, ScaleType::Log);
        assert_eq!(controller.target().render_count(), 2);
        let root = controller.target().content().unwrap();
        assert_eq!(root.get_attr("data-scale"), Some("log"));
    }

    #[test]
    fn test_hover_box_and_outlier() {
        let controller = ChartController::with_dataset(dataset(), ChartOptions::default(), "chart");

        let tip = controller
            .hover(HoverTarget::Box(PropertyType::Condo))
            .unwrap();
        assert_eq!(tip.value("Median"), Some("$30"));

        let tip = controller
            .hover(HoverTarget::Outlier {
                property_type: PropertyType::Condo,
                listing_index: 4,
            })
            .unwrap();
        assert_eq!(tip.title, "Quincy");
        assert_eq!(tip.value("Price"), Some("$1,000"));

        // Not an outlier, and a category with no data.
        assert!(controller
            .hover(HoverTarget::Outlier {
                property_type: PropertyType::Condo,
                listing_index: 0,
            })
            .is_none());
        assert!(controller
            .hover(HoverTarget::Box(PropertyType::Townhouse))
            .is_none());
    }

    #[test]
    fn test_loading_then_ready() {
        let mut controller = ChartController::new(
            DatasetState::Loading,
            ChartOptions::default(),
            BoxPlotRenderer::default(),
            RenderTarget::new("chart"),
        );
        assert!(controller.target().to_svg().contains(LOADING_MESSAGE));
        assert!(controller.hover(HoverTarget::Box(PropertyType::Condo)).is_none());

        controller.set_state(DatasetState::Ready(Arc::new(dataset())));
        assert!(!controller.target().to_svg().contains(LOADING_MESSAGE));
        assert!(controller.data().is_some());
    }
}
