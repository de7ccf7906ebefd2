//! Reactive temporal chart state with memoized geometry

use go_charts::{DataSelectors, TemporalChartData, TemporalChartOptions, compute_temporal_chart};
use go_core::ChartSize;
use leptos::prelude::*;

/// Memoized chart geometry.
///
/// Recomputes only when `data` or `size` changes; the options and selectors
/// are fixed for the lifetime of the memo.
pub fn use_temporal_chart_data<T, K>(
    data: Signal<Option<Vec<T>>>,
    selectors: DataSelectors<T, K>,
    options: TemporalChartOptions,
    size: Signal<ChartSize>,
) -> Memo<TemporalChartData<T, K>>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    K: Clone + PartialEq + Send + Sync + 'static,
{
    Memo::new(move |_| {
        let container = size.get();
        data.with(|records| {
            compute_temporal_chart(
                records.as_deref().unwrap_or_default(),
                &selectors,
                &options,
                container,
            )
        })
    })
}

/// Reactive inputs of a single temporal chart
#[derive(Clone)]
pub struct TemporalChartState<T>
where
    T: Send + Sync + 'static,
{
    /// Records from the data fetch, `None` until loaded
    pub data: RwSignal<Option<Vec<T>>>,
    /// Last measured container size
    pub container: RwSignal<ChartSize>,
}

impl<T> TemporalChartState<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create empty chart state
    pub fn new() -> Self {
        Self {
            data: RwSignal::new(None),
            container: RwSignal::new(ChartSize::ZERO),
        }
    }

    // ========================================================================
    // Data Updates
    // ========================================================================

    /// Replace records with a fresh fetch result
    pub fn set_data(&self, records: Vec<T>) {
        self.data.set(Some(records));
    }

    /// Forget loaded records
    pub fn clear_data(&self) {
        self.data.set(None);
    }

    /// Check if records are loaded
    pub fn has_data(&self) -> bool {
        self.data.with(|records| records.is_some())
    }

    // ========================================================================
    // Size Updates
    // ========================================================================

    /// Record a new container measurement (no-op when unchanged)
    pub fn resize(&self, size: ChartSize) {
        if self.container.get_untracked() != size {
            self.container.set(size);
        }
    }

    /// Check if the container has a drawable area
    pub fn is_measured(&self) -> bool {
        !self.container.get().is_empty()
    }

    // ========================================================================
    // Derived Geometry
    // ========================================================================

    /// Memoized geometry for this state
    pub fn computed<K>(
        &self,
        selectors: DataSelectors<T, K>,
        options: TemporalChartOptions,
    ) -> Memo<TemporalChartData<T, K>>
    where
        K: Clone + PartialEq + Send + Sync + 'static,
    {
        use_temporal_chart_data(self.data.into(), selectors, options, self.container.into())
    }
}

impl<T> Default for TemporalChartState<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
