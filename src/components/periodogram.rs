use leptos::prelude::*;

use crate::canvas::periodogram_chart::PeriodogramChart;
use crate::state::{with_engine, AppState};

#[component]
pub fn PeriodogramPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    Effect::new(move || {
        state.periodogram_rev.track();
        let Some(canvas) = canvas_ref.get() else { return };
        let Some(mut chart) = PeriodogramChart::new(&canvas) else { return };
        with_engine(|e| e.render_periodogram(&mut chart));
    });

    view! {
        <div class="periodogram-panel" style="flex: 1; min-width: 280px; height: 60vh;">
            <canvas node_ref=canvas_ref style="width: 100%; height: 100%; display: block;" />
        </div>
    }
}
