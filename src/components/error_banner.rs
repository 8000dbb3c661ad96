use leptos::prelude::*;

use crate::state::{AppState, LoadStatus};

/// Load progress line, or the dismissible failure banner.
#[component]
pub fn ErrorBanner() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        {move || match state.load_status.get() {
            LoadStatus::Failed(message) => (!state.banner_dismissed.get()).then(|| view! {
                <div class="waterfall-error" role="alert">
                    <span>{message}</span>
                    <button
                        class="waterfall-error-close"
                        on:click=move |_| state.banner_dismissed.set(true)
                        title="Dismiss"
                    >"\u{00d7}"</button>
                </div>
            }).into_any(),
            LoadStatus::Loading => view! {
                <div class="waterfall-status">"Loading waterfall data\u{2026}"</div>
            }.into_any(),
            LoadStatus::Empty => view! {
                <div class="waterfall-status">"No waterfall data available"</div>
            }.into_any(),
            LoadStatus::Ready => view! { <span></span> }.into_any(),
        }}
    }
}
