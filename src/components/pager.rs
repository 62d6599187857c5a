//! Previous/next page controls.

#[cfg(test)]
#[path = "pager_test.rs"]
mod pager_test;

use leptos::prelude::*;

pub fn page_label(page: u32, total_pages: u32) -> String {
    format!("Page {page} of {total_pages}")
}

/// Target of the "Previous" button, or `None` on the first page.
pub fn previous_page(page: u32) -> Option<u32> {
    (page > 1).then(|| page - 1)
}

/// Target of the "Next" button, or `None` on the last page.
pub fn next_page(page: u32, total_pages: u32) -> Option<u32> {
    (page < total_pages).then(|| page + 1)
}

#[component]
pub fn Pager(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    on_change: Callback<u32>,
) -> impl IntoView {
    let previous = move || previous_page(page.get());
    let next = move || next_page(page.get(), total_pages.get());

    view! {
        <nav class="pager">
            <button
                class="btn pager__prev"
                disabled=move || previous().is_none()
                on:click=move |_| {
                    if let Some(target) = previous() {
                        on_change.run(target);
                    }
                }
            >
                "Previous"
            </button>
            <span class="pager__label">{move || page_label(page.get(), total_pages.get())}</span>
            <button
                class="btn pager__next"
                disabled=move || next().is_none()
                on:click=move |_| {
                    if let Some(target) = next() {
                        on_change.run(target);
                    }
                }
            >
                "Next"
            </button>
        </nav>
    }
}
