//! Create/edit form bound to the shared `DraftPost` signal.
//!
//! DESIGN
//! ======
//! The form writes keystrokes straight into the draft and only reports
//! submit/cancel. Validation and the request happen in `PostSync`, so the
//! form never decides whether it is creating or updating beyond its labels.

#[cfg(test)]
#[path = "post_form_test.rs"]
mod post_form_test;

use leptos::prelude::*;

use crate::state::draft::DraftPost;

pub fn form_heading(editing: bool) -> &'static str {
    if editing { "Edit Post" } else { "Create New Post" }
}

pub fn submit_label(editing: bool) -> &'static str {
    if editing { "Update Post" } else { "Publish Post" }
}

#[component]
pub fn PostForm(
    draft: RwSignal<DraftPost>,
    #[prop(into)] busy: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let editing = move || draft.with(DraftPost::is_editing);

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        on_submit.run(());
    };

    view! {
        <section class="post-form">
            <h2>{move || form_heading(editing())}</h2>
            <form on:submit=on_form_submit>
                <input
                    class="post-form__title"
                    type="text"
                    name="title"
                    placeholder="Post Title"
                    prop:value=move || draft.with(|d| d.title.clone())
                    on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                />
                <textarea
                    class="post-form__content"
                    name="content"
                    placeholder="Write your post content here..."
                    prop:value=move || draft.with(|d| d.content.clone())
                    on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
                ></textarea>
                <div class="post-form__actions">
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || submit_label(editing())}
                    </button>
                    <Show when=editing>
                        <button
                            class="btn"
                            type="button"
                            disabled=move || busy.get()
                            on:click=move |_| draft.update(DraftPost::clear)
                        >
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>
        </section>
    }
}
