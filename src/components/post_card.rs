//! Card for a single post in the list.

use leptos::prelude::*;

use crate::net::types::Post;

/// One post. Edit and delete controls appear only when `can_modify`.
#[component]
pub fn PostCard(
    post: Post,
    can_modify: bool,
    #[prop(into)] busy: Signal<bool>,
    on_edit: Callback<Post>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let author = post.author_name().to_owned();
    let edit_target = post.clone();
    let delete_id = post.id.clone();

    view! {
        <article class="post-card">
            <h3 class="post-card__title">{post.title}</h3>
            <p class="post-card__content">{post.content}</p>
            <footer class="post-card__footer">
                <span class="post-card__author">"Posted by: " {author}</span>
                {can_modify
                    .then(move || {
                        view! {
                            <span class="post-card__actions">
                                <button
                                    class="btn btn--edit"
                                    disabled=move || busy.get()
                                    on:click=move |_| on_edit.run(edit_target.clone())
                                >
                                    "Edit"
                                </button>
                                <button
                                    class="btn btn--danger"
                                    disabled=move || busy.get()
                                    on:click=move |_| on_delete.run(delete_id.clone())
                                >
                                    "Delete"
                                </button>
                            </span>
                        }
                    })}
            </footer>
        </article>
    }
}
