use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use campus::ViewState;
use leptos::prelude::*;

/// Page shell: navbar with role-dependent links, title, content.
#[component]
pub fn Page(#[prop(into)] title: String, children: Children) -> impl IntoView {
    let auth = use_auth();
    let is_admin = auth.is_admin();
    let username = move || auth.session().get().map(|s| s.username).unwrap_or_default();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-6">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-1 flex-wrap">
                        <Link to=AppRoute::Home.to_path() class="btn btn-ghost text-xl">"Campus"</Link>
                        <Link to=AppRoute::Canteens.to_path() class="btn btn-ghost btn-sm">"Canteens"</Link>
                        <Link to=AppRoute::TodayMenus.to_path() class="btn btn-ghost btn-sm">"Today"</Link>
                        <Link to=AppRoute::Doms.to_path() class="btn btn-ghost btn-sm">"Dormitories"</Link>
                        <Show when=move || is_admin.get()>
                            <Link to=AppRoute::Housing.to_path() class="btn btn-ghost btn-sm">"Housing admin"</Link>
                        </Show>
                    </div>
                    <div class="flex-none gap-2">
                        <Link to=AppRoute::Profile.to_path() class="btn btn-ghost btn-sm">{username}</Link>
                        <button on:click=move |_| auth.logout() class="btn btn-outline btn-error btn-sm">
                            "Log out"
                        </button>
                    </div>
                </div>

                <h1 class="text-3xl font-bold">{title}</h1>
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex justify-center py-8">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

#[component]
pub fn ErrorAlert(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div role="alert" class="alert alert-error text-sm py-2">
            <span>{message}</span>
        </div>
    }
}

#[component]
pub fn Empty(#[prop(into)] message: String) -> impl IntoView {
    view! { <p class="text-center py-8 text-base-content/50">{message}</p> }
}

/// Result of the last form submission: (message, is_error).
pub type Notice = RwSignal<Option<(String, bool)>>;

#[component]
pub fn NoticeBar(notice: Notice) -> impl IntoView {
    move || {
        notice.get().map(|(msg, is_err)| {
            let class = if is_err { "alert alert-error" } else { "alert alert-success" };
            view! {
                <div role="alert" class=class>
                    <span>{msg}</span>
                </div>
            }
        })
    }
}

/// Renders exactly one of spinner, error, or `on_success(data)`.
pub fn render_state<T, V, F>(state: RwSignal<ViewState<T>>, on_success: F) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    V: IntoView + 'static,
    F: Fn(T) -> V + Send + Sync + 'static,
{
    move || match state.get() {
        ViewState::Loading => view! { <Spinner /> }.into_any(),
        ViewState::Error(message) => view! { <ErrorAlert message=message /> }.into_any(),
        ViewState::Success(data) => on_success(data).into_any(),
    }
}

/// `<input>` bound to a string signal.
#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional, into)] input_type: Option<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    view! {
        <label class="form-control w-full">
            <div class="label">
                <span class="label-text">{label}</span>
            </div>
            <input
                type=input_type.unwrap_or_else(|| "text".to_string())
                placeholder=placeholder
                class="input input-bordered w-full"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}
