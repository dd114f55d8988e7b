use crate::api::use_identity;
use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::task::ViewTasks;
use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let identity = use_identity();
    let tasks = ViewTasks::new();

    let (identifier, set_identifier) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let identity = identity.clone();
        tasks.spawn(async move {
            let store = auth.store();
            match campus::actions::login(&identity, &store, &identifier.get_untracked(), &password.get_untracked()).await {
                // the router reacts to the new session and leaves this page
                Ok(session) => auth.signed_in(session),
                Err(e) => set_error_msg.set(Some(e.message)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Campus"</h1>
                    <p class="text-base-content/70">"Sign in with your email or username"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="identifier">
                                <span class="label-text">"Email or username"</span>
                            </label>
                            <input
                                id="identifier"
                                type="text"
                                on:input=move |ev| set_identifier.set(event_target_value(&ev))
                                prop:value=identifier
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center">
                            "No account? "
                            <Link to=AppRoute::Register.to_path() class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
