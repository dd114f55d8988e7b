use crate::api::use_identity;
use crate::components::layout::{Notice, NoticeBar, TextField};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use crate::web::task::ViewTasks;
use campus_shared::RegisterRequest;
use leptos::prelude::*;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let identity = use_identity();
    let router = use_router();
    let tasks = ViewTasks::new();

    let firstname = RwSignal::new(String::new());
    let lastname = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let notice: Notice = RwSignal::new(None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = RegisterRequest {
            firstname: firstname.get_untracked(),
            lastname: lastname.get_untracked(),
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        set_is_submitting.set(true);
        notice.set(None);

        let identity = identity.clone();
        tasks.spawn(async move {
            match campus::actions::register(&identity, &form).await {
                Ok(_) => router.navigate_to(&AppRoute::Login),
                Err(e) => notice.set(Some((e.message, true))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Create an account"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <NoticeBar notice=notice />
                        <TextField label="First name" value=firstname />
                        <TextField label="Last name" value=lastname />
                        <TextField label="Username" value=username />
                        <TextField label="Email" value=email input_type="email" />
                        <TextField label="Password" value=password input_type="password" />
                        <button class="btn btn-primary mt-4" disabled=move || is_submitting.get()>
                            "Register"
                        </button>
                        <p class="text-sm text-center">
                            <Link to=AppRoute::Login.to_path() class="link">"Back to login"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
