use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    // this page is public, so logging out alone would leave the user here
    let switch_user = move |_: leptos::ev::MouseEvent| {
        auth.logout();
        router.navigate_to(&AppRoute::Login);
    };
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-warning">"403"</h1>
                <p class="text-xl">"You do not have access to this page."</p>
                <div class="flex gap-2 justify-center">
                    <Link to=AppRoute::home().to_path() class="btn btn-primary">"Home"</Link>
                    <button class="btn btn-ghost" on:click=switch_user>"Sign in as someone else"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl">"Page not found"</p>
                <Link to=AppRoute::home().to_path() class="btn btn-primary">"Home"</Link>
            </div>
        </div>
    }
}
