//! 路由服务模块 - 核心引擎
//!
//! Wraps the History API. Every navigation (push, back/forward, auth change)
//! goes through [`AppRoute::resolve`], which asks the access guard once.

use campus_shared::Role;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// Current `pathname + search`.
fn current_url() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    format!("{path}{search}")
}

fn push_history_state(path: &str) {
    if let Some(Ok(history)) = web_sys::window().map(|w| w.history()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn replace_history_state(path: &str) {
    if let Some(Ok(history)) = web_sys::window().map(|w| w.history()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// Session facts the guard needs, injected by the auth layer.
#[derive(Clone, Copy)]
pub struct AccessSignals {
    pub is_authenticated: Signal<bool>,
    pub role: Signal<Option<Role>>,
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    access: AccessSignals,
}

impl RouterService {
    fn new(access: AccessSignals) -> Self {
        let (current_route, set_route) = signal(AppRoute::NotFound);
        let router = Self {
            current_route,
            set_route,
            access,
        };

        let url = current_url();
        router.apply(&url, false);
        router
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    fn resolve(&self, target: AppRoute) -> AppRoute {
        target.resolve(
            self.access.is_authenticated.get_untracked(),
            self.access.role.get_untracked(),
        )
    }

    /// Resolves `url`, records it in history and shows it.
    fn apply(&self, url: &str, use_push: bool) {
        let target = AppRoute::from_url(url);
        let resolved = self.resolve(target.clone());
        let shown = if resolved == target {
            url.to_string()
        } else {
            resolved.to_path()
        };

        if use_push {
            push_history_state(&shown);
        } else {
            replace_history_state(&shown);
        }
        self.set_route.set(resolved);
    }

    pub fn navigate(&self, url: &str) {
        self.apply(url, true);
    }

    pub fn navigate_to(&self, route: &AppRoute) {
        self.navigate(&route.to_path());
    }

    /// 浏览器后退/前进
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            let url = current_url();
            router.apply(&url, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// Re-checks the current route whenever the session changes.
    fn setup_auth_redirect(&self) {
        let router = *self;
        let access = self.access;

        Effect::new(move |_| {
            let _ = access.is_authenticated.get();
            let _ = access.role.get();

            let route = router.current_route.get_untracked();
            let resolved = router.resolve(route.clone());
            if resolved != route {
                campus::log_info!("[Router] session changed, {} -> {}", route, resolved);
                push_history_state(&resolved.to_path());
                router.set_route.set(resolved);
            }
        });
    }
}

fn provide_router(access: AccessSignals) -> RouterService {
    let router = RouterService::new(access);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

#[component]
pub fn Router(access: AccessSignals, children: Children) -> impl IntoView {
    provide_router(access);
    children()
}

#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// In-app link: navigates through the router instead of reloading.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
