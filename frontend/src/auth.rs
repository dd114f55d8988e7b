//! 认证模块
//!
//! Owns the session store and mirrors it into a signal so the router and the
//! views react to login and logout.

use crate::web::BrowserStorage;
use campus::session::{Session, SessionStore};
use campus_shared::Role;
use leptos::prelude::*;

use crate::web::router::AccessSignals;

#[derive(Clone, Copy)]
pub struct AuthContext {
    store: SessionStore<BrowserStorage>,
    session: RwSignal<Option<Session>>,
}

impl AuthContext {
    /// Restores whatever session the browser still holds.
    pub fn new(store: SessionStore<BrowserStorage>) -> Self {
        let restored = store.snapshot();
        if restored.is_none() && store.is_authenticated() {
            // token without a usable role: treat as logged out
            store.clear_session();
        }
        Self {
            store,
            session: RwSignal::new(restored),
        }
    }

    pub fn store(&self) -> SessionStore<BrowserStorage> {
        self.store
    }

    pub fn session(&self) -> Signal<Option<Session>> {
        self.session.into()
    }

    pub fn access_signals(&self) -> AccessSignals {
        let session = self.session;
        AccessSignals {
            is_authenticated: Signal::derive(move || session.with(Option::is_some)),
            role: Signal::derive(move || session.with(|s| s.as_ref().map(|s| s.role))),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    pub fn username(&self) -> Option<String> {
        self.session.with_untracked(|s| s.as_ref().map(|s| s.username.clone()))
    }

    pub fn user_id(&self) -> Option<String> {
        self.session.with_untracked(|s| s.as_ref().map(|s| s.user_id.clone()))
    }

    pub fn role(&self) -> Signal<Option<Role>> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.as_ref().map(|s| s.role)))
    }

    pub fn is_admin(&self) -> Signal<bool> {
        let role = self.role();
        Signal::derive(move || role.get() == Some(Role::Admin))
    }

    /// Called after a successful login; the session is already persisted.
    pub fn signed_in(&self, session: Session) {
        self.session.set(Some(session));
    }

    /// 注销并清除状态
    ///
    /// 导航将由路由服务的认证状态监听自动处理。
    pub fn logout(&self) {
        campus::actions::logout(&self.store);
        self.session.set(None);
    }

    /// The server rejected the token.
    pub fn expire(&self) {
        campus::log_warn!("[auth] session expired");
        self.logout();
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
