//! View-scoped async work.
//!
//! Requests started by a view are aborted when the view is torn down
//! (navigation away), so a late response never writes into a view that is
//! no longer shown.

use campus::{ApiResult, ViewState};
use futures::future::{AbortHandle, abortable};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::auth::{AuthContext, use_auth};

#[derive(Clone)]
pub struct ViewTasks {
    handles: Arc<Mutex<Vec<AbortHandle>>>,
    auth: AuthContext,
}

impl ViewTasks {
    /// Ties a task set to the current reactive owner.
    pub fn new() -> Self {
        let tasks = Self {
            handles: Arc::default(),
            auth: use_auth(),
        };
        let handles = tasks.handles.clone();
        on_cleanup(move || {
            if let Ok(mut handles) = handles.lock() {
                for handle in handles.drain(..) {
                    handle.abort();
                }
            }
        });
        tasks
    }

    pub fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + 'static,
    {
        let (fut, handle) = abortable(fut);
        if let Ok(mut handles) = self.handles.lock() {
            handles.push(handle);
        }
        spawn_local(async move {
            let _ = fut.await;
        });
    }

    /// Runs `request` and publishes its outcome into `state`.
    ///
    /// A 401 means the stored token is no longer accepted: the session is
    /// dropped and the router sends the user to the login page.
    pub fn load<T, F>(&self, state: RwSignal<ViewState<T>>, request: F)
    where
        T: Send + Sync + 'static,
        F: Future<Output = ApiResult<T>> + 'static,
    {
        let auth = self.auth;
        state.set(ViewState::Loading);
        self.spawn(async move {
            let res = request.await;
            if let Err(err) = &res {
                campus::log_error!("[view] load failed: {}", err);
                if err.http_status == Some(401) {
                    auth.expire();
                }
            }
            state.set(ViewState::from_result(res));
        });
    }
}
