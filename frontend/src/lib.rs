//! 校园服务管理前端
//!
//! - `web::route`: 路由定义与访问策略
//! - `web::router`: 路由服务（守卫在此执行）
//! - `auth`: 会话状态
//! - `components`: 页面

mod api;
mod auth;
mod components {
    pub mod canteens;
    pub mod doms;
    pub mod home;
    pub mod housing;
    pub mod layout;
    pub mod login;
    pub mod meal;
    pub mod menus;
    pub mod profile;
    pub mod register;
    pub mod rooms;
    pub mod status;
}
pub(crate) mod web;

use crate::auth::AuthContext;
use crate::components::canteens::{CanteenDetailPage, CanteensPage};
use crate::components::doms::{DomDetailPage, DomsPage};
use crate::components::home::HomePage;
use crate::components::housing::{HousingCardsPage, HousingDashboardPage, HousingFaultsPage, HousingStudentsPage};
use crate::components::login::LoginPage;
use crate::components::meal::MealPage;
use crate::components::menus::{MenusPage, TodayMenusPage};
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::components::rooms::{AssignStudentPage, FreeRoomsPage, ReportFaultPage, ReviewRoomPage, RoomDetailPage};
use crate::components::status::{NotFoundPage, UnauthorizedPage};

use campus::ApiConfig;
use campus::session::SessionStore;
use leptos::prelude::*;
use web::BrowserStorage;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Canteens => view! { <CanteensPage /> }.into_any(),
        AppRoute::CanteenDetail(id) => view! { <CanteenDetailPage id=id /> }.into_any(),
        AppRoute::Menus(canteen_id) => view! { <MenusPage canteen_id=canteen_id /> }.into_any(),
        AppRoute::Meal(menu_id) => view! { <MealPage menu_id=menu_id /> }.into_any(),
        AppRoute::TodayMenus => view! { <TodayMenusPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Doms => view! { <DomsPage /> }.into_any(),
        AppRoute::DomDetail(id) => view! { <DomDetailPage id=id /> }.into_any(),
        AppRoute::FreeRooms { dom_id } => view! { <FreeRoomsPage dom_id=dom_id /> }.into_any(),
        AppRoute::RoomDetail { id } => view! { <RoomDetailPage id=id /> }.into_any(),
        AppRoute::AssignStudent { dom_id, broj } => {
            view! { <AssignStudentPage dom_id=dom_id broj=broj /> }.into_any()
        }
        AppRoute::ReviewRoom { soba_id } => view! { <ReviewRoomPage soba_id=soba_id /> }.into_any(),
        AppRoute::ReportFault { soba_id } => view! { <ReportFaultPage soba_id=soba_id /> }.into_any(),
        AppRoute::Housing => view! { <HousingDashboardPage /> }.into_any(),
        AppRoute::HousingStudents => view! { <HousingStudentsPage /> }.into_any(),
        AppRoute::HousingCards => view! { <HousingCardsPage /> }.into_any(),
        AppRoute::HousingFaults => view! { <HousingFaultsPage /> }.into_any(),
        AppRoute::Unauthorized => view! { <UnauthorizedPage /> }.into_any(),
        AppRoute::Malformed { .. } | AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建期配置
    provide_context(ApiConfig::from_build_env());

    // 2. 会话：从浏览器存储恢复
    let auth = AuthContext::new(SessionStore::new(BrowserStorage));
    provide_context(auth);

    // 3. 路由器只看到认证信号，不依赖 AuthContext 本身
    view! {
        <Router access=auth.access_signals()>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
