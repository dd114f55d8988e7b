use crate::api::use_dining;
use crate::auth::use_auth;
use crate::components::layout::{Empty, Page, render_state};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::task::ViewTasks;
use campus::ViewState;
use campus_shared::TopMenu;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let dining = use_dining();
    let is_admin = use_auth().is_admin();
    let tasks = ViewTasks::new();

    let top = RwSignal::new(ViewState::<Vec<TopMenu>>::Loading);
    tasks.load(top, async move { dining.top_rated_menus().await });

    let tiles = move || {
        let mut tiles = vec![
            ("Canteens", AppRoute::Canteens),
            ("Today's menus", AppRoute::TodayMenus),
            ("Dormitories", AppRoute::Doms),
            ("My profile", AppRoute::Profile),
        ];
        if is_admin.get() {
            tiles.push(("Housing administration", AppRoute::Housing));
        }
        tiles
            .into_iter()
            .map(|(label, route)| {
                view! {
                    <Link to=route.to_path() class="btn btn-outline h-20 text-lg">{label}</Link>
                }
            })
            .collect_view()
    };

    view! {
        <Page title="Welcome">
            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">{tiles}</div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Top rated menus"</h3>
                    {render_state(top, |menus: Vec<TopMenu>| {
                        if menus.is_empty() {
                            return view! { <Empty message="No ratings yet." /> }.into_any();
                        }
                        view! {
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr><th>"Menu"</th><th>"Score"</th></tr>
                                </thead>
                                <tbody>
                                    {menus
                                        .into_iter()
                                        .map(|m| view! {
                                            <tr>
                                                <td>{m.menu_name}</td>
                                                <td>{format!("{:.2}", m.score)}</td>
                                            </tr>
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        }
                        .into_any()
                    })}
                </div>
            </div>
        </Page>
    }
}
