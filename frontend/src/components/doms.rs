use crate::api::use_housing;
use crate::components::layout::{Empty, Page, render_state};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::task::ViewTasks;
use campus::ViewState;
use campus_shared::Dom;
use leptos::prelude::*;
use uuid::Uuid;

#[component]
pub fn DomsPage() -> impl IntoView {
    let housing = use_housing();
    let tasks = ViewTasks::new();

    let doms = RwSignal::new(ViewState::<Vec<Dom>>::Loading);
    tasks.load(doms, async move { housing.list_doms().await });

    view! {
        <Page title="Dormitories">
            {render_state(doms, |list: Vec<Dom>| {
                if list.is_empty() {
                    return view! { <Empty message="No dormitories." /> }.into_any();
                }
                view! {
                    <div class="grid md:grid-cols-3 gap-4">
                        {list
                            .into_iter()
                            .map(|d| view! {
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h3 class="card-title">{d.naziv.clone()}</h3>
                                        <p>{d.adresa.clone()}</p>
                                        <div class="card-actions justify-end">
                                            <Link to=AppRoute::DomDetail(d.id).to_path() class="btn btn-sm">"Details"</Link>
                                            <Link to={AppRoute::FreeRooms { dom_id: d.id }.to_path()} class="btn btn-sm btn-primary">
                                                "Free rooms"
                                            </Link>
                                        </div>
                                    </div>
                                </div>
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            })}
        </Page>
    }
}

#[component]
pub fn DomDetailPage(id: Uuid) -> impl IntoView {
    let housing = use_housing();
    let tasks = ViewTasks::new();

    let dom = RwSignal::new(ViewState::<Dom>::Loading);
    tasks.load(dom, async move { housing.get_dom(id).await });

    view! {
        <Page title="Dormitory">
            {render_state(dom, |d: Dom| view! {
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">{d.naziv.clone()}</h2>
                        <p>{d.adresa.clone()}</p>
                        <div class="card-actions">
                            <Link to={AppRoute::FreeRooms { dom_id: d.id }.to_path()} class="btn btn-primary">"Free rooms"</Link>
                            <Link to=AppRoute::Doms.to_path() class="btn btn-ghost">"Back"</Link>
                        </div>
                    </div>
                </div>
            })}
        </Page>
    }
}
