use crate::api::use_dining;
use crate::auth::use_auth;
use crate::components::layout::{Empty, Notice, NoticeBar, Page, TextField, render_state};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::task::ViewTasks;
use campus::ViewState;
use campus_shared::date::parse_time_of_day;
use campus_shared::{Canteen, NewCanteen};
use chrono::Utc;
use leptos::prelude::*;

fn hours(c: &Canteen) -> String {
    format!("{} - {}", c.open_at.format("%H:%M"), c.close_at.format("%H:%M"))
}

#[component]
pub fn CanteensPage() -> impl IntoView {
    let dining = use_dining();
    let is_admin = use_auth().is_admin();
    let tasks = ViewTasks::new();

    let canteens = RwSignal::new(ViewState::<Vec<Canteen>>::Loading);
    let notice: Notice = RwSignal::new(None);
    {
        let dining = dining.clone();
        tasks.load(canteens, async move { dining.list_canteens().await });
    }

    let name = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let open_at = RwSignal::new(String::new());
    let close_at = RwSignal::new(String::new());

    let on_create = {
        let dining = dining.clone();
        let tasks = tasks.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let (Some(open), Some(close)) = (
                parse_time_of_day(&open_at.get_untracked()),
                parse_time_of_day(&close_at.get_untracked()),
            ) else {
                notice.set(Some(("Opening and closing time are required.".into(), true)));
                return;
            };
            let form = NewCanteen {
                name: name.get_untracked(),
                address: address.get_untracked(),
                open_at: open,
                close_at: close,
            };
            let dining = dining.clone();
            tasks.spawn(async move {
                match campus::actions::create_canteen(&dining, &form).await {
                    Ok(created) => {
                        notice.set(Some((format!("Canteen \"{}\" created.", created.name), false)));
                        canteens.update(|s| {
                            if let Some(list) = s.data_mut() {
                                list.push(created);
                            }
                        });
                        name.set(String::new());
                        address.set(String::new());
                    }
                    Err(e) => notice.set(Some((e.message, true))),
                }
            });
        }
    };

    let on_delete = move |id: String| {
        let dining = dining.clone();
        tasks.spawn(async move {
            match dining.delete_canteen(&id).await {
                Ok(_) => canteens.update(|s| {
                    if let Some(list) = s.data_mut() {
                        list.retain(|c| c.id != id);
                    }
                }),
                Err(e) => notice.set(Some((e.message, true))),
            }
        });
    };

    view! {
        <Page title="Canteens">
            <NoticeBar notice=notice />
            <Show when=move || is_admin.get()>
                <form class="card bg-base-100 shadow-xl card-body grid md:grid-cols-2 gap-2" on:submit=on_create.clone()>
                    <TextField label="Name" value=name />
                    <TextField label="Address" value=address />
                    <TextField label="Opens" value=open_at input_type="time" />
                    <TextField label="Closes" value=close_at input_type="time" />
                    <button class="btn btn-primary md:col-span-2">"Add canteen"</button>
                </form>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0 overflow-x-auto">
                    {render_state(canteens, move |list: Vec<Canteen>| {
                        if list.is_empty() {
                            return view! { <Empty message="No canteens yet." /> }.into_any();
                        }
                        let on_delete = on_delete.clone();
                        view! {
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr><th>"Name"</th><th>"Address"</th><th>"Hours"</th><th></th></tr>
                                </thead>
                                <tbody>
                                    {list
                                        .into_iter()
                                        .map(|c| {
                                            let working_hours = hours(&c);
                                            let Canteen { id, name, address, .. } = c;
                                            let detail = AppRoute::CanteenDetail(id.clone()).to_path();
                                            let menus = AppRoute::Menus(id.clone()).to_path();
                                            let on_delete = on_delete.clone();
                                            view! {
                                                <tr>
                                                    <td>
                                                        <Link to=detail class="link">{name}</Link>
                                                    </td>
                                                    <td>{address}</td>
                                                    <td>{working_hours}</td>
                                                    <td class="flex gap-2">
                                                        <Link to=menus class="btn btn-sm">"Menus"</Link>
                                                        <Show when=move || is_admin.get()>
                                                            {
                                                                let id = id.clone();
                                                                let on_delete = on_delete.clone();
                                                                view! {
                                                                    <button class="btn btn-sm btn-error btn-outline" on:click=move |_| on_delete(id.clone())>
                                                                        "Delete"
                                                                    </button>
                                                                }
                                                            }
                                                        </Show>
                                                    </td>
                                                </tr>
                                            }
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

#[component]
pub fn CanteenDetailPage(id: String) -> impl IntoView {
    let dining = use_dining();
    let tasks = ViewTasks::new();

    let canteen = RwSignal::new(ViewState::<Canteen>::Loading);
    {
        let id = id.clone();
        tasks.load(canteen, async move { dining.get_canteen(&id).await });
    }

    view! {
        <Page title="Canteen">
            {render_state(canteen, |c: Canteen| {
                let open_now = c.is_open_at(Utc::now());
                view! {
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h2 class="card-title">
                                {c.name.clone()}
                                {if open_now {
                                    view! { <span class="badge badge-success">"Open"</span> }.into_any()
                                } else {
                                    view! { <span class="badge badge-ghost">"Closed"</span> }.into_any()
                                }}
                            </h2>
                            <p>{c.address.clone()}</p>
                            <p class="text-base-content/70">"Working hours: " {hours(&c)}</p>
                            <div class="card-actions">
                                <Link to=AppRoute::Menus(c.id.clone()).to_path() class="btn btn-primary">"Menus"</Link>
                                <Link to=AppRoute::Canteens.to_path() class="btn btn-ghost">"Back"</Link>
                            </div>
                        </div>
                    </div>
                }
            })}
        </Page>
    }
}
