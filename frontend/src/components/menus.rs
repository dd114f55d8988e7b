use crate::api::{use_config, use_dining};
use crate::auth::use_auth;
use crate::components::layout::{Empty, Notice, NoticeBar, Page, TextField, render_state};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::task::ViewTasks;
use campus::ViewState;
use campus::task::with_timeout;
use campus_shared::{DiningMenu, Meal, Menu, NewMenu, Weekday};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

fn meal_line(label: &'static str, meal: &Meal) -> impl IntoView + use<> {
    view! {
        <li>
            <span class="font-semibold">{label} ": "</span>
            {meal.name.clone()}
            <span class="badge badge-ghost ml-2">{format!("{:.2}", meal.price)}</span>
        </li>
    }
}

/// Name + price inputs for one meal of the create form.
#[derive(Clone, Copy)]
struct MealInput {
    name: RwSignal<String>,
    price: RwSignal<String>,
}

impl MealInput {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
        }
    }

    /// Unparseable prices become NaN and are rejected by validation.
    fn meal(&self) -> Meal {
        Meal {
            name: self.name.get_untracked(),
            description: String::new(),
            price: self.price.get_untracked().trim().parse().unwrap_or(f64::NAN),
        }
    }
}

#[component]
pub fn MenusPage(canteen_id: String) -> impl IntoView {
    let dining = use_dining();
    let auth = use_auth();
    let is_admin = auth.is_admin();
    let tasks = ViewTasks::new();

    let menus = RwSignal::new(ViewState::<Vec<Menu>>::Loading);
    let notice: Notice = RwSignal::new(None);
    {
        let dining = dining.clone();
        let canteen_id = canteen_id.clone();
        tasks.load(menus, async move { dining.list_menus(&canteen_id).await });
    }

    let name = RwSignal::new(String::new());
    let weekday = RwSignal::new(Weekday::Monday);
    let (breakfast, lunch, dinner) = (MealInput::new(), MealInput::new(), MealInput::new());

    let on_create = {
        let dining = dining.clone();
        let tasks = tasks.clone();
        let canteen_id = canteen_id.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let form = NewMenu {
                name: name.get_untracked(),
                canteen_id: canteen_id.clone(),
                weekday: weekday.get_untracked(),
                breakfast: breakfast.meal(),
                lunch: lunch.meal(),
                dinner: dinner.meal(),
            };
            let dining = dining.clone();
            tasks.spawn(async move {
                match campus::actions::create_menu(&dining, &form).await {
                    Ok(menu) => {
                        notice.set(Some((format!("Menu \"{}\" created.", menu.name), false)));
                        menus.update(|s| {
                            if let Some(list) = s.data_mut() {
                                list.push(menu);
                            }
                        });
                    }
                    Err(e) => notice.set(Some((e.message, true))),
                }
            });
        }
    };

    let on_delete = move |id: String| {
        let dining = dining.clone();
        tasks.spawn(async move {
            match dining.delete_menu(&id).await {
                Ok(_) => menus.update(|s| {
                    if let Some(list) = s.data_mut() {
                        list.retain(|m| m.id != id);
                    }
                }),
                Err(e) => notice.set(Some((e.message, true))),
            }
        });
    };

    let meal_fields = |label: &'static str, input: MealInput| {
        view! {
            <TextField label=format!("{label} name") value=input.name />
            <TextField label=format!("{label} price") value=input.price input_type="number" />
        }
    };

    view! {
        <Page title="Menus">
            <NoticeBar notice=notice />
            <Show when=move || is_admin.get()>
                <form class="card bg-base-100 shadow-xl card-body grid md:grid-cols-2 gap-2" on:submit=on_create.clone()>
                    <TextField label="Menu name" value=name />
                    <label class="form-control w-full">
                        <div class="label"><span class="label-text">"Day"</span></div>
                        <select
                            class="select select-bordered"
                            on:change=move |ev| {
                                if let Some(day) = Weekday::parse(&event_target_value(&ev)) {
                                    weekday.set(day);
                                }
                            }
                        >
                            {Weekday::ALL
                                .into_iter()
                                .map(|d| view! { <option value=d.as_str()>{d.as_str()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    {meal_fields("Breakfast", breakfast)}
                    {meal_fields("Lunch", lunch)}
                    {meal_fields("Dinner", dinner)}
                    <button class="btn btn-primary md:col-span-2">"Add menu"</button>
                </form>
            </Show>

            {render_state(menus, move |list: Vec<Menu>| {
                if list.is_empty() {
                    return view! { <Empty message="This canteen has no menus." /> }.into_any();
                }
                let on_delete = on_delete.clone();
                view! {
                    <div class="grid md:grid-cols-2 gap-4">
                        {list
                            .into_iter()
                            .map(|m| {
                                let id = m.id.clone();
                                let on_delete = on_delete.clone();
                                view! {
                                    <div class="card bg-base-100 shadow-xl">
                                        <div class="card-body">
                                            <h3 class="card-title">{m.name.clone()} <span class="badge">{m.weekday.as_str()}</span></h3>
                                            <ul>
                                                {meal_line("Breakfast", &m.breakfast)}
                                                {meal_line("Lunch", &m.lunch)}
                                                {meal_line("Dinner", &m.dinner)}
                                            </ul>
                                            <div class="card-actions justify-end">
                                                {if is_admin.get_untracked() {
                                                    view! {
                                                        <button class="btn btn-sm btn-error btn-outline" on:click=move |_| on_delete(id.clone())>
                                                            "Delete"
                                                        </button>
                                                    }
                                                    .into_any()
                                                } else {
                                                    view! {
                                                        <Link to=AppRoute::Meal(m.id.clone()).to_path() class="btn btn-sm btn-primary">
                                                            "Buy"
                                                        </Link>
                                                    }
                                                    .into_any()
                                                }}
                                            </div>
                                        </div>
                                    </div>
                                }
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
pub fn TodayMenusPage() -> impl IntoView {
    let dining = use_dining();
    let timeout = use_config().today_menus_timeout;
    let tasks = ViewTasks::new();

    let menus = RwSignal::new(ViewState::<Vec<DiningMenu>>::Loading);
    tasks.load(menus, async move {
        let timer = TimeoutFuture::new(timeout.as_millis().min(u32::MAX as u128) as u32);
        with_timeout(dining.today_menus(), timer).await
    });

    view! {
        <Page title="Today's menus">
            {render_state(menus, |list: Vec<DiningMenu>| {
                if list.is_empty() {
                    return view! { <Empty message="No menus are served today." /> }.into_any();
                }
                list.into_iter()
                    .map(|m| {
                        let meals = [("Breakfast", m.breakfast), ("Lunch", m.lunch), ("Dinner", m.dinner)];
                        view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h3 class="card-title">{m.name}</h3>
                                    <p class="text-base-content/70">{m.canteen_name.unwrap_or_default()}</p>
                                    <ul>
                                        {meals
                                            .into_iter()
                                            .filter_map(|(label, meal)| meal.map(|meal| meal_line(label, &meal)))
                                            .collect_view()}
                                    </ul>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            })}
        </Page>
    }
}
