use crate::api::{use_dining, use_housing, use_identity};
use crate::auth::use_auth;
use crate::components::layout::{Empty, Notice, NoticeBar, Page, render_state};
use crate::web::task::ViewTasks;
use campus::actions::rate_meal;
use campus::{ApiErrorStatus, ViewState};
use campus_shared::{MealHistoryEntry, NewMenuReview, StudentCard, User};
use leptos::prelude::*;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let identity = use_identity();
    let dining = use_dining();
    let housing = use_housing();
    let tasks = ViewTasks::new();

    let user_id = auth.user_id().unwrap_or_default();
    let username = auth.username().unwrap_or_default();

    let user = RwSignal::new(ViewState::<User>::Loading);
    let history = RwSignal::new(ViewState::<Vec<MealHistoryEntry>>::Loading);
    let card = RwSignal::new(None::<StudentCard>);
    let notice: Notice = RwSignal::new(None);

    {
        let id = user_id.clone();
        tasks.load(user, async move { identity.get_user(&id).await });
    }
    {
        let dining = dining.clone();
        let id = user_id.clone();
        tasks.load(history, async move { dining.meal_history(&id).await });
    }
    {
        let housing = housing.clone();
        let username = username.clone();
        tasks.spawn(async move {
            match housing.get_student_card(&username).await {
                Ok(c) => card.set(Some(c)),
                // no card yet is the normal state before the first one is created
                Err(e) if e.status == ApiErrorStatus::NotFound => card.set(None),
                Err(e) => notice.set(Some((e.message, true))),
            }
        });
    }

    let on_create_card = {
        let tasks = tasks.clone();
        move |_: leptos::ev::MouseEvent| {
            let housing = housing.clone();
            let username = username.clone();
            tasks.spawn(async move {
                match housing.create_student_card_if_missing(&username).await {
                    Ok(c) => {
                        notice.set(Some(("Student card ready.".into(), false)));
                        card.set(Some(c));
                    }
                    Err(e) => notice.set(Some((e.message, true))),
                }
            });
        }
    };

    let on_rate = move |menu_id: String, ratings: [u8; 3]| {
        let review = NewMenuReview {
            menu_id: menu_id.clone(),
            user_id: user_id.clone(),
            breakfast_review: ratings[0],
            lunch_review: ratings[1],
            dinner_review: ratings[2],
        };
        let dining = dining.clone();
        tasks.spawn(async move {
            match rate_meal(&dining, &review).await {
                Ok(created) => {
                    notice.set(Some(("Thanks for the rating!".into(), false)));
                    history.update(|s| {
                        if let Some(list) = s.data_mut() {
                            for entry in list.iter_mut().filter(|e| e.menu_id.as_deref() == Some(menu_id.as_str())) {
                                entry.review = Some(created.clone());
                            }
                        }
                    });
                }
                Err(e) => notice.set(Some((e.message, true))),
            }
        });
    };

    view! {
        <Page title="My profile">
            <NoticeBar notice=notice />
            <div class="grid md:grid-cols-2 gap-4">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        {render_state(user, |u: User| view! {
                            <h2 class="card-title">{u.full_name()}</h2>
                            <p>{u.username.clone()} " · " {u.email.clone()}</p>
                            <p class="badge badge-outline">{u.role.clone()}</p>
                        })}
                    </div>
                </div>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Student card"</h3>
                        {move || match card.get() {
                            Some(c) => view! {
                                <p class="text-2xl">{format!("{:.2}", c.stanje)}</p>
                            }
                            .into_any(),
                            None => view! {
                                <button class="btn btn-primary" on:click=on_create_card.clone()>"Create my card"</button>
                            }
                            .into_any(),
                        }}
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Meal history"</h3>
                    {render_state(history, move |entries: Vec<MealHistoryEntry>| {
                        if entries.is_empty() {
                            return view! { <Empty message="No meals yet." /> }.into_any();
                        }
                        let on_rate = on_rate.clone();
                        view! {
                            <table class="table w-full">
                                <thead>
                                    <tr><th>"Menu"</th><th>"When"</th><th>"Rating"</th></tr>
                                </thead>
                                <tbody>
                                    {entries
                                        .into_iter()
                                        .map(|e| {
                                            let on_rate = on_rate.clone();
                                            view! {
                                                <tr>
                                                    <td>{e.menu_name.clone()}</td>
                                                    <td>{e.selected_at.format("%d.%m.%Y %H:%M").to_string()}</td>
                                                    <td>
                                                        {match (e.review, e.menu_id) {
                                                            (Some(r), _) => format!(
                                                                "{} / {} / {}",
                                                                r.breakfast_review, r.lunch_review, r.dinner_review
                                                            )
                                                            .into_any(),
                                                            (None, Some(menu_id)) => view! {
                                                                <RateForm on_rate=move |ratings: [u8; 3]| on_rate(menu_id.clone(), ratings) />
                                                            }
                                                            .into_any(),
                                                            (None, None) => "-".into_any(),
                                                        }}
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

/// Three 1-5 selects (breakfast, lunch, dinner) and a submit button.
#[component]
fn RateForm(#[prop(into)] on_rate: Callback<[u8; 3]>) -> impl IntoView {
    let ratings = RwSignal::new([5u8; 3]);
    let select = move |i: usize| {
        view! {
            <select
                class="select select-bordered select-xs"
                on:change=move |ev| {
                    if let Ok(v) = event_target_value(&ev).parse::<u8>() {
                        ratings.update(|r| r[i] = v);
                    }
                }
            >
                {(1..=5u8)
                    .rev()
                    .map(|v| view! { <option value=v.to_string()>{v}</option> })
                    .collect_view()}
            </select>
        }
    };

    view! {
        <div class="flex gap-1 items-center">
            {select(0)}
            {select(1)}
            {select(2)}
            <button class="btn btn-xs btn-primary" on:click=move |_| on_rate.run(ratings.get_untracked())>
                "Rate"
            </button>
        </div>
    }
}
