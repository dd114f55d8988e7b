use crate::api::use_dining;
use crate::auth::use_auth;
use crate::components::layout::{Notice, NoticeBar, Page, render_state};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::task::ViewTasks;
use campus::ViewState;
use campus::actions::{MealSelection, MealSlot, check_purchase, purchase_meal};
use campus_shared::{Meal, MenuWithCard};
use leptos::prelude::*;

#[component]
pub fn MealPage(menu_id: String) -> impl IntoView {
    let dining = use_dining();
    let auth = use_auth();
    let tasks = ViewTasks::new();

    let data = RwSignal::new(ViewState::<MenuWithCard>::Loading);
    let selection = RwSignal::new(MealSelection::default());
    let notice: Notice = RwSignal::new(None);
    let (is_submitting, set_is_submitting) = signal(false);

    {
        let dining = dining.clone();
        let student = auth.user_id().unwrap_or_default();
        tasks.load(data, async move { dining.get_menu_with_card(&menu_id, &student).await });
    }

    let total = move || {
        data.with(|s| s.data().map(|d| selection.get().total(&d.menu)))
            .unwrap_or_default()
    };

    let on_buy = move |_: leptos::ev::MouseEvent| {
        let Some(MenuWithCard { menu, card }) = data.get_untracked().data().cloned() else {
            return;
        };
        let picked = selection.get_untracked();
        if let Err(e) = check_purchase(&menu, card.as_ref(), picked) {
            notice.set(Some((e.to_string(), true)));
            return;
        }

        let username = auth.username().unwrap_or_default();
        let dining = dining.clone();
        set_is_submitting.set(true);
        tasks.spawn(async move {
            match purchase_meal(&dining, &menu, card.as_ref(), picked, &username).await {
                Ok(balance) => {
                    notice.set(Some(("Meal successfully purchased!".into(), false)));
                    data.update(|s| {
                        if let Some(card) = s.data_mut().and_then(|d| d.card.as_mut()) {
                            card.stanje = balance;
                        }
                    });
                    selection.set(MealSelection::default());
                }
                Err(e) => notice.set(Some((e.message, true))),
            }
            set_is_submitting.set(false);
        });
    };

    let checkbox = move |slot: MealSlot, meal: &Meal| {
        let line = format!("{}: {} ({:.2})", slot.label(), meal.name, meal.price);
        view! {
            <label class="label cursor-pointer justify-start gap-4">
                <input
                    type="checkbox"
                    class="checkbox checkbox-primary"
                    prop:checked=move || selection.get().is_picked(slot)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        selection.update(|s| s.set(slot, checked));
                    }
                />
                <span class="label-text">{line}</span>
            </label>
        }
    };

    view! {
        <Page title="Buy a meal">
            <NoticeBar notice=notice />
            {render_state(data, move |d: MenuWithCard| {
                let on_buy = on_buy.clone();
                view! {
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <h2 class="card-title">{d.menu.name.clone()}</h2>
                            {MealSlot::ALL
                                .into_iter()
                                .map(|slot| checkbox(slot, slot.meal(&d.menu)))
                                .collect_view()}
                            <p class="text-lg">"Total: " {move || format!("{:.2}", total())}</p>
                            {match d.card {
                                Some(card) => view! {
                                    <p>"Card balance: " {format!("{:.2}", card.stanje)}</p>
                                }
                                .into_any(),
                                None => view! {
                                    <p class="text-warning">
                                        "You have no student card. "
                                        <Link to=AppRoute::Profile.to_path() class="link">"Create one on your profile."</Link>
                                    </p>
                                }
                                .into_any(),
                            }}
                            <div class="card-actions justify-end">
                                <button class="btn btn-primary" disabled=move || is_submitting.get() on:click=on_buy>
                                    "Buy"
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })}
        </Page>
    }
}
