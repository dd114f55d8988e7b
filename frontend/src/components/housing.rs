//! Housing administration (admin only).

use crate::api::use_housing;
use crate::components::layout::{Notice, NoticeBar, Page, TextField};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::task::ViewTasks;
use campus::actions::{adjust_card_balance, create_student, report_fault};
use campus_shared::{FaultStatus, StudentCard};
use leptos::prelude::*;
use uuid::Uuid;

fn parse_id(label: &str, raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("{label} is not a valid id."))
}

#[component]
pub fn HousingDashboardPage() -> impl IntoView {
    let sections = [
        ("Students", "Create students, release rooms", AppRoute::HousingStudents),
        ("Student cards", "Create cards, check and adjust balances", AppRoute::HousingCards),
        ("Faults", "Report faults, change their status", AppRoute::HousingFaults),
        ("Dormitories", "Rooms, occupancy and assignments", AppRoute::Doms),
    ];

    view! {
        <Page title="Housing administration">
            <div class="grid md:grid-cols-2 gap-4">
                {sections
                    .into_iter()
                    .map(|(title, desc, route)| view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <h3 class="card-title">{title}</h3>
                                <p class="text-base-content/70">{desc}</p>
                                <div class="card-actions justify-end">
                                    <Link to=route.to_path() class="btn btn-primary btn-sm">"Open"</Link>
                                </div>
                            </div>
                        </div>
                    })
                    .collect_view()}
            </div>
        </Page>
    }
}

#[component]
pub fn HousingStudentsPage() -> impl IntoView {
    let housing = use_housing();
    let tasks = ViewTasks::new();
    let notice: Notice = RwSignal::new(None);

    let ime = RwSignal::new(String::new());
    let prezime = RwSignal::new(String::new());
    let release_id = RwSignal::new(String::new());

    let on_create = {
        let housing = housing.clone();
        let tasks = tasks.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let housing = housing.clone();
            let (first, last) = (ime.get_untracked(), prezime.get_untracked());
            tasks.spawn(async move {
                match create_student(&housing, &first, &last).await {
                    Ok(s) => {
                        notice.set(Some((format!("Created {} {} ({}).", s.ime, s.prezime, s.id), false)));
                        ime.set(String::new());
                        prezime.set(String::new());
                    }
                    Err(e) => notice.set(Some((e.message, true))),
                }
            });
        }
    };

    let on_release = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let student_id = match parse_id("Student", &release_id.get_untracked()) {
            Ok(id) => id,
            Err(msg) => {
                notice.set(Some((msg, true)));
                return;
            }
        };
        let housing = housing.clone();
        tasks.spawn(async move {
            match housing.release_student_room(student_id).await {
                Ok(res) => notice.set(Some((format!("Room released: {}", res.status), false))),
                Err(e) => notice.set(Some((e.message, true))),
            }
        });
    };

    view! {
        <Page title="Students">
            <NoticeBar notice=notice />
            <div class="grid md:grid-cols-2 gap-4">
                <form class="card bg-base-100 shadow-xl card-body" on:submit=on_create>
                    <h3 class="card-title">"New student"</h3>
                    <TextField label="First name" value=ime />
                    <TextField label="Last name" value=prezime />
                    <button class="btn btn-primary">"Create"</button>
                </form>
                <form class="card bg-base-100 shadow-xl card-body" on:submit=on_release>
                    <h3 class="card-title">"Release room"</h3>
                    <TextField label="Student id" value=release_id />
                    <button class="btn btn-warning">"Release"</button>
                </form>
            </div>
        </Page>
    }
}

#[component]
pub fn HousingCardsPage() -> impl IntoView {
    let housing = use_housing();
    let tasks = ViewTasks::new();
    let notice: Notice = RwSignal::new(None);
    let card = RwSignal::new(None::<StudentCard>);

    let username = RwSignal::new(String::new());
    let delta = RwSignal::new(String::new());

    #[derive(Clone, Copy)]
    enum CardAction {
        Create,
        Get,
        Adjust,
    }

    let run = move |action: CardAction| {
        let housing = housing.clone();
        let user = username.get_untracked();
        let amount = delta.get_untracked().trim().parse::<f64>().unwrap_or(f64::NAN);
        notice.set(None);
        tasks.spawn(async move {
            let res = match action {
                CardAction::Create => housing.create_student_card_if_missing(user.trim()).await,
                CardAction::Get => housing.get_student_card(user.trim()).await,
                CardAction::Adjust => adjust_card_balance(&housing, &user, amount).await,
            };
            match res {
                Ok(c) => card.set(Some(c)),
                Err(e) => {
                    card.set(None);
                    notice.set(Some((e.message, true)));
                }
            }
        });
    };

    view! {
        <Page title="Student cards">
            <NoticeBar notice=notice />
            <div class="card bg-base-100 shadow-xl card-body max-w-xl">
                <TextField label="Student username" value=username />
                <div class="flex gap-2">
                    <button class="btn" on:click={let run = run.clone(); move |_| run(CardAction::Get)}>"Look up"</button>
                    <button class="btn btn-primary" on:click={let run = run.clone(); move |_| run(CardAction::Create)}>
                        "Create if missing"
                    </button>
                </div>
                <TextField label="Balance change" value=delta input_type="number" />
                <button class="btn btn-secondary" on:click=move |_| run(CardAction::Adjust)>"Apply"</button>
            </div>
            {move || card.get().map(|c| view! {
                <div class="stats shadow bg-base-100">
                    <div class="stat">
                        <div class="stat-title">{c.student_username}</div>
                        <div class="stat-value text-primary">{format!("{:.2}", c.stanje)}</div>
                        <div class="stat-desc">{c.id.to_string()}</div>
                    </div>
                </div>
            })}
        </Page>
    }
}

#[component]
pub fn HousingFaultsPage() -> impl IntoView {
    let housing = use_housing();
    let tasks = ViewTasks::new();
    let notice: Notice = RwSignal::new(None);

    let soba_id = RwSignal::new(String::new());
    let reporter = RwSignal::new(String::new());
    let opis = RwSignal::new(String::new());
    let kvar_id = RwSignal::new(String::new());
    let status = RwSignal::new(FaultStatus::UToku);

    let on_report = {
        let housing = housing.clone();
        let tasks = tasks.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let room = match parse_id("Room", &soba_id.get_untracked()) {
                Ok(id) => id,
                Err(msg) => return notice.set(Some((msg, true))),
            };
            let housing = housing.clone();
            let (user, description) = (reporter.get_untracked(), opis.get_untracked());
            tasks.spawn(async move {
                match report_fault(&housing, room, &user, &description).await {
                    Ok(k) => notice.set(Some((format!("Fault {} reported.", k.id), false))),
                    Err(e) => notice.set(Some((e.message, true))),
                }
            });
        }
    };

    let on_status = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let id = match parse_id("Fault", &kvar_id.get_untracked()) {
            Ok(id) => id,
            Err(msg) => return notice.set(Some((msg, true))),
        };
        let housing = housing.clone();
        let new_status = status.get_untracked();
        tasks.spawn(async move {
            match housing.change_fault_status(id, new_status).await {
                Ok(_) => notice.set(Some((format!("Status set to \"{}\".", new_status.label()), false))),
                Err(e) => notice.set(Some((e.message, true))),
            }
        });
    };

    view! {
        <Page title="Faults">
            <NoticeBar notice=notice />
            <div class="grid md:grid-cols-2 gap-4">
                <form class="card bg-base-100 shadow-xl card-body" on:submit=on_report>
                    <h3 class="card-title">"Report fault"</h3>
                    <TextField label="Room id" value=soba_id />
                    <TextField label="Reported by (username)" value=reporter />
                    <TextField label="Description" value=opis />
                    <button class="btn btn-primary">"Report"</button>
                </form>
                <form class="card bg-base-100 shadow-xl card-body" on:submit=on_status>
                    <h3 class="card-title">"Change status"</h3>
                    <TextField label="Fault id" value=kvar_id />
                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            if let Some(s) = FaultStatus::parse(&event_target_value(&ev)) {
                                status.set(s);
                            }
                        }
                    >
                        {FaultStatus::ALL
                            .into_iter()
                            .map(|s| view! {
                                <option value=s.as_str() selected={s == FaultStatus::UToku}>{s.label()}</option>
                            })
                            .collect_view()}
                    </select>
                    <button class="btn btn-secondary">"Update"</button>
                </form>
            </div>
        </Page>
    }
}
