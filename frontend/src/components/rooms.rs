use crate::api::use_housing;
use crate::auth::use_auth;
use crate::components::layout::{Empty, Notice, NoticeBar, Page, TextField, render_state};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use crate::web::task::ViewTasks;
use campus::ViewState;
use campus::actions::{assign_student, load_free_rooms, report_fault, submit_review};
use campus_shared::{FaultStatus, Room, RoomReview};
use leptos::prelude::*;
use uuid::Uuid;

fn status_class(status: FaultStatus) -> &'static str {
    match status {
        FaultStatus::Prijavljen => "badge badge-warning",
        FaultStatus::UToku => "badge badge-info",
        FaultStatus::Resen => "badge badge-success",
    }
}

/// Role-dependent actions for one room.
fn room_actions(room: &Room, is_admin: bool) -> impl IntoView + use<> {
    let detail = AppRoute::RoomDetail { id: room.id };
    let extra = if is_admin {
        vec![(
            "Assign student",
            AppRoute::AssignStudent {
                dom_id: room.dom_id,
                broj: room.broj.clone(),
            },
        )]
    } else {
        vec![
            ("Review", AppRoute::ReviewRoom { soba_id: room.id }),
            ("Report fault", AppRoute::ReportFault { soba_id: room.id }),
        ]
    };

    view! {
        <div class="card-actions justify-end">
            <Link to=detail.to_path() class="btn btn-sm">"Details"</Link>
            {extra
                .into_iter()
                .map(|(label, route)| view! { <Link to=route.to_path() class="btn btn-sm btn-primary">{label}</Link> })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn FreeRoomsPage(dom_id: Uuid) -> impl IntoView {
    let housing = use_housing();
    let is_admin = use_auth().is_admin();
    let tasks = ViewTasks::new();

    let rooms = RwSignal::new(ViewState::<Vec<Room>>::Loading);
    tasks.spawn(async move {
        rooms.set(load_free_rooms(&housing, dom_id).await);
    });

    view! {
        <Page title="Free rooms">
            {render_state(rooms, move |list: Vec<Room>| {
                if list.is_empty() {
                    return view! { <Empty message="This dormitory has no free rooms." /> }.into_any();
                }
                let admin = is_admin.get_untracked();
                view! {
                    <div class="grid md:grid-cols-3 gap-4">
                        {list
                            .into_iter()
                            .map(|room| view! {
                                <div class="card bg-base-100 shadow-xl">
                                    <div class="card-body">
                                        <h3 class="card-title">"Room " {room.broj.clone()}</h3>
                                        <p>"Capacity: " {room.kapacitet}</p>
                                        {room_actions(&room, admin)}
                                    </div>
                                </div>
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            })}
            <Link to=AppRoute::DomDetail(dom_id).to_path() class="btn btn-ghost">"Back to dormitory"</Link>
        </Page>
    }
}

#[component]
pub fn RoomDetailPage(id: Uuid) -> impl IntoView {
    let housing = use_housing();
    let is_admin = use_auth().is_admin();
    let tasks = ViewTasks::new();

    let room = RwSignal::new(ViewState::<Room>::Loading);
    tasks.load(room, async move { housing.get_room_detail(id).await });

    view! {
        <Page title="Room">
            {render_state(room, move |r: Room| {
                let occupied = r.studenti.len();
                let rating = r
                    .average_rating()
                    .map(|avg| format!("{:.1}", avg))
                    .unwrap_or_else(|| "-".to_string());
                view! {
                    <div class="stats shadow w-full bg-base-100">
                        <div class="stat">
                            <div class="stat-title">"Room"</div>
                            <div class="stat-value">{r.broj.clone()}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Occupied"</div>
                            <div class="stat-value">{occupied} " / " {r.kapacitet}</div>
                            <div class="stat-desc">{r.vacancies()} " free"</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Average rating"</div>
                            <div class="stat-value text-primary">{rating}</div>
                        </div>
                    </div>
                    {room_actions(&r, is_admin.get_untracked())}

                    <div class="grid md:grid-cols-3 gap-4">
                        <div class="card bg-base-100 shadow-xl card-body">
                            <h3 class="card-title">"Students"</h3>
                            <ul>
                                {r.studenti
                                    .iter()
                                    .map(|s| view! {
                                        <li>{format!("{} {}", s.ime, s.prezime)} " " <span class="opacity-50">{s.username.clone().unwrap_or_default()}</span></li>
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                        <div class="card bg-base-100 shadow-xl card-body">
                            <h3 class="card-title">"Reviews"</h3>
                            <ul class="space-y-2">
                                {r.recenzije
                                    .iter()
                                    .map(|rev| view! {
                                        <li>
                                            <span class="badge badge-primary">{rev.ocena}</span>
                                            " " {rev.autor_username.clone()}
                                            <p class="text-sm opacity-70">{rev.komentar.clone().unwrap_or_default()}</p>
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                        <div class="card bg-base-100 shadow-xl card-body">
                            <h3 class="card-title">"Faults"</h3>
                            <ul class="space-y-2">
                                {r.kvarovi
                                    .iter()
                                    .map(|k| view! {
                                        <li>
                                            <span class=status_class(k.status)>{k.status.label()}</span>
                                            " " {k.opis.clone()}
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                    </div>
                }
            })}
        </Page>
    }
}

#[component]
pub fn AssignStudentPage(dom_id: Uuid, broj: String) -> impl IntoView {
    let housing = use_housing();
    let tasks = ViewTasks::new();

    let room_number = RwSignal::new(broj);
    let username = RwSignal::new(String::new());
    let notice: Notice = RwSignal::new(None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let housing = housing.clone();
        let (broj, user) = (room_number.get_untracked(), username.get_untracked());
        set_is_submitting.set(true);
        notice.set(None);
        tasks.spawn(async move {
            match assign_student(&housing, dom_id, &broj, &user).await {
                Ok(s) => {
                    notice.set(Some((format!("{} {} moved into room {}.", s.ime, s.prezime, broj), false)));
                    username.set(String::new());
                }
                Err(e) => notice.set(Some((e.message, true))),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <Page title="Assign student to room">
            <form class="card bg-base-100 shadow-xl card-body max-w-md" on:submit=on_submit>
                <NoticeBar notice=notice />
                <TextField label="Room number" value=room_number />
                <TextField label="Student username" value=username />
                <button class="btn btn-primary" disabled=move || is_submitting.get()>"Assign"</button>
                <Link to={AppRoute::FreeRooms { dom_id }.to_path()} class="btn btn-ghost">"Back"</Link>
            </form>
        </Page>
    }
}

#[component]
pub fn ReviewRoomPage(soba_id: Uuid) -> impl IntoView {
    let housing = use_housing();
    let auth = use_auth();
    let tasks = ViewTasks::new();

    let reviews = RwSignal::new(ViewState::<Vec<RoomReview>>::Loading);
    {
        let housing = housing.clone();
        tasks.load(reviews, async move {
            housing.get_room_detail(soba_id).await.map(|r| r.recenzije)
        });
    }

    let ocena = RwSignal::new(5u8);
    let komentar = RwSignal::new(String::new());
    let notice: Notice = RwSignal::new(None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let housing = housing.clone();
        let author = auth.username().unwrap_or_default();
        let (rating, comment) = (ocena.get_untracked(), komentar.get_untracked());
        let mut current = reviews.get_untracked().data().cloned().unwrap_or_default();
        tasks.spawn(async move {
            match submit_review(&housing, &mut current, soba_id, &author, rating, &comment).await {
                Ok(_) => {
                    notice.set(Some(("Thank you for your review.".into(), false)));
                    reviews.set(ViewState::Success(current));
                    komentar.set(String::new());
                }
                Err(e) => notice.set(Some((e.message, true))),
            }
        });
    };

    view! {
        <Page title="Review room">
            <form class="card bg-base-100 shadow-xl card-body max-w-md" on:submit=on_submit>
                <NoticeBar notice=notice />
                <label class="form-control">
                    <div class="label"><span class="label-text">"Rating"</span></div>
                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            if let Ok(v) = event_target_value(&ev).parse::<u8>() {
                                ocena.set(v);
                            }
                        }
                    >
                        {(1..=5u8).rev().map(|v| view! { <option value=v.to_string()>{v}</option> }).collect_view()}
                    </select>
                </label>
                <label class="form-control">
                    <div class="label"><span class="label-text">"Comment (optional)"</span></div>
                    <textarea
                        class="textarea textarea-bordered"
                        prop:value=move || komentar.get()
                        on:input=move |ev| komentar.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <button class="btn btn-primary">"Submit"</button>
                <Link to={AppRoute::RoomDetail { id: soba_id }.to_path()} class="btn btn-ghost">"Back to room"</Link>
            </form>

            <div class="card bg-base-100 shadow-xl card-body">
                <h3 class="card-title">"Reviews"</h3>
                {render_state(reviews, |list: Vec<RoomReview>| {
                    if list.is_empty() {
                        return view! { <Empty message="No reviews yet." /> }.into_any();
                    }
                    list.into_iter()
                        .map(|r| view! {
                            <p>
                                <span class="badge badge-primary">{r.ocena}</span>
                                " " {r.autor_username} ": " {r.komentar.unwrap_or_default()}
                            </p>
                        })
                        .collect_view()
                        .into_any()
                })}
            </div>
        </Page>
    }
}

#[component]
pub fn ReportFaultPage(soba_id: Uuid) -> impl IntoView {
    let housing = use_housing();
    let auth = use_auth();
    let tasks = ViewTasks::new();

    let opis = RwSignal::new(String::new());
    let notice: Notice = RwSignal::new(None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let housing = housing.clone();
        let username = auth.username().unwrap_or_default();
        let description = opis.get_untracked();
        tasks.spawn(async move {
            match report_fault(&housing, soba_id, &username, &description).await {
                Ok(_) => {
                    notice.set(Some(("Fault reported.".into(), false)));
                    opis.set(String::new());
                }
                Err(e) => notice.set(Some((e.message, true))),
            }
        });
    };

    view! {
        <Page title="Report a fault">
            <form class="card bg-base-100 shadow-xl card-body max-w-md" on:submit=on_submit>
                <NoticeBar notice=notice />
                <label class="form-control">
                    <div class="label"><span class="label-text">"What is broken?"</span></div>
                    <textarea
                        class="textarea textarea-bordered"
                        prop:value=move || opis.get()
                        on:input=move |ev| opis.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <button class="btn btn-primary">"Report"</button>
                <Link to={AppRoute::RoomDetail { id: soba_id }.to_path()} class="btn btn-ghost">"Back to room"</Link>
            </form>
        </Page>
    }
}
