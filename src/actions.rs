//! User intents that need more than a single gateway call: client-side
//! checks, session bookkeeping, and mapping of conflict responses onto the
//! messages views render.

use crate::api::{DiningApi, HousingApi, IdentityApi};
use crate::error::{ApiError, ApiErrorStatus, ApiResult};
use crate::request::HttpClient;
use crate::session::{KeyValueStore, Session, SessionStore};
use crate::validation::{self, ValidationError};
use crate::view_state::ViewState;
use campus_shared::{
    Fault, LoginRequest, Meal, Menu, NewCanteen, NewFault, NewMenu, NewMenuReview, NewRoomReview,
    RegisterRequest, Room, RoomReview, Student, StudentCard, TakeMealRequest, User,
};
use uuid::Uuid;

pub const MSG_ALREADY_REVIEWED: &str = "You have already reviewed this room.";
pub const MSG_ROOM_FULL: &str = "The room is full.";
pub const MSG_FAULT_ALREADY_REPORTED: &str = "You have already reported a fault for this room.";

/// Replaces the message of a 409 with `message`; other errors pass through.
fn on_conflict(err: ApiError, message: &str) -> ApiError {
    if err.is_conflict() {
        ApiError {
            message: message.to_string(),
            ..err
        }
    } else {
        err
    }
}

fn rejected(op: &str, err: ValidationError) -> ApiError {
    crate::log_warn!("[{}] rejected: {}", op, err);
    err.into()
}

// =========================================================
// 认证 (Authentication)
// =========================================================

/// Logs in and persists the session. Accounts with a role this client does
/// not know are refused and leave no session behind.
pub async fn login<C, S>(
    identity: &IdentityApi<C>,
    session: &SessionStore<S>,
    identifier: &str,
    password: &str,
) -> ApiResult<Session>
where
    C: HttpClient,
    S: KeyValueStore,
{
    let identifier = validation::required("Username or email", identifier).map_err(|e| rejected("login", e))?;
    let password = validation::required("Password", password).map_err(|e| rejected("login", e))?;

    let res = identity
        .login(&LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        })
        .await?;

    let Some(role) = res.user.role() else {
        crate::log_warn!("[login] unsupported role `{}` for {}", res.user.role, res.user.username);
        session.clear_session();
        return Err(ApiError::new(
            ApiErrorStatus::Unauthorized,
            "This account has no access to the admin client.",
        ));
    };

    session
        .set_session(&res.token, &res.user.id, &res.user.username, role)
        .map_err(|e| {
            crate::log_error!("[login] {}", e);
            ApiError::new(ApiErrorStatus::Server, e.to_string())
        })?;

    crate::log_info!("[login] {} signed in as {}", res.user.username, role);
    Ok(Session {
        token: res.token,
        user_id: res.user.id,
        username: res.user.username,
        role,
    })
}

pub fn logout<S: KeyValueStore>(session: &SessionStore<S>) {
    if let Some(name) = session.username() {
        crate::log_info!("[logout] {}", name);
    }
    session.clear_session();
}

pub async fn register<C: HttpClient>(identity: &IdentityApi<C>, form: &RegisterRequest) -> ApiResult<User> {
    let check = || -> Result<RegisterRequest, ValidationError> {
        Ok(RegisterRequest {
            firstname: validation::required("First name", &form.firstname)?.to_string(),
            lastname: validation::required("Last name", &form.lastname)?.to_string(),
            username: validation::required("Username", &form.username)?.to_string(),
            email: validation::email(&form.email)?.to_string(),
            password: validation::required("Password", &form.password)?.to_string(),
        })
    };
    let req = check().map_err(|e| rejected("register", e))?;
    identity.register(&req).await
}

// =========================================================
// 食堂 (Dining)
// =========================================================

pub async fn create_canteen<C: HttpClient>(
    dining: &DiningApi<C>,
    form: &NewCanteen,
) -> ApiResult<campus_shared::Canteen> {
    let name = validation::required("Name", &form.name).map_err(|e| rejected("create_canteen", e))?;
    let address = validation::required("Address", &form.address).map_err(|e| rejected("create_canteen", e))?;
    if form.close_at <= form.open_at {
        crate::log_warn!("[create_canteen] rejected: closing time before opening time");
        return Err(ApiError::validation("Closing time must be after opening time."));
    }
    dining
        .create_canteen(&NewCanteen {
            name: name.to_string(),
            address: address.to_string(),
            ..form.clone()
        })
        .await
}

pub async fn create_menu<C: HttpClient>(dining: &DiningApi<C>, form: &NewMenu) -> ApiResult<Menu> {
    let check = || -> Result<(), ValidationError> {
        validation::required("Menu name", &form.name)?;
        validation::required("Canteen", &form.canteen_id)?;
        for meal in [&form.breakfast, &form.lunch, &form.dinner] {
            validation::required("Meal name", &meal.name)?;
            validation::non_negative(meal.price)?;
        }
        Ok(())
    };
    check().map_err(|e| rejected("create_menu", e))?;
    dining.create_menu(form).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }

    pub fn meal<'a>(&self, menu: &'a Menu) -> &'a Meal {
        match self {
            MealSlot::Breakfast => &menu.breakfast,
            MealSlot::Lunch => &menu.lunch,
            MealSlot::Dinner => &menu.dinner,
        }
    }
}

/// Which meals of a menu the student wants to buy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealSelection {
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
}

impl MealSelection {
    pub fn is_empty(&self) -> bool {
        !MealSlot::ALL.iter().any(|slot| self.is_picked(*slot))
    }

    pub fn is_picked(&self, slot: MealSlot) -> bool {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }

    pub fn set(&mut self, slot: MealSlot, picked: bool) {
        match slot {
            MealSlot::Breakfast => self.breakfast = picked,
            MealSlot::Lunch => self.lunch = picked,
            MealSlot::Dinner => self.dinner = picked,
        }
    }

    pub fn total(&self, menu: &Menu) -> f64 {
        MealSlot::ALL
            .into_iter()
            .filter(|slot| self.is_picked(*slot))
            .map(|slot| slot.meal(menu).price)
            .sum()
    }
}

/// Client-side purchase check. `Ok(total)` means the purchase may be sent.
pub fn check_purchase(
    menu: &Menu,
    card: Option<&StudentCard>,
    selection: MealSelection,
) -> Result<f64, ValidationError> {
    let card = card.ok_or(ValidationError::MissingCard)?;
    if selection.is_empty() {
        return Err(ValidationError::EmptySelection);
    }
    let total = validation::non_negative(selection.total(menu))?;
    if total > card.stanje {
        return Err(ValidationError::InsufficientBalance);
    }
    Ok(total)
}

/// Buys the selected meals. Returns the card balance after the charge.
///
/// Nothing is sent when the check fails.
pub async fn purchase_meal<C: HttpClient>(
    dining: &DiningApi<C>,
    menu: &Menu,
    card: Option<&StudentCard>,
    selection: MealSelection,
    student_username: &str,
) -> ApiResult<f64> {
    let total = check_purchase(menu, card, selection).map_err(|e| rejected("purchase_meal", e))?;
    let balance = card.map(|c| c.stanje).unwrap_or_default();

    dining
        .take_meal(&TakeMealRequest {
            menu_id: menu.id.clone(),
            student_username: student_username.to_string(),
            delta: -total,
        })
        .await?;

    crate::log_info!("[purchase_meal] {} paid {:.2} for {}", student_username, total, menu.name);
    Ok(balance - total)
}

pub async fn rate_meal<C: HttpClient>(
    dining: &DiningApi<C>,
    review: &NewMenuReview,
) -> ApiResult<campus_shared::MenuReview> {
    for r in [review.breakfast_review, review.lunch_review, review.dinner_review] {
        validation::rating(r).map_err(|e| rejected("rate_meal", e))?;
    }
    dining.create_menu_review(review).await
}

// =========================================================
// 宿舍 (Housing)
// =========================================================

/// Free rooms of a dormitory. A dormitory with no vacancies is an empty
/// success, not an error.
pub async fn load_free_rooms<C: HttpClient>(housing: &HousingApi<C>, dom_id: Uuid) -> ViewState<Vec<Room>> {
    ViewState::from_result(housing.list_free_rooms(dom_id).await)
}

pub async fn create_student<C: HttpClient>(housing: &HousingApi<C>, ime: &str, prezime: &str) -> ApiResult<Student> {
    let (ime, prezime) = validation::student_names(ime, prezime).map_err(|e| rejected("create_student", e))?;
    housing.create_student(ime, prezime).await
}

pub async fn assign_student<C: HttpClient>(
    housing: &HousingApi<C>,
    dom_id: Uuid,
    broj: &str,
    username: &str,
) -> ApiResult<Student> {
    let broj = validation::required("Room number", broj).map_err(|e| rejected("assign_student", e))?;
    let username = validation::required("Username", username).map_err(|e| rejected("assign_student", e))?;
    housing
        .assign_student_to_room(dom_id, broj, username)
        .await
        .map_err(|e| on_conflict(e, MSG_ROOM_FULL))
}

/// Admin top-up or correction of a card balance.
pub async fn adjust_card_balance<C: HttpClient>(
    housing: &HousingApi<C>,
    student_username: &str,
    delta: f64,
) -> ApiResult<StudentCard> {
    let username = validation::required("Username", student_username).map_err(|e| rejected("adjust_card_balance", e))?;
    let delta = validation::amount(delta).map_err(|e| rejected("adjust_card_balance", e))?;
    housing.update_student_card_balance(username, delta).await
}

/// Sends a room review and records it in `reviews`.
///
/// The created review is appended only when `reviews` has no review by the
/// same author for the same room yet.
pub async fn submit_review<C: HttpClient>(
    housing: &HousingApi<C>,
    reviews: &mut Vec<RoomReview>,
    soba_id: Uuid,
    author: &str,
    ocena: u8,
    komentar: &str,
) -> ApiResult<RoomReview> {
    let author = validation::required("Username", author).map_err(|e| rejected("submit_review", e))?;
    let ocena = validation::rating(ocena).map_err(|e| rejected("submit_review", e))?;
    let komentar = Some(komentar.trim()).filter(|c| !c.is_empty()).map(str::to_string);

    let created = housing
        .add_room_review(&NewRoomReview {
            soba_id,
            autor_username: author.to_string(),
            ocena,
            komentar,
        })
        .await
        .map_err(|e| on_conflict(e, MSG_ALREADY_REVIEWED))?;

    let duplicate = reviews
        .iter()
        .any(|r| r.soba_id == created.soba_id && r.autor_username == created.autor_username);
    if !duplicate {
        reviews.push(created.clone());
    }
    Ok(created)
}

pub async fn report_fault<C: HttpClient>(
    housing: &HousingApi<C>,
    soba_id: Uuid,
    username: &str,
    opis: &str,
) -> ApiResult<Fault> {
    let username = validation::required("Username", username).map_err(|e| rejected("report_fault", e))?;
    let opis = validation::fault_description(opis).map_err(|e| rejected("report_fault", e))?;
    housing
        .report_fault(&NewFault {
            soba_id,
            prijavio_username: username.to_string(),
            opis: opis.to_string(),
        })
        .await
        .map_err(|e| on_conflict(e, MSG_FAULT_ALREADY_REPORTED))
}

#[cfg(test)]
mod tests;
