use super::*;
use crate::config::ApiConfig;
use crate::request::MockHttpClient;
use crate::session::MemoryStore;
use campus_shared::protocol::HttpMethod;
use campus_shared::{Role, Weekday};
use serde_json::json;

fn config() -> ApiConfig {
    ApiConfig {
        identity_url: "http://identity".into(),
        dining_url: "http://dining".into(),
        housing_url: "http://housing".into(),
        ..ApiConfig::default()
    }
}

fn meal(name: &str, price: f64) -> Meal {
    Meal {
        name: name.into(),
        description: String::new(),
        price,
    }
}

fn menu() -> Menu {
    Menu {
        id: "m-1".into(),
        name: "Ponedeljak".into(),
        canteen_id: "c-1".into(),
        weekday: Weekday::Monday,
        breakfast: meal("Kifla", 60.0),
        lunch: meal("Pasulj", 120.0),
        dinner: meal("Pica", 90.0),
    }
}

fn card(stanje: f64) -> StudentCard {
    StudentCard {
        id: Uuid::nil(),
        stanje,
        student_username: "ana".into(),
    }
}

const ALL_MEALS: MealSelection = MealSelection {
    breakfast: true,
    lunch: true,
    dinner: true,
};

// --- purchase ---

#[test]
fn selection_total_sums_picked_meals() {
    let lunch_and_dinner = MealSelection {
        lunch: true,
        dinner: true,
        ..Default::default()
    };
    assert_eq!(lunch_and_dinner.total(&menu()), 210.0);
    assert_eq!(MealSelection::default().total(&menu()), 0.0);

    let mut only_breakfast = MealSelection::default();
    only_breakfast.set(MealSlot::Breakfast, true);
    assert!(only_breakfast.is_picked(MealSlot::Breakfast));
    assert_eq!(only_breakfast.total(&menu()), 60.0);
}

#[tokio::test]
async fn purchase_over_balance_sends_nothing() {
    let client = MockHttpClient::new();
    let dining = DiningApi::new(&client, &config(), Some("t".into()));

    let err = purchase_meal(&dining, &menu(), Some(&card(200.0)), ALL_MEALS, "ana")
        .await
        .unwrap_err();

    assert_eq!(err.status, ApiErrorStatus::Validation);
    assert_eq!(err.message, ValidationError::InsufficientBalance.to_string());
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn purchase_without_card_or_selection_sends_nothing() {
    let client = MockHttpClient::new();
    let dining = DiningApi::new(&client, &config(), None);

    assert!(purchase_meal(&dining, &menu(), None, ALL_MEALS, "ana").await.is_err());
    assert!(
        purchase_meal(&dining, &menu(), Some(&card(1000.0)), MealSelection::default(), "ana")
            .await
            .is_err()
    );
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn purchase_at_exact_balance_charges_negative_total() {
    let client = MockHttpClient::new();
    client.mock_text(HttpMethod::Post, "http://dining/api/meal/", 200, "");
    let dining = DiningApi::new(&client, &config(), Some("t".into()));

    let left = purchase_meal(&dining, &menu(), Some(&card(270.0)), ALL_MEALS, "ana")
        .await
        .unwrap();

    assert_eq!(left, 0.0);
    assert_eq!(client.request_count(), 1);
    assert_eq!(
        client.last_body().unwrap(),
        json!({ "menuId": "m-1", "studentUsername": "ana", "delta": -270.0 })
    );
}

#[tokio::test]
async fn menu_with_negative_price_is_rejected() {
    let client = MockHttpClient::new();
    let dining = DiningApi::new(&client, &config(), None);
    let m = menu();
    let form = NewMenu {
        name: m.name,
        canteen_id: m.canteen_id,
        weekday: m.weekday,
        breakfast: m.breakfast,
        lunch: meal("Pasulj", -1.0),
        dinner: m.dinner,
    };
    let err = create_menu(&dining, &form).await.unwrap_err();
    assert_eq!(err.message, ValidationError::NegativeAmount.to_string());
    assert_eq!(client.request_count(), 0);
}

// --- reviews ---

fn review_json(soba: Uuid, author: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "ocena": 4,
        "komentar": null,
        "sobaId": soba,
        "autorUsername": author,
    })
}

#[tokio::test]
async fn review_is_appended_once_per_author_and_room() {
    let soba = Uuid::new_v4();
    let client = MockHttpClient::new();
    client.mock_response(
        HttpMethod::Post,
        "http://housing/api/housing/rooms/reviews",
        201,
        review_json(soba, "ana"),
    );
    let housing = HousingApi::new(&client, &config(), Some("t".into()));
    let mut reviews = Vec::new();

    submit_review(&housing, &mut reviews, soba, "ana", 4, "   ").await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(client.last_body().unwrap()["komentar"], serde_json::Value::Null);

    submit_review(&housing, &mut reviews, soba, "ana", 4, "opet").await.unwrap();
    assert_eq!(reviews.len(), 1);
}

#[tokio::test]
async fn duplicate_review_conflict_is_explained() {
    let client = MockHttpClient::new();
    client.mock_text(
        HttpMethod::Post,
        "http://housing/api/housing/rooms/reviews",
        409,
        "vec postoji recenzija",
    );
    let housing = HousingApi::new(&client, &config(), None);
    let mut reviews = Vec::new();

    let err = submit_review(&housing, &mut reviews, Uuid::new_v4(), "ana", 5, "")
        .await
        .unwrap_err();

    assert_eq!(err.message, MSG_ALREADY_REVIEWED);
    assert_eq!(err.http_status, Some(409));
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn out_of_range_rating_is_rejected_locally() {
    let client = MockHttpClient::new();
    let housing = HousingApi::new(&client, &config(), None);
    let err = submit_review(&housing, &mut Vec::new(), Uuid::new_v4(), "ana", 0, "")
        .await
        .unwrap_err();
    assert_eq!(err.status, ApiErrorStatus::Validation);
    assert_eq!(client.request_count(), 0);
}

// --- rooms & faults ---

#[tokio::test]
async fn full_room_conflict_is_explained() {
    let client = MockHttpClient::new();
    client.mock_text(HttpMethod::Post, "http://housing/api/housing/rooms/assign", 409, "");
    let housing = HousingApi::new(&client, &config(), None);

    let err = assign_student(&housing, Uuid::new_v4(), "12", "ana").await.unwrap_err();
    assert_eq!(err.message, MSG_ROOM_FULL);
    assert!(err.is_conflict());
}

#[tokio::test]
async fn non_conflict_errors_keep_server_message() {
    let client = MockHttpClient::new();
    client.mock_response(
        HttpMethod::Post,
        "http://housing/api/housing/rooms/assign",
        404,
        json!({ "error": "soba ne postoji" }),
    );
    let housing = HousingApi::new(&client, &config(), None);

    let err = assign_student(&housing, Uuid::new_v4(), "99", "ana").await.unwrap_err();
    assert_eq!(err.message, "soba ne postoji");
}

#[tokio::test]
async fn repeated_fault_report_is_explained() {
    let client = MockHttpClient::new();
    client.mock_text(HttpMethod::Post, "http://housing/api/housing/rooms/faults", 409, "");
    let housing = HousingApi::new(&client, &config(), None);

    let err = report_fault(&housing, Uuid::new_v4(), "ana", "ne radi grejanje")
        .await
        .unwrap_err();
    assert_eq!(err.message, MSG_FAULT_ALREADY_REPORTED);
}

#[tokio::test]
async fn short_fault_description_sends_nothing() {
    let client = MockHttpClient::new();
    let housing = HousingApi::new(&client, &config(), None);
    assert!(report_fault(&housing, Uuid::new_v4(), "ana", "loš").await.is_err());
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn dorm_without_vacancies_is_empty_success() {
    let dom = Uuid::new_v4();
    let client = MockHttpClient::new();
    client.mock_response(
        HttpMethod::Get,
        &format!("http://housing/api/housing/rooms/free?domId={dom}"),
        200,
        json!([]),
    );
    let housing = HousingApi::new(&client, &config(), None);

    assert_eq!(load_free_rooms(&housing, dom).await, ViewState::Success(vec![]));
}

#[tokio::test]
async fn create_student_checks_name_length() {
    let client = MockHttpClient::new();
    let housing = HousingApi::new(&client, &config(), None);
    let err = create_student(&housing, "A", "Ilić").await.unwrap_err();
    assert_eq!(err.message, "First name must be at least 2 characters long.");
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn card_correction_sends_signed_delta() {
    let client = MockHttpClient::new();
    client.mock_response(
        HttpMethod::Post,
        "http://housing/api/housing/students/cards/balance",
        200,
        json!({ "id": Uuid::nil(), "stanje": 150.0, "studentUsername": "ana" }),
    );
    let housing = HousingApi::new(&client, &config(), None);

    let updated = adjust_card_balance(&housing, " ana ", -50.0).await.unwrap();
    assert_eq!(updated.stanje, 150.0);

    let reqs = client.requests.borrow();
    let body: serde_json::Value = serde_json::from_str(reqs[0].3.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "studentUsername": "ana", "delta": -50.0 }));
}

#[tokio::test]
async fn zero_or_garbage_amount_is_rejected_locally() {
    let client = MockHttpClient::new();
    let housing = HousingApi::new(&client, &config(), None);
    for delta in [0.0, f64::NAN] {
        let err = adjust_card_balance(&housing, "ana", delta).await.unwrap_err();
        assert_eq!(err.status, ApiErrorStatus::Validation);
    }
    assert_eq!(client.request_count(), 0);
}

// --- canteens ---

fn new_canteen(open: (u32, u32), close: (u32, u32)) -> NewCanteen {
    NewCanteen {
        name: " Menza ".into(),
        address: "Trg 1".into(),
        open_at: chrono::NaiveTime::from_hms_opt(open.0, open.1, 0).unwrap(),
        close_at: chrono::NaiveTime::from_hms_opt(close.0, close.1, 0).unwrap(),
    }
}

#[tokio::test]
async fn canteen_closing_before_opening_sends_nothing() {
    let client = MockHttpClient::new();
    let dining = DiningApi::new(&client, &config(), None);
    let err = create_canteen(&dining, &new_canteen((20, 0), (7, 30))).await.unwrap_err();
    assert_eq!(err.status, ApiErrorStatus::Validation);
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn canteen_is_created_with_trimmed_name_and_plain_hours() {
    let client = MockHttpClient::new();
    client.mock_response(HttpMethod::Post, "http://dining/api/canteens/", 201, json!({
        "id": "c-1", "name": "Menza", "address": "Trg 1",
        "open_at": "2025-02-03T07:30:00Z", "close_at": "2025-02-03T20:00:00Z"
    }));
    let dining = DiningApi::new(&client, &config(), None);

    create_canteen(&dining, &new_canteen((7, 30), (20, 0))).await.unwrap();
    assert_eq!(
        client.last_body().unwrap(),
        json!({ "name": "Menza", "address": "Trg 1", "open_at": "07:30", "close_at": "20:00" })
    );
}

// --- identity ---

fn login_body(role: &str) -> serde_json::Value {
    json!({
        "token": "jwt-1",
        "user": {
            "id": "u-1", "firstname": "Ana", "lastname": "Ilić",
            "username": "ana", "email": "ana@uni.rs", "is_active": true, "role": role
        }
    })
}

#[tokio::test]
async fn login_persists_the_session() {
    let client = MockHttpClient::new();
    client.mock_response(HttpMethod::Post, "http://identity/api/login", 200, login_body("student"));
    let identity = IdentityApi::new(&client, &config(), None);
    let store = SessionStore::new(MemoryStore::new());

    let session = login(&identity, &store, " ana ", "pw").await.unwrap();

    assert_eq!(session.role, Role::Student);
    assert_eq!(store.snapshot(), Some(session));
    assert_eq!(client.last_body().unwrap()["identifier"], "ana");
}

#[tokio::test]
async fn login_with_unknown_role_leaves_no_session() {
    let client = MockHttpClient::new();
    client.mock_response(HttpMethod::Post, "http://identity/api/login", 200, login_body("janitor"));
    let identity = IdentityApi::new(&client, &config(), None);
    let store = SessionStore::new(MemoryStore::new());

    let err = login(&identity, &store, "ana", "pw").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn failed_login_surfaces_server_message() {
    let client = MockHttpClient::new();
    client.mock_response(
        HttpMethod::Post,
        "http://identity/api/login",
        401,
        json!({ "error": "invalid credentials" }),
    );
    let identity = IdentityApi::new(&client, &config(), None);
    let store = SessionStore::new(MemoryStore::new());

    let err = login(&identity, &store, "ana", "bad").await.unwrap_err();
    assert_eq!(err.message, "invalid credentials");
    assert!(!store.is_authenticated());
}

#[test]
fn logout_clears_the_session() {
    let store = SessionStore::new(MemoryStore::new());
    store.set_session("t", "u", "ana", Role::Admin).unwrap();
    logout(&store);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn register_requires_email_shape() {
    let client = MockHttpClient::new();
    let identity = IdentityApi::new(&client, &config(), None);
    let form = RegisterRequest {
        firstname: "Ana".into(),
        lastname: "Ilić".into(),
        username: "ana".into(),
        email: "ana-at-uni".into(),
        password: "pw".into(),
    };
    let err = register(&identity, &form).await.unwrap_err();
    assert_eq!(err.message, ValidationError::InvalidEmail.to_string());
    assert_eq!(client.request_count(), 0);
}
