//! Endpoint descriptions.
//!
//! Every backend call is a request type implementing [`ApiRequest`]: it knows its
//! HTTP method, its path (including path and query parameters), its JSON body,
//! and any extra headers. Gateways only ever send `ApiRequest`s.

use crate::{
    AssignStudentRequest, Canteen, ChangeFaultStatusRequest, CreateStudentRequest, Deleted, Dom, Fault,
    LoginRequest, LoginResponse, MealHistoryEntry, Menu, MenuReview, MenuWithCard,
    NewCanteen, NewFault, NewMenu, NewMenuReview, NewRoomReview, RegisterRequest,
    ReleaseRoomRequest, Room, RoomReview, StatusMessage, Student, StudentCard,
    StudentCardBalanceRequest, StudentCardRequest, TakeMealRequest, TodayMenus, TopMenu, User,
};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// HTTP methods used by the backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Header carrying the student identity on the menu-with-card endpoint.
pub const HEADER_STUDENT_ID: &str = "X-Student-ID";

/// Request/response relationship and metadata for one endpoint.
pub trait ApiRequest: Serialize {
    /// What a successful call decodes into.
    type Response: DeserializeOwned;
    const METHOD: HttpMethod;
    /// Whether the bearer token is attached when available.
    const AUTHORIZED: bool = true;

    /// Path relative to the gateway's base URL, starting with `/`.
    fn path(&self) -> String;

    /// JSON body. Defaults to the request itself for POST/PUT, nothing otherwise.
    fn body(&self) -> Option<serde_json::Value> {
        match Self::METHOD {
            HttpMethod::Post | HttpMethod::Put => serde_json::to_value(self).ok(),
            HttpMethod::Get | HttpMethod::Delete => None,
        }
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Percent-encodes a query or path value (RFC 3986 unreserved set kept as is).
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, encode_component(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}

// =========================================================
// Identity service
// =========================================================

impl ApiRequest for RegisterRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHORIZED: bool = false;

    fn path(&self) -> String {
        "/api/register".into()
    }
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHORIZED: bool = false;

    fn path(&self) -> String {
        "/api/login".into()
    }
}

#[derive(Debug, Serialize)]
pub struct GetUser {
    pub id: String,
}

impl ApiRequest for GetUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/users/{}", encode_component(&self.id))
    }
}

// =========================================================
// Dining service
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListCanteens;

impl ApiRequest for ListCanteens {
    type Response = Vec<Canteen>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/canteens/".into()
    }
}

#[derive(Debug, Serialize)]
pub struct GetCanteen {
    pub id: String,
}

impl ApiRequest for GetCanteen {
    type Response = Canteen;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/canteens/{}", encode_component(&self.id))
    }
}

impl ApiRequest for NewCanteen {
    type Response = Canteen;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/canteens/".into()
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteCanteen {
    pub id: String,
}

impl ApiRequest for DeleteCanteen {
    type Response = Deleted;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/canteens/{}", encode_component(&self.id))
    }
}

#[derive(Debug, Serialize)]
pub struct ListMenus {
    pub canteen_id: String,
}

impl ApiRequest for ListMenus {
    type Response = Vec<Menu>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/menus/{}", encode_component(&self.canteen_id))
    }
}

impl ApiRequest for NewMenu {
    type Response = Menu;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/menus/".into()
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteMenu {
    pub id: String,
}

impl ApiRequest for DeleteMenu {
    type Response = Deleted;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/menus/{}", encode_component(&self.id))
    }
}

#[derive(Debug, Serialize)]
pub struct TopRatedMenus;

impl ApiRequest for TopRatedMenus {
    type Response = Vec<TopMenu>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/menus/top-rated/".into()
    }
}

/// Menu plus the caller's student card, identified through `X-Student-ID`.
#[derive(Debug, Serialize)]
pub struct GetMenuWithCard {
    pub menu_id: String,
    pub student: String,
}

impl ApiRequest for GetMenuWithCard {
    type Response = MenuWithCard;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/menu/{}", encode_component(&self.menu_id))
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![(HEADER_STUDENT_ID, self.student.clone())]
    }
}

impl ApiRequest for TakeMealRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/meal/".into()
    }
}

#[derive(Debug, Serialize)]
pub struct GetMealHistory {
    pub user_id: String,
}

impl ApiRequest for GetMealHistory {
    type Response = Vec<MealHistoryEntry>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/canteens/meal-history/{}", encode_component(&self.user_id))
    }
}

impl ApiRequest for NewMenuReview {
    type Response = MenuReview;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/menus/reviews".into()
    }
}

#[derive(Debug, Serialize)]
pub struct GetTodayMenus;

impl ApiRequest for GetTodayMenus {
    type Response = TodayMenus;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/dining/menus/today".into()
    }
}

// =========================================================
// Housing service
// =========================================================

#[derive(Debug, Serialize)]
pub struct ListDoms;

impl ApiRequest for ListDoms {
    type Response = Vec<Dom>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/housing/doms".into()
    }
}

#[derive(Debug, Serialize)]
pub struct GetDom {
    pub id: Uuid,
}

impl ApiRequest for GetDom {
    type Response = Dom;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_query("/api/housing/dom", &[("id", &self.id.to_string())])
    }
}

impl ApiRequest for CreateStudentRequest {
    type Response = Student;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/housing/students".into()
    }
}

impl ApiRequest for ReleaseRoomRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/housing/students/release".into()
    }
}

impl ApiRequest for StudentCardRequest {
    type Response = StudentCard;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/housing/students/cards".into()
    }
}

#[derive(Debug, Serialize)]
pub struct GetStudentCard {
    pub student_username: String,
}

impl ApiRequest for GetStudentCard {
    type Response = StudentCard;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_query(
            "/api/housing/students/cards",
            &[("studentUsername", &self.student_username)],
        )
    }
}

impl ApiRequest for StudentCardBalanceRequest {
    type Response = StudentCard;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/housing/students/cards/balance".into()
    }
}

#[derive(Debug, Serialize)]
pub struct GetRoom {
    pub id: Uuid,
}

impl ApiRequest for GetRoom {
    type Response = Room;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_query("/api/housing/rooms", &[("id", &self.id.to_string())])
    }
}

#[derive(Debug, Serialize)]
pub struct GetRoomDetail {
    pub id: Uuid,
}

impl ApiRequest for GetRoomDetail {
    type Response = Room;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_query("/api/housing/rooms/detail", &[("id", &self.id.to_string())])
    }
}

impl ApiRequest for AssignStudentRequest {
    type Response = Student;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/housing/rooms/assign".into()
    }
}

#[derive(Debug, Serialize)]
pub struct ListFreeRooms {
    pub dom_id: Uuid,
}

impl ApiRequest for ListFreeRooms {
    type Response = Vec<Room>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        with_query("/api/housing/rooms/free", &[("domId", &self.dom_id.to_string())])
    }
}

impl ApiRequest for NewRoomReview {
    type Response = RoomReview;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/housing/rooms/reviews".into()
    }
}

impl ApiRequest for NewFault {
    type Response = Fault;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/housing/rooms/faults".into()
    }
}

impl ApiRequest for ChangeFaultStatusRequest {
    type Response = StatusMessage;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/housing/faults/status".into()
    }
}
