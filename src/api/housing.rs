use super::Gateway;
use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::request::HttpClient;
use campus_shared::protocol::{
    GetDom, GetRoom, GetRoomDetail, GetStudentCard, ListDoms, ListFreeRooms,
};
use campus_shared::{
    AssignStudentRequest, ChangeFaultStatusRequest, CreateStudentRequest, Dom, Fault,
    FaultStatus, NewFault, NewRoomReview, ReleaseRoomRequest, Room, RoomReview, StatusMessage,
    Student, StudentCard, StudentCardBalanceRequest, StudentCardRequest,
};
use uuid::Uuid;

/// Housing service: dormitories, rooms, students, cards, reviews, faults.
#[derive(Debug, Clone)]
pub struct HousingApi<C> {
    gw: Gateway<C>,
}

impl<C: HttpClient> HousingApi<C> {
    pub fn new(client: C, config: &ApiConfig, token: Option<String>) -> Self {
        Self {
            gw: Gateway::new(client, &config.housing_url, token),
        }
    }

    // --- dormitories ---

    pub async fn list_doms(&self) -> ApiResult<Vec<Dom>> {
        self.gw.call("housing.list_doms", &ListDoms).await
    }

    pub async fn get_dom(&self, id: Uuid) -> ApiResult<Dom> {
        self.gw.call("housing.get_dom", &GetDom { id }).await
    }

    // --- students ---

    pub async fn create_student(&self, ime: &str, prezime: &str) -> ApiResult<Student> {
        let req = CreateStudentRequest {
            ime: ime.to_string(),
            prezime: prezime.to_string(),
        };
        self.gw.call("housing.create_student", &req).await
    }

    pub async fn release_student_room(&self, student_id: Uuid) -> ApiResult<StatusMessage> {
        self.gw
            .call("housing.release_student_room", &ReleaseRoomRequest { student_id })
            .await
    }

    // --- student cards ---

    pub async fn create_student_card_if_missing(&self, student_username: &str) -> ApiResult<StudentCard> {
        let req = StudentCardRequest {
            student_username: student_username.to_string(),
        };
        self.gw.call("housing.create_student_card", &req).await
    }

    pub async fn get_student_card(&self, student_username: &str) -> ApiResult<StudentCard> {
        let req = GetStudentCard {
            student_username: student_username.to_string(),
        };
        self.gw.call("housing.get_student_card", &req).await
    }

    pub async fn update_student_card_balance(
        &self,
        student_username: &str,
        delta: f64,
    ) -> ApiResult<StudentCard> {
        let req = StudentCardBalanceRequest {
            student_username: student_username.to_string(),
            delta,
        };
        self.gw.call("housing.update_card_balance", &req).await
    }

    // --- rooms ---

    pub async fn get_room(&self, id: Uuid) -> ApiResult<Room> {
        self.gw.call("housing.get_room", &GetRoom { id }).await
    }

    /// Room with its students, reviews and faults embedded.
    pub async fn get_room_detail(&self, id: Uuid) -> ApiResult<Room> {
        self.gw.call("housing.get_room_detail", &GetRoomDetail { id }).await
    }

    pub async fn assign_student_to_room(
        &self,
        dom_id: Uuid,
        broj: &str,
        username: &str,
    ) -> ApiResult<Student> {
        let req = AssignStudentRequest {
            dom_id,
            broj: broj.to_string(),
            username: username.to_string(),
        };
        self.gw.call("housing.assign_student", &req).await
    }

    pub async fn list_free_rooms(&self, dom_id: Uuid) -> ApiResult<Vec<Room>> {
        self.gw
            .call("housing.list_free_rooms", &ListFreeRooms { dom_id })
            .await
    }

    // --- reviews & faults ---

    pub async fn add_room_review(&self, review: &NewRoomReview) -> ApiResult<RoomReview> {
        self.gw.call("housing.add_room_review", review).await
    }

    pub async fn report_fault(&self, fault: &NewFault) -> ApiResult<Fault> {
        self.gw.call("housing.report_fault", fault).await
    }

    pub async fn change_fault_status(&self, kvar_id: Uuid, status: FaultStatus) -> ApiResult<StatusMessage> {
        self.gw
            .call(
                "housing.change_fault_status",
                &ChangeFaultStatusRequest { kvar_id, status },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorStatus;
    use crate::request::MockHttpClient;
    use campus_shared::protocol::HttpMethod;
    use serde_json::json;

    fn config() -> ApiConfig {
        ApiConfig {
            housing_url: "http://housing".into(),
            ..ApiConfig::default()
        }
    }

    #[tokio::test]
    async fn free_rooms_for_full_dorm_is_empty_not_error() {
        let dom = Uuid::new_v4();
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            &format!("http://housing/api/housing/rooms/free?domId={dom}"),
            200,
            json!([]),
        );
        let api = HousingApi::new(&client, &config(), None);
        assert!(api.list_free_rooms(dom).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn assign_sends_canonical_body() {
        let dom = Uuid::new_v4();
        let client = MockHttpClient::new();
        client.mock_text(HttpMethod::Post, "http://housing/api/housing/rooms/assign", 409, "soba je puna");
        let api = HousingApi::new(&client, &config(), Some("jwt".into()));

        let err = api.assign_student_to_room(dom, "12", "ana").await.unwrap_err();
        assert_eq!(err.status, ApiErrorStatus::Conflict);
        assert_eq!(
            client.last_body().unwrap(),
            json!({ "domId": dom, "broj": "12", "username": "ana" })
        );
    }

    #[tokio::test]
    async fn card_lookup_uses_username_query() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            "http://housing/api/housing/students/cards?studentUsername=ana",
            200,
            json!({ "id": Uuid::nil(), "stanje": 500.0, "studentUsername": "ana" }),
        );
        let api = HousingApi::new(&client, &config(), None);
        let card = api.get_student_card("ana").await.unwrap();
        assert_eq!(card.stanje, 500.0);
    }

    #[tokio::test]
    async fn fault_status_change_body() {
        let kvar = Uuid::new_v4();
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "http://housing/api/housing/faults/status",
            200,
            json!({ "status": "ok" }),
        );
        let api = HousingApi::new(&client, &config(), None);
        let res = api.change_fault_status(kvar, FaultStatus::Resen).await.unwrap();
        assert_eq!(res.status, "ok");
        assert_eq!(client.last_body().unwrap(), json!({ "kvarId": kvar, "status": "resen" }));
    }

    #[tokio::test]
    async fn plain_room_lookup_by_id() {
        let (id, dom) = (Uuid::new_v4(), Uuid::new_v4());
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            &format!("http://housing/api/housing/rooms?id={id}"),
            200,
            json!({ "id": id, "broj": "7", "slobodna": true, "domId": dom, "kapacitet": 2 }),
        );
        let api = HousingApi::new(&client, &config(), None);
        let room = api.get_room(id).await.unwrap();
        assert_eq!(room.broj, "7");
        assert!(room.studenti.is_empty());
    }
}
