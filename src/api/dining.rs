use super::Gateway;
use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::request::HttpClient;
use campus_shared::protocol::{
    DeleteCanteen, DeleteMenu, GetCanteen, GetMealHistory, GetMenuWithCard, GetTodayMenus,
    ListCanteens, ListMenus, TopRatedMenus,
};
use campus_shared::{
    Canteen, Deleted, DiningMenu, MealHistoryEntry, Menu, MenuReview, MenuWithCard, NewCanteen, NewMenu,
    NewMenuReview, TakeMealRequest, TopMenu,
};

/// Dining service: canteens, menus, meal purchases, meal history.
#[derive(Debug, Clone)]
pub struct DiningApi<C> {
    gw: Gateway<C>,
}

impl<C: HttpClient> DiningApi<C> {
    pub fn new(client: C, config: &ApiConfig, token: Option<String>) -> Self {
        Self {
            gw: Gateway::new(client, &config.dining_url, token),
        }
    }

    // --- canteens ---

    pub async fn list_canteens(&self) -> ApiResult<Vec<Canteen>> {
        self.gw.call("dining.list_canteens", &ListCanteens).await
    }

    pub async fn get_canteen(&self, id: &str) -> ApiResult<Canteen> {
        self.gw
            .call("dining.get_canteen", &GetCanteen { id: id.to_string() })
            .await
    }

    pub async fn create_canteen(&self, canteen: &NewCanteen) -> ApiResult<Canteen> {
        self.gw.call("dining.create_canteen", canteen).await
    }

    pub async fn delete_canteen(&self, id: &str) -> ApiResult<Deleted> {
        self.gw
            .call("dining.delete_canteen", &DeleteCanteen { id: id.to_string() })
            .await
    }

    // --- menus ---

    pub async fn list_menus(&self, canteen_id: &str) -> ApiResult<Vec<Menu>> {
        let req = ListMenus {
            canteen_id: canteen_id.to_string(),
        };
        self.gw.call("dining.list_menus", &req).await
    }

    pub async fn create_menu(&self, menu: &NewMenu) -> ApiResult<Menu> {
        self.gw.call("dining.create_menu", menu).await
    }

    pub async fn delete_menu(&self, id: &str) -> ApiResult<Deleted> {
        self.gw
            .call("dining.delete_menu", &DeleteMenu { id: id.to_string() })
            .await
    }

    pub async fn top_rated_menus(&self) -> ApiResult<Vec<TopMenu>> {
        self.gw.call("dining.top_rated_menus", &TopRatedMenus).await
    }

    /// Menu plus the student's card; the student travels in `X-Student-ID`.
    pub async fn get_menu_with_card(&self, menu_id: &str, student: &str) -> ApiResult<MenuWithCard> {
        let req = GetMenuWithCard {
            menu_id: menu_id.to_string(),
            student: student.to_string(),
        };
        self.gw.call("dining.get_menu_with_card", &req).await
    }

    pub async fn take_meal(&self, req: &TakeMealRequest) -> ApiResult<()> {
        self.gw.call("dining.take_meal", req).await.map(|_| ())
    }

    pub async fn today_menus(&self) -> ApiResult<Vec<DiningMenu>> {
        self.gw
            .call("dining.today_menus", &GetTodayMenus)
            .await
            .map(|menus| menus.0)
    }

    // --- history & reviews ---

    pub async fn meal_history(&self, user_id: &str) -> ApiResult<Vec<MealHistoryEntry>> {
        let req = GetMealHistory {
            user_id: user_id.to_string(),
        };
        self.gw.call("dining.meal_history", &req).await
    }

    pub async fn create_menu_review(&self, review: &NewMenuReview) -> ApiResult<MenuReview> {
        self.gw.call("dining.create_menu_review", review).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MockHttpClient;
    use campus_shared::protocol::HttpMethod;
    use chrono::{NaiveTime, TimeZone, Utc};
    use serde_json::json;

    fn config() -> ApiConfig {
        ApiConfig {
            dining_url: "http://dining".into(),
            ..ApiConfig::default()
        }
    }

    #[tokio::test]
    async fn created_canteen_keeps_its_hours() {
        let client = MockHttpClient::new();
        let api = DiningApi::new(&client, &config(), Some("jwt".into()));
        let new = NewCanteen {
            name: "Menza Centar".into(),
            address: "Trg 1".into(),
            open_at: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            close_at: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        };

        // The service stamps the sent hours onto today's date (in its own zone).
        client.mock_response(HttpMethod::Post, "http://dining/api/canteens/", 201, json!({
            "id": "c-9", "name": "Menza Centar", "address": "Trg 1",
            "open_at": "2025-02-03T07:30:00Z", "close_at": "2025-02-03T20:00:00Z"
        }));
        let created = api.create_canteen(&new).await.unwrap();
        assert_eq!(
            client.last_body().unwrap(),
            json!({ "name": "Menza Centar", "address": "Trg 1", "open_at": "07:30", "close_at": "20:00" })
        );

        client.mock_response(HttpMethod::Get, "http://dining/api/canteens/c-9", 200, json!({
            "id": "c-9", "name": "Menza Centar", "address": "Trg 1",
            "open_at": "2025-02-03T07:30:00Z", "close_at": "2025-02-03T20:00:00Z"
        }));
        let fetched = api.get_canteen("c-9").await.unwrap();
        assert_eq!(fetched.open_at.time(), new.open_at);
        assert_eq!(fetched.close_at.time(), new.close_at);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn meal_history_dates_are_structured() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            "http://dining/api/canteens/meal-history/u1",
            200,
            json!([{ "menu_name": "Ručak", "selected_at": "2025-04-01T11:15:00+02:00" }]),
        );
        let api = DiningApi::new(&client, &config(), None);
        let history = api.meal_history("u1").await.unwrap();
        assert_eq!(history[0].selected_at, Utc.with_ymd_and_hms(2025, 4, 1, 9, 15, 0).unwrap());
        assert!(history[0].review.is_none());
    }

    #[tokio::test]
    async fn take_meal_accepts_empty_success_body() {
        let client = MockHttpClient::new();
        client.mock_text(HttpMethod::Post, "http://dining/api/meal/", 200, "");
        let api = DiningApi::new(&client, &config(), None);
        let req = TakeMealRequest {
            menu_id: "m1".into(),
            student_username: "ana".into(),
            delta: -300.0,
        };
        api.take_meal(&req).await.unwrap();
        assert_eq!(client.last_body().unwrap()["delta"], json!(-300.0));
    }

    #[tokio::test]
    async fn delete_menu_is_one_delete_request() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Delete,
            "http://dining/api/menus/m1",
            200,
            json!({ "message": "Menu deleted successfully", "id": "m1" }),
        );
        let api = DiningApi::new(&client, &config(), None);
        let ack = api.delete_menu("m1").await.unwrap();
        assert_eq!(ack.id, "m1");
        let reqs = client.requests.borrow();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].0, "DELETE");
    }

    #[tokio::test]
    async fn delete_canteen_accepts_the_acknowledgement() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Delete,
            "http://dining/api/canteens/c1",
            200,
            json!({ "message": "Canteen deleted successfully", "id": "c1" }),
        );
        let api = DiningApi::new(&client, &config(), Some("jwt".into()));
        let ack = api.delete_canteen("c1").await.unwrap();
        assert_eq!(ack.message, "Canteen deleted successfully");
    }

    #[tokio::test]
    async fn today_menus_unwraps_feed() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            "http://dining/api/dining/menus/today",
            200,
            json!({ "data": [{ "id": "d1", "name": "Utorak" }] }),
        );
        let api = DiningApi::new(&client, &config(), None);
        let menus = api.today_menus().await.unwrap();
        assert_eq!(menus.len(), 1);
    }
}
