use crate::StudentCard;
use crate::date::{hh_mm, rfc3339};
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// =========================================================
// 食堂 (Canteens)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canteen {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(with = "rfc3339")]
    pub open_at: DateTime<Utc>,
    #[serde(with = "rfc3339")]
    pub close_at: DateTime<Utc>,
}

impl Canteen {
    /// Whether `now` falls inside the canteen's daily opening window.
    ///
    /// Only the time of day is compared; the date part of `open_at`/`close_at`
    /// is whatever day the backend stored them on.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        let t = now.time();
        let (open, close) = (self.open_at.time(), self.close_at.time());
        if open <= close {
            open <= t && t < close
        } else {
            t >= open || t < close
        }
    }
}

/// Create body. Only the time of day is sent (`"07:30"`); the service puts it
/// on the current date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCanteen {
    pub name: String,
    pub address: String,
    #[serde(with = "hh_mm")]
    pub open_at: NaiveTime,
    #[serde(with = "hh_mm")]
    pub close_at: NaiveTime,
}

/// Acknowledgement returned by the delete endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deleted {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub id: String,
}

// =========================================================
// 菜单 (Menus)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: String,
    pub name: String,
    pub canteen_id: String,
    pub weekday: Weekday,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenu {
    pub name: String,
    pub canteen_id: String,
    pub weekday: Weekday,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopMenu {
    pub menu_name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuWithCard {
    pub menu: Menu,
    #[serde(default)]
    pub card: Option<StudentCard>,
}

/// Charges (negative `delta`) the student's card for the given menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeMealRequest {
    pub menu_id: String,
    pub student_username: String,
    pub delta: f64,
}

// =========================================================
// 用餐历史与评价 (Meal history & reviews)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuReview {
    pub id: String,
    pub menu_id: String,
    pub user_id: String,
    pub breakfast_review: u8,
    pub lunch_review: u8,
    pub dinner_review: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenuReview {
    pub menu_id: String,
    pub user_id: String,
    pub breakfast_review: u8,
    pub lunch_review: u8,
    pub dinner_review: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealHistoryEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub menu_id: Option<String>,
    pub menu_name: String,
    #[serde(with = "rfc3339")]
    pub selected_at: DateTime<Utc>,
    #[serde(default)]
    pub review: Option<MenuReview>,
}

// =========================================================
// 今日菜单 (Today's menus feed)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningMenu {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub canteen_name: Option<String>,
    #[serde(default)]
    pub weekday: Option<Weekday>,
    #[serde(default)]
    pub breakfast: Option<Meal>,
    #[serde(default)]
    pub lunch: Option<Meal>,
    #[serde(default)]
    pub dinner: Option<Meal>,
}

/// Today's menus. The feed is either a bare array or an object wrapping the
/// array under `items`, `data` or `menus`; any other shape reads as empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TodayMenus(pub Vec<DiningMenu>);

impl<'de> Deserialize<'de> for TodayMenus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let list = match value {
            serde_json::Value::Array(_) => Some(value),
            serde_json::Value::Object(mut map) => ["items", "data", "menus"]
                .iter()
                .find_map(|key| map.remove(*key).filter(|v| v.is_array())),
            _ => None,
        };
        match list {
            Some(list) => serde_json::from_value(list)
                .map(TodayMenus)
                .map_err(serde::de::Error::custom),
            None => Ok(TodayMenus::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn canteen(open: (u32, u32), close: (u32, u32)) -> Canteen {
        Canteen {
            id: "c1".into(),
            name: "Menza".into(),
            address: "Bulevar 1".into(),
            open_at: Utc.with_ymd_and_hms(2025, 1, 1, open.0, open.1, 0).unwrap(),
            close_at: Utc.with_ymd_and_hms(2025, 1, 1, close.0, close.1, 0).unwrap(),
        }
    }

    #[test]
    fn canteen_dates_are_parsed_at_the_boundary() {
        let c: Canteen = serde_json::from_value(json!({
            "id": "c1", "name": "Menza", "address": "Bulevar 1",
            "open_at": "2025-01-01T08:00:00+01:00",
            "close_at": "2025-01-01T16:00:00Z"
        }))
        .unwrap();
        assert_eq!(c.open_at, Utc.with_ymd_and_hms(2025, 1, 1, 7, 0, 0).unwrap());
        assert_eq!(c.close_at, Utc.with_ymd_and_hms(2025, 1, 1, 16, 0, 0).unwrap());
    }

    #[test]
    fn opening_window_handles_overnight_hours() {
        let day = canteen((8, 0), (16, 0));
        assert!(day.is_open_at(Utc.with_ymd_and_hms(2025, 5, 5, 12, 0, 0).unwrap()));
        assert!(!day.is_open_at(Utc.with_ymd_and_hms(2025, 5, 5, 16, 0, 0).unwrap()));

        let night = canteen((22, 0), (2, 0));
        assert!(night.is_open_at(Utc.with_ymd_and_hms(2025, 5, 5, 23, 30, 0).unwrap()));
        assert!(!night.is_open_at(Utc.with_ymd_and_hms(2025, 5, 5, 12, 0, 0).unwrap()));
    }

    #[test]
    fn create_body_sends_time_of_day_only() {
        let body = serde_json::to_value(NewCanteen {
            name: "Menza".into(),
            address: "Bulevar 1".into(),
            open_at: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            close_at: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "name": "Menza", "address": "Bulevar 1", "open_at": "07:30", "close_at": "20:00" })
        );
    }

    #[test]
    fn delete_acknowledgement_decodes() {
        let ack: Deleted = serde_json::from_value(json!({
            "message": "Canteen deleted successfully", "id": "c1"
        }))
        .unwrap();
        assert_eq!(ack.id, "c1");
    }

    #[test]
    fn take_meal_uses_camel_case_field_names() {
        let body = serde_json::to_value(TakeMealRequest {
            menu_id: "m1".into(),
            student_username: "ana".into(),
            delta: -350.0,
        })
        .unwrap();
        assert_eq!(body, json!({ "menuId": "m1", "studentUsername": "ana", "delta": -350.0 }));
    }

    #[test]
    fn today_menus_accepts_wrapped_and_bare_feeds() {
        let item = json!({ "id": "d1", "name": "Ponedeljak" });
        for feed in [
            json!([item.clone()]),
            json!({ "items": [item.clone()] }),
            json!({ "data": [item.clone()] }),
            json!({ "menus": [item.clone()] }),
        ] {
            let menus: TodayMenus = serde_json::from_value(feed).unwrap();
            assert_eq!(menus.0.len(), 1);
            assert_eq!(menus.0[0].id, "d1");
        }
    }

    #[test]
    fn today_menus_reads_unknown_shapes_as_empty() {
        let menus: TodayMenus = serde_json::from_value(json!({ "status": "ok" })).unwrap();
        assert!(menus.0.is_empty());
        let menus: TodayMenus = serde_json::from_value(json!(null)).unwrap();
        assert!(menus.0.is_empty());
    }

    #[test]
    fn weekday_round_trips_by_name() {
        assert_eq!(Weekday::parse("friday"), Some(Weekday::Friday));
        assert_eq!(serde_json::to_value(Weekday::Sunday).unwrap(), json!("Sunday"));
    }
}
