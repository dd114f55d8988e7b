//! 路由定义模块 - 领域模型
//!
//! Pure: no DOM access. Every route knows its path, its parameters and which
//! roles may open it.

use campus::guard::{AccessDecision, RedirectTarget, check_access};
use campus_shared::Role;
use campus_shared::protocol::encode_component;
use std::fmt::Display;
use uuid::Uuid;

const SIGNED_IN: &[Role] = &[Role::Admin, Role::Student];
const ADMIN: &[Role] = &[Role::Admin];
const STUDENT: &[Role] = &[Role::Student];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Login,
    Register,
    Home,
    Canteens,
    CanteenDetail(String),
    /// Menus of one canteen.
    Menus(String),
    /// Meal purchase for one menu.
    Meal(String),
    TodayMenus,
    Profile,
    Doms,
    DomDetail(Uuid),
    FreeRooms { dom_id: Uuid },
    RoomDetail { id: Uuid },
    AssignStudent { dom_id: Uuid, broj: String },
    ReviewRoom { soba_id: Uuid },
    ReportFault { soba_id: Uuid },
    Housing,
    HousingStudents,
    HousingCards,
    HousingFaults,
    Unauthorized,
    /// A known protected page whose parameters are missing or unparseable.
    /// Keeps the page's role set so the guard still runs before "not found".
    Malformed { allowed: &'static [Role] },
    NotFound,
}

impl AppRoute {
    /// Parses `path?query` as found in the address bar.
    pub fn from_url(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        Self::from_location(path, query)
    }

    pub fn from_location(path: &str, query: &str) -> Self {
        let query = Query::parse(query);
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

        let route = match segments.as_slice() {
            [""] | ["login"] => Some(Self::Login),
            ["register"] => Some(Self::Register),
            ["home"] => Some(Self::Home),
            ["canteens"] => Some(Self::Canteens),
            ["canteens", id] => Some(Self::CanteenDetail(decode_component(id))),
            ["menus", "today"] => Some(Self::TodayMenus),
            ["menus", canteen_id] => Some(Self::Menus(decode_component(canteen_id))),
            ["meal", menu_id] => Some(Self::Meal(decode_component(menu_id))),
            ["profile"] => Some(Self::Profile),
            ["doms"] => Some(Self::Doms),
            ["doms", id] => Some(
                Uuid::parse_str(id)
                    .ok()
                    .map_or(Self::Malformed { allowed: SIGNED_IN }, Self::DomDetail),
            ),
            ["rooms", "free"] => Some(
                query
                    .uuid("domId")
                    .map_or(Self::Malformed { allowed: SIGNED_IN }, |dom_id| Self::FreeRooms { dom_id }),
            ),
            ["rooms", "detail"] => Some(
                query
                    .uuid("id")
                    .map_or(Self::Malformed { allowed: SIGNED_IN }, |id| Self::RoomDetail { id }),
            ),
            ["rooms", "assign"] => Some(query.uuid("domId").map_or(Self::Malformed { allowed: ADMIN }, |dom_id| {
                Self::AssignStudent {
                    dom_id,
                    broj: query.get("broj").unwrap_or_default().to_string(),
                }
            })),
            ["rooms", "review"] => Some(
                query
                    .uuid("sobaId")
                    .map_or(Self::Malformed { allowed: STUDENT }, |soba_id| Self::ReviewRoom { soba_id }),
            ),
            ["rooms", "fault"] => Some(
                query
                    .uuid("sobaId")
                    .map_or(Self::Malformed { allowed: STUDENT }, |soba_id| Self::ReportFault { soba_id }),
            ),
            ["housing"] => Some(Self::Housing),
            ["housing", "students"] => Some(Self::HousingStudents),
            ["housing", "cards"] => Some(Self::HousingCards),
            ["housing", "faults"] => Some(Self::HousingFaults),
            ["unauthorized"] => Some(Self::Unauthorized),
            _ => None,
        };
        route.unwrap_or(Self::NotFound)
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Register => "/register".into(),
            Self::Home => "/home".into(),
            Self::Canteens => "/canteens".into(),
            Self::CanteenDetail(id) => format!("/canteens/{}", encode_component(id)),
            Self::Menus(canteen_id) => format!("/menus/{}", encode_component(canteen_id)),
            Self::Meal(menu_id) => format!("/meal/{}", encode_component(menu_id)),
            Self::TodayMenus => "/menus/today".into(),
            Self::Profile => "/profile".into(),
            Self::Doms => "/doms".into(),
            Self::DomDetail(id) => format!("/doms/{id}"),
            Self::FreeRooms { dom_id } => format!("/rooms/free?domId={dom_id}"),
            Self::RoomDetail { id } => format!("/rooms/detail?id={id}"),
            Self::AssignStudent { dom_id, broj } if broj.is_empty() => {
                format!("/rooms/assign?domId={dom_id}")
            }
            Self::AssignStudent { dom_id, broj } => {
                format!("/rooms/assign?domId={dom_id}&broj={}", encode_component(broj))
            }
            Self::ReviewRoom { soba_id } => format!("/rooms/review?sobaId={soba_id}"),
            Self::ReportFault { soba_id } => format!("/rooms/fault?sobaId={soba_id}"),
            Self::Housing => "/housing".into(),
            Self::HousingStudents => "/housing/students".into(),
            Self::HousingCards => "/housing/cards".into(),
            Self::HousingFaults => "/housing/faults".into(),
            Self::Unauthorized => "/unauthorized".into(),
            Self::Malformed { .. } | Self::NotFound => "/404".into(),
        }
    }

    /// **核心守卫数据**: roles allowed in; `None` for public routes.
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Self::Login | Self::Register | Self::Unauthorized | Self::NotFound => None,
            Self::Malformed { allowed } => Some(*allowed),
            Self::Meal(_) | Self::ReviewRoom { .. } | Self::ReportFault { .. } => Some(STUDENT),
            Self::AssignStudent { .. }
            | Self::Housing
            | Self::HousingStudents
            | Self::HousingCards
            | Self::HousingFaults => Some(ADMIN),
            Self::Home
            | Self::Canteens
            | Self::CanteenDetail(_)
            | Self::Menus(_)
            | Self::TodayMenus
            | Self::Profile
            | Self::Doms
            | Self::DomDetail(_)
            | Self::FreeRooms { .. }
            | Self::RoomDetail { .. } => Some(SIGNED_IN),
        }
    }

    pub fn is_public(&self) -> bool {
        self.allowed_roles().is_none()
    }

    /// 已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// Where a signed-in user lands.
    pub fn home() -> Self {
        Self::Home
    }

    /// Maps a requested route to the one actually shown, asking the guard
    /// exactly once for protected routes.
    pub fn resolve(self, authenticated: bool, role: Option<Role>) -> Self {
        if self.should_redirect_when_authenticated() && authenticated && role.is_some() {
            return Self::home();
        }
        let Some(allowed) = self.allowed_roles() else {
            return self;
        };

        match check_access(authenticated, role, allowed) {
            AccessDecision::Allow => self,
            AccessDecision::Redirect(RedirectTarget::Login) => {
                campus::log_info!("[Router] {} requires login", self);
                Self::Login
            }
            AccessDecision::Redirect(RedirectTarget::Unauthorized) => {
                campus::log_warn!("[Router] {:?} may not open {}", role, self);
                Self::Unauthorized
            }
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// Decoded `key=value` pairs of a query string.
struct Query(Vec<(String, String)>);

impl Query {
    fn parse(query: &str) -> Self {
        let pairs = query
            .trim_start_matches('?')
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(k), decode_component(v))
            })
            .collect();
        Self(pairs)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn uuid(&self, key: &str) -> Option<Uuid> {
        self.get(key).and_then(|v| Uuid::parse_str(v.trim()).ok())
    }
}

/// Percent-decoding (`+` as space). Invalid escapes are kept verbatim.
fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        let id = Uuid::new_v4();
        let routes = [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Home,
            AppRoute::Canteens,
            AppRoute::CanteenDetail("c 1".into()),
            AppRoute::Menus("c1".into()),
            AppRoute::Meal("m1".into()),
            AppRoute::TodayMenus,
            AppRoute::Profile,
            AppRoute::Doms,
            AppRoute::DomDetail(id),
            AppRoute::FreeRooms { dom_id: id },
            AppRoute::RoomDetail { id },
            AppRoute::AssignStudent { dom_id: id, broj: "12A".into() },
            AppRoute::AssignStudent { dom_id: id, broj: String::new() },
            AppRoute::ReviewRoom { soba_id: id },
            AppRoute::ReportFault { soba_id: id },
            AppRoute::Housing,
            AppRoute::HousingStudents,
            AppRoute::HousingCards,
            AppRoute::HousingFaults,
            AppRoute::Unauthorized,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_url(&route.to_path()), route, "{route}");
        }
    }

    #[test]
    fn root_is_login_and_unknown_is_not_found() {
        assert_eq!(AppRoute::from_url("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_url("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn protected_pages_with_bad_params_keep_their_roles() {
        assert_eq!(AppRoute::from_url("/doms/not-a-uuid"), AppRoute::Malformed { allowed: SIGNED_IN });
        assert_eq!(AppRoute::from_url("/rooms/free"), AppRoute::Malformed { allowed: SIGNED_IN });
        assert_eq!(AppRoute::from_url("/rooms/assign"), AppRoute::Malformed { allowed: ADMIN });
        assert_eq!(AppRoute::from_url("/rooms/review?sobaId=x"), AppRoute::Malformed { allowed: STUDENT });
        assert_eq!(AppRoute::Malformed { allowed: ADMIN }.to_path(), "/404");
    }

    #[test]
    fn student_on_assign_page_is_sent_to_unauthorized() {
        let id = Uuid::new_v4();
        for url in ["/rooms/assign".to_string(), format!("/rooms/assign?domId={id}&broj=3")] {
            let shown = AppRoute::from_url(&url).resolve(true, Some(Role::Student));
            assert_eq!(shown, AppRoute::Unauthorized, "{url}");
        }
    }

    #[test]
    fn resolve_applies_the_guard_per_route() {
        let assign = AppRoute::from_url("/rooms/assign");
        assert_eq!(assign.clone().resolve(false, None), AppRoute::Login);
        assert_eq!(assign.resolve(true, Some(Role::Admin)), AppRoute::Malformed { allowed: ADMIN });

        let id = Uuid::new_v4();
        let review = AppRoute::ReviewRoom { soba_id: id };
        assert_eq!(review.clone().resolve(true, Some(Role::Student)), review);
        assert_eq!(review.resolve(true, Some(Role::Admin)), AppRoute::Unauthorized);

        assert_eq!(AppRoute::Login.resolve(true, Some(Role::Student)), AppRoute::Home);
        assert_eq!(AppRoute::Login.resolve(true, None), AppRoute::Login);
        assert_eq!(AppRoute::NotFound.resolve(false, None), AppRoute::NotFound);
        assert_eq!(AppRoute::Unauthorized.resolve(false, None), AppRoute::Unauthorized);
    }

    #[test]
    fn today_is_not_a_canteen_id() {
        assert_eq!(AppRoute::from_url("/menus/today"), AppRoute::TodayMenus);
    }

    #[test]
    fn query_order_does_not_matter() {
        let id = Uuid::new_v4();
        assert_eq!(
            AppRoute::from_location("/rooms/assign", &format!("broj=7&domId={id}")),
            AppRoute::AssignStudent { dom_id: id, broj: "7".into() }
        );
    }

    #[test]
    fn role_policy() {
        let id = Uuid::nil();
        assert_eq!(AppRoute::AssignStudent { dom_id: id, broj: "1".into() }.allowed_roles(), Some(ADMIN));
        assert_eq!(AppRoute::ReviewRoom { soba_id: id }.allowed_roles(), Some(STUDENT));
        assert_eq!(AppRoute::Meal("m".into()).allowed_roles(), Some(STUDENT));
        assert_eq!(AppRoute::HousingFaults.allowed_roles(), Some(ADMIN));
        assert_eq!(AppRoute::Doms.allowed_roles(), Some(SIGNED_IN));
        assert!(AppRoute::Login.is_public() && AppRoute::NotFound.is_public());
    }

    #[test]
    fn decodes_percent_escapes() {
        assert_eq!(decode_component("ana%20mari%C4%87"), "ana marić");
        assert_eq!(decode_component("a+b"), "a b");
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
    }
}
