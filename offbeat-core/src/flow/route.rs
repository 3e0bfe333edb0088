//! Screen routes and the navigation contract between them.

use offbeat_model::PhoneNumber;

/// Every screen the client can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    EnterPhone,
    /// Carries the number the code was sent to.
    VerifyOtp { phone: PhoneNumber },
    UserInfo,
    Home,
    NearMe,
    PlanWeekend,
    Profile,
}

impl Route {
    /// Path component, e.g. `/auth/verify-otp?phone=9876543210`.
    pub fn path(&self) -> String {
        match self {
            Route::EnterPhone => "/auth/enter-phone".to_string(),
            Route::VerifyOtp { phone } => {
                format!("/auth/verify-otp?phone={}", phone.as_str())
            }
            Route::UserInfo => "/auth/user-info".to_string(),
            Route::Home => "/home".to_string(),
            Route::NearMe => "/near-me".to_string(),
            Route::PlanWeekend => "/plan-weekend".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    /// Browsing screens reachable from home.
    pub fn is_secondary(&self) -> bool {
        matches!(self, Route::NearMe | Route::PlanWeekend | Route::Profile)
    }

    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Route::EnterPhone | Route::VerifyOtp { .. } | Route::UserInfo
        )
    }

    /// Where the back affordance leads, if the screen has one.
    pub fn back(&self) -> Option<Route> {
        match self {
            route if route.is_secondary() => Some(Route::Home),
            Route::VerifyOtp { .. } => Some(Route::EnterPhone),
            _ => None,
        }
    }

    /// Target after the session is rejected by the server.
    pub fn unauthorized() -> Route {
        Route::EnterPhone
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
