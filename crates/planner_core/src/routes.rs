//! Named views of the planning application.
//!
//! The core never renders; hosts map these onto whatever navigation they use.

use crate::auth::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    SignIn,
    Register,
    AdminDashboard,
    VolunteerDashboard,
    Services,
    Songs,
    Volunteers,
    Teams,
    Calendar,
    Profile,
    NotFound,
}

const ADMIN_MENU: &[Route] = &[
    Route::AdminDashboard,
    Route::Volunteers,
    Route::Services,
    Route::Songs,
    Route::Teams,
    Route::Calendar,
];

const VOLUNTEER_MENU: &[Route] = &[
    Route::VolunteerDashboard,
    Route::Calendar,
    Route::Profile,
];

impl Route {
    /// Resolves a path; a single trailing slash is ignored, anything
    /// unknown is [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        match path {
            "/" | "" => Self::Landing,
            "/signin" => Self::SignIn,
            "/register" => Self::Register,
            "/admin" => Self::AdminDashboard,
            "/volunteer" => Self::VolunteerDashboard,
            "/services" => Self::Services,
            "/songs" => Self::Songs,
            "/volunteers" => Self::Volunteers,
            "/teams" => Self::Teams,
            "/calendar" => Self::Calendar,
            "/profile" => Self::Profile,
            _ => Self::NotFound,
        }
    }

    /// Canonical path; `NotFound` has none of its own.
    pub fn path(self) -> Option<&'static str> {
        let path = match self {
            Self::Landing => "/",
            Self::SignIn => "/signin",
            Self::Register => "/register",
            Self::AdminDashboard => "/admin",
            Self::VolunteerDashboard => "/volunteer",
            Self::Services => "/services",
            Self::Songs => "/songs",
            Self::Volunteers => "/volunteers",
            Self::Teams => "/teams",
            Self::Calendar => "/calendar",
            Self::Profile => "/profile",
            Self::NotFound => return None,
        };
        Some(path)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Landing => "Home",
            Self::SignIn => "Sign In",
            Self::Register => "Register",
            Self::AdminDashboard | Self::VolunteerDashboard => "Dashboard",
            Self::Services => "Services",
            Self::Songs => "Song Library",
            Self::Volunteers => "Volunteers",
            Self::Teams => "Teams & Roles",
            Self::Calendar => "Calendar",
            Self::Profile => "Profile",
            Self::NotFound => "Not Found",
        }
    }

    /// Where a freshly signed-in user lands.
    pub fn dashboard_for(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::AdminDashboard,
            UserRole::Volunteer => Self::VolunteerDashboard,
        }
    }

    /// Sidebar entries shown for `role`.
    pub fn menu_for(role: UserRole) -> &'static [Route] {
        match role {
            UserRole::Admin => ADMIN_MENU,
            UserRole::Volunteer => VOLUNTEER_MENU,
        }
    }

    pub fn is_public(self) -> bool {
        matches!(
            self,
            Self::Landing | Self::SignIn | Self::Register | Self::NotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Route;
    use crate::auth::UserRole;

    const NAMED: [Route; 11] = [
        Route::Landing,
        Route::SignIn,
        Route::Register,
        Route::AdminDashboard,
        Route::VolunteerDashboard,
        Route::Services,
        Route::Songs,
        Route::Volunteers,
        Route::Teams,
        Route::Calendar,
        Route::Profile,
    ];

    #[test]
    fn every_named_route_parses_back_from_its_path() {
        for route in NAMED {
            let path = route.path().unwrap();
            assert_eq!(Route::parse(path), route, "path {path}");
        }
    }

    #[test]
    fn unknown_paths_and_trailing_slashes() {
        assert_eq!(Route::parse("/songs/"), Route::Songs);
        assert_eq!(Route::parse("/songs/42"), Route::NotFound);
        assert_eq!(Route::parse("/SONGS"), Route::NotFound);
        assert_eq!(Route::NotFound.path(), None);
    }

    #[test]
    fn menus_follow_role() {
        assert_eq!(Route::dashboard_for(UserRole::Admin), Route::AdminDashboard);
        assert!(Route::menu_for(UserRole::Admin).contains(&Route::Teams));
        assert!(!Route::menu_for(UserRole::Volunteer).contains(&Route::Teams));
        assert!(Route::menu_for(UserRole::Volunteer).contains(&Route::Profile));
    }

    #[test]
    fn only_entry_pages_are_public() {
        let public: Vec<_> = NAMED.into_iter().filter(|route| route.is_public()).collect();
        assert_eq!(public, vec![Route::Landing, Route::SignIn, Route::Register]);
        assert!(Route::NotFound.is_public());
        assert!(Route::menu_for(UserRole::Admin)
            .iter()
            .all(|route| !route.is_public()));
    }
}
