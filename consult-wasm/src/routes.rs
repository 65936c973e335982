use consult_client::auth::DASHBOARD_PATH;

/// Страницы сайта и админки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    Home,
    Universities,
    Courses,
    Classes,
    Blogs,
    About,
    AdminLogin,
    AdminDashboard,
    AdminUniversities,
    AdminCourses,
    AdminClasses,
    AdminBlogs,
    AdminReviews,
    AdminSettings,
    NotFound,
}

pub(crate) const PUBLIC_NAV: [Route; 6] = [
    Route::Home,
    Route::Universities,
    Route::Courses,
    Route::Classes,
    Route::Blogs,
    Route::About,
];

pub(crate) const ADMIN_NAV: [Route; 6] = [
    Route::AdminUniversities,
    Route::AdminCourses,
    Route::AdminClasses,
    Route::AdminBlogs,
    Route::AdminReviews,
    Route::AdminSettings,
];

impl Route {
    pub(crate) fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        match path {
            "" => Self::Home,
            "/universities" => Self::Universities,
            "/courses" => Self::Courses,
            "/classes" => Self::Classes,
            "/blogs" => Self::Blogs,
            "/about" => Self::About,
            "/admin" | "/admin/login" => Self::AdminLogin,
            p if p == DASHBOARD_PATH => Self::AdminDashboard,
            "/admin/universities" => Self::AdminUniversities,
            "/admin/courses" => Self::AdminCourses,
            "/admin/classes" => Self::AdminClasses,
            "/admin/blogs" => Self::AdminBlogs,
            "/admin/reviews" => Self::AdminReviews,
            "/admin/settings" => Self::AdminSettings,
            _ => Self::NotFound,
        }
    }

    pub(crate) fn path(self) -> &'static str {
        match self {
            Self::Home | Self::NotFound => "/",
            Self::Universities => "/universities",
            Self::Courses => "/courses",
            Self::Classes => "/classes",
            Self::Blogs => "/blogs",
            Self::About => "/about",
            Self::AdminLogin => "/admin",
            Self::AdminDashboard => DASHBOARD_PATH,
            Self::AdminUniversities => "/admin/universities",
            Self::AdminCourses => "/admin/courses",
            Self::AdminClasses => "/admin/classes",
            Self::AdminBlogs => "/admin/blogs",
            Self::AdminReviews => "/admin/reviews",
            Self::AdminSettings => "/admin/settings",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Universities | Self::AdminUniversities => "Universities",
            Self::Courses | Self::AdminCourses => "Courses",
            Self::Classes | Self::AdminClasses => "Classes",
            Self::Blogs | Self::AdminBlogs => "Blogs",
            Self::About => "About",
            Self::AdminLogin => "Admin Login",
            Self::AdminDashboard => "Dashboard",
            Self::AdminReviews => "Reviews",
            Self::AdminSettings => "Settings",
            Self::NotFound => "Not Found",
        }
    }

    pub(crate) fn is_admin(self) -> bool {
        self.path().starts_with("/admin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_round_trip() {
        for route in PUBLIC_NAV.into_iter().chain(ADMIN_NAV) {
            assert_eq!(Route::from_path(route.path()), route);
        }
        assert_eq!(Route::from_path(DASHBOARD_PATH), Route::AdminDashboard);
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(Route::from_path("/courses/"), Route::Courses);
        assert_eq!(Route::from_path("/blogs?q=visa"), Route::Blogs);
        assert_eq!(Route::from_path("/"), Route::Home);
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(Route::from_path("/destinations"), Route::NotFound);
        assert!(!Route::NotFound.is_admin());
        assert!(Route::AdminSettings.is_admin());
    }
}
