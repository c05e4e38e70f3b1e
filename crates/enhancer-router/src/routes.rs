//! The application's route table

use crate::route::RouteRecord;

pub const LOGIN: &str = "Login";
pub const REGISTER: &str = "Register";
pub const REPORT_LIST: &str = "ReportList";
pub const REPORT_DETAIL: &str = "ReportDetail";

pub const LOGIN_PATH: &str = "/login";
pub const REPORTS_PATH: &str = "/reports";

pub fn default_routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::redirect("/", REPORTS_PATH),
        RouteRecord::new(LOGIN_PATH).named(LOGIN).with_auth(false),
        RouteRecord::new("/register").named(REGISTER).with_auth(false),
        RouteRecord::new(REPORTS_PATH).named(REPORT_LIST).with_auth(true),
        RouteRecord::new("/report/:id")
            .named(REPORT_DETAIL)
            .with_auth(true),
    ]
}
