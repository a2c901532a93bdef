pub mod cargo_env {
    pub const CARGO_PKG_NAME: &'static str = env!("CARGO_PKG_NAME");
}

pub mod defaults {
    pub const BIND_ADDRESS: &'static str = "127.0.0.1:8080";
    pub const DATABASE_PATH: &'static str = "perfboard.sqlite3";
    pub const CHART_TITLE: &'static str = "Performance";
    pub const CHART_REPORT_LIMIT: i64 = 100;
    pub const CHART_POINT_SIZE: i64 = 5;
    pub const UPLOAD_FIELD: &'static str = "fileupload";
}

pub mod env {
    pub const SETTINGS_PREFIX: &'static str = "PERFBOARD";
    pub const SETTINGS_SEPARATOR: &'static str = "__";
}
