pub fn app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Value sent in the `User-Agent` header of every case request.
pub fn user_agent() -> String {
    format!("petcheck/{}", app_version())
}
