use dioxus::prelude::*;
use types::{
    Ride, RideId, StatusAction, User, UserId, UserSession,
    analytics::{DashboardStats, RideSummary},
    auth::RegisterForm,
};

#[post("/api/current-user")]
pub async fn get_current_user() -> ServerFnResult<Option<UserSession>> {
    match server::get_session_from_cookie().await {
        Ok(session) => Ok(Some(session)),
        Err(_) => Ok(None),
    }
}

#[post("/api/users")]
pub async fn list_users() -> ServerFnResult<Vec<User>> {
    server::require_admin_session().await?;
    Ok(server::state()?.directory.list_users().await)
}

#[post("/api/users/status")]
pub async fn update_user_status(user_id: UserId, action: StatusAction) -> ServerFnResult<User> {
    let admin = server::require_admin_session().await?;
    tracing::debug!(admin = %admin.user_id, user = %user_id, ?action, "status change requested");
    let state = server::state()?;
    let user = state.directory.update_user_status(&user_id, action).await?;
    if action.is_restrictive() {
        state.sessions.revoke_user(&user_id).await;
    }
    Ok(user)
}

#[post("/api/rides")]
pub async fn list_rides() -> ServerFnResult<Vec<Ride>> {
    server::require_admin_session().await?;
    Ok(server::state()?.directory.list_rides().await)
}

#[post("/api/rides/get")]
pub async fn get_ride(ride_id: RideId) -> ServerFnResult<Ride> {
    server::require_admin_session().await?;
    Ok(server::state()?.directory.get_ride(&ride_id).await?)
}

#[post("/api/stats")]
pub async fn dashboard_stats() -> ServerFnResult<DashboardStats> {
    server::require_admin_session().await?;
    Ok(server::state()?.directory.stats().await)
}

#[post("/api/my-rides")]
pub async fn my_ride_summary() -> ServerFnResult<RideSummary> {
    let session = server::get_session_from_cookie().await?;
    Ok(server::state()?.directory.ride_summary(&session).await)
}

#[post("/api/register")]
pub async fn register(form: RegisterForm) -> ServerFnResult<User> {
    let registration = form
        .validate()
        .map_err(|errors| ServerFnError::new(errors.to_string()))?;
    Ok(server::state()?.directory.register(registration).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_user(id: &str) -> types::Result<&'static str> {
        match id {
            "usr_001" => Ok("Karim Ahmed"),
            _ => Err(types::err!("no user with id '{}'", id)),
        }
    }

    fn lookup(id: &str) -> ServerFnResult<&'static str> {
        Ok(find_user(id)?)
    }

    #[test]
    fn directory_errors_become_server_fn_errors() {
        assert_eq!(lookup("usr_001").unwrap(), "Karim Ahmed");
        let err = lookup("usr_404").unwrap_err();
        assert!(err.to_string().contains("no user with id 'usr_404'"));
    }
}
