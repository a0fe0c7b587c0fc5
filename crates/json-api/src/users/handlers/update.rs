//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::users::data::ProfileUpdate;

use crate::{
    envelope::{Envelope, validation_failed},
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::ProfileResponse},
};

/// Update Profile Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl TryFrom<UpdateProfileRequest> for ProfileUpdate {
    type Error = Vec<String>;

    fn try_from(request: UpdateProfileRequest) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let name = request.name.map(|name| name.trim().to_string());

        if name.as_deref().is_some_and(str::is_empty) {
            errors.push("Name cannot be empty".to_string());
        }

        let phone = request.phone.map(|phone| phone.trim().to_string());

        if phone.as_deref().is_some_and(str::is_empty) {
            errors.push("Phone cannot be empty".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProfileUpdate { name, phone })
    }
}

/// Update Profile Handler
#[endpoint(
    tags("users"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Validation failed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "users.update_profile", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProfileResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let update = ProfileUpdate::try_from(json.into_inner()).map_err(validation_failed)?;

    let profile = state
        .app
        .users
        .update_profile(user, update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        Envelope::data(profile.into()).message("Profile updated successfully"),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::users::{
        MockUsersService, UsersServiceError, records::UserRecord,
    };

    use crate::{
        envelope::ErrorEnvelope,
        test_helpers::{Mocks, TEST_USER_UUID, timestamp},
    };

    use super::*;

    fn make_service(users: MockUsersService) -> Service {
        Mocks {
            users,
            ..Mocks::default()
        }
        .service(Router::with_path("users/profile").put(handler))
    }

    #[tokio::test]
    async fn test_update_profile_trims_and_forwards_fields() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_profile()
            .once()
            .withf(|user, update| {
                *user == TEST_USER_UUID
                    && *update
                        == ProfileUpdate {
                            name: Some("Grace Hopper".to_string()),
                            phone: Some("555-0100".to_string()),
                        }
            })
            .return_once(|uuid, update| {
                Ok(UserRecord {
                    uuid,
                    name: update.name.unwrap_or_default(),
                    email: "grace@example.com".to_string(),
                    phone: update.phone,
                    created_at: timestamp(),
                    updated_at: timestamp(),
                })
            });

        let mut res = TestClient::put("http://example.com/users/profile")
            .json(&json!({ "name": " Grace Hopper ", "phone": "555-0100" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Envelope<ProfileResponse> = res.take_json().await?;

        assert_eq!(body.message.as_deref(), Some("Profile updated successfully"));

        let profile = body.data.ok_or("missing profile")?;

        assert_eq!(profile.name, "Grace Hopper");
        assert_eq!(profile.phone.as_deref(), Some("555-0100"));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_blank_fields_return_400() -> TestResult {
        let mut users = MockUsersService::new();

        users.expect_update_profile().never();

        let mut res = TestClient::put("http://example.com/users/profile")
            .json(&json!({ "name": "  ", "phone": "" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(
            body.errors,
            Some(vec![
                "Name cannot be empty".to_string(),
                "Phone cannot be empty".to_string(),
            ])
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_unknown_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_update_profile()
            .once()
            .return_once(|_, _| Err(UsersServiceError::NotFound));

        let mut res = TestClient::put("http://example.com/users/profile")
            .json(&json!({ "name": "Ghost" }))
            .send(&make_service(users))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(body.message, "User not found");

        Ok(())
    }
}
