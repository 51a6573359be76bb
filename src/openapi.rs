//! OpenAPI documentation for the platform API.
//!
//! The generated spec is served at `/api-docs/openapi.json`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Session-token security scheme for protected routes.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearer_token".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Session token obtained from `POST /api/v1/auth/login`, sent as \
                            `Authorization: Bearer <token>`.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::forgot_password,
        api::handlers::auth::reset_password,
        api::handlers::auth::change_password,
        api::handlers::auth::me,
        api::handlers::users::list_users,
        api::handlers::users::update_user,
        api::handlers::courses::list_courses,
        api::handlers::courses::get_course,
        api::handlers::courses::admin_list_courses,
        api::handlers::courses::create_course,
        api::handlers::courses::update_course,
        api::handlers::courses::delete_course,
        api::handlers::blogs::list_blogs,
        api::handlers::blogs::get_blog,
        api::handlers::blogs::admin_list_blogs,
        api::handlers::blogs::create_blog,
        api::handlers::blogs::update_blog,
        api::handlers::blogs::delete_blog,
        api::handlers::records::get_certificate,
        api::handlers::records::create_certificate,
        api::handlers::records::get_id_card,
        api::handlers::records::create_id_card,
        api::handlers::referrals::create_referral,
        api::handlers::referrals::list_referrals,
        api::handlers::homepage::get_homepage,
        api::handlers::homepage::update_homepage,
        api::handlers::uploads::upload_file,
    ),
    components(schemas(
        api::models::auth::RegisterRequest,
        api::models::auth::LoginRequest,
        api::models::auth::AuthResponse,
        api::models::auth::PasswordResetRequest,
        api::models::auth::PasswordResetConfirmRequest,
        api::models::auth::ChangePasswordRequest,
        api::models::auth::AuthMessageResponse,
        api::models::users::Role,
        api::models::users::UserResponse,
        api::models::users::UserUpdate,
        api::models::courses::CourseCreate,
        api::models::courses::CourseUpdate,
        api::models::courses::CourseResponse,
        api::models::blogs::BlogCreate,
        api::models::blogs::BlogUpdate,
        api::models::blogs::BlogResponse,
        api::models::records::CertificateCreate,
        api::models::records::CertificateResponse,
        api::models::records::IdCardCreate,
        api::models::records::IdCardResponse,
        api::models::referrals::ReferralCreate,
        api::models::referrals::ReferralResponse,
        api::models::homepage::HomepageUpdate,
        api::models::homepage::HomepageResponse,
        api::models::uploads::UploadResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication and account access"),
        (name = "courses", description = "Public course catalog"),
        (name = "blogs", description = "Public blog posts"),
        (name = "records", description = "Certificates and ID cards by roll number"),
        (name = "referrals", description = "Referral submissions"),
        (name = "homepage", description = "Homepage content"),
        (name = "admin", description = "Admin management surface"),
    ),
    info(
        title = "coursectl API",
        description = "Backend API for the course platform: auth, catalog, student records, referrals, and site content."
    )
)]
pub struct ApiDoc;
