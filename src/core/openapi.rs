use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::bikes::{dtos as bikes_dtos, handlers as bikes_handlers};
use crate::features::bookings::{
    dtos as bookings_dtos, handlers as bookings_handlers, models as bookings_models,
};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::users::{dtos as users_dtos, handlers::user_handler};
use crate::shared::types::Meta;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Catalog
        bikes_handlers::home,
        bikes_handlers::list_bikes,
        bikes_handlers::get_bike,
        categories_handlers::list_categories,
        categories_handlers::get_category,
        // Bookings
        bookings_handlers::create_booking,
        bookings_handlers::list_my_bookings,
        bookings_handlers::get_my_booking,
        // Users
        user_handler::create_user,
        user_handler::get_me,
        user_handler::update_profile,
        // Admin
        admin_handlers::create_category,
        admin_handlers::delete_category,
        admin_handlers::list_bikes,
        admin_handlers::create_bike,
        admin_handlers::set_bike_availability,
        admin_handlers::list_bookings,
        admin_handlers::set_booking_status,
        admin_handlers::complete_bookings,
        admin_handlers::list_users,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Catalog
            bikes_dtos::BikeResponseDto,
            bikes_dtos::BikeDetailDto,
            bikes_dtos::HomeDto,
            bikes_dtos::CreateBikeDto,
            bikes_dtos::UpdateAvailabilityDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryDetailDto,
            categories_dtos::CreateCategoryDto,
            // Bookings
            bookings_models::BookingStatus,
            bookings_dtos::CreateBookingDto,
            bookings_dtos::BookingResponseDto,
            bookings_dtos::UpdateBookingStatusDto,
            bookings_dtos::BookingStatusChangeDto,
            bookings_dtos::CompleteBookingsDto,
            bookings_dtos::CompleteBookingsResultDto,
            // Users
            users_dtos::UserResponseDto,
            users_dtos::ProfileDto,
            users_dtos::CreateUserDto,
            users_dtos::UpdateProfileDto,
            // Admin
            admin_dtos::AdminBookingDto,
        )
    ),
    tags(
        (name = "bikes", description = "Bike catalog and home listing (public)"),
        (name = "categories", description = "Bike categories (public)"),
        (name = "bookings", description = "Booking requests and the caller's bookings"),
        (name = "users", description = "Local accounts and profiles"),
        (name = "admin", description = "Admin endpoints (admin role only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Bike Rental API",
        version = "0.1.0",
        description = "API documentation for the bike rental booking service",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to the OpenAPI document
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_booking_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/bikes/{id}/bookings"));
        assert!(paths.contains_key("/api/admin/bookings/{id}/status"));
        assert!(paths.contains_key("/api/users/me/profile"));
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Rentals".to_string(),
            version: "9.9.9".to_string(),
            description: "staging".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Rentals");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
