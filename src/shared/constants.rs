/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Largest amount a `NUMERIC(10, 2)` money column holds (99,999,999.99)
pub const MAX_AMOUNT: rust_decimal::Decimal =
    rust_decimal::Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Administrator role - manages the catalog and booking lifecycle
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// BOOKING MESSAGES
// =============================================================================

/// Returned when a requested range overlaps a pending or active booking
pub const MSG_DATES_UNAVAILABLE: &str = "This bike is already booked for the selected dates.";

pub const MSG_BOOKED_TODAY: &str = "This bike is already booked for today.";

pub const MSG_AVAILABLE_TODAY: &str = "This bike is available for booking.";
