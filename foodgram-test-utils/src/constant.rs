//! Constant values shared across tests.
//!
//! These are placeholder values only, none of them are real credentials.

/// Password used for users created through the registration flow in tests.
pub static TEST_PASSWORD: &str = "correct-horse-battery-staple";

/// Placeholder hash stored by fixtures which insert users directly.
///
/// This is not a valid PHC string, logging in as a fixture user always fails.
pub static TEST_PASSWORD_HASH: &str = "fixture-password-hash";

/// A 1x1 PNG encoded as a data URI, accepted by the recipe image decoder.
pub static TEST_IMAGE_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
