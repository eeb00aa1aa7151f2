mod identifier;

pub use identifier::{hash_phone_number, is_test_identifier, Identifier, TEST_VERIFICATION_CODE};
