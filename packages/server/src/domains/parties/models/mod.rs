mod party;

pub use party::{NewParty, Party, MEDIA_STATUS_PENDING, MEDIA_STATUS_READY};
