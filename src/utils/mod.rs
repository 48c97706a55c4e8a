pub mod slug;
pub mod url_validator;

pub use slug::validate_slug;
pub use url_validator::{is_whatsapp_link, validate_wa_link};
