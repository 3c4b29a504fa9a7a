pub mod session_user;
pub mod validated_json;

pub use session_user::SessionUser;
pub use validated_json::ValidatedJson;
