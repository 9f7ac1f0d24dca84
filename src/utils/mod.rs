pub mod ip;
pub mod referrer;
pub mod session;
pub mod user_agent;

pub use ip::extract_client_ip;
pub use referrer::extract_registrable_domain;
pub use session::{current_date_string, date_string, session_pseudonym};
pub use user_agent::{ClientKind, classify_user_agent};
