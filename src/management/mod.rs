mod session;

pub use session::REFRESH_TOKEN_COOKIE;
pub use session::SESSION_COOKIES;
pub use session::SESSION_MAX_AGE_SECS;
pub use session::SessionManager;
pub use session::TRACKS_COOKIE;
pub use session::{NAME_COOKIE, TIME_RANGE_COOKIE, TRACK_LIMIT_COOKIE};
