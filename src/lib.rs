pub mod body;
pub mod config;
pub mod cookie;
pub mod exception;
pub mod header;
pub mod param;
pub mod request;
pub mod resolver;
pub mod session;
pub mod util;

pub use config::Config;
pub use cookie::HttpCookie;
pub use exception::{Exception, ParseError};
pub use param::HttpRequestMethod;
pub use request::Request;
pub use resolver::resolve_session;
pub use session::{Session, SessionRepository, SessionStore};
