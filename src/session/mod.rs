//! Login state shared by every controller that issues authenticated requests.
//!
//! A single [`SessionStore`] owns the token for the whole process. It is
//! created once (in memory or backed by a JSON file) and handed to each
//! controller behind an `Arc`; only `login` and `logout` ever write it.

mod paths;
mod store;

#[cfg(test)]
mod store_test;

pub use paths::{get_data_dir, get_session_path};
pub use store::{Session, SessionError, SessionResult, SessionStore};
