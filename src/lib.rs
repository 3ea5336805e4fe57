//! Typed controllers for paginated, filtered and sorted REST collections.
//!
//! The controllers are framework agnostic: a list page (or the `ahub` CLI)
//! owns one [`controllers::RemoteCollection`] per table and binds its handlers
//! to its inputs. Authentication comes from an explicit
//! [`session::SessionStore`] and all HTTP goes through a
//! [`transport::Transport`].

pub mod controllers;
pub mod models;
pub mod session;
pub mod transport;

#[cfg(feature = "cli")]
pub mod cli;
