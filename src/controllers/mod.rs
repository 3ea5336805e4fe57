//! State controllers behind every list, table and form.
//!
//! # Architecture
//!
//! - `pagination`, `sorting`, `filters`: leaf controllers, pure state
//! - `collection`: composes the three leaves with a transport and owns the
//!   loading/error/data state of one remote list
//! - `validation`: form values, ordered rules and error state
//! - `table_actions`: create/update/delete/status calls with a refresh hook
//! - `modal`: open/closed dialog state carrying the row being edited

mod collection;
mod error;
mod filters;
mod modal;
mod pagination;
mod request;
mod sorting;
mod table_actions;
pub mod validation;


use std::fmt::Debug;
use std::hash::Hash;

pub use collection::*;
pub use error::{ApiError, ApiResult};
pub use filters::*;
pub use modal::Modal;
pub use pagination::Pagination;
pub use sorting::{SortDirection, Sorting};
pub use table_actions::*;
pub use validation::{FormValidation, Rule};

#[cfg(feature = "cli")]
pub(crate) use request::{application_error, decode_envelope};

/// A member of a caller-declared, closed set of field names.
///
/// Sort fields, filter keys and form fields are all enums implementing this
/// trait; `name` is the string the backend knows the field by.
pub trait FieldName: Copy + Eq + Hash + Debug + 'static {
    fn name(&self) -> &'static str;
}
