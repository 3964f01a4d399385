//! `elevator-request` — the `Request` record and the pending/served ledger.
//!
//! # Crate layout
//!
//! | Module      | Contents                                  |
//! |-------------|--------------------------------------------|
//! | [`request`] | `Request`, `RequestId`, `RequestKind`     |
//! | [`book`]    | `RequestBook` — pending map + served archive |
//! | [`error`]   | `RequestError`, `RequestResult<T>`        |

pub mod book;
pub mod error;
pub mod request;

pub use book::RequestBook;
pub use error::{RequestError, RequestResult};
pub use request::{Request, RequestId, RequestKind};
