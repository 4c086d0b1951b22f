//! HTTP 미들웨어.

mod authn;

pub use authn::{authenticate, CurrentUser};
