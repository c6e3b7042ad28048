//! REST client layer: error taxonomy, gateway trait and reqwest transport.
pub mod error;
pub mod gateway;
pub mod http;

pub use error::{ApiError, ApiResult};
pub use gateway::{
    LoginRequest, SavedAddress, SignupRequest, StorefrontApi, UserProfile,
};
pub use http::HttpApi;
