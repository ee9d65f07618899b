pub mod auth;
pub mod error;
pub mod extract;
pub mod jwt;
pub mod logging;
pub mod response;
pub mod serde_ext;

pub use response::BaseResponse;
pub use response::ErrorResponse;
