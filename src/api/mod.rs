pub mod client;
pub mod transport;

pub use client::{ApiClient, AuthMode};
pub use transport::{
    ApiRequest, ApiResponse, FormField, FormValue, HttpMethod, HttpTransport, ReqwestTransport,
    RequestBody,
};
