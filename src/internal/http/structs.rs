pub mod client_config;
pub mod http_response;
pub mod reqwest_client;

pub use client_config::{BasicAuth, ClientConfig};
pub use http_response::{HttpResponse, ResponseBody};
pub use reqwest_client::ReqwestClient;
