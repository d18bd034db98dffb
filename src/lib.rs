//! Tiny HTTP/1.1 server that answers every request with a JSON greeting
//! and the time it was handled, implemented on top of `MAY` coroutines.

#[macro_use]
extern crate log;
#[macro_use]
extern crate may;

mod config;
mod date;
mod greeting;
mod request;
mod response;
mod server;

pub use config::{port_from_env, DEFAULT_PORT};
pub use greeting::{GreetingService, GREETING};
pub use request::Request;
pub use response::Response;
pub use server::{HttpServer, HttpService, Server};
