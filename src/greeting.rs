use std::io;

use bytes::BufMut;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::request::Request;
use crate::response::Response;
use crate::server::HttpService;

/// Greeting string returned to every client; the wording is part of the
/// wire contract.
pub const GREETING: &str = "Hello from Node.js!";

#[derive(Serialize)]
struct Greeting<'a> {
    message: &'a str,
    time: DateTime<Utc>,
}

/// Answers every request, whatever the method or path, with the fixed
/// greeting and the time the request was handled.
#[derive(Clone)]
pub struct GreetingService;

impl HttpService for GreetingService {
    fn call(&mut self, _req: Request, rsp: &mut Response) -> io::Result<()> {
        rsp.header("Content-Type: application/json");
        let payload = Greeting {
            message: GREETING,
            time: Utc::now(),
        };
        serde_json::to_writer(rsp.body_mut().writer(), &payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request;
    use bytes::BytesMut;

    fn call_service(raw: &[u8]) -> BytesMut {
        let mut headers = [httparse::EMPTY_HEADER; request::MAX_HEADERS];
        let req = request::decode(raw, &mut headers).unwrap().unwrap();
        let mut body = BytesMut::new();
        let mut rsp = Response::new(&mut body);
        GreetingService.call(req, &mut rsp).unwrap();
        body
    }

    #[test]
    fn payload_has_exactly_message_and_time() {
        let body = call_service(b"GET / HTTP/1.1\r\n\r\n");
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["message"], GREETING);
        let time = obj["time"].as_str().unwrap();
        DateTime::parse_from_rfc3339(time).unwrap();
    }

    #[test]
    fn message_comes_before_time() {
        let body = call_service(b"DELETE /whatever HTTP/1.1\r\n\r\n");
        assert!(body.starts_with(b"{\"message\":\"Hello from Node.js!\",\"time\":"));
    }

    #[test]
    fn method_and_body_do_not_change_the_payload() {
        let body = call_service(b"POST /submit HTTP/1.1\r\nContent-Length: 4\r\n\r\ndata");
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["message"], GREETING);
    }
}
