use std::io;

use bytes::BytesMut;

use crate::date;

const MAX_HEADERS: usize = 8;

/// Response under construction. Extra headers are complete `'static`
/// lines, the body goes into a per-connection scratch buffer.
pub struct Response<'a> {
    status_code: u16,
    reason: &'static str,
    headers: [&'static str; MAX_HEADERS],
    headers_len: usize,
    body: &'a mut BytesMut,
}

impl<'a> Response<'a> {
    pub(crate) fn new(body: &'a mut BytesMut) -> Response<'a> {
        body.clear();
        Response {
            status_code: 200,
            reason: "OK",
            headers: [""; MAX_HEADERS],
            headers_len: 0,
            body,
        }
    }

    pub fn status_code(&mut self, code: u16, reason: &'static str) -> &mut Self {
        self.status_code = code;
        self.reason = reason;
        self
    }

    /// Append a complete header line, e.g. `"Content-Type: application/json"`.
    pub fn header(&mut self, line: &'static str) -> &mut Self {
        debug_assert!(self.headers_len < MAX_HEADERS);
        self.headers[self.headers_len] = line;
        self.headers_len += 1;
        self
    }

    pub fn body_mut(&mut self) -> &mut BytesMut {
        self.body
    }
}

pub(crate) fn encode(rsp: Response, buf: &mut BytesMut) {
    let mut itoa_buf = itoa::Buffer::new();

    buf.extend_from_slice(b"HTTP/1.1 ");
    buf.extend_from_slice(itoa_buf.format(rsp.status_code).as_bytes());
    buf.extend_from_slice(b" ");
    buf.extend_from_slice(rsp.reason.as_bytes());
    buf.extend_from_slice(b"\r\nServer: may-greet\r\nDate: ");
    date::append_date(buf);
    buf.extend_from_slice(b"\r\nContent-Length: ");
    buf.extend_from_slice(itoa_buf.format(rsp.body.len()).as_bytes());

    for line in &rsp.headers[..rsp.headers_len] {
        buf.extend_from_slice(b"\r\n");
        buf.extend_from_slice(line.as_bytes());
    }

    buf.extend_from_slice(b"\r\n\r\n");
    buf.extend_from_slice(rsp.body);
}

pub(crate) fn encode_error(err: io::Error, buf: &mut BytesMut) {
    error!("service call failed: {err}");
    let body = b"Internal Server Error";
    let mut itoa_buf = itoa::Buffer::new();

    buf.extend_from_slice(b"HTTP/1.1 500 Internal Server Error\r\nServer: may-greet\r\nDate: ");
    date::append_date(buf);
    buf.extend_from_slice(b"\r\nContent-Length: ");
    buf.extend_from_slice(itoa_buf.format(body.len()).as_bytes());
    buf.extend_from_slice(b"\r\n\r\n");
    buf.extend_from_slice(body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_defaults_with_headers_and_body() {
        let mut body_buf = BytesMut::new();
        let mut rsp = Response::new(&mut body_buf);
        rsp.header("Content-Type: application/json");
        rsp.body_mut().extend_from_slice(b"{}");

        let mut out = BytesMut::new();
        encode(rsp, &mut out);

        let text = std::str::from_utf8(&out).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("\r\nDate: "));
        assert!(text.contains("\r\nContent-Length: 2\r\n"));
        assert!(text.contains("\r\nContent-Type: application/json\r\n"));
        assert!(text.ends_with("\r\n\r\n{}"));
    }

    #[test]
    fn encodes_custom_status_line() {
        let mut body_buf = BytesMut::new();
        let mut rsp = Response::new(&mut body_buf);
        rsp.status_code(404, "Not Found");

        let mut out = BytesMut::new();
        encode(rsp, &mut out);

        let text = std::str::from_utf8(&out).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("\r\nContent-Length: 0\r\n"));
    }

    #[test]
    fn service_errors_encode_as_500() {
        let mut out = BytesMut::new();
        encode_error(io::Error::other("boom"), &mut out);

        let text = std::str::from_utf8(&out).unwrap();
        assert!(text.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
        assert!(text.ends_with("\r\n\r\nInternal Server Error"));
    }
}
