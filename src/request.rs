use std::fmt;
use std::io;
use std::str;

pub(crate) const MAX_HEADERS: usize = 16;

/// A single parsed request, borrowing from the connection read buffer.
pub struct Request<'buf, 'header> {
    method: &'buf str,
    path: &'buf str,
    version: u8,
    headers: &'header [httparse::Header<'buf>],
    body: &'buf [u8],
    // total frame length in the read buffer, header section plus body
    len: usize,
}

impl<'buf, 'header> Request<'buf, 'header> {
    pub fn method(&self) -> &str {
        self.method
    }

    pub fn path(&self) -> &str {
        self.path
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn headers(&self) -> &[httparse::Header<'_>] {
        self.headers
    }

    pub fn body(&self) -> &[u8] {
        self.body
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl<'buf, 'header> fmt::Debug for Request<'buf, 'header> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<HTTP Request {} {}>", self.method, self.path)
    }
}

/// Decode one request from `buf`. Returns `Ok(None)` until the header
/// section and the full `Content-Length` body have arrived.
pub(crate) fn decode<'buf, 'header>(
    buf: &'buf [u8],
    headers: &'header mut [httparse::Header<'buf>; MAX_HEADERS],
) -> io::Result<Option<Request<'buf, 'header>>> {
    let mut parsed = httparse::Request::new(headers);
    let status = parsed.parse(buf).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("failed to parse http request: {e}"),
        )
    })?;

    let header_len = match status {
        httparse::Status::Complete(amt) => amt,
        httparse::Status::Partial => return Ok(None),
    };

    let body_len = content_length(parsed.headers)?;
    let len = header_len
        .checked_add(body_len)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "invalid content-length"))?;
    if buf.len() < len {
        return Ok(None);
    }

    let httparse::Request {
        method,
        path,
        version,
        headers,
    } = parsed;

    Ok(Some(Request {
        method: method.unwrap_or(""),
        path: path.unwrap_or(""),
        version: version.unwrap_or(1),
        headers,
        body: &buf[header_len..len],
        len,
    }))
}

fn content_length(headers: &[httparse::Header]) -> io::Result<usize> {
    for h in headers {
        if h.name.eq_ignore_ascii_case("content-length") {
            return str::from_utf8(h.value)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidData, "invalid content-length")
                });
        }
    }
    Ok(0)
}
