//! Cached `Date` header value, refreshed by a background coroutine.

use std::fmt::{self, Write};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use bytes::BytesMut;
use may::sync::Mutex;
use once_cell::sync::Lazy;

// "Sun, 06 Nov 1994 08:49:37 GMT".len()
const DATE_VALUE_LENGTH: usize = 29;

static CURRENT_DATE: Lazy<Arc<Mutex<Date>>> = Lazy::new(|| {
    let date = Arc::new(Mutex::new(Date::new()));
    let date_clone = date.clone();
    go!(move || loop {
        may::coroutine::sleep(Duration::from_millis(500));
        date_clone.lock().unwrap().refresh();
    });
    date
});

pub(crate) fn append_date(dst: &mut BytesMut) {
    dst.extend_from_slice(CURRENT_DATE.lock().unwrap().as_bytes());
}

struct Date {
    bytes: [u8; DATE_VALUE_LENGTH],
    pos: usize,
}

impl Date {
    fn new() -> Date {
        let mut date = Date {
            bytes: [0; DATE_VALUE_LENGTH],
            pos: 0,
        };
        date.refresh();
        date
    }

    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn refresh(&mut self) {
        self.pos = 0;
        // rfc 7231 dates are always exactly 29 bytes
        write!(self, "{}", httpdate::HttpDate::from(SystemTime::now())).unwrap();
    }
}

impl fmt::Write for Date {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let len = s.len();
        self.bytes[self.pos..self.pos + len].copy_from_slice(s.as_bytes());
        self.pos += len;
        Ok(())
    }
}
