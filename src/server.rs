//! http server implementation on top of `MAY`

use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, ToSocketAddrs};

use bytes::{Buf, BytesMut};
use may::coroutine;
use may::net::{TcpListener, TcpStream};

use crate::request::{self, Request, MAX_HEADERS};
use crate::response::{self, Response};

macro_rules! t_c {
    ($e: expr) => {
        match $e {
            Ok(val) => val,
            Err(err) => {
                error!("call = {:?}\nerr = {:?}", stringify!($e), err);
                continue;
            }
        }
    };
}

/// The http service trait. The server calls `call` once per decoded
/// request; the service fills in the response.
pub trait HttpService {
    fn call(&mut self, req: Request, rsp: &mut Response) -> io::Result<()>;
}

/// Generic http server over a cloneable `HttpService`, one service clone
/// per connection.
pub struct HttpServer<T>(pub T);

/// Handle to a running server: the bound address plus the listener
/// coroutine.
pub struct Server {
    listen_addr: SocketAddr,
    handle: coroutine::JoinHandle<()>,
}

impl Server {
    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    /// Block until the listener coroutine exits.
    pub fn wait(self) {
        self.handle.join().ok();
    }
}

impl<T: HttpService + Clone + Send + Sync + 'static> HttpServer<T> {
    /// Bind the given address and spawn the accept loop.
    pub fn start<L: ToSocketAddrs>(self, addr: L) -> io::Result<Server> {
        let listener = TcpListener::bind(addr)?;
        let listen_addr = listener.local_addr()?;
        let service = self.0;
        let handle = go!(
            coroutine::Builder::new().name("GreetListener".to_owned()),
            move || {
                for stream in listener.incoming() {
                    let mut stream = t_c!(stream);
                    let mut service = service.clone();
                    go!(move || {
                        if let Err(e) = serve_connection(&mut stream, &mut service) {
                            error!("connection err = {e:?}");
                            stream.shutdown(Shutdown::Both).ok();
                        }
                    });
                }
            }
        )?;
        info!("listening on {listen_addr}");
        Ok(Server {
            listen_addr,
            handle,
        })
    }
}

const BUF_LEN: usize = 4096 * 8;

/// Per-connection loop: read, answer every complete pipelined request,
/// write the batch back. Returns `Ok(())` on a clean client close.
fn serve_connection<T: HttpService>(stream: &mut TcpStream, service: &mut T) -> io::Result<()> {
    let mut req_buf = BytesMut::with_capacity(BUF_LEN);
    let mut rsp_buf = BytesMut::with_capacity(BUF_LEN);
    let mut body_buf = BytesMut::with_capacity(BUF_LEN);
    let mut chunk = [0u8; 4096];

    loop {
        let read_cnt = stream.read(&mut chunk)?;
        if read_cnt == 0 {
            if !req_buf.is_empty() {
                debug!(
                    "client closed with {} buffered bytes of a partial request",
                    req_buf.len()
                );
            }
            return Ok(());
        }
        req_buf.extend_from_slice(&chunk[..read_cnt]);

        loop {
            let mut headers = [httparse::EMPTY_HEADER; MAX_HEADERS];
            let req = match request::decode(&req_buf, &mut headers)? {
                Some(req) => req,
                None => break,
            };
            let len = req.len();
            let mut rsp = Response::new(&mut body_buf);
            match service.call(req, &mut rsp) {
                Ok(()) => response::encode(rsp, &mut rsp_buf),
                Err(e) => response::encode_error(e, &mut rsp_buf),
            }
            req_buf.advance(len);
        }

        if !rsp_buf.is_empty() {
            stream.write_all(&rsp_buf)?;
            rsp_buf.clear();
        }
    }
}
