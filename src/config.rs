use std::env;

/// Port used when `PORT` is unset or not a valid port number.
pub const DEFAULT_PORT: u16 = 3000;

/// Resolve the listen port from the `PORT` environment variable.
pub fn port_from_env() -> u16 {
    parse_port(env::var("PORT").ok().as_deref())
}

fn parse_port(raw: Option<&str>) -> u16 {
    match raw {
        Some(s) => match s.trim().parse() {
            Ok(port) => port,
            Err(_) => {
                warn!("ignoring invalid PORT value {s:?}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        },
        None => DEFAULT_PORT,
    }
}
