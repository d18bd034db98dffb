use may_greet::{port_from_env, GreetingService, HttpServer};

fn main() {
    env_logger::init();

    let port = port_from_env();
    let server = match HttpServer(GreetingService).start(("0.0.0.0", port)) {
        Ok(server) => server,
        Err(err) => {
            eprintln!("failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };

    println!("Running on port {}", server.listen_addr().port());
    server.wait();
}
