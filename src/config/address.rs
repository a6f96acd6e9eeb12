//! Bind address resolution.
//!
//! An empty configured address is resolved from the environment, in order:
//! `ADDR`, `HOST`, `HOSTNAME` (with `PORT`), `PORT` alone, then the default.
//! A bare `:port` gets the default hostname; `:https` means port 443.

pub const DEFAULT_SERVER_HOSTNAME: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";

/// Resolve `addr` against the process environment.
pub fn resolve_bind_address(addr: &str) -> String {
    resolve_bind_address_with(addr, |key| std::env::var(key).ok())
}

/// Resolve `addr` using `lookup` for environment variables.
pub fn resolve_bind_address_with<F>(addr: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

    let addr = if !addr.is_empty() {
        addr.to_string()
    } else if let Some(a) = var("ADDR") {
        a
    } else if let Some(host) = var("HOST") {
        host
    } else if let Some(hostname) = var("HOSTNAME") {
        match var("PORT") {
            Some(port) => format!("{}:{}", hostname, port),
            None => format!("{}:{}", hostname, DEFAULT_SERVER_PORT),
        }
    } else if let Some(port) = var("PORT") {
        format!(":{}", port)
    } else {
        DEFAULT_SERVER_ADDR.to_string()
    };

    if addr == ":https" {
        format!("{}:443", DEFAULT_SERVER_HOSTNAME)
    } else if addr.starts_with(':') {
        format!("{}{}", DEFAULT_SERVER_HOSTNAME, addr)
    } else {
        addr
    }
}
