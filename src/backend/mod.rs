pub mod api;
pub mod http_remote;

#[cfg(test)]
pub mod mock;
