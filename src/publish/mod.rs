pub mod api;
pub mod auth;
pub mod config;
pub mod gradle;
pub mod publisher;
pub mod track;

#[cfg(test)]
mod test_server;
