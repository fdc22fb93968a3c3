mod auth;
mod orders;
mod user;
