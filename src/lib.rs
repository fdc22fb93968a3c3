pub mod assertions;
pub mod config;
pub mod fixtures;
pub mod http;
pub mod requests;
pub mod rest;
pub mod result;
pub mod runner;
pub mod scenarios;
pub mod telemetry;
