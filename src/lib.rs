pub mod audit;
pub mod clock;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod mailer;
pub mod models;
pub mod pricing;
pub mod receipt;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
