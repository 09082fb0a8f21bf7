//! API route handlers

pub mod admin;
pub mod auth;
pub mod favorites;
pub mod health;
pub mod recipes;
pub mod users;
