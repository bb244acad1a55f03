#![allow(async_fn_in_trait)]

pub mod admin;
pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod form;
pub mod listing;
pub mod loader;
pub mod locale;
pub mod logging;
pub mod notify;
pub mod storage;
pub mod tags;
pub mod view;
pub mod web_ui;

#[cfg(test)]
mod testing;
