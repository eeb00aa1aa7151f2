//! Member domain - the authenticated users of the app

pub mod models;
