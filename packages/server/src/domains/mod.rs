// Domain modules - each domain owns its models, errors and service functions

pub mod auth;
pub mod member;
pub mod parties;
