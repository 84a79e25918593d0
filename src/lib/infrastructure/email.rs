//! Email provider clients

pub mod mandrill;
