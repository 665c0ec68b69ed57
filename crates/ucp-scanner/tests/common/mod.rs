#![allow(dead_code)]

pub mod ucp_server;
