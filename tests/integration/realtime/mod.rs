//! WebSocket tests

pub mod socket_test;
