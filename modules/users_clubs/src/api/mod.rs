pub mod middleware;
pub mod problem;
pub mod rest;
pub mod rpc;
