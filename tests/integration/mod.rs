//! End-to-end tests over the application router

mod auth_api_test;
mod middleware_test;
mod todos_api_test;
