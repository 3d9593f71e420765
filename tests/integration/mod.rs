//! Integration tests: HTTP loading and the controller driving a view

mod loader_http;
