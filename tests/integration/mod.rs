//! Integration tests against a mocked backend

mod api_test;
mod dashboard_test;
mod session_test;
