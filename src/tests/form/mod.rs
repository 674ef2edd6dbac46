mod engine_tests;
mod session_tests;
