mod handler_tests;
mod support;
