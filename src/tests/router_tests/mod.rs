mod admin_tests;
mod api_tests;
mod search_tests;
