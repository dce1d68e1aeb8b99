mod connector_tests;
mod fake_page;
