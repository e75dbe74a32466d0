
mod listing_tests;
