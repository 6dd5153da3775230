mod test_utils;
mod registry_tests;
mod merge_tests;
