mod test_utils;
mod byte_order_tests;
mod field_type_tests;
mod reader_tests;
mod directory_tests;
mod placement_tests;
