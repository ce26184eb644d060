pub mod progress_utils;
pub mod report_utils;
pub mod test_utils;
