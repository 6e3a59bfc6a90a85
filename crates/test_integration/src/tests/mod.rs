pub mod test_collaboration;
pub mod test_export;
