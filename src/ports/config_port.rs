//! Configuration access port trait.

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    /// All key/value pairs of a section, e.g. the credential roster.
    fn section_entries(&self, section: &str) -> Vec<(String, String)>;
}
