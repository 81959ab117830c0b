//! Error handling foundation for the clinic portal.
//!
//! Only the `Result` alias lives here. Domain errors stay with the crate
//! that raises them (`DecodeError` in `clinic-session`, `ValidationError` in
//! `clinic-scheduling`, `RemoteError` in `clinic-gateway`) and are wrapped in
//! a rootcause `Report` when they cross a crate boundary.

use rootcause::Report;

/// Result alias over a rootcause [`Report`] carrying context `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Unreachable;

    impl fmt::Display for Unreachable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "backend unreachable")
        }
    }

    impl std::error::Error for Unreachable {}

    fn fetch(fail: bool) -> Result<u32, Unreachable> {
        if fail {
            return Err(Unreachable.into());
        }
        Ok(7)
    }

    #[test]
    fn ok_values_pass_through() {
        assert_eq!(fetch(false).expect("should be ok"), 7);
    }

    #[test]
    fn typed_errors_convert_into_reports() {
        let err = fetch(true).expect_err("should fail");
        assert!(err.to_string().contains("backend unreachable"));
    }
}
