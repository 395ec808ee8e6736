/// Result of a server-side operation.
///
/// Backed by [`anyhow::Error`] so server functions can propagate it with `?`.
/// `{:?}` on the error renders the context chain and, with
/// `RUST_BACKTRACE=1`, the backtrace.
pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;

/// Build an error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::internal_anyhow_dont_use!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    #[test]
    fn err_macro_formats_message() {
        let e = crate::err!("no user with id '{}'", "usr_404");
        assert_eq!(e.to_string(), "no user with id 'usr_404'");
    }

    #[test]
    fn debug_output_keeps_context_chain() {
        let e = Err::<(), _>(std::fmt::Error)
            .context("failed to render row")
            .unwrap_err();
        let rendered = format!("{e:?}");
        assert!(rendered.starts_with("failed to render row"));
        assert!(rendered.contains("Caused by"));
    }
}
