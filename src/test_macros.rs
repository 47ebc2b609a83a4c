/// Resolve a path relative to the crate root, so fixtures can be found regardless of where the
/// test binary is run from
#[macro_export]
macro_rules! relative_file {
    ($f : expr) => {{
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join($f)
    }};
}

/// Parse a JSON literal into a value, panicking on failure
#[macro_export]
macro_rules! parse_literal {
    ($s : expr) => {{
        $crate::parser::Parser::default().parse_str($s).unwrap()
    }};
}
