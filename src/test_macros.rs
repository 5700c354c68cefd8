/// Resolve a path relative to the crate root
#[macro_export]
macro_rules! relative_file {
    ($f : expr) => {{
        let base = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        base.join($f)
    }};
}

/// Parse a string with a default parser, expecting a value
#[macro_export]
macro_rules! parse_ok {
    ($s : expr) => {{
        match $crate::parser::Parser::default().parse_str($s) {
            Ok(Some(value)) => value,
            other => panic!("expected a value from {:?}, got {:?}", $s, other),
        }
    }};
}

/// Parse a string with a default parser, expecting an error
#[macro_export]
macro_rules! parse_err {
    ($s : expr) => {{
        match $crate::parser::Parser::default().parse_str($s) {
            Err(err) => err,
            Ok(value) => panic!("expected {:?} to fail, got {:?}", $s, value),
        }
    }};
}
