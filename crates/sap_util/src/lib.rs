mod id;

/// Early-return with an error convertible into the enclosing error type.
#[macro_export]
macro_rules! bail {
    ($e:expr) => {{
        return Err($e.into());
    }};
}
