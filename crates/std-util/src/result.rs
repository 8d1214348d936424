/// Unwraps an `Ok`, panicking with the expression text otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(value) => value,
            Err(err) => panic!("`{}` failed: {}", stringify!($e), err),
        }
    };
}

/// Unwraps an `Err`, panicking with the expression text otherwise.
///
/// Extra arguments are formatted into the panic message.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($arg:tt)+ )?) => {
        match $e {
            Err(err) => err,
            Ok(value) => {
                let mut msg = format!("`{}` succeeded with {:?}", stringify!($e), value);
                $(
                    msg.push_str(": ");
                    msg.push_str(&format!($($arg)+));
                )?
                panic!("{}", msg);
            }
        }
    };
}
