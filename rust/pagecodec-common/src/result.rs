use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Returns `InvalidArgument` from the enclosing function unless the
/// condition holds. The error names the argument and the failed condition.
#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let holds = $expr;
        $crate::result::verify_arg(holds, stringify!($name), stringify!($expr))?;
    }};
}

/// Returns `InvalidFormat` from the enclosing function unless the condition
/// holds. Used for checks on page contents.
#[macro_export]
macro_rules! verify_data {
    ($name:expr, $expr:expr) => {{
        let holds = $expr;
        $crate::result::verify_data(holds, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(holds: bool, name: &str, condition: &str) -> Result<()> {
    if !holds {
        return Err(failed_arg(name, condition));
    }
    Ok(())
}

#[inline]
pub fn verify_data(holds: bool, element: &str, condition: &str) -> Result<()> {
    if !holds {
        return Err(failed_data(element, condition));
    }
    Ok(())
}

#[cold]
fn failed_arg(name: &str, condition: &str) -> Error {
    Error::invalid_arg(name, condition)
}

#[cold]
fn failed_data(element: &str, condition: &str) -> Error {
    Error::invalid_format(element, condition)
}
