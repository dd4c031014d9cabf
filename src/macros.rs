//===========================================================================//

// Both macros return early from the enclosing function with an `io::Error` of
// the matching kind.  The message is always run through `format!`, so either a
// plain literal or a format string with arguments may be given.

macro_rules! invalid_data {
    ($($arg:tt)+) => {
        return Err(::std::io::Error::new(
            ::std::io::ErrorKind::InvalidData,
            format!($($arg)+),
        ))
    };
}

macro_rules! invalid_input {
    ($($arg:tt)+) => {
        return Err(::std::io::Error::new(
            ::std::io::ErrorKind::InvalidInput,
            format!($($arg)+),
        ))
    };
}

//===========================================================================//
