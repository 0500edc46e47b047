//! Tracing macros, compiled out entirely when their feature is disabled so
//! the hot opcode-dispatch path never pays for a disabled trace.

#[cfg(feature = "debug")]
#[macro_export]
macro_rules! debugln {
    ($($rest:tt)*) => {
        std::println!($($rest)*)
    }
}

#[cfg(not(feature = "debug"))]
#[macro_export]
macro_rules! debugln {
    ($($rest:tt)*) => {
        ()
    };
}

#[macro_export]
macro_rules! warnln {
    ($($rest:tt)*) => {
        std::eprintln!($($rest)*)
    }
}
