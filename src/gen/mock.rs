//! Mocked build constants, used in place of the `build.rs`-generated file
//! when the `gen-mock` feature is active.

pub const COMPILATION_DATE: &str = "-";
pub const COMPILATION_TIME: &str = "-";
pub const NAME: &str = "dmg-core";
pub const VERSION: &str = "x.x.x";
pub const COMPILER: &str = "rustc";
pub const COMPILER_VERSION: &str = "x.x.x";
pub const FEATURES_SEQ: [&str; 1] = ["cpu"];
pub const PLATFORM_CPU_BITS: &str = "64";
pub const PLATFORM_CPU_BITS_INT: usize = 64;
