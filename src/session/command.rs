use std::ffi::OsString;

/// Program plus the argument vector handed to it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

/// Everything after our own argv[0] goes to the child. Raw OS strings, so
/// non-UTF-8 arguments survive.
pub fn parse_command(program: &str) -> Invocation {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    parse_command_from(program, args)
}

pub fn parse_command_from(program: &str, args: Vec<OsString>) -> Invocation {
    Invocation {
        program: program.to_string(),
        args,
    }
}
