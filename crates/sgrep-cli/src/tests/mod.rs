//! In-process tests for the CLI runtime.


use std::ffi::OsString;
use std::process::ExitCode;

use sgrep_config::Config;

use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};

/// Hands out a fixed configuration regardless of the flags given.
struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// Captured result of one in-process invocation.
struct Invocation {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn invoke(config: Config, args: &[&str]) -> Invocation {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let loader = StaticConfigLoader { config };
    let argv: Vec<OsString> = std::iter::once("sgrep")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect();

    let exit = {
        let mut io = IoStreams::new(&mut stdout, &mut stderr, false);
        run_with_loader(argv, &mut io, &loader)
    };

    Invocation {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}
