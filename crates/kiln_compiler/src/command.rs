//! Compiler command lines.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use kiln_common::Define;
use kiln_config::CompileConfig;

/// Extra Slang flag that reports every `#include`/`import` on stderr.
pub const INCLUDE_LISTING_FLAG: &str = "-output-includes";

/// Flags shared by every command of one run.
#[derive(Debug, Clone)]
pub struct CompileSettings {
    /// Emit debug information.
    pub debug_info: bool,
    /// Run the optimizer.
    pub optimize: bool,
    /// Use scalar block layout.
    pub scalar_layout: bool,
    /// Prefix of every define.
    pub define_prefix: String,
    /// Slang `-target`.
    pub slang_target: String,
    /// GLSL `--target-env`.
    pub glsl_target_env: String,
    /// Include directories, in search order.
    pub include_dirs: Vec<PathBuf>,
}

impl CompileSettings {
    /// Combines configuration flags with the include directories of this run.
    pub fn new(config: &CompileConfig, include_dirs: Vec<PathBuf>) -> Self {
        Self {
            debug_info: config.debug_info,
            optimize: config.optimize,
            scalar_layout: config.scalar_layout,
            define_prefix: config.define_prefix.clone(),
            slang_target: config.slang_target.clone(),
            glsl_target_env: config.glsl_target_env.clone(),
            include_dirs,
        }
    }
}

/// A fully built compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CompileCommand {
    /// `slangc <source> -target spirv -entry <entry> -fvk-use-scalar-layout
    /// -g -O0 -o <output> (-I <dir>)* (-D <define>)*`
    pub fn slang(
        program: &Path,
        settings: &CompileSettings,
        source: &Path,
        output: &Path,
        entry_point: &str,
        defines: &[Define],
    ) -> Self {
        let mut cmd = Self::new(program);
        cmd.arg(source)
            .arg("-target")
            .arg(&settings.slang_target)
            .arg("-entry")
            .arg(entry_point);
        if settings.scalar_layout {
            cmd.arg("-fvk-use-scalar-layout");
        }
        if settings.debug_info {
            cmd.arg("-g");
        }
        if !settings.optimize {
            cmd.arg("-O0");
        }
        cmd.arg("-o").arg(output);
        for dir in &settings.include_dirs {
            cmd.arg("-I").arg(dir);
        }
        for define in defines {
            cmd.arg("-D").arg(define.render(&settings.define_prefix));
        }
        cmd
    }

    /// `glslangValidator --target-env vulkan1.3 -V -g -Od (-I<dir>)* <source> -o <output>`
    pub fn glsl(program: &Path, settings: &CompileSettings, source: &Path, output: &Path) -> Self {
        let mut cmd = Self::new(program);
        cmd.arg("--target-env").arg(&settings.glsl_target_env).arg("-V");
        if settings.debug_info {
            cmd.arg("-g");
        }
        if !settings.optimize {
            cmd.arg("-Od");
        }
        for dir in &settings.include_dirs {
            let mut flag = OsString::from("-I");
            flag.push(dir);
            cmd.arg(flag);
        }
        cmd.arg(source).arg("-o").arg(output);
        cmd
    }

    fn new(program: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(&mut self, arg: impl Into<OsString>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// The executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The arguments, in order.
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Builds a process command. The compiler's standard output goes to our
    /// standard error; stdout is reserved for the build summary.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(std::io::stderr()));
        command
    }
}
