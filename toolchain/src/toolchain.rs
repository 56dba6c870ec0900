use serde::Deserialize;
use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;
use std::process::Command;
use which::which_in;

use crate::template::{TemplateError, extend_build_template};

/// Toolchain configuration, usually loaded from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    pub use_wine: bool,
    pub env: HashMap<String, String>,
    /// Build steps, in execution order.  `{build_name}` is substituted when rendering.
    pub build_template: Vec<String>,
    /// Tcl commands run before writing the bitstream.
    pub bitstream_commands: Vec<String>,
    /// Tcl commands run after writing the bitstream.
    pub additional_commands: Vec<String>,
}

impl Toolchain {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let s = read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    pub fn command(&self, cmd: &str) -> which::Result<Command> {
        let mut res: Command;
        if self.use_wine {
            res = Command::new("wine");
            res.arg(cmd);
        } else if let Some(path) = self.env.get("PATH") {
            let rcmd = which_in(cmd, Some(path), "/")?;
            res = Command::new(rcmd);
        } else {
            res = Command::new(cmd);
        }
        for (k, v) in self.env.iter() {
            res.env(k, v);
        }
        Ok(res)
    }

    /// Inserts `switch` right after the program name of the build step running `program`.
    pub fn extend(&mut self, program: &str, switch: &str) -> Result<(), TemplateError> {
        extend_build_template(&mut self.build_template, program, switch)
    }

    pub fn render_build_template(&self, build_name: &str) -> Vec<String> {
        self.build_template
            .iter()
            .map(|line| line.replace("{build_name}", build_name))
            .collect()
    }

    /// Prepares the commands for all build steps.  Nothing is spawned.
    pub fn build_steps(&self, build_name: &str) -> Result<Vec<Command>, Box<dyn std::error::Error>> {
        let mut res = vec![];
        for (i, line) in self.render_build_template(build_name).iter().enumerate() {
            let mut parts = line.split_whitespace();
            let Some(prog) = parts.next() else {
                return Err(TemplateError::EmptyCommand(i).into());
            };
            let mut cmd = self.command(prog)?;
            cmd.args(parts);
            res.push(cmd);
        }
        Ok(res)
    }
}
