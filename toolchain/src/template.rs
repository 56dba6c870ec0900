//! Editing of build templates: ordered lists of shell command lines, one per toolchain step.
//!
//! Steps are addressed by program name rather than by position, so a switch can be added
//! to e.g. the `icepack` step without knowing where in the flow it runs.

use std::collections::HashMap;

use itertools::Itertools;
use log::debug;

/// One build step, split into whitespace-separated parts.  `parts[0]` is the program name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildCommand {
    /// Index of the line in the original template.
    pub position: usize,
    pub parts: Vec<String>,
}

/// A build template keyed by program name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BuildCommands {
    pub cmds: HashMap<String, BuildCommand>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TemplateError {
    /// The line at this position has no program name.
    EmptyCommand(usize),
    /// Two lines run the same program.
    DuplicateProgram(String),
    UnknownProgram(String),
    /// The argument to insert does not start with `-`.
    NotASwitch(String),
    /// No command claims this position.
    MissingPosition(usize),
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::EmptyCommand(pos) => write!(f, "build step {pos} is empty"),
            TemplateError::DuplicateProgram(prog) => {
                write!(f, "program {prog} appears in more than one build step")
            }
            TemplateError::UnknownProgram(prog) => write!(f, "no build step runs {prog}"),
            TemplateError::NotASwitch(arg) => write!(f, "{arg} is not a switch"),
            TemplateError::MissingPosition(pos) => write!(f, "no build step at position {pos}"),
        }
    }
}

impl std::error::Error for TemplateError {}

impl BuildCommands {
    pub fn split<S: AsRef<str>>(template: &[S]) -> Result<Self, TemplateError> {
        let mut cmds = HashMap::new();
        for (i, line) in template.iter().enumerate() {
            let parts: Vec<String> = line
                .as_ref()
                .split_whitespace()
                .map(|s| s.to_string())
                .collect();
            let Some(prog) = parts.first().cloned() else {
                return Err(TemplateError::EmptyCommand(i));
            };
            if cmds.contains_key(&prog) {
                return Err(TemplateError::DuplicateProgram(prog));
            }
            cmds.insert(prog, BuildCommand { position: i, parts });
        }
        Ok(Self { cmds })
    }

    pub fn get(&self, program: &str) -> Option<&BuildCommand> {
        self.cmds.get(program)
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Inserts `switch` as the first argument of `program`.
    pub fn add_switch(&mut self, program: &str, switch: &str) -> Result<(), TemplateError> {
        if !switch.starts_with('-') {
            return Err(TemplateError::NotASwitch(switch.to_string()));
        }
        let Some(cmd) = self.cmds.get_mut(program) else {
            return Err(TemplateError::UnknownProgram(program.to_string()));
        };
        cmd.parts.insert(1, switch.to_string());
        Ok(())
    }

    /// Rebuilds the template lines in their original order.
    pub fn join(&self) -> Result<Vec<String>, TemplateError> {
        let mut template = vec![];
        while template.len() < self.cmds.len() {
            let pos = template.len();
            let Some(cmd) = self.cmds.values().find(|cmd| cmd.position == pos) else {
                return Err(TemplateError::MissingPosition(pos));
            };
            template.push(cmd.parts.iter().join(" "));
        }
        Ok(template)
    }
}

/// Inserts `switch` right after the program name in the step running `program`.
///
/// The template is only replaced if the whole edit succeeds.
pub fn extend_build_template(
    template: &mut Vec<String>,
    program: &str,
    switch: &str,
) -> Result<(), TemplateError> {
    let mut cmds = BuildCommands::split(template.as_slice())?;
    cmds.add_switch(program, switch)?;
    let new = cmds.join()?;
    debug!("build template: added {switch} to {program}");
    template.clear();
    template.extend(new);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const TEST_BUILD_TEMPLATE: [&str; 3] = [
        "yosys -q -l {build_name}.rpt {build_name}.ys",
        "nextpnr-ice40 --json {build_name}.json --pcf {build_name}.pcf",
        "icepack {build_name}.txt {build_name}.bin",
    ];

    #[test]
    fn test_split() {
        let cmds = BuildCommands::split(&TEST_BUILD_TEMPLATE).unwrap();
        assert_eq!(cmds.len(), 3);
        assert_eq!(
            cmds.get("icepack"),
            Some(&BuildCommand {
                position: 2,
                parts: vec![
                    "icepack".into(),
                    "{build_name}.txt".into(),
                    "{build_name}.bin".into()
                ],
            })
        );
        assert_eq!(cmds.get("nextpnr-ice40").unwrap().position, 1);
        assert_eq!(cmds.get("nextpnr-ice40").unwrap().parts.len(), 5);
        assert_eq!(cmds.get("yosys").unwrap().position, 0);
    }

    #[test]
    fn test_round_trip() {
        let cmds = BuildCommands::split(&TEST_BUILD_TEMPLATE).unwrap();
        assert_eq!(cmds.join().unwrap(), TEST_BUILD_TEMPLATE);
        let empty: [&str; 0] = [];
        let cmds = BuildCommands::split(&empty).unwrap();
        assert!(cmds.is_empty());
        assert_eq!(cmds.join().unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_whitespace_normalized() {
        let cmds = BuildCommands::split(&["  yosys   -q\ta.ys "]).unwrap();
        assert_eq!(cmds.join().unwrap(), ["yosys -q a.ys"]);
    }

    #[test]
    fn test_add_switch() {
        let mut cmds = BuildCommands::split(&TEST_BUILD_TEMPLATE).unwrap();
        cmds.add_switch("icepack", "-s").unwrap();
        assert_eq!(
            cmds.join().unwrap(),
            [
                "yosys -q -l {build_name}.rpt {build_name}.ys",
                "nextpnr-ice40 --json {build_name}.json --pcf {build_name}.pcf",
                "icepack -s {build_name}.txt {build_name}.bin",
            ]
        );
        cmds.add_switch("nextpnr-ice40", "--hx8k").unwrap();
        assert_eq!(
            cmds.get("nextpnr-ice40").unwrap().parts[..2],
            ["nextpnr-ice40", "--hx8k"]
        );
    }

    #[test]
    fn test_add_switch_each_position() {
        let template = [
            "yosys -q -l top.rpt top.ys",
            "nextpnr-ecp5 --json top.json --lpf top.lpf --textcfg top.config",
            "ecppack top.config top.bit",
            "ecpprog -S top.bit",
            "dfu-suffix -v 1209 -p 5af0 -a top.bit",
        ];
        for (pos, line) in template.iter().enumerate() {
            let prog = line.split_whitespace().next().unwrap();
            let mut cmds = BuildCommands::split(&template).unwrap();
            cmds.add_switch(prog, "-x").unwrap();
            let res = cmds.join().unwrap();
            assert_eq!(res.len(), template.len());
            for (i, (new, old)) in res.iter().zip(template).enumerate() {
                if i == pos {
                    let mut parts: Vec<_> = old.split_whitespace().collect();
                    parts.insert(1, "-x");
                    assert_eq!(*new, parts.join(" "));
                } else {
                    assert_eq!(new, old);
                }
            }
        }
    }

    #[test]
    fn test_add_switch_errors() {
        let mut cmds = BuildCommands::split(&TEST_BUILD_TEMPLATE).unwrap();
        assert_eq!(
            cmds.add_switch("icepack", "s"),
            Err(TemplateError::NotASwitch("s".to_string()))
        );
        assert_eq!(
            cmds.add_switch("iceprog", "-S"),
            Err(TemplateError::UnknownProgram("iceprog".to_string()))
        );
        assert_eq!(cmds.join().unwrap(), TEST_BUILD_TEMPLATE);
    }

    #[test]
    fn test_split_errors() {
        assert_matches!(
            BuildCommands::split(&["yosys a.ys", "yosys b.ys"]),
            Err(TemplateError::DuplicateProgram(p)) if p == "yosys"
        );
        assert_eq!(
            BuildCommands::split(&["yosys a.ys", "   "]),
            Err(TemplateError::EmptyCommand(1))
        );
    }

    #[test]
    fn test_join_gap() {
        let mut cmds = BuildCommands::split(&TEST_BUILD_TEMPLATE).unwrap();
        cmds.cmds.get_mut("yosys").unwrap().position = 5;
        assert_eq!(cmds.join(), Err(TemplateError::MissingPosition(0)));
    }

    #[test]
    fn test_extend() {
        let mut bt: Vec<String> = TEST_BUILD_TEMPLATE.iter().map(|s| s.to_string()).collect();
        extend_build_template(&mut bt, "icepack", "-s").unwrap();
        assert_eq!(bt[0], TEST_BUILD_TEMPLATE[0]);
        assert_eq!(bt[1], TEST_BUILD_TEMPLATE[1]);
        assert_eq!(bt[2], "icepack -s {build_name}.txt {build_name}.bin");

        let before = bt.clone();
        assert_matches!(
            extend_build_template(&mut bt, "yosys", "abc"),
            Err(TemplateError::NotASwitch(_))
        );
        assert_eq!(bt, before);
    }
}
