use clap::{Arg, ArgAction, Command, value_parser};
use jzon::JsonValue;
use litebsp_netv2::Platform;
use litebsp_netv2::platform::{DEFAULT_PART, GATEWARE_SIZE};
use litebsp_toolchain::Toolchain;
use litebsp_types::soc::{ConstantTable, define_flash_constants};
use log::info;
use simple_error::bail;
use std::error::Error;
use std::path::PathBuf;

fn parse_addr(s: &str) -> Result<u64, Box<dyn Error>> {
    let res = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        s.parse()
    };
    match res {
        Ok(v) => Ok(v),
        Err(_) => bail!("invalid address {}", s),
    }
}

fn parse_switch(s: &str) -> Result<(&str, &str), Box<dyn Error>> {
    match s.split_once('=') {
        Some((prog, switch)) if !prog.is_empty() => Ok((prog, switch)),
        _ => bail!("invalid switch {}, expected PROGRAM=SWITCH", s),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let m = Command::new("litebsp")
        .subcommand_required(true)
        .arg(
            Arg::new("part")
                .short('p')
                .long("part")
                .global(true)
                .default_value(DEFAULT_PART)
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("programmer")
                .long("programmer")
                .global(true)
                .default_value("vivado")
                .value_parser(value_parser!(String)),
        )
        .subcommand(
            Command::new("dump").arg(
                Arg::new("group")
                    .short('g')
                    .long("group")
                    .value_parser(value_parser!(String)),
            ),
        )
        .subcommand(
            Command::new("xdc").arg(
                Arg::new("group")
                    .short('g')
                    .long("group")
                    .value_parser(value_parser!(String)),
            ),
        )
        .subcommand(
            Command::new("template")
                .arg(Arg::new("toolchain").value_parser(value_parser!(PathBuf)))
                .arg(
                    Arg::new("switch")
                        .short('s')
                        .long("switch")
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(String)),
                )
                .arg(
                    Arg::new("build-name")
                        .short('n')
                        .long("build-name")
                        .value_parser(value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("constants")
                .arg(
                    Arg::new("cpu-variant")
                        .long("cpu-variant")
                        .default_value("standard")
                        .value_parser(value_parser!(String)),
                )
                .arg(
                    Arg::new("boot-address")
                        .long("boot-address")
                        .value_parser(value_parser!(String)),
                ),
        )
        .get_matches();
    let part = m.get_one::<String>("part").map_or(DEFAULT_PART, |s| s.as_str());
    let programmer = m
        .get_one::<String>("programmer")
        .map_or("vivado", |s| s.as_str());
    let mut platform = Platform::new("vivado", programmer, part)?;
    info!("platform {}", platform.device);
    match m.subcommand() {
        Some(("dump", m)) => {
            let groups = platform.groups(m.get_one::<String>("group").map(|s| s.as_str()));
            if groups.is_empty() {
                bail!("no such IO group");
            }
            let json = JsonValue::from(groups);
            println!("{}", json.pretty(2));
        }
        Some(("xdc", m)) => {
            let groups = platform.groups(m.get_one::<String>("group").map(|s| s.as_str()));
            if groups.is_empty() {
                bail!("no such IO group");
            }
            let mut s = String::new();
            platform.write_xdc_groups(&mut s, &groups)?;
            print!("{s}");
        }
        Some(("template", m)) => {
            if let Some(path) = m.get_one::<PathBuf>("toolchain") {
                info!("loading toolchain from {}", path.display());
                platform = platform.with_toolchain(Toolchain::from_file(path)?);
            }
            if let Some(switches) = m.get_many::<String>("switch") {
                for s in switches {
                    let (prog, switch) = parse_switch(s)?;
                    platform.toolchain.extend(prog, switch)?;
                }
            }
            let lines = match m.get_one::<String>("build-name") {
                Some(name) => platform.toolchain.render_build_template(name),
                None => platform.toolchain.build_template.clone(),
            };
            for line in lines {
                println!("{line}");
            }
        }
        Some(("constants", m)) => {
            let variant = m
                .get_one::<String>("cpu-variant")
                .map_or("standard", |s| s.as_str());
            let boot = match m.get_one::<String>("boot-address") {
                Some(s) => parse_addr(s)?,
                None => GATEWARE_SIZE,
            };
            let mut soc = ConstantTable::new(variant, boot);
            define_flash_constants(&mut soc);
            print!("{}", soc.to_c_header());
        }
        _ => unreachable!(),
    }
    Ok(())
}

#[test]
fn test_parse_addr() {
    assert_eq!(parse_addr("0x400000").unwrap(), 0x400000);
    assert_eq!(parse_addr("4096").unwrap(), 4096);
    assert!(parse_addr("0xzz").is_err());
}

#[test]
fn test_parse_switch() {
    assert_eq!(parse_switch("icepack=-s").unwrap(), ("icepack", "-s"));
    assert_eq!(
        parse_switch("nextpnr-ice40=--freq=12").unwrap(),
        ("nextpnr-ice40", "--freq=12")
    );
    assert!(parse_switch("=-s").is_err());
    assert!(parse_switch("icepack").is_err());
}
