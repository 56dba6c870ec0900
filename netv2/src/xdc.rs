use std::fmt::{self, Write};

use litebsp_types::io::IoGroup;

fn port(name: &str, width: usize, bit: usize) -> String {
    if width == 1 {
        format!("{{{name}}}")
    } else {
        format!("{{{name}[{bit}]}}")
    }
}

/// Splits a free-form property like `SLEW=FAST` or `PULLUP True` into key and value.
fn split_misc(misc: &str) -> (&str, &str) {
    if let Some((k, v)) = misc.split_once('=') {
        (k.trim(), v.trim())
    } else if let Some((k, v)) = misc.split_once(char::is_whitespace) {
        (k, v.trim())
    } else {
        (misc, "TRUE")
    }
}

/// Writes Vivado constraints placing every signal of `group`.
pub fn write_group(f: &mut dyn Write, group: &IoGroup) -> fmt::Result {
    for sig in group.resolve() {
        let width = sig.pins.len();
        for (bit, pin) in sig.pins.iter().enumerate() {
            let target = port(&sig.port, width, bit);
            writeln!(f, "set_property LOC {pin} [get_ports {target}]")?;
            if let Some(iostd) = sig.iostandard {
                writeln!(f, "set_property IOSTANDARD {iostd} [get_ports {target}]")?;
            }
            for misc in &sig.misc {
                let (k, v) = split_misc(misc);
                writeln!(f, "set_property {k} {v} [get_ports {target}]")?;
            }
        }
    }
    Ok(())
}

/// Writes a period constraint for a clock input.
pub fn write_clock(f: &mut dyn Write, port: &str, period_ns: f64) -> fmt::Result {
    writeln!(
        f,
        "create_clock -name {port} -period {period_ns:.3} [get_ports {port}]"
    )
}
