use std::fmt::{self, Write};

use litebsp_toolchain::Toolchain;
use litebsp_types::io::IoGroup;
use litebsp_types::units::Frequency;
use log::debug;

use crate::io::{HDMI_INFOS, io};
use crate::xdc;

pub const NAME: &str = "netv2";
pub const DEFAULT_CLK_NAME: &str = "clk50";
/// Period of the default clock, in ns.
pub const DEFAULT_CLK_PERIOD: f64 = 20.0;
pub const DEFAULT_PART: &str = "xc7a35t";
pub const PACKAGE_SPEED: &str = "fgg484-2";

// See UG470 (7 Series FPGAs Configuration) for the bitstream size.
pub const GATEWARE_SIZE: u64 = 0x400000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpiFlash {
    pub model: &'static str,
    pub read_dummy_bits: u32,
    pub clock_div: u32,
    pub total_size: u64,
    pub page_size: u64,
    pub sector_size: u64,
}

pub const SPIFLASH: SpiFlash = SpiFlash {
    model: "mx25l6433f",
    read_dummy_bits: 10,
    clock_div: 2,
    // 64Mbit
    total_size: 64 / 8 * 1024 * 1024,
    page_size: 256,
    sector_size: 0x1000,
};

pub const BITSTREAM_COMMANDS: [&str; 4] = [
    "set_property CONFIG_VOLTAGE 3.3 [current_design]",
    "set_property CFGBVS VCCO [current_design]",
    "set_property BITSTREAM.CONFIG.CONFIGRATE 40 [current_design]",
    "set_property BITSTREAM.CONFIG.SPI_BUSWIDTH 4 [current_design]",
];

pub const ADDITIONAL_COMMANDS: [&str; 1] = [concat!(
    "write_cfgmem -verbose -force -format bin -interface spix4 -size 16 ",
    "-loadbit \"up 0x0 {build_name}.bit\" -file {build_name}.bin"
)];

pub const VIVADO_BUILD_TEMPLATE: [&str; 1] = ["vivado -mode batch -source {build_name}.tcl"];

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlatformError {
    UnsupportedToolchain(String),
    UnsupportedProgrammer(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformError::UnsupportedToolchain(name) => {
                write!(f, "{name} toolchain is not supported")
            }
            PlatformError::UnsupportedProgrammer(name) => {
                write!(f, "{name} programmer is not supported")
            }
        }
    }
}

impl std::error::Error for PlatformError {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Programmer {
    Vivado { flash_part: String },
}

#[derive(Clone, Debug)]
pub struct Platform {
    /// Full device name, e.g. `xc7a35t-fgg484-2`.
    pub device: String,
    pub io: Vec<IoGroup>,
    pub toolchain: Toolchain,
    pub programmer: String,
}

impl Platform {
    pub fn new(toolchain: &str, programmer: &str, part: &str) -> Result<Self, PlatformError> {
        if toolchain != "vivado" {
            return Err(PlatformError::UnsupportedToolchain(toolchain.to_string()));
        }
        let device = format!("{part}-{PACKAGE_SPEED}");
        debug!("{NAME}: device {device}");
        Ok(Platform {
            device,
            io: io(),
            toolchain: Toolchain {
                build_template: VIVADO_BUILD_TEMPLATE.map(String::from).to_vec(),
                bitstream_commands: BITSTREAM_COMMANDS.map(String::from).to_vec(),
                additional_commands: ADDITIONAL_COMMANDS.map(String::from).to_vec(),
                ..Default::default()
            },
            programmer: programmer.to_string(),
        })
    }

    /// Replaces the toolchain settings, keeping the board's bitstream commands
    /// where the given toolchain has none.
    pub fn with_toolchain(mut self, mut toolchain: Toolchain) -> Self {
        if toolchain.build_template.is_empty() {
            toolchain.build_template = std::mem::take(&mut self.toolchain.build_template);
        }
        if toolchain.bitstream_commands.is_empty() {
            toolchain.bitstream_commands = std::mem::take(&mut self.toolchain.bitstream_commands);
        }
        if toolchain.additional_commands.is_empty() {
            toolchain.additional_commands =
                std::mem::take(&mut self.toolchain.additional_commands);
        }
        self.toolchain = toolchain;
        self
    }

    pub fn create_programmer(&self) -> Result<Programmer, PlatformError> {
        match self.programmer.as_str() {
            "vivado" => Ok(Programmer::Vivado {
                flash_part: "mx25l6433f-spi-x1_x2_x4".to_string(),
            }),
            _ => Err(PlatformError::UnsupportedProgrammer(self.programmer.clone())),
        }
    }

    pub fn lookup(&self, name: &str, index: u32) -> Option<&IoGroup> {
        self.io.iter().find(|g| g.name == name && g.index == index)
    }

    pub fn default_clk_frequency(&self) -> Frequency {
        Frequency::from_hz((1e9 / DEFAULT_CLK_PERIOD) as u64)
    }

    pub fn hdmi_info(&self, key: &str) -> Option<&'static str> {
        HDMI_INFOS.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// All IO groups, or only those called `name`.
    pub fn groups(&self, name: Option<&str>) -> Vec<&IoGroup> {
        self.io
            .iter()
            .filter(|g| name.is_none_or(|n| g.name == n))
            .collect()
    }

    /// Writes constraints for the default clock and all IO groups.
    pub fn write_xdc(&self, f: &mut dyn Write) -> fmt::Result {
        self.write_xdc_groups(f, &self.groups(None))
    }

    /// Writes constraints for the given groups.  The default clock period is included
    /// when its group is.
    pub fn write_xdc_groups(&self, f: &mut dyn Write, groups: &[&IoGroup]) -> fmt::Result {
        if groups.iter().any(|g| g.name == DEFAULT_CLK_NAME) {
            xdc::write_clock(f, DEFAULT_CLK_NAME, DEFAULT_CLK_PERIOD)?;
        }
        for group in groups {
            writeln!(f)?;
            writeln!(f, "# {}:{}", group.name, group.index)?;
            xdc::write_group(f, group)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_new() {
        let p = Platform::new("vivado", "vivado", DEFAULT_PART).unwrap();
        assert_eq!(p.device, "xc7a35t-fgg484-2");
        assert_eq!(p.toolchain.bitstream_commands.len(), 4);
        assert!(p.toolchain.additional_commands[0].contains("-interface spix4"));
        assert_eq!(p.default_clk_frequency().to_string(), "50 MHz");
        assert_eq!(SPIFLASH.total_size, 8 * 1024 * 1024);

        let p = Platform::new("vivado", "vivado", "xc7a100t").unwrap();
        assert_eq!(p.device, "xc7a100t-fgg484-2");
    }

    #[test]
    fn test_bad_toolchain() {
        assert_eq!(
            Platform::new("ise", "vivado", DEFAULT_PART).unwrap_err().to_string(),
            "ise toolchain is not supported"
        );
    }

    #[test]
    fn test_programmer() {
        let p = Platform::new("vivado", "vivado", DEFAULT_PART).unwrap();
        assert_eq!(
            p.create_programmer(),
            Ok(Programmer::Vivado {
                flash_part: "mx25l6433f-spi-x1_x2_x4".to_string()
            })
        );
        let p = Platform::new("vivado", "openocd", DEFAULT_PART).unwrap();
        let err = p.create_programmer();
        assert_matches!(err, Err(PlatformError::UnsupportedProgrammer(_)));
        assert_eq!(
            err.unwrap_err().to_string(),
            "openocd programmer is not supported"
        );
    }

    #[test]
    fn test_lookup() {
        let p = Platform::new("vivado", "vivado", DEFAULT_PART).unwrap();
        assert_eq!(p.lookup("user_led", 5).unwrap().width(), 1);
        assert!(p.lookup("user_led", 6).is_none());
        assert_eq!(p.lookup("hdmi_out", 1).unwrap().subsignals.len(), 10);
        assert_eq!(p.hdmi_info("HDMI_IN1_MNEMONIC"), Some("RX2"));
        assert_eq!(p.hdmi_info("HDMI_IN2_MNEMONIC"), None);
    }

    #[test]
    fn test_toolchain_extend() {
        let mut p = Platform::new("vivado", "vivado", DEFAULT_PART).unwrap();
        p.toolchain.extend("vivado", "-nojournal").unwrap();
        assert_eq!(
            p.toolchain.build_template,
            ["vivado -nojournal -mode batch -source {build_name}.tcl"]
        );
    }

    #[test]
    fn test_with_toolchain() {
        let p = Platform::new("vivado", "vivado", DEFAULT_PART)
            .unwrap()
            .with_toolchain(Toolchain {
                use_wine: true,
                ..Default::default()
            });
        assert!(p.toolchain.use_wine);
        assert_eq!(p.toolchain.build_template, VIVADO_BUILD_TEMPLATE);
        assert_eq!(p.toolchain.bitstream_commands, BITSTREAM_COMMANDS);
    }

    #[test]
    fn test_write_xdc() {
        let p = Platform::new("vivado", "vivado", DEFAULT_PART).unwrap();
        let mut s = String::new();
        p.write_xdc(&mut s).unwrap();
        assert!(s.starts_with("create_clock -name clk50 -period 20.000 [get_ports clk50]\n"));
        assert!(s.contains("set_property LOC J19 [get_ports {clk50}]\n"));
        assert!(s.contains("set_property LOC K6 [get_ports {ddram_dq[31]}]\n"));
        assert!(s.contains("set_property IN_TERM UNTUNED_SPLIT_40 [get_ports {ddram_dq[0]}]\n"));
        assert!(s.contains("set_property IOSTANDARD TMDS_33 [get_ports {hdmi_out1_clk_p}]\n"));
        assert!(s.contains("set_property LOC AB5 [get_ports {ddram_reset_n}]\n"));
    }

    #[test]
    fn test_write_xdc_groups() {
        let p = Platform::new("vivado", "vivado", DEFAULT_PART).unwrap();
        let groups = p.groups(Some("hdmi_in"));
        assert_eq!(groups.len(), 2);
        let mut s = String::new();
        p.write_xdc_groups(&mut s, &groups).unwrap();
        assert!(s.starts_with("\n# hdmi_in:0\n"));
        assert!(s.contains("# hdmi_in:1\n"));
        assert!(s.contains("set_property LOC L19 [get_ports {hdmi_in_clk_p}]\n"));
        assert!(!s.contains("create_clock"));
        assert!(!s.contains("hdmi_out"));

        let mut s = String::new();
        p.write_xdc_groups(&mut s, &p.groups(Some("clk50"))).unwrap();
        assert!(s.starts_with("create_clock -name clk50"));

        assert!(p.groups(Some("hdmi")).is_empty());
        assert_eq!(p.groups(None).len(), p.io.len());
    }
}
