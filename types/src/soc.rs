use indexmap::IndexMap;
use log::debug;

pub const FLASH_BOOT_ADDRESS: &str = "FLASH_BOOT_ADDRESS";
pub const KERNEL_IMAGE_FLASH_OFFSET: &str = "KERNEL_IMAGE_FLASH_OFFSET";
pub const ROOTFS_IMAGE_FLASH_OFFSET: &str = "ROOTFS_IMAGE_FLASH_OFFSET";
pub const DEVICE_TREE_IMAGE_FLASH_OFFSET: &str = "DEVICE_TREE_IMAGE_FLASH_OFFSET";
pub const EMULATOR_IMAGE_FLASH_OFFSET: &str = "EMULATOR_IMAGE_FLASH_OFFSET";

/// Flash image layout used by the `linux` CPU variant.
pub const LINUX_FLASH_LAYOUT: [(&str, u64); 4] = [
    (KERNEL_IMAGE_FLASH_OFFSET, 0x0000_0000),
    (ROOTFS_IMAGE_FLASH_OFFSET, 0x0050_0000),
    (DEVICE_TREE_IMAGE_FLASH_OFFSET, 0x00d0_0000),
    (EMULATOR_IMAGE_FLASH_OFFSET, 0x00d8_0000),
];

/// The parts of a SoC configuration that flash layout constants are written into.
pub trait SocConstants {
    fn add_constant(&mut self, name: &str, value: u64);
    fn flash_boot_address(&self) -> u64;
    fn cpu_variant(&self) -> &str;
}

pub fn define_flash_constants<S: SocConstants + ?Sized>(soc: &mut S) {
    let boot = soc.flash_boot_address();
    soc.add_constant(FLASH_BOOT_ADDRESS, boot);
    if soc.cpu_variant() == "linux" {
        debug!("adding linux flash layout");
        for (name, offset) in LINUX_FLASH_LAYOUT {
            soc.add_constant(name, offset);
        }
    }
}

/// A plain SoC constant store, keeping constants in the order they were added.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConstantTable {
    pub cpu_variant: String,
    pub flash_boot_address: u64,
    pub constants: IndexMap<String, u64>,
}

impl ConstantTable {
    pub fn new(cpu_variant: &str, flash_boot_address: u64) -> Self {
        Self {
            cpu_variant: cpu_variant.to_string(),
            flash_boot_address,
            constants: IndexMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.constants.get(name).copied()
    }

    /// Renders the constants as C preprocessor definitions.
    pub fn to_c_header(&self) -> String {
        let mut res = String::new();
        for (name, value) in &self.constants {
            res.push_str(&format!("#define {name} 0x{value:08x}\n"));
        }
        res
    }
}

impl SocConstants for ConstantTable {
    fn add_constant(&mut self, name: &str, value: u64) {
        self.constants.insert(name.to_string(), value);
    }

    fn flash_boot_address(&self) -> u64 {
        self.flash_boot_address
    }

    fn cpu_variant(&self) -> &str {
        &self.cpu_variant
    }
}

#[test]
fn test_flash_constants_linux() {
    let mut soc = ConstantTable::new("linux", 0x0040_0000);
    define_flash_constants(&mut soc);
    assert_eq!(soc.get(FLASH_BOOT_ADDRESS), Some(0x0040_0000));
    assert_eq!(soc.get(KERNEL_IMAGE_FLASH_OFFSET), Some(0));
    assert_eq!(soc.get(ROOTFS_IMAGE_FLASH_OFFSET), Some(0x0050_0000));
    assert_eq!(soc.get(DEVICE_TREE_IMAGE_FLASH_OFFSET), Some(0x00d0_0000));
    assert_eq!(soc.get(EMULATOR_IMAGE_FLASH_OFFSET), Some(0x00d8_0000));
    assert_eq!(soc.constants.len(), 5);
    assert!(
        soc.to_c_header()
            .starts_with("#define FLASH_BOOT_ADDRESS 0x00400000\n#define KERNEL_IMAGE_FLASH_OFFSET 0x00000000\n")
    );
}

#[test]
fn test_flash_constants_other() {
    let mut soc = ConstantTable::new("standard", 0x20_0000);
    define_flash_constants(&mut soc);
    assert_eq!(soc.constants.len(), 1);
    assert_eq!(soc.get(FLASH_BOOT_ADDRESS), Some(0x20_0000));
    assert_eq!(soc.get(KERNEL_IMAGE_FLASH_OFFSET), None);
}
