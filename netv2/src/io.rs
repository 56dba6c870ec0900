use litebsp_types::io::{Constraint, IoGroup, Subsignal, iostandard as ios, misc, pins, pins_from};

fn sub(name: &str, constraints: Vec<Constraint>) -> Subsignal {
    Subsignal::new(name, constraints)
}

fn tmds(name: &str, pin: &str, inverted: bool) -> Subsignal {
    let mut c = vec![pins(pin), ios("TMDS_33")];
    if inverted {
        c.push(Constraint::Inverted);
    }
    sub(name, c)
}

fn pcie(name: &str, rx_p: &str, rx_n: &str, tx_p: &str, tx_n: &str) -> IoGroup {
    IoGroup::with_subsignals(
        name,
        0,
        vec![
            sub("rst_n", vec![pins("E18"), ios("LVCMOS33")]),
            sub("clk_p", vec![pins("F10")]),
            sub("clk_n", vec![pins("E10")]),
            sub("rx_p", vec![pins(rx_p)]),
            sub("rx_n", vec![pins(rx_n)]),
            sub("tx_p", vec![pins(tx_p)]),
            sub("tx_n", vec![pins(tx_n)]),
        ],
        vec![],
    )
}

/// The IO resources of the board.
pub fn io() -> Vec<IoGroup> {
    let mut res = vec![IoGroup::new("clk50", 0, vec![pins("J19"), ios("LVCMOS33")])];

    for (i, pin) in ["M21", "N20", "L21", "AA21", "R19", "M16"]
        .into_iter()
        .enumerate()
    {
        res.push(IoGroup::new(
            "user_led",
            i as u32,
            vec![pins(pin), ios("LVCMOS33")],
        ));
    }

    res.push(IoGroup::with_subsignals(
        "flash",
        0,
        vec![
            sub("cs_n", vec![pins("T19")]),
            sub("mosi", vec![pins("P22")]),
            sub("miso", vec![pins("R22")]),
            sub("vpp", vec![pins("P21")]),
            sub("hold", vec![pins("R21")]),
        ],
        vec![ios("LVCMOS33")],
    ));

    res.push(IoGroup::with_subsignals(
        "serial",
        0,
        vec![sub("tx", vec![pins("E14")]), sub("rx", vec![pins("E13")])],
        vec![ios("LVCMOS33")],
    ));

    res.push(IoGroup::with_subsignals(
        "ddram",
        0,
        vec![
            sub(
                "a",
                vec![
                    pins_from(&["U6 V4 W5 V5 AA1 Y2 AB1 AB3", "AB2 Y3 W6 Y1 V2 AA3"]),
                    ios("SSTL15_R"),
                ],
            ),
            sub("ba", vec![pins("U5 W4 V7"), ios("SSTL15_R")]),
            sub("ras_n", vec![pins("Y9"), ios("SSTL15_R")]),
            sub("cas_n", vec![pins("Y7"), ios("SSTL15_R")]),
            sub("we_n", vec![pins("V8"), ios("SSTL15_R")]),
            sub("dm", vec![pins("G1 H4 M5 L3"), ios("SSTL15_R")]),
            sub(
                "dq",
                vec![
                    pins_from(&[
                        "C2 F1 B1 F3 A1 D2 B2 E2",
                        "J5 H3 K1 H2 J1 G2 H5 G3",
                        "N2 M6 P1 N5 P2 N4 R1 P6",
                        "K3 M2 K4 M3 J6 L5 J4 K6",
                    ]),
                    ios("SSTL15_R"),
                    misc("IN_TERM=UNTUNED_SPLIT_40"),
                ],
            ),
            sub("dqs_p", vec![pins("E1 K2 P5 M1"), ios("DIFF_SSTL15_R")]),
            sub("dqs_n", vec![pins("D1 J2 P4 L1"), ios("DIFF_SSTL15_R")]),
            sub("clk_p", vec![pins("R3"), ios("DIFF_SSTL15_R")]),
            sub("clk_n", vec![pins("R2"), ios("DIFF_SSTL15_R")]),
            sub("cke", vec![pins("Y8"), ios("SSTL15_R")]),
            sub("odt", vec![pins("W9"), ios("SSTL15_R")]),
            sub("reset_n", vec![pins("AB5"), ios("LVCMOS15")]),
            sub("cs_n", vec![pins("V9"), ios("SSTL15_R")]),
        ],
        vec![misc("SLEW=FAST")],
    ));

    res.push(pcie("pcie_x1", "D11", "C11", "D5", "C5"));
    res.push(pcie("pcie_x2", "D11 B10", "C11 A10", "D5 B6", "C5 A6"));
    res.push(pcie(
        "pcie_x4",
        "D11 B10 D9 B8",
        "C11 A10 C9 A8",
        "D5 B6 D7 B4",
        "C5 A6 C7 A4",
    ));

    res.push(IoGroup::with_subsignals(
        "eth_clocks",
        0,
        vec![sub("ref_clk", vec![pins("D17")])],
        vec![ios("LVCMOS33")],
    ));

    res.push(IoGroup::with_subsignals(
        "eth",
        0,
        vec![
            sub("rst_n", vec![pins("F16")]),
            sub("rx_data", vec![pins("A20 B18")]),
            sub("crs_dv", vec![pins("C20")]),
            sub("tx_en", vec![pins("A19")]),
            sub("tx_data", vec![pins("C18 C19")]),
            sub("mdc", vec![pins("F14")]),
            sub("mdio", vec![pins("F13")]),
            sub("rx_er", vec![pins("B20")]),
            sub("int_n", vec![pins("D21")]),
        ],
        vec![ios("LVCMOS33")],
    ));

    res.push(IoGroup::with_subsignals(
        "sdcard",
        0,
        vec![
            sub("data", vec![pins("L15 L16 K14 M13"), misc("PULLUP True")]),
            sub("cmd", vec![pins("L13"), misc("PULLUP True")]),
            sub("clk", vec![pins("K18")]),
        ],
        vec![ios("LVCMOS33"), misc("SLEW=FAST")],
    ));

    res.push(IoGroup::with_subsignals(
        "hdmi_in",
        0,
        vec![
            tmds("clk_p", "L19", true),
            tmds("clk_n", "L20", true),
            tmds("data0_p", "K21", true),
            tmds("data0_n", "K22", true),
            tmds("data1_p", "J20", true),
            tmds("data1_n", "J21", true),
            tmds("data2_p", "J22", true),
            tmds("data2_n", "H22", true),
            sub("scl", vec![pins("T18"), ios("LVCMOS33")]),
            sub("sda", vec![pins("V18"), ios("LVCMOS33")]),
        ],
        vec![],
    ));

    res.push(IoGroup::with_subsignals(
        "hdmi_in",
        1,
        vec![
            tmds("clk_p", "Y18", true),
            tmds("clk_n", "Y19", true),
            tmds("data0_p", "AA18", false),
            tmds("data0_n", "AB18", false),
            tmds("data1_p", "AA19", true),
            tmds("data1_n", "AB20", true),
            tmds("data2_p", "AB21", true),
            tmds("data2_n", "AB22", true),
            sub("scl", vec![pins("W17"), ios("LVCMOS33"), Constraint::Inverted]),
            sub("sda", vec![pins("R17"), ios("LVCMOS33")]),
        ],
        vec![],
    ));

    res.push(IoGroup::with_subsignals(
        "hdmi_out",
        0,
        vec![
            tmds("clk_p", "W19", true),
            tmds("clk_n", "W20", true),
            tmds("data0_p", "W21", false),
            tmds("data0_n", "W22", false),
            tmds("data1_p", "U20", false),
            tmds("data1_n", "V20", false),
            tmds("data2_p", "T21", false),
            tmds("data2_n", "U21", false),
        ],
        vec![],
    ));

    res.push(IoGroup::with_subsignals(
        "hdmi_out",
        1,
        vec![
            tmds("clk_p", "G21", true),
            tmds("clk_n", "G22", true),
            tmds("data0_p", "E22", true),
            tmds("data0_n", "D22", true),
            tmds("data1_p", "C22", true),
            tmds("data1_n", "B22", true),
            tmds("data2_p", "B21", true),
            tmds("data2_n", "A21", true),
            sub("scl", vec![pins("P16"), ios("LVCMOS33")]),
            sub("sda", vec![pins("R16"), ios("LVCMOS33")]),
        ],
        vec![],
    ));

    res
}

/// Connector info for the HDMI ports: `(key, value)` pairs, mnemonic then description.
pub const HDMI_INFOS: [(&str, &str); 8] = [
    ("HDMI_OUT0_MNEMONIC", "TX1"),
    (
        "HDMI_OUT0_DESCRIPTION",
        "HDMI-A connector (marked TX0/J10H on PCB) located in the mounting bracket area, connector is the one closer to the DC Jack\\r\\n",
    ),
    ("HDMI_OUT1_MNEMONIC", "TX2"),
    (
        "HDMI_OUT1_DESCRIPTION",
        "HDMI-D connector (marked TX1/P10H on PCB) located on the top edge of the board, connector is the one closer to the DC Jack\\r\\n",
    ),
    ("HDMI_IN0_MNEMONIC", "RX1"),
    (
        "HDMI_IN0_DESCRIPTION",
        "HDMI-A connector (marked RX0/J11H on PCB) located in the mounting bracket area, connector is the one farther from the DC Jack\\r\\n",
    ),
    ("HDMI_IN1_MNEMONIC", "RX2"),
    (
        "HDMI_IN1_DESCRIPTION",
        "HDMI-A connector (marked OVERLAY/J12H on PCB) located on the top edge of the board, connector is the one farther from the DC Jack\\r\\n",
    ),
];
