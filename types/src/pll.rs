/// A PLL configuration whose output does not land on the requested frequency.
#[derive(Clone, Debug, PartialEq)]
pub struct PllClockError {
    pub msg: String,
    pub requested: f64,
    pub output_mhz: i64,
    pub input: f64,
    pub feedback: u32,
    pub divide: u32,
}

impl std::fmt::Display for PllClockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{msg} wants {req} but got {out} MHz (input={inp} MHz feedback={fb} divide={div})",
            msg = self.msg,
            req = self.requested,
            out = self.output_mhz,
            inp = (self.input / 1e6) as i64,
            fb = self.feedback,
            div = self.divide,
        )
    }
}

impl std::error::Error for PllClockError {}

/// Checks that `input * feedback / divide` matches `requested`, both truncated to whole MHz.
/// All frequencies are in Hz.
pub fn assert_pll_clock(
    requested: f64,
    input: f64,
    feedback: u32,
    divide: u32,
    msg: &str,
) -> Result<(), PllClockError> {
    let output_mhz = (input * feedback as f64 / divide as f64 / 1e6) as i64;
    if output_mhz == (requested / 1e6) as i64 {
        Ok(())
    } else {
        Err(PllClockError {
            msg: msg.to_string(),
            requested,
            output_mhz,
            input,
            feedback,
            divide,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_pll_ok() {
        assert_eq!(assert_pll_clock(100e6, 25e6, 16, 4, "test"), Ok(()));
        // sub-MHz differences are ignored
        assert_eq!(assert_pll_clock(100.4e6, 25e6, 16, 4, "test"), Ok(()));
    }

    #[test]
    fn test_pll_mismatch() {
        let err = assert_pll_clock(100e6, 25e6, 16, 5, "test");
        assert_matches!(err, Err(PllClockError { output_mhz: 80, .. }));
        assert_eq!(
            err.unwrap_err().to_string(),
            "test wants 100000000 but got 80 MHz (input=25 MHz feedback=16 divide=5)"
        );
    }
}
