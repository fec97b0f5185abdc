//! The JSON document written by `find-zeros`.

use std::io::Write;

use num::complex::Complex64;

/// One zero, projected to machine precision
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZeroRecord {
    pub real: f64,
    pub imag: f64,
}

impl From<Complex64> for ZeroRecord {
    fn from(z: Complex64) -> Self {
        Self {
            real: z.re,
            imag: z.im,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ZerosReport {
    pub filter_type: String,
    pub taps: usize,
    pub sigma: f64,
    pub dps: u32,
    pub zeros: Vec<ZeroRecord>,
}

impl ZerosReport {
    #[must_use]
    pub fn gauss(taps: usize, sigma: f64, dps: u32, zeros: &[Complex64]) -> Self {
        Self {
            filter_type: "gauss".to_owned(),
            taps,
            sigma,
            dps,
            zeros: zeros.iter().copied().map(ZeroRecord::from).collect(),
        }
    }

    /// Pretty printed JSON, indented by two spaces
    ///
    /// # Errors
    /// Passes on failures of the writer.
    pub fn write_json(&self, writer: impl Write) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }
}

#[cfg(test)]
mod test {
    use num::complex::Complex64;

    use super::ZerosReport;

    #[test]
    fn json_layout() {
        let report = ZerosReport::gauss(3, 1.0, 50, &[Complex64::new(-2.5, 0.0)]);
        let mut out = vec![];
        report.write_json(&mut out).unwrap();
        let expected = r#"{
  "filter_type": "gauss",
  "taps": 3,
  "sigma": 1.0,
  "dps": 50,
  "zeros": [
    {
      "real": -2.5,
      "imag": 0.0
    }
  ]
}"#;
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn empty_zeros() {
        let report = ZerosReport::gauss(7, 0.5, 20, &[]);
        let mut out = vec![];
        report.write_json(&mut out).unwrap();
        let parsed: ZerosReport = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, report);
        assert!(String::from_utf8(out).unwrap().contains(r#""zeros": []"#));
    }
}
