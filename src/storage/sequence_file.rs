// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Sequence text format.
//!
//! One step per line, `actuator,power,duration_ms`:
//!
//! ```text
//! # wave
//! 0, 50, 1000
//! 0, 0, 500
//! 1, -30, 1500
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. A line that does not parse is reported to
//! the log and dropped; the remaining lines still load. Power and duration are clamped into range.

use core::fmt::{self, Write};

use crate::control::{SequenceStep, Steps};
use crate::error::{Error, Result, SequenceFault};

/// Parse sequence text into steps.
///
/// Fails with `InvalidSequence` when no line is valid or there are more valid lines than a
/// sequence can hold.
pub fn parse_steps(text: &str, log: &mut impl Write) -> Result<Steps> {
    let mut steps = Steps::new();

    for (n, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Ok(step) => steps.push(step)?,
            Err(reason) => {
                let err = Error::MalformedLine { line: n + 1 };
                let _ = write!(log, "seq: {} dropped ({}): {}\r\n", err, reason, line);
            }
        }
    }

    if steps.is_empty() {
        return Err(Error::InvalidSequence(SequenceFault::Empty));
    }
    Ok(steps)
}

fn parse_line(line: &str) -> core::result::Result<SequenceStep, &'static str> {
    let mut fields = line.split(',').map(str::trim);
    let (Some(a), Some(p), Some(d), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err("expected 3 fields");
    };

    let actuator: usize = a.parse().map_err(|_| "bad actuator")?;
    let power: i32 = p.parse().map_err(|_| "bad power")?;
    let duration: i64 = d.parse().map_err(|_| "bad duration")?;

    SequenceStep::new(actuator, power, duration).map_err(|_| "actuator out of range")
}

/// Write steps in the text format.
pub fn write_steps(steps: &[SequenceStep], out: &mut impl Write) -> fmt::Result {
    for s in steps {
        writeln!(out, "{},{},{}", s.actuator(), s.power(), s.duration_ms())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_STEPS;

    #[test]
    fn parses_comments_blanks_and_spaces() {
        let text = "# wave\n\n0, 50, 1000\r\n 0,0,500\n1,-30,1500\n";
        let mut log = String::new();
        let steps = parse_steps(text, &mut log).unwrap();

        assert_eq!(
            steps.as_slice(),
            [
                SequenceStep::new(0, 50, 1000).unwrap(),
                SequenceStep::new(0, 0, 500).unwrap(),
                SequenceStep::new(1, -30, 1500).unwrap(),
            ]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn malformed_line_is_dropped_with_diagnostic() {
        let text = "0,50,1000\n0,fast,500\n1,-30,1500";
        let mut log = String::new();
        let steps = parse_steps(text, &mut log).unwrap();

        assert_eq!(steps.len(), 2);
        assert_eq!(steps.as_slice()[1].actuator(), 1);
        assert!(log.contains("malformed line 2"), "{}", log);
        assert!(log.contains("bad power"));
    }

    #[test]
    fn out_of_range_values() {
        let mut log = String::new();
        let steps = parse_steps("7,10,10\n0,500,99999\n1,2\n1,2,3,4", &mut log).unwrap();

        assert_eq!(steps.len(), 1);
        assert_eq!(steps.as_slice()[0].power(), 100);
        assert_eq!(steps.as_slice()[0].duration_ms(), 30_000);
        assert_eq!(log.matches("dropped").count(), 3);
    }

    #[test]
    fn nothing_valid_is_an_error() {
        let mut log = String::new();
        assert_eq!(
            parse_steps("# only a comment\nx,y,z", &mut log).unwrap_err(),
            Error::InvalidSequence(SequenceFault::Empty)
        );
    }

    #[test]
    fn too_many_lines_is_an_error() {
        let mut text = String::new();
        for _ in 0..=MAX_STEPS {
            text.push_str("0,10,10\n");
        }
        let mut log = String::new();
        assert_eq!(
            parse_steps(&text, &mut log).unwrap_err(),
            Error::InvalidSequence(SequenceFault::TooLong)
        );
    }

    #[test]
    fn written_steps_parse_back() {
        let steps = [
            SequenceStep::new(2, -75, 250).unwrap(),
            SequenceStep::new(5, 0, 0).unwrap(),
        ];
        let mut text = String::new();
        write_steps(&steps, &mut text).unwrap();
        assert_eq!(text, "2,-75,250\n5,0,0\n");

        let mut log = String::new();
        assert_eq!(parse_steps(&text, &mut log).unwrap().as_slice(), steps);
    }
}
