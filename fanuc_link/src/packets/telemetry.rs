use crate::packets::{from_wire, to_wire};
use crate::{DriverError, JointAngles};

/// Leading byte the guidance server puts in front of every telemetry message.
pub const TELEMETRY_PREFIX: char = '#';

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\n' || c == '\r' || c == '\t' || c == '\0'
}

/// Decodes one telemetry read. The first character is skipped unconditionally;
/// exactly six integer tokens are consumed and anything after them is ignored.
pub fn parse_joint_telemetry(payload: &[u8]) -> Result<JointAngles, DriverError> {
    let text = std::str::from_utf8(payload)
        .map_err(|_| DriverError::MalformedMessage("telemetry is not valid ASCII".to_string()))?;
    let mut chars = text.chars();
    chars.next();

    let mut values = [0.0; 6];
    let mut tokens = chars.as_str().split(is_separator).filter(|t| !t.is_empty());
    for (i, slot) in values.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| {
            DriverError::MalformedMessage(format!("expected 6 joint values, got {}", i))
        })?;
        let millidegrees: i64 = token.parse().map_err(|_| {
            DriverError::MalformedMessage(format!("'{}' is not an integer joint value", token))
        })?;
        *slot = from_wire(millidegrees);
    }
    Ok(JointAngles::from_array(values))
}

/// Telemetry message as the controller sends it, terminated by a newline.
pub fn encode_joint_telemetry(joints: &JointAngles) -> String {
    let values: Vec<String> = joints
        .to_array()
        .iter()
        .map(|v| to_wire(*v).to_string())
        .collect();
    format!("{}{}\n", TELEMETRY_PREFIX, values.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_ignored_whatever_it_is() {
        let joints = parse_joint_telemetry(b"J10 20 30 40 50 60").unwrap();
        assert_eq!(joints.to_array(), [0.01, 0.02, 0.03, 0.04, 0.05, 0.06]);
    }

    #[test]
    fn newlines_and_padding_separate_tokens() {
        let joints = parse_joint_telemetry(b"#0\n-90000  45500\n1 2 3\n\0\0\0").unwrap();
        assert_eq!(joints.to_array(), [0.0, -90.0, 45.5, 0.001, 0.002, 0.003]);
    }

    #[test]
    fn encoder_output_parses() {
        let joints = JointAngles::new(0.0, 12.5, -3.25, 0.0, -90.0, 180.0);
        let message = encode_joint_telemetry(&joints);
        assert_eq!(message, "#0 12500 -3250 0 -90000 180000\n");
        assert_eq!(parse_joint_telemetry(message.as_bytes()).unwrap(), joints);
    }
}
