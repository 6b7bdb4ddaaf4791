use crate::drivers::MotionOptions;
use crate::packets::{from_wire, to_wire};
use crate::{DriverError, FrameMode, JointAngles, Position};

/// Frame-mode switch: a single digit on the command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeCommand(pub FrameMode);

impl ModeCommand {
    pub fn encode(&self) -> &'static str {
        match self.0 {
            FrameMode::Joint => "0",
            FrameMode::World => "2",
        }
    }

    pub fn parse(message: &str) -> Result<Self, DriverError> {
        match message.trim() {
            "0" => Ok(ModeCommand(FrameMode::Joint)),
            "2" => Ok(ModeCommand(FrameMode::World)),
            other => Err(DriverError::MalformedMessage(format!(
                "'{}' is not a frame mode command",
                other
            ))),
        }
    }
}

/// Six target values followed by segment time, motion type and a terminal 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionCommand {
    pub target: [f64; 6],
    pub options: MotionOptions,
}

impl MotionCommand {
    pub fn from_position(position: &Position, options: MotionOptions) -> Self {
        Self {
            target: position.to_array(),
            options,
        }
    }

    pub fn from_joints(joints: &JointAngles, options: MotionOptions) -> Self {
        Self {
            target: joints.to_array(),
            options,
        }
    }

    pub fn position(&self) -> Position {
        Position::from_array(self.target)
    }

    pub fn joints(&self) -> JointAngles {
        JointAngles::from_array(self.target)
    }

    pub fn encode(&self) -> String {
        let [a, b, c, d, e, f] = self.target.map(to_wire);
        format!(
            "{} {} {} {} {} {} {} {} 0",
            a, b, c, d, e, f, self.options.segment_time, self.options.motion_type
        )
    }

    pub fn parse(message: &str) -> Result<Self, DriverError> {
        let fields: Vec<&str> = message.split_ascii_whitespace().collect();
        if fields.len() != 9 {
            return Err(DriverError::MalformedMessage(format!(
                "motion command needs 9 fields, got {}",
                fields.len()
            )));
        }
        let mut numbers = [0i64; 9];
        for (slot, field) in numbers.iter_mut().zip(&fields) {
            *slot = field.parse().map_err(|_| {
                DriverError::MalformedMessage(format!("'{}' is not an integer", field))
            })?;
        }
        if numbers[8] != 0 {
            return Err(DriverError::MalformedMessage(
                "motion command must end with 0".to_string(),
            ));
        }
        let narrow = |value: i64| {
            i32::try_from(value).map_err(|_| {
                DriverError::MalformedMessage(format!("{} is out of range", value))
            })
        };
        let mut target = [0.0; 6];
        for (slot, value) in target.iter_mut().zip(&numbers[..6]) {
            *slot = from_wire(*value);
        }
        Ok(Self {
            target,
            options: MotionOptions::new(narrow(numbers[6])?, narrow(numbers[7])?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_commands_are_single_digits() {
        assert_eq!(ModeCommand(FrameMode::World).encode(), "2");
        assert_eq!(ModeCommand(FrameMode::Joint).encode(), "0");
        assert_eq!(ModeCommand::parse("2").unwrap(), ModeCommand(FrameMode::World));
        assert!(ModeCommand::parse("1").is_err());
    }

    #[test]
    fn parse_reads_back_thousandths() {
        let command = MotionCommand::parse("962000 80000 700000 180000 0 0 10 2 0").unwrap();
        assert_eq!(command.position(), Position::new(962.0, 80.0, 700.0, 180.0, 0.0, 0.0));
        assert_eq!(command.options, MotionOptions::default());
    }

    #[test]
    fn parse_rejects_short_or_unterminated_messages() {
        assert!(MotionCommand::parse("1 2 3 4 5 6 10 2").is_err());
        assert!(MotionCommand::parse("1 2 3 4 5 6 10 2 7").is_err());
        assert!(MotionCommand::parse("1 2 x 4 5 6 10 2 0").is_err());
    }
}
